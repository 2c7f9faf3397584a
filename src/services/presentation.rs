use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Gallery, RatingSummary, User};
use crate::services::authorization::{gallery_actions, GalleryActions};
use crate::services::booking::{resolve_display_terms, DisplayTerms};
use crate::services::directory::{PhotoStorage, UserDirectory};
use crate::services::gallery::GalleryService;
use crate::services::reviews::ReviewService;

/// Everything a gallery page needs for one viewer.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub gallery: Gallery,
    pub photographer: User,
    pub photo_urls: Vec<String>,
    pub actions: GalleryActions,
    pub terms: DisplayTerms,
    pub rating: RatingSummary,
}

#[derive(Clone)]
pub struct GalleryPresentation {
    galleries: GalleryService,
    reviews: ReviewService,
    users: Arc<dyn UserDirectory>,
    photos: Arc<dyn PhotoStorage>,
}

impl GalleryPresentation {
    pub fn new(
        galleries: GalleryService,
        reviews: ReviewService,
        users: Arc<dyn UserDirectory>,
        photos: Arc<dyn PhotoStorage>,
    ) -> Self {
        Self {
            galleries,
            reviews,
            users,
            photos,
        }
    }

    pub async fn view(&self, gallery_id: Uuid, viewer_id: Uuid) -> AppResult<GalleryView> {
        let gallery = self.galleries.get_gallery(gallery_id).await?;

        let (photographer, photo_urls, rating) = futures::try_join!(
            self.users.get_user_by_id(gallery.photographer_id),
            self.photos.photo_urls_in_gallery(gallery_id),
            self.reviews.rating_summary(gallery_id),
        )?;

        Ok(GalleryView {
            actions: gallery_actions(viewer_id, &gallery),
            terms: resolve_display_terms(&gallery, None),
            gallery,
            photographer,
            photo_urls,
            rating,
        })
    }
}
