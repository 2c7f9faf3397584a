use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{BookingStatus, RatingSummary, Review, ReviewInput};
use crate::store::{BookingStore, GalleryStore, ReviewStore};

/// Reviews written by customers about their own bookings.
#[derive(Clone)]
pub struct ReviewService {
    galleries: Arc<dyn GalleryStore>,
    bookings: Arc<dyn BookingStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl ReviewService {
    pub fn new(
        galleries: Arc<dyn GalleryStore>,
        bookings: Arc<dyn BookingStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> Self {
        Self {
            galleries,
            bookings,
            reviews,
        }
    }

    pub async fn create_review(&self, customer_id: Uuid, input: ReviewInput) -> AppResult<Review> {
        input.validate()?;

        let booking = self
            .bookings
            .find(input.booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("booking", input.booking_id))?;

        if booking.customer_id != customer_id {
            return Err(AppError::Authorization(format!(
                "booking {} belongs to another customer",
                booking.id
            )));
        }
        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::Validation(format!(
                "booking {} was cancelled and cannot be reviewed",
                booking.id
            )));
        }

        let gallery = self
            .galleries
            .find(booking.gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found("gallery", booking.gallery_id))?;

        let review = Review {
            id: Uuid::new_v4(),
            booking_id: booking.id,
            gallery_id: gallery.id,
            photographer_id: gallery.photographer_id,
            customer_id,
            rating: input.rating,
            review_text: input.review_text,
            created_at: Utc::now(),
        };
        self.reviews.insert(&review).await?;
        info!(
            "review {} ({} stars) for booking {} by {}",
            review.id, review.rating, review.booking_id, customer_id
        );
        Ok(review)
    }

    pub async fn gallery_reviews(&self, gallery_id: Uuid) -> AppResult<Vec<Review>> {
        self.galleries
            .find(gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found("gallery", gallery_id))?;
        self.reviews.list_by_gallery(gallery_id).await
    }

    pub async fn customer_reviews(&self, customer_id: Uuid) -> AppResult<Vec<Review>> {
        self.reviews.list_by_customer(customer_id).await
    }

    pub async fn photographer_reviews(&self, photographer_id: Uuid) -> AppResult<Vec<Review>> {
        self.reviews.list_by_photographer(photographer_id).await
    }

    pub async fn rating_summary(&self, gallery_id: Uuid) -> AppResult<RatingSummary> {
        let (sum, count) = self.reviews.rating_totals(gallery_id).await?;
        Ok(RatingSummary::from_totals(sum, count))
    }
}
