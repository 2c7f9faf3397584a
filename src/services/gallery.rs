use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{Gallery, GalleryFilter, GalleryInput, GalleryPatch};
use crate::services::authorization::{require_action, GalleryAction};
use crate::services::directory::UserDirectory;
use crate::store::GalleryStore;

/// Gallery CRUD. Mutations are gated through the authorization module;
/// concurrent edits by the owner are last-write-wins.
#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn GalleryStore>,
    users: Arc<dyn UserDirectory>,
}

impl GalleryService {
    pub fn new(store: Arc<dyn GalleryStore>, users: Arc<dyn UserDirectory>) -> Self {
        Self { store, users }
    }

    pub async fn create_gallery(
        &self,
        photographer_id: Uuid,
        input: GalleryInput,
    ) -> AppResult<Gallery> {
        input.validate()?;

        let owner = self.users.get_user_by_id(photographer_id).await?;
        if !owner.is_photographer() {
            return Err(AppError::Authorization(format!(
                "user {} is not a photographer",
                photographer_id
            )));
        }

        let gallery = Gallery::new(photographer_id, input);
        self.store.insert(&gallery).await?;
        info!("gallery {} created by {}", gallery.id, photographer_id);
        Ok(gallery)
    }

    pub async fn get_gallery(&self, id: Uuid) -> AppResult<Gallery> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("gallery", id))
    }

    pub async fn list_galleries(&self, filter: &GalleryFilter) -> AppResult<Vec<Gallery>> {
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(AppError::Validation(
                    "min_price must not exceed max_price".to_string(),
                ));
            }
        }
        self.store.list(filter).await
    }

    pub async fn update_gallery(
        &self,
        id: Uuid,
        actor_id: Uuid,
        patch: GalleryPatch,
    ) -> AppResult<Gallery> {
        patch.validate()?;

        let mut gallery = self.get_gallery(id).await?;
        require_action(actor_id, &gallery, GalleryAction::Edit)?;

        gallery.apply(patch);
        if !self.store.update(&gallery).await? {
            // Deleted between read and write.
            return Err(AppError::not_found("gallery", id));
        }
        info!("gallery {} updated by {}", id, actor_id);
        Ok(gallery)
    }

    /// A second delete of the same gallery reports `NotFound`.
    pub async fn delete_gallery(&self, id: Uuid, actor_id: Uuid) -> AppResult<()> {
        let gallery = self.get_gallery(id).await?;
        require_action(actor_id, &gallery, GalleryAction::Delete)?;

        if !self.store.delete(id).await? {
            return Err(AppError::not_found("gallery", id));
        }
        info!("gallery {} deleted by {}", id, actor_id);
        Ok(())
    }
}
