//! Room coordination: one conversation room per (gallery, customer) pair.
//!
//! Per key the room is either absent or established, and never goes back.
//! The find-then-create sequence is not atomic by itself; the store's
//! uniqueness constraint decides concurrent creations and the loser re-reads
//! the winner's room once before giving up with `Conflict`.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewRoom, Room};
use crate::store::{GalleryStore, RoomStore};

#[derive(Clone)]
pub struct RoomCoordinator {
    galleries: Arc<dyn GalleryStore>,
    rooms: Arc<dyn RoomStore>,
}

impl RoomCoordinator {
    pub fn new(galleries: Arc<dyn GalleryStore>, rooms: Arc<dyn RoomStore>) -> Self {
        Self { galleries, rooms }
    }

    /// Existing room of `customer_id` on `gallery_id`, without side effects.
    /// The gallery's photographer is never a customer, so they get `None`.
    pub async fn find_room(&self, gallery_id: Uuid, customer_id: Uuid) -> AppResult<Option<Room>> {
        self.rooms.find_by_gallery_customer(gallery_id, customer_id).await
    }

    pub async fn ensure_room(&self, gallery_id: Uuid, customer_id: Uuid) -> AppResult<Room> {
        let gallery = self
            .galleries
            .find(gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found("gallery", gallery_id))?;

        // Independent of stored rooms: the owner is rejected even after
        // customers have rooms on this gallery.
        if customer_id == gallery.photographer_id {
            return Err(AppError::Validation(
                "a room needs two distinct members".to_string(),
            ));
        }

        if let Some(room) = self.find_room(gallery_id, customer_id).await? {
            return Ok(room);
        }

        let new_room = NewRoom {
            gallery_id,
            photographer_id: gallery.photographer_id,
            customer_id,
        };

        match self.rooms.insert(new_room).await {
            Ok(room) => {
                info!(
                    "room {} created for gallery {} and customer {}",
                    room.id, gallery_id, customer_id
                );
                Ok(room)
            }
            Err(AppError::Conflict(reason)) => {
                warn!("room creation raced ({}), re-reading", reason);
                self.find_room(gallery_id, customer_id)
                    .await?
                    .ok_or(AppError::Conflict(reason))
            }
            Err(e) => Err(e),
        }
    }

    /// Room the viewer should be sent to when pressing "Chat" on a gallery.
    /// Callers gate on `GalleryAction::Chat` first.
    pub async fn navigate_or_create_chat(
        &self,
        gallery_id: Uuid,
        viewer_id: Uuid,
    ) -> AppResult<Uuid> {
        Ok(self.ensure_room(gallery_id, viewer_id).await?.id)
    }
}
