//! Ownership gate.
//!
//! `is_owner` and `gallery_actions` are the only places that compare an actor
//! with `gallery.photographer_id`. Everything ownership-gated asks them.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Gallery;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GalleryAction {
    Edit,
    Delete,
    Chat,
}

pub type GalleryActions = BTreeSet<GalleryAction>;

pub fn is_owner(actor_id: Uuid, gallery: &Gallery) -> bool {
    actor_id == gallery.photographer_id
}

/// Owners may edit and delete; everyone else may only start a chat.
pub fn gallery_actions(viewer_id: Uuid, gallery: &Gallery) -> GalleryActions {
    if is_owner(viewer_id, gallery) {
        [GalleryAction::Edit, GalleryAction::Delete].into_iter().collect()
    } else {
        [GalleryAction::Chat].into_iter().collect()
    }
}

pub fn require_action(
    viewer_id: Uuid,
    gallery: &Gallery,
    action: GalleryAction,
) -> AppResult<()> {
    if gallery_actions(viewer_id, gallery).contains(&action) {
        return Ok(());
    }
    let reason = match action {
        GalleryAction::Edit => "only the owning photographer can edit this gallery",
        GalleryAction::Delete => "only the owning photographer can delete this gallery",
        GalleryAction::Chat => "photographers cannot open a chat on their own gallery",
    };
    Err(AppError::Authorization(format!("{} ({})", reason, gallery.id)))
}
