use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthViewer;
use crate::models::Room;
use crate::services::authorization::{require_action, GalleryAction};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/rooms", post(create_room))
        .route("/rooms/by-gallery/{gallery_id}", get(room_by_gallery))
}

#[derive(Debug, Serialize)]
struct RoomLookupResponse {
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Room>,
}

// GET /api/rooms/by-gallery/{gallery_id}
async fn room_by_gallery(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(gallery_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let room = state.rooms.find_room(gallery_id, viewer.id).await?;
    Ok(Json(RoomLookupResponse {
        exists: room.is_some(),
        data: room,
    }))
}

#[derive(Debug, Deserialize)]
struct CreateRoomRequest {
    #[serde(default)]
    member_ids: Vec<Uuid>,
    gallery_id: Uuid,
}

// POST /api/rooms
// Returns the existing room when the viewer already has one for this gallery.
async fn create_room(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<impl IntoResponse> {
    let gallery = state.galleries.get_gallery(req.gallery_id).await?;
    require_action(viewer.id, &gallery, GalleryAction::Chat)?;

    if !req.member_ids.contains(&gallery.photographer_id) {
        return Err(AppError::Validation(
            "member_ids must include the gallery's photographer".to_string(),
        ));
    }
    if let Some(stranger) = req
        .member_ids
        .iter()
        .find(|id| **id != gallery.photographer_id && **id != viewer.id)
    {
        return Err(AppError::Validation(format!(
            "{} cannot be a member of this room",
            stranger
        )));
    }

    let room = state.rooms.ensure_room(req.gallery_id, viewer.id).await?;
    Ok(Json(serde_json::json!({ "status": "success", "data": room })))
}
