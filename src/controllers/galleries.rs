use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthViewer;
use crate::models::{GalleryFilter, GalleryInput, GalleryPatch};
use crate::services::authorization::{require_action, GalleryAction};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/galleries", get(list_galleries).post(create_gallery))
        .route(
            "/galleries/{id}",
            get(get_gallery).put(update_gallery).delete(delete_gallery),
        )
        .route("/galleries/{id}/view", get(view_gallery))
        .route("/galleries/{id}/terms", get(gallery_terms))
        .route("/galleries/{id}/chat", post(start_chat))
}

// GET /api/galleries
async fn list_galleries(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<GalleryFilter>,
) -> AppResult<impl IntoResponse> {
    let galleries = state.galleries.list_galleries(&filter).await?;
    Ok(Json(json!({
        "status": "success",
        "count": galleries.len(),
        "data": galleries,
    })))
}

// POST /api/galleries
async fn create_gallery(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<GalleryInput>,
) -> AppResult<impl IntoResponse> {
    // Session role first; the directory record is checked by the service.
    if !viewer.is_photographer() {
        return Err(AppError::Authorization(
            "only photographers can create galleries".to_string(),
        ));
    }
    let gallery = state.galleries.create_gallery(viewer.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "data": gallery })),
    ))
}

// GET /api/galleries/{id}
async fn get_gallery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let gallery = state.galleries.get_gallery(id).await?;
    Ok(Json(json!({ "status": "success", "data": gallery })))
}

// PUT /api/galleries/{id}
async fn update_gallery(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(id): Path<Uuid>,
    Json(patch): Json<GalleryPatch>,
) -> AppResult<impl IntoResponse> {
    let gallery = state.galleries.update_gallery(id, viewer.id, patch).await?;
    Ok(Json(json!({ "status": "success", "data": gallery })))
}

// DELETE /api/galleries/{id}
async fn delete_gallery(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.galleries.delete_gallery(id, viewer.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/galleries/{id}/view
async fn view_gallery(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let view = state.presentation.view(id, viewer.id).await?;
    Ok(Json(json!({ "status": "success", "data": view })))
}

#[derive(Debug, Deserialize)]
struct TermsQuery {
    booking_id: Option<Uuid>,
}

// GET /api/galleries/{id}/terms?booking_id=
async fn gallery_terms(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(id): Path<Uuid>,
    Query(params): Query<TermsQuery>,
) -> AppResult<impl IntoResponse> {
    let terms = state
        .bookings
        .display_terms(id, params.booking_id, viewer.id)
        .await?;
    Ok(Json(json!({ "status": "success", "data": terms })))
}

// POST /api/galleries/{id}/chat
async fn start_chat(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let gallery = state.galleries.get_gallery(id).await?;
    require_action(viewer.id, &gallery, GalleryAction::Chat)?;

    let room_id = state.rooms.navigate_or_create_chat(id, viewer.id).await?;
    Ok(Json(json!({ "status": "success", "room_id": room_id })))
}
