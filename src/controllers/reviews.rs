use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::AuthViewer;
use crate::models::ReviewInput;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/mine", get(my_reviews))
        .route("/galleries/{id}/reviews", get(gallery_reviews))
        .route("/photographers/{id}/reviews", get(photographer_reviews))
}

// POST /api/reviews
async fn create_review(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
    Json(input): Json<ReviewInput>,
) -> AppResult<impl IntoResponse> {
    let review = state.reviews.create_review(viewer.id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "data": review })),
    ))
}

// GET /api/reviews/mine
async fn my_reviews(
    State(state): State<Arc<AppState>>,
    AuthViewer(viewer): AuthViewer,
) -> AppResult<impl IntoResponse> {
    let reviews = state.reviews.customer_reviews(viewer.id).await?;
    Ok(Json(json!({
        "status": "success",
        "count": reviews.len(),
        "data": reviews,
    })))
}

// GET /api/galleries/{id}/reviews
async fn gallery_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.reviews.gallery_reviews(id).await?;
    let rating = state.reviews.rating_summary(id).await?;
    Ok(Json(json!({
        "status": "success",
        "rating": rating,
        "data": reviews,
    })))
}

// GET /api/photographers/{id}/reviews
async fn photographer_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.reviews.photographer_reviews(id).await?;
    Ok(Json(json!({
        "status": "success",
        "count": reviews.len(),
        "data": reviews,
    })))
}
