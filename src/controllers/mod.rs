pub mod galleries;
pub mod reviews;
pub mod rooms;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(galleries::routes())
        .merge(reviews::routes())
        .merge(rooms::routes())
}
