pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::{Config, StorageBackend};
use crate::services::{
    booking::BookingResolver,
    directory::{HttpDirectory, PhotoStorage, UserDirectory},
    gallery::GalleryService,
    presentation::GalleryPresentation,
    reviews::ReviewService,
    rooms::RoomCoordinator,
};
use crate::store::{
    BookingStore, GalleryStore, MemoryBookingStore, MemoryGalleryStore, MemoryReviewStore,
    MemoryRoomStore, ReviewStore, RoomStore,
};

/// Backing stores, one per owned record type.
#[derive(Clone)]
pub struct Stores {
    pub galleries: Arc<dyn GalleryStore>,
    pub rooms: Arc<dyn RoomStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub reviews: Arc<dyn ReviewStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Stores {
            galleries: Arc::new(MemoryGalleryStore::new()),
            rooms: Arc::new(MemoryRoomStore::new()),
            bookings: Arc::new(MemoryBookingStore::new()),
            reviews: Arc::new(MemoryReviewStore::new()),
        }
    }

    async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let stores = match config.app.storage {
            StorageBackend::Memory => {
                warn!("Using in-memory storage, data is lost on restart");
                Stores::in_memory()
            }
            StorageBackend::Postgres => {
                let db = database::Database::connect(&config.database).await?;
                info!("Database connected");
                db.run_migrations().await?;
                Stores {
                    galleries: Arc::new(db.gallery_store()),
                    rooms: Arc::new(db.room_store()),
                    bookings: Arc::new(db.booking_store()),
                    reviews: Arc::new(db.review_store()),
                }
            }
        };

        let Some(ref url) = config.redis.url else {
            return Ok(stores);
        };
        let redis = redis_client::RedisClient::new(url).await?;
        info!("Redis connected, gallery cache enabled");
        let cache = cache::CacheService::new(redis, config.redis.gallery_ttl_seconds);
        Ok(Stores {
            galleries: Arc::new(cache::CachedGalleryStore::new(stores.galleries, cache)),
            ..stores
        })
    }
}

// Shared state for the whole application
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub galleries: GalleryService,
    pub rooms: RoomCoordinator,
    pub bookings: BookingResolver,
    pub reviews: ReviewService,
    pub presentation: GalleryPresentation,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let stores = Stores::from_config(&config).await?;
        let directory = Arc::new(HttpDirectory::from_config(
            &config.directory,
            &config.circuit_breaker,
        )?);
        Ok(Self::from_parts(config, stores, directory.clone(), directory))
    }

    pub fn from_parts(
        config: Config,
        stores: Stores,
        users: Arc<dyn UserDirectory>,
        photos: Arc<dyn PhotoStorage>,
    ) -> Arc<Self> {
        let galleries = GalleryService::new(stores.galleries.clone(), users.clone());
        let reviews = ReviewService::new(
            stores.galleries.clone(),
            stores.bookings.clone(),
            stores.reviews,
        );
        Arc::new(Self {
            rooms: RoomCoordinator::new(stores.galleries.clone(), stores.rooms),
            bookings: BookingResolver::new(stores.galleries, stores.bookings),
            presentation: GalleryPresentation::new(
                galleries.clone(),
                reviews.clone(),
                users,
                photos,
            ),
            reviews,
            galleries,
            config,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Shootbook API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
