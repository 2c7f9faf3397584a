use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::store::{PgBookingStore, PgGalleryStore, PgReviewStore, PgRoomStore};

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set for postgres storage"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;

        Ok(Database { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations").run(&self.pool).await?;
        info!("Migrations completed");
        Ok(())
    }

    pub fn gallery_store(&self) -> PgGalleryStore {
        PgGalleryStore::new(self.pool.clone())
    }

    pub fn room_store(&self) -> PgRoomStore {
        PgRoomStore::new(self.pool.clone())
    }

    pub fn booking_store(&self) -> PgBookingStore {
        PgBookingStore::new(self.pool.clone())
    }

    pub fn review_store(&self) -> PgReviewStore {
        PgReviewStore::new(self.pool.clone())
    }
}
