use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use super::{BookingStore, GalleryStore, ReviewStore, RoomStore};
use crate::error::{AppError, AppResult};
use crate::models::{Booking, BookingStatus, Gallery, GalleryFilter, NewRoom, Review, Room};

const GALLERY_COLUMNS: &str = "id, photographer_id, name, description, price, hours, location, \
     delivery_time, included, created_at, updated_at";

#[derive(Clone)]
pub struct PgGalleryStore {
    pool: PgPool,
}

impl PgGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryStore for PgGalleryStore {
    async fn insert(&self, gallery: &Gallery) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO galleries
                (id, photographer_id, name, description, price, hours, location,
                 delivery_time, included, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(gallery.id)
        .bind(gallery.photographer_id)
        .bind(&gallery.name)
        .bind(&gallery.description)
        .bind(gallery.price)
        .bind(gallery.hours)
        .bind(&gallery.location)
        .bind(gallery.delivery_time)
        .bind(&gallery.included)
        .bind(gallery.created_at)
        .bind(gallery.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Gallery>> {
        let q = format!("SELECT {} FROM galleries WHERE id = $1", GALLERY_COLUMNS);
        let gallery = sqlx::query_as::<_, Gallery>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(gallery)
    }

    async fn list(&self, filter: &GalleryFilter) -> AppResult<Vec<Gallery>> {
        let mut q = format!("SELECT {} FROM galleries WHERE TRUE", GALLERY_COLUMNS);
        let mut bind_idx = 1;
        if filter.photographer_id.is_some() {
            q.push_str(&format!(" AND photographer_id = ${}", bind_idx));
            bind_idx += 1;
        }
        if filter.location.is_some() {
            q.push_str(&format!(" AND location = ${}", bind_idx));
            bind_idx += 1;
        }
        if filter.min_price.is_some() {
            q.push_str(&format!(" AND price >= ${}", bind_idx));
            bind_idx += 1;
        }
        if filter.max_price.is_some() {
            q.push_str(&format!(" AND price <= ${}", bind_idx));
        }
        q.push_str(" ORDER BY created_at, id");

        let mut dbq = sqlx::query_as::<_, Gallery>(&q);
        if let Some(id) = filter.photographer_id {
            dbq = dbq.bind(id);
        }
        if let Some(ref location) = filter.location {
            dbq = dbq.bind(location.clone());
        }
        if let Some(min) = filter.min_price {
            dbq = dbq.bind(min);
        }
        if let Some(max) = filter.max_price {
            dbq = dbq.bind(max);
        }

        Ok(dbq.fetch_all(&self.pool).await?)
    }

    async fn update(&self, gallery: &Gallery) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE galleries
            SET name = $2, description = $3, price = $4, hours = $5, location = $6,
                delivery_time = $7, included = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(gallery.id)
        .bind(&gallery.name)
        .bind(&gallery.description)
        .bind(gallery.price)
        .bind(gallery.hours)
        .bind(&gallery.location)
        .bind(gallery.delivery_time)
        .bind(&gallery.included)
        .bind(gallery.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM galleries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(FromRow)]
struct RoomRow {
    id: Uuid,
    gallery_id: Uuid,
    photographer_id: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            gallery_id: row.gallery_id,
            member_ids: vec![row.photographer_id, row.customer_id],
            created_at: row.created_at,
        }
    }
}

#[derive(Clone)]
pub struct PgRoomStore {
    pool: PgPool,
}

impl PgRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn find_by_gallery_customer(
        &self,
        gallery_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, gallery_id, photographer_id, customer_id, created_at
            FROM rooms
            WHERE gallery_id = $1 AND customer_id = $2
            "#,
        )
        .bind(gallery_id)
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Room::from))
    }

    async fn insert(&self, room: NewRoom) -> AppResult<Room> {
        let candidate = room.into_room();
        // The unique index on (gallery_id, customer_id) decides the race.
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
            INSERT INTO rooms (id, gallery_id, photographer_id, customer_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (gallery_id, customer_id) DO NOTHING
            RETURNING id, gallery_id, photographer_id, customer_id, created_at
            "#,
        )
        .bind(candidate.id)
        .bind(room.gallery_id)
        .bind(room.photographer_id)
        .bind(room.customer_id)
        .bind(candidate.created_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Room::from).ok_or_else(|| {
            AppError::Conflict(format!(
                "room for gallery {} and customer {} already exists",
                room.gallery_id, room.customer_id
            ))
        })
    }
}

#[derive(FromRow)]
struct BookingRow {
    id: Uuid,
    gallery_id: Uuid,
    customer_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    resulted_price: Option<f64>,
    status: String,
}

#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, gallery_id, customer_id, start_time, end_time, resulted_price, status
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status = BookingStatus::parse(&row.status).ok_or_else(|| {
            warn!("booking {} has unknown status {:?}", row.id, row.status);
            AppError::Validation(format!("booking {} has unknown status", row.id))
        })?;

        Ok(Some(Booking {
            id: row.id,
            gallery_id: row.gallery_id,
            customer_id: row.customer_id,
            start_time: row.start_time,
            end_time: row.end_time,
            resulted_price: row.resulted_price,
            status,
        }))
    }
}

const REVIEW_COLUMNS: &str =
    "id, booking_id, gallery_id, photographer_id, customer_id, rating, review_text, created_at";

#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(&self, column: &str, id: Uuid) -> AppResult<Vec<Review>> {
        let q = format!(
            "SELECT {} FROM reviews WHERE {} = $1 ORDER BY created_at, id",
            REVIEW_COLUMNS, column
        );
        let reviews = sqlx::query_as::<_, Review>(&q)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn insert(&self, review: &Review) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews
                (id, booking_id, gallery_id, photographer_id, customer_id, rating,
                 review_text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (booking_id) DO NOTHING
            "#,
        )
        .bind(review.id)
        .bind(review.booking_id)
        .bind(review.gallery_id)
        .bind(review.photographer_id)
        .bind(review.customer_id)
        .bind(review.rating)
        .bind(&review.review_text)
        .bind(review.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!(
                "booking {} is already reviewed",
                review.booking_id
            )));
        }
        Ok(())
    }

    async fn list_by_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<Review>> {
        self.list_where("gallery_id", gallery_id).await
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Review>> {
        self.list_where("customer_id", customer_id).await
    }

    async fn list_by_photographer(&self, photographer_id: Uuid) -> AppResult<Vec<Review>> {
        self.list_where("photographer_id", photographer_id).await
    }

    async fn rating_totals(&self, gallery_id: Uuid) -> AppResult<(i64, i64)> {
        let totals: (i64, i64) = sqlx::query_as(
            "SELECT COALESCE(SUM(rating), 0)::BIGINT, COUNT(*) FROM reviews WHERE gallery_id = $1",
        )
        .bind(gallery_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(totals)
    }
}
