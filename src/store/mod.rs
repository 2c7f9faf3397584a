//! Persistence seams.
//!
//! Each store exclusively owns its records. Uniqueness of rooms is enforced
//! by the store itself: `RoomStore::insert` reports a duplicate
//! `(gallery_id, customer_id)` key as [`AppError::Conflict`](crate::error::AppError::Conflict), never as a
//! second row.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Booking, Gallery, GalleryFilter, NewRoom, Review, Room};

pub use memory::{MemoryBookingStore, MemoryGalleryStore, MemoryReviewStore, MemoryRoomStore};
pub use postgres::{PgBookingStore, PgGalleryStore, PgReviewStore, PgRoomStore};

#[async_trait]
pub trait GalleryStore: Send + Sync {
    async fn insert(&self, gallery: &Gallery) -> AppResult<()>;
    async fn find(&self, id: Uuid) -> AppResult<Option<Gallery>>;
    async fn list(&self, filter: &GalleryFilter) -> AppResult<Vec<Gallery>>;
    /// Replaces the stored record. Returns `false` when `gallery.id` is absent.
    async fn update(&self, gallery: &Gallery) -> AppResult<bool>;
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Room of `gallery_id` whose customer member is `customer_id`.
    /// The photographer side never matches.
    async fn find_by_gallery_customer(
        &self,
        gallery_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<Option<Room>>;
    async fn insert(&self, room: NewRoom) -> AppResult<Room>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// A second review of the same booking is a `Conflict`.
    async fn insert(&self, review: &Review) -> AppResult<()>;
    async fn list_by_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<Review>>;
    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Review>>;
    async fn list_by_photographer(&self, photographer_id: Uuid) -> AppResult<Vec<Review>>;
    /// `(sum of ratings, number of reviews)` for a gallery.
    async fn rating_totals(&self, gallery_id: Uuid) -> AppResult<(i64, i64)>;
}
