//! In-process stores for `STORAGE_BACKEND=memory` and the test suite.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingStore, GalleryStore, ReviewStore, RoomStore};
use crate::error::{AppError, AppResult};
use crate::models::{Booking, Gallery, GalleryFilter, NewRoom, Review, Room};

#[derive(Clone, Default)]
pub struct MemoryGalleryStore {
    galleries: Arc<RwLock<HashMap<Uuid, Gallery>>>,
}

impl MemoryGalleryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryStore for MemoryGalleryStore {
    async fn insert(&self, gallery: &Gallery) -> AppResult<()> {
        let mut galleries = self.galleries.write().await;
        if galleries.contains_key(&gallery.id) {
            return Err(AppError::Conflict(format!(
                "gallery {} already exists",
                gallery.id
            )));
        }
        galleries.insert(gallery.id, gallery.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Gallery>> {
        Ok(self.galleries.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: &GalleryFilter) -> AppResult<Vec<Gallery>> {
        let galleries = self.galleries.read().await;
        let mut found: Vec<Gallery> = galleries
            .values()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn update(&self, gallery: &Gallery) -> AppResult<bool> {
        let mut galleries = self.galleries.write().await;
        match galleries.get_mut(&gallery.id) {
            Some(stored) => {
                *stored = gallery.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.galleries.write().await.remove(&id).is_some())
    }
}

/// Rooms keyed by `(gallery_id, customer_id)`; the write lock makes
/// check-and-insert a single step.
#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<RwLock<HashMap<(Uuid, Uuid), Room>>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn find_by_gallery_customer(
        &self,
        gallery_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<Option<Room>> {
        Ok(self.rooms.read().await.get(&(gallery_id, customer_id)).cloned())
    }

    async fn insert(&self, room: NewRoom) -> AppResult<Room> {
        let mut rooms = self.rooms.write().await;
        let key = (room.gallery_id, room.customer_id);
        if rooms.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "room for gallery {} and customer {} already exists",
                room.gallery_id, room.customer_id
            )));
        }
        let created = room.into_room();
        rooms.insert(key, created.clone());
        Ok(created)
    }
}

#[derive(Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookings are written by the booking workflow; this seeds them.
    pub async fn put(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }
}

/// Reviews keyed by booking, one per booking.
#[derive(Clone, Default)]
pub struct MemoryReviewStore {
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
}

impl MemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select(&self, keep: impl Fn(&Review) -> bool) -> Vec<Review> {
        let reviews = self.reviews.read().await;
        let mut found: Vec<Review> = reviews.values().filter(|r| keep(r)).cloned().collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        found
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn insert(&self, review: &Review) -> AppResult<()> {
        let mut reviews = self.reviews.write().await;
        if reviews.contains_key(&review.booking_id) {
            return Err(AppError::Conflict(format!(
                "booking {} is already reviewed",
                review.booking_id
            )));
        }
        reviews.insert(review.booking_id, review.clone());
        Ok(())
    }

    async fn list_by_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<Review>> {
        Ok(self.select(|r| r.gallery_id == gallery_id).await)
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Review>> {
        Ok(self.select(|r| r.customer_id == customer_id).await)
    }

    async fn list_by_photographer(&self, photographer_id: Uuid) -> AppResult<Vec<Review>> {
        Ok(self.select(|r| r.photographer_id == photographer_id).await)
    }

    async fn rating_totals(&self, gallery_id: Uuid) -> AppResult<(i64, i64)> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .values()
            .filter(|r| r.gallery_id == gallery_id)
            .fold((0, 0), |(sum, count), r| (sum + i64::from(r.rating), count + 1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_room_insert_rejects_duplicate_key() {
        let store = MemoryRoomStore::new();
        let new_room = NewRoom {
            gallery_id: Uuid::new_v4(),
            photographer_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
        };

        let first = store.insert(new_room).await.unwrap();
        let second = store.insert(new_room).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(store.count().await, 1);

        let found = store
            .find_by_gallery_customer(new_room.gallery_id, new_room.customer_id)
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_photographer_side_never_matches() {
        let store = MemoryRoomStore::new();
        let new_room = NewRoom {
            gallery_id: Uuid::new_v4(),
            photographer_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
        };
        store.insert(new_room).await.unwrap();

        let found = store
            .find_by_gallery_customer(new_room.gallery_id, new_room.photographer_id)
            .await
            .unwrap();
        assert_eq!(found, None);
    }
}
