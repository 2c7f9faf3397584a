use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Booking, Gallery};
use crate::services::authorization::is_owner;
use crate::store::{BookingStore, GalleryStore};

/// Terms shown for a gallery, optionally through the lens of one booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTerms {
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<[DateTime<Utc>; 2]>,
    pub hours: f64,
    pub location: String,
    pub delivery_time: i32,
    pub included: Vec<String>,
}

/// A booking overrides the price and adds a schedule. Service terms
/// (hours, location, delivery time, inclusions) always come from the gallery.
pub fn resolve_display_terms(gallery: &Gallery, booking: Option<&Booking>) -> DisplayTerms {
    let (price, schedule) = match booking {
        Some(b) => (
            b.resulted_price.unwrap_or(gallery.price),
            Some(b.schedule()),
        ),
        None => (gallery.price, None),
    };

    DisplayTerms {
        price,
        schedule,
        hours: gallery.hours,
        location: gallery.location.clone(),
        delivery_time: gallery.delivery_time,
        included: gallery.included.clone(),
    }
}

#[derive(Clone)]
pub struct BookingResolver {
    galleries: Arc<dyn GalleryStore>,
    bookings: Arc<dyn BookingStore>,
}

impl BookingResolver {
    pub fn new(galleries: Arc<dyn GalleryStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self { galleries, bookings }
    }

    /// Loads a booking that belongs to `gallery` and may be seen by `viewer_id`.
    pub async fn booking_for(
        &self,
        gallery: &Gallery,
        booking_id: Uuid,
        viewer_id: Uuid,
    ) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("booking", booking_id))?;

        if booking.gallery_id != gallery.id {
            return Err(AppError::Validation(format!(
                "booking {} does not belong to gallery {}",
                booking.id, gallery.id
            )));
        }
        if viewer_id != booking.customer_id && !is_owner(viewer_id, gallery) {
            return Err(AppError::Authorization(format!(
                "booking {} belongs to another customer",
                booking.id
            )));
        }
        if !booking.has_valid_schedule() {
            warn!("booking {} ends before it starts", booking.id);
            return Err(AppError::Validation(format!(
                "booking {} has start_time >= end_time",
                booking.id
            )));
        }

        Ok(booking)
    }

    pub async fn display_terms(
        &self,
        gallery_id: Uuid,
        booking_id: Option<Uuid>,
        viewer_id: Uuid,
    ) -> AppResult<DisplayTerms> {
        let gallery = self
            .galleries
            .find(gallery_id)
            .await?
            .ok_or_else(|| AppError::not_found("gallery", gallery_id))?;

        let booking = match booking_id {
            Some(id) => Some(self.booking_for(&gallery, id, viewer_id).await?),
            None => None,
        };

        Ok(resolve_display_terms(&gallery, booking.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, GalleryInput};
    use chrono::Duration;
    use proptest::prelude::*;

    fn gallery(price: f64) -> Gallery {
        Gallery::new(
            Uuid::new_v4(),
            GalleryInput {
                name: "Graduation".into(),
                description: "Campus shoot".into(),
                price,
                hours: 3.0,
                location: "Chulalongkorn University".into(),
                delivery_time: 5,
                included: vec!["50 photos".into()],
            },
        )
    }

    fn booking_for(gallery: &Gallery, resulted_price: Option<f64>) -> Booking {
        let t0 = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            gallery_id: gallery.id,
            customer_id: Uuid::new_v4(),
            start_time: t0,
            end_time: t0 + Duration::hours(3),
            resulted_price,
            status: BookingStatus::UserPaid,
        }
    }

    #[test]
    fn test_listing_terms_without_booking() {
        let g = gallery(3000.0);
        let terms = resolve_display_terms(&g, None);

        assert_eq!(terms.price, 3000.0);
        assert_eq!(terms.schedule, None);
        assert_eq!(terms.hours, g.hours);
    }

    #[test]
    fn test_booking_overrides_price_and_adds_schedule() {
        let g = gallery(3000.0);
        let b = booking_for(&g, Some(2500.0));
        let terms = resolve_display_terms(&g, Some(&b));

        assert_eq!(terms.price, 2500.0);
        assert_eq!(terms.schedule, Some([b.start_time, b.end_time]));
        assert_eq!(terms.hours, g.hours);
        assert_eq!(terms.location, g.location);
        assert_eq!(terms.delivery_time, g.delivery_time);
        assert_eq!(terms.included, g.included);
    }

    #[test]
    fn test_booking_without_resulted_price_falls_back() {
        let g = gallery(1800.0);
        let b = booking_for(&g, None);
        let terms = resolve_display_terms(&g, Some(&b));

        assert_eq!(terms.price, 1800.0);
        assert!(terms.schedule.is_some());
    }

    #[test]
    fn test_schedule_serialized_as_pair() {
        let g = gallery(1000.0);
        let without = serde_json::to_value(resolve_display_terms(&g, None)).unwrap();
        assert!(without.get("schedule").is_none());

        let b = booking_for(&g, Some(900.0));
        let with = serde_json::to_value(resolve_display_terms(&g, Some(&b))).unwrap();
        assert_eq!(with["schedule"].as_array().map(|a| a.len()), Some(2));
    }

    proptest! {
        #[test]
        fn prop_only_price_and_schedule_come_from_booking(
            listed in 0.0f64..100_000.0,
            resulted in 0.0f64..100_000.0,
        ) {
            let g = gallery(listed);
            let b = booking_for(&g, Some(resulted));

            let plain = resolve_display_terms(&g, None);
            let booked = resolve_display_terms(&g, Some(&b));

            prop_assert_eq!(plain.price, listed);
            prop_assert_eq!(booked.price, resulted);
            prop_assert_eq!(booked.hours, plain.hours);
            prop_assert_eq!(&booked.location, &plain.location);
            prop_assert_eq!(booked.delivery_time, plain.delivery_time);
            prop_assert_eq!(&booked.included, &plain.included);
        }
    }
}
