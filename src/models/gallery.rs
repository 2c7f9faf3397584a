use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A photographer's bookable listing. Bookings are priced instances of it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Gallery {
    pub id: Uuid,
    pub photographer_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub hours: f64,
    pub location: String,
    pub delivery_time: i32,
    pub included: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GalleryInput {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0, message = "price must be >= 0"))]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0, message = "hours must be > 0"))]
    pub hours: f64,
    #[serde(default)]
    pub location: String,
    #[validate(range(min = 0, message = "delivery_time must be >= 0"))]
    pub delivery_time: i32,
    #[serde(default)]
    pub included: Vec<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GalleryPatch {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must be >= 0"))]
    pub price: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "hours must be > 0"))]
    pub hours: Option<f64>,
    pub location: Option<String>,
    #[validate(range(min = 0, message = "delivery_time must be >= 0"))]
    pub delivery_time: Option<i32>,
    pub included: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryFilter {
    pub photographer_id: Option<Uuid>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Gallery {
    pub fn new(photographer_id: Uuid, input: GalleryInput) -> Self {
        let now = Utc::now();
        Gallery {
            id: Uuid::new_v4(),
            photographer_id,
            name: input.name,
            description: input.description,
            price: input.price,
            hours: input.hours,
            location: input.location,
            delivery_time: input.delivery_time,
            included: input.included,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: GalleryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(hours) = patch.hours {
            self.hours = hours;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(delivery_time) = patch.delivery_time {
            self.delivery_time = delivery_time;
        }
        if let Some(included) = patch.included {
            self.included = included;
        }
        self.updated_at = Utc::now();
    }
}

impl GalleryFilter {
    pub fn matches(&self, gallery: &Gallery) -> bool {
        self.photographer_id
            .map_or(true, |id| gallery.photographer_id == id)
            && self
                .location
                .as_deref()
                .map_or(true, |loc| gallery.location == loc)
            && self.min_price.map_or(true, |min| gallery.price >= min)
            && self.max_price.map_or(true, |max| gallery.price <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GalleryInput {
        GalleryInput {
            name: "Wedding day".into(),
            description: "Full coverage".into(),
            price: 3000.0,
            hours: 6.0,
            location: "Bangkok".into(),
            delivery_time: 14,
            included: vec!["200 edited photos".into(), "Online album".into()],
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_range_violations_are_rejected() {
        let mut negative_price = input();
        negative_price.price = -1.0;
        assert!(negative_price.validate().is_err());

        let mut zero_hours = input();
        zero_hours.hours = 0.0;
        assert!(zero_hours.validate().is_err());

        let mut negative_delivery = input();
        negative_delivery.delivery_time = -3;
        assert!(negative_delivery.validate().is_err());
    }

    #[test]
    fn test_zero_price_and_same_day_delivery_allowed() {
        let mut free = input();
        free.price = 0.0;
        free.delivery_time = 0;
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut gallery = Gallery::new(Uuid::new_v4(), input());
        gallery.apply(GalleryPatch {
            price: Some(2500.0),
            ..Default::default()
        });

        assert_eq!(gallery.price, 2500.0);
        assert_eq!(gallery.hours, 6.0);
        assert_eq!(gallery.included.len(), 2);
    }

    #[test]
    fn test_filter_price_bounds() {
        let gallery = Gallery::new(Uuid::new_v4(), input());
        let filter = GalleryFilter {
            min_price: Some(1000.0),
            max_price: Some(3000.0),
            ..Default::default()
        };
        assert!(filter.matches(&gallery));

        let filter = GalleryFilter {
            max_price: Some(2999.0),
            ..Default::default()
        };
        assert!(!filter.matches(&gallery));
    }
}
