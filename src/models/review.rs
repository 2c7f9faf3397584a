use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A customer's rating of one booking. At most one per booking.
///
/// Gallery and photographer are copied from the booking's gallery when the
/// review is written, so reviews stay listable after the gallery is deleted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub gallery_id: Uuid,
    pub photographer_id: Uuid,
    pub customer_id: Uuid,
    pub rating: i32,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewInput {
    pub booking_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = 2000, message = "review_text is too long"))]
    pub review_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub count: i64,
    /// Absent until the first review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
}

impl RatingSummary {
    pub fn from_totals(sum: i64, count: i64) -> Self {
        RatingSummary {
            count,
            average: (count > 0).then(|| sum as f64 / count as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        let mut input = ReviewInput {
            booking_id: Uuid::new_v4(),
            rating: 5,
            review_text: "Lovely photos".into(),
        };
        assert!(input.validate().is_ok());

        input.rating = 0;
        assert!(input.validate().is_err());

        input.rating = 6;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_summary_average() {
        assert_eq!(RatingSummary::from_totals(0, 0).average, None);
        assert_eq!(RatingSummary::from_totals(9, 2).average, Some(4.5));
    }
}
