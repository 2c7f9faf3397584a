use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    UserPaid,
    Cancelled,
    #[serde(rename = "C_REQ_CANCEL")]
    CustomerRequestedCancel,
    #[serde(rename = "P_REQ_CANCEL")]
    PhotographerRequestedCancel,
    Completed,
    PaidOut,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::UserPaid => "USER_PAID",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::CustomerRequestedCancel => "C_REQ_CANCEL",
            BookingStatus::PhotographerRequestedCancel => "P_REQ_CANCEL",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::PaidOut => "PAID_OUT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USER_PAID" => Some(BookingStatus::UserPaid),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            "C_REQ_CANCEL" => Some(BookingStatus::CustomerRequestedCancel),
            "P_REQ_CANCEL" => Some(BookingStatus::PhotographerRequestedCancel),
            "COMPLETED" => Some(BookingStatus::Completed),
            "PAID_OUT" => Some(BookingStatus::PaidOut),
            _ => None,
        }
    }
}

/// A scheduled engagement against a gallery for one customer.
///
/// Owned by the booking workflow; this service only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub gallery_id: Uuid,
    pub customer_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Negotiated price; when set it wins over the gallery's listed price.
    pub resulted_price: Option<f64>,
    pub status: BookingStatus,
}

impl Booking {
    pub fn schedule(&self) -> [DateTime<Utc>; 2] {
        [self.start_time, self.end_time]
    }

    pub fn has_valid_schedule(&self) -> bool {
        self.start_time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_match_storage_values() {
        for status in [
            BookingStatus::UserPaid,
            BookingStatus::Cancelled,
            BookingStatus::CustomerRequestedCancel,
            BookingStatus::PhotographerRequestedCancel,
            BookingStatus::Completed,
            BookingStatus::PaidOut,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(BookingStatus::parse("PENDING"), None);
    }
}
