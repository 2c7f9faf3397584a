use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation channel between a gallery's photographer and one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub gallery_id: Uuid,
    /// Always `[photographer_id, customer_id]`.
    pub member_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload; `(gallery_id, customer_id)` is the uniqueness key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRoom {
    pub gallery_id: Uuid,
    pub photographer_id: Uuid,
    pub customer_id: Uuid,
}

impl NewRoom {
    pub fn into_room(self) -> Room {
        Room {
            id: Uuid::new_v4(),
            gallery_id: self.gallery_id,
            member_ids: vec![self.photographer_id, self.customer_id],
            created_at: Utc::now(),
        }
    }
}
