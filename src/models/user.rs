use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Photographer,
    Customer,
}

/// Directory record of a photographer or customer. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub gender: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// The authenticated actor of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: Uuid,
    pub role: Role,
}

impl User {
    pub fn is_photographer(&self) -> bool {
        self.role == Role::Photographer
    }
}

impl Viewer {
    pub fn is_photographer(&self) -> bool {
        self.role == Role::Photographer
    }
}
