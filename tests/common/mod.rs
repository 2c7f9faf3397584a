#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use uuid::Uuid;

use shootbook::error::{AppError, AppResult};
use shootbook::models::{Gallery, GalleryInput, Role, User};
use shootbook::services::directory::{PhotoStorage, UserDirectory};

/// Directory and photo storage answering from fixed maps.
#[derive(Default)]
pub struct FakeDirectory {
    pub users: HashMap<Uuid, User>,
    pub photos: HashMap<Uuid, Vec<String>>,
}

impl FakeDirectory {
    pub fn with_user(mut self, id: Uuid, role: Role) -> Self {
        self.users.insert(id, user(id, role));
        self
    }

    pub fn with_photos(mut self, gallery_id: Uuid, urls: Vec<String>) -> Self {
        self.photos.insert(gallery_id, urls);
        self
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<User> {
        self.users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("user", id))
    }
}

#[async_trait]
impl PhotoStorage for FakeDirectory {
    async fn photo_urls_in_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<String>> {
        Ok(self.photos.get(&gallery_id).cloned().unwrap_or_default())
    }
}

pub fn user(id: Uuid, role: Role) -> User {
    User {
        id,
        firstname: FirstName().fake(),
        lastname: LastName().fake(),
        gender: None,
        role,
        profile_picture: None,
    }
}

pub fn gallery_input(price: f64) -> GalleryInput {
    GalleryInput {
        name: Word().fake(),
        description: Sentence(3..8).fake(),
        price,
        hours: 4.0,
        location: CityName().fake(),
        delivery_time: 10,
        included: vec!["Edited photos".to_string(), "Print set".to_string()],
    }
}

pub fn gallery(photographer_id: Uuid, price: f64) -> Gallery {
    Gallery::new(photographer_id, gallery_input(price))
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
