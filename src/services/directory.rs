//! Clients for the user directory and the image storage service.
//!
//! Both are remote collaborators: network failures, timeouts, 5xx answers and
//! unreadable bodies surface as [`AppError::Transport`] and are never retried
//! here. A missing user is an application answer (`NotFound`), not a
//! transport failure, and does not count against the circuit breaker.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::{CircuitBreakerConfig, DirectoryConfig};
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::circuit_breaker::CircuitBreaker;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<User>;
}

#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Photo URLs of a gallery in display order.
    async fn photo_urls_in_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<String>>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

pub struct HttpDirectory {
    client: reqwest::Client,
    users_url: String,
    photos_url: String,
    breaker: Arc<CircuitBreaker>,
}

impl HttpDirectory {
    pub fn from_config(
        directory: &DirectoryConfig,
        breaker: &CircuitBreakerConfig,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(directory.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            users_url: directory.user_directory_url.trim_end_matches('/').to_string(),
            photos_url: directory.photo_storage_url.trim_end_matches('/').to_string(),
            breaker: Arc::new(CircuitBreaker::new(
                "directory",
                breaker.failure_threshold,
                Duration::from_secs(breaker.timeout_seconds),
            )),
        })
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        url: String,
        resource: &'static str,
        id: Uuid,
    ) -> AppResult<T> {
        if !self.breaker.can_execute() {
            warn!("directory circuit open, rejecting call to {}", url);
            return Err(AppError::Transport(
                "directory temporarily unavailable".to_string(),
            ));
        }

        debug!("GET {}", url);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                self.breaker.record_failure();
                error!("request to {} failed: {:?}", url, e);
                return Err(AppError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            self.breaker.record_success();
            return Err(AppError::not_found(resource, id));
        }
        if !status.is_success() {
            self.breaker.record_failure();
            error!("{} answered {}", url, status);
            return Err(AppError::Transport(format!("{} answered {}", resource, status)));
        }

        match response.json::<Envelope<T>>().await {
            Ok(envelope) => {
                self.breaker.record_success();
                Ok(envelope.data)
            }
            Err(e) => {
                self.breaker.record_failure();
                error!("unreadable {} payload from {}: {:?}", resource, url, e);
                Err(AppError::Transport(format!("unreadable {} payload", resource)))
            }
        }
    }
}

#[async_trait]
impl UserDirectory for HttpDirectory {
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<User> {
        let url = format!("{}/users/{}", self.users_url, id);
        self.get_data(url, "user", id).await
    }
}

#[async_trait]
impl PhotoStorage for HttpDirectory {
    async fn photo_urls_in_gallery(&self, gallery_id: Uuid) -> AppResult<Vec<String>> {
        let url = format!("{}/galleries/{}/photos", self.photos_url, gallery_id);
        match self.get_data(url, "photos", gallery_id).await {
            // No upload yet.
            Err(AppError::NotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }
}
