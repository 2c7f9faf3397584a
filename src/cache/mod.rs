use redis::AsyncCommands;

use crate::models::Gallery;
use crate::redis_client::RedisClient;

pub mod galleries;

pub use galleries::CachedGalleryStore;

#[derive(Clone)]
pub struct CacheService {
    redis: RedisClient,
    ttl_seconds: u64,
}

pub fn gallery_key(id: uuid::Uuid) -> String {
    format!("gallery:{}", id)
}

impl CacheService {
    pub fn new(redis: RedisClient, ttl_seconds: u64) -> Self {
        Self { redis, ttl_seconds }
    }

    pub async fn get_gallery(&self, id: uuid::Uuid) -> Result<Option<Gallery>, redis::RedisError> {
        let mut conn = self.redis.conn.clone();
        let data: Option<String> = conn.get(gallery_key(id)).await?;
        match data {
            Some(json) => {
                let gallery = serde_json::from_str(&json).map_err(|_| {
                    redis::RedisError::from((redis::ErrorKind::TypeError, "Parse error"))
                })?;
                Ok(Some(gallery))
            }
            None => Ok(None),
        }
    }

    pub async fn cache_gallery(&self, gallery: &Gallery) -> Result<(), redis::RedisError> {
        let data = serde_json::to_string(gallery).map_err(|_| {
            redis::RedisError::from((redis::ErrorKind::TypeError, "Serialize error"))
        })?;
        let mut conn = self.redis.conn.clone();
        conn.set_ex(gallery_key(gallery.id), data, self.ttl_seconds).await
    }

    pub async fn invalidate_gallery(&self, id: uuid::Uuid) -> Result<(), redis::RedisError> {
        let mut conn = self.redis.conn.clone();
        conn.del(gallery_key(id)).await
    }
}
