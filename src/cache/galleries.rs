use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::cache::CacheService;
use crate::error::AppResult;
use crate::models::{Gallery, GalleryFilter};
use crate::store::GalleryStore;

/// Read-through cache in front of a gallery store.
///
/// Redis failures are logged and fall through to the inner store; the cache
/// never turns a successful storage call into an error.
pub struct CachedGalleryStore {
    inner: Arc<dyn GalleryStore>,
    cache: CacheService,
}

impl CachedGalleryStore {
    pub fn new(inner: Arc<dyn GalleryStore>, cache: CacheService) -> Self {
        Self { inner, cache }
    }

    async fn invalidate(&self, id: Uuid) {
        if let Err(e) = self.cache.invalidate_gallery(id).await {
            warn!("failed to invalidate cached gallery {}: {:?}", id, e);
        }
    }
}

#[async_trait]
impl GalleryStore for CachedGalleryStore {
    async fn insert(&self, gallery: &Gallery) -> AppResult<()> {
        self.inner.insert(gallery).await
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Gallery>> {
        match self.cache.get_gallery(id).await {
            Ok(Some(gallery)) => return Ok(Some(gallery)),
            Ok(None) => {}
            Err(e) => warn!("gallery cache read failed for {}: {:?}", id, e),
        }

        let gallery = self.inner.find(id).await?;
        if let Some(ref g) = gallery {
            if let Err(e) = self.cache.cache_gallery(g).await {
                warn!("failed to cache gallery {}: {:?}", id, e);
            }
        }
        Ok(gallery)
    }

    async fn list(&self, filter: &GalleryFilter) -> AppResult<Vec<Gallery>> {
        self.inner.list(filter).await
    }

    async fn update(&self, gallery: &Gallery) -> AppResult<bool> {
        let updated = self.inner.update(gallery).await?;
        self.invalidate(gallery.id).await;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.inner.delete(id).await?;
        self.invalidate(id).await;
        Ok(deleted)
    }
}
