//! Favorites with a client-side cache and optimistic toggles.
//!
//! Adding or removing a favorite flips the cached `check` entry before the
//! server answers. Success invalidates everything the change can affect;
//! failure puts the previous entry back.

use crate::cache::{favorites_keys, QueryCache, QueryKey};
use crate::models::{Favorite, FavoriteCheck, FavoriteFilters, FavoriteList};
use crate::services::FavoritesService;
use crate::ApiResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// `favorito_id` shown while an add is in flight.
pub const OPTIMISTIC_FAVORITE_ID: &str = "temp-id";

#[derive(Clone, Debug)]
pub struct FavoritesController {
    service: FavoritesService,
    cache: Arc<QueryCache>,
}

impl FavoritesController {
    pub fn new(service: FavoritesService, cache: Arc<QueryCache>) -> Self {
        Self { service, cache }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub async fn check(&self, actividad_id: Uuid) -> ApiResult<FavoriteCheck> {
        self.cached(favorites_keys::check(actividad_id), || {
            self.service.check(actividad_id)
        })
        .await
    }

    pub async fn count(&self) -> ApiResult<u64> {
        self.cached(favorites_keys::count(), || self.service.count())
            .await
    }

    pub async fn list(&self, filters: &FavoriteFilters) -> ApiResult<FavoriteList> {
        self.cached(favorites_keys::list(filters), || self.service.list(filters))
            .await
    }

    pub async fn add(&self, actividad_id: Uuid) -> ApiResult<Favorite> {
        let optimistic = FavoriteCheck {
            is_favorite: true,
            favorito_id: Some(OPTIMISTIC_FAVORITE_ID.to_string()),
        };
        self.toggle(actividad_id, optimistic, self.service.add(actividad_id))
            .await
    }

    pub async fn remove(&self, actividad_id: Uuid) -> ApiResult<()> {
        let optimistic = FavoriteCheck {
            is_favorite: false,
            favorito_id: None,
        };
        self.toggle(actividad_id, optimistic, self.service.remove(actividad_id))
            .await
    }

    async fn toggle<T, Fut>(
        &self,
        actividad_id: Uuid,
        optimistic: FavoriteCheck,
        call: Fut,
    ) -> ApiResult<T>
    where
        Fut: Future<Output = ApiResult<T>>,
    {
        let key = favorites_keys::check(actividad_id);
        let snapshot = self.cache.snapshot(&key);
        self.cache.set(key.clone(), serde_json::to_value(&optimistic)?);

        match call.await {
            Ok(value) => {
                self.settle(actividad_id);
                Ok(value)
            }
            Err(e) => {
                warn!(actividad_id = %actividad_id, error = %e, "favorite change failed, rolling back");
                self.cache.restore(key, snapshot);
                Err(e)
            }
        }
    }

    fn settle(&self, actividad_id: Uuid) {
        let dropped = self.cache.invalidate(&favorites_keys::lists())
            + self.cache.invalidate(&favorites_keys::check(actividad_id))
            + self.cache.invalidate(&favorites_keys::count())
            + self.cache.invalidate(&favorites_keys::recommendations());
        debug!(actividad_id = %actividad_id, dropped, "favorite queries invalidated");
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, load: F) -> ApiResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        if let Some(value) = self.cache.get(&key) {
            match serde_json::from_value(value) {
                Ok(hit) => return Ok(hit),
                Err(e) => debug!(key = %key, error = %e, "ignoring undecodable cache entry"),
            }
        }

        let fresh = load().await?;
        self.cache.set(key, serde_json::to_value(&fresh)?);
        Ok(fresh)
    }
}
