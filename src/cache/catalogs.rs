use super::{Catalog, CatalogCache, CatalogKey};
use crate::api::{ApiResult, Champion, DataDragonClient, ImageKind, Item, RunePath};
use crate::util::now_ms;
use leptos::prelude::*;
use std::sync::Arc;

/// Shared entry point the game widgets use to read catalogs.
///
/// Provided once as context; every widget on the page shares the same cache.
#[derive(Clone, Copy)]
pub(crate) struct CatalogService {
    client: StoredValue<DataDragonClient>,
    cache: StoredValue<CatalogCache>,
}

impl CatalogService {
    pub fn new(client: DataDragonClient) -> Self {
        Self {
            client: StoredValue::new(client),
            cache: StoredValue::new(CatalogCache::default()),
        }
    }

    pub fn image_url(&self, kind: ImageKind, version: &str, file: &str) -> String {
        self.client
            .with_value(|c| c.image_url(kind, version, file))
    }

    pub fn rune_image_url(&self, icon: &str) -> String {
        self.client.with_value(|c| c.rune_image_url(icon))
    }

    pub async fn version(&self) -> String {
        let now = now_ms();
        if let Some(v) = self.cache.with_value(|c| c.version(now)) {
            return v;
        }

        let client = self.client.get_value();
        match client.fetch_latest_version().await {
            Ok(v) => {
                self.cache.update_value(|c| {
                    c.evict_expired(now);
                    c.insert(CatalogKey::LatestVersion, Catalog::Version(v.clone()), now);
                });
                v
            }
            Err(e) => {
                // Not cached, so the next widget retries the index.
                tracing::warn!(error = %e, "version lookup failed; using default");
                crate::api::DEFAULT_DDRAGON_VERSION.to_string()
            }
        }
    }

    /// Champions for the latest version, with the version they belong to.
    pub async fn champions(&self) -> ApiResult<(String, Arc<Vec<Champion>>)> {
        let version = self.version().await;
        if let Some(list) = self.cache.with_value(|c| c.champions(&version, now_ms())) {
            return Ok((version, list));
        }

        let list = Arc::new(self.client.get_value().fetch_champions(&version).await?);
        tracing::debug!(%version, count = list.len(), "champion catalog cached");
        self.cache.update_value(|c| {
            c.insert(
                CatalogKey::Champions(version.clone()),
                Catalog::Champions(list.clone()),
                now_ms(),
            )
        });
        Ok((version, list))
    }

    pub async fn items(&self) -> ApiResult<(String, Arc<Vec<Item>>)> {
        let version = self.version().await;
        if let Some(list) = self.cache.with_value(|c| c.items(&version, now_ms())) {
            return Ok((version, list));
        }

        let list = Arc::new(self.client.get_value().fetch_items(&version).await?);
        tracing::debug!(%version, count = list.len(), "item catalog cached");
        self.cache.update_value(|c| {
            c.insert(
                CatalogKey::Items(version.clone()),
                Catalog::Items(list.clone()),
                now_ms(),
            )
        });
        Ok((version, list))
    }

    pub async fn runes(&self) -> ApiResult<(String, Arc<Vec<RunePath>>)> {
        let version = self.version().await;
        if let Some(list) = self.cache.with_value(|c| c.runes(&version, now_ms())) {
            return Ok((version, list));
        }

        let list = Arc::new(self.client.get_value().fetch_runes(&version).await?);
        tracing::debug!(%version, count = list.len(), "rune catalog cached");
        self.cache.update_value(|c| {
            c.insert(
                CatalogKey::Runes(version.clone()),
                Catalog::Runes(list.clone()),
                now_ms(),
            )
        });
        Ok((version, list))
    }
}
