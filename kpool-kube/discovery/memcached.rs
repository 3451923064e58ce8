use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroupList, APIResourceList};
use k8s_openapi::apimachinery::pkg::version::Info;
use k8s_openapi::serde_json::Value;
use kube::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{CachedDiscoveryClient, DiscoveryClient, DiscoveryError};

#[cfg(test)]
#[path = "./memcached.tests.rs"]
mod memcached_tests;

/// Discovery data remembered by [`MemCachedDiscovery`].
#[derive(Default)]
struct DiscoveryCache {
    server_groups: Option<Arc<APIGroupList>>,
    server_resources: HashMap<String, Arc<APIResourceList>>,
    openapi_schema: Option<Arc<Value>>,
}

/// [`DiscoveryClient`] decorator that keeps discovery responses in memory.\
/// **Note** that the lock is held while the wrapped client is queried,
/// so concurrent requests for the same missing entry result in a single upstream call.
pub struct MemCachedDiscovery<D: DiscoveryClient> {
    inner: D,
    cache: Mutex<DiscoveryCache>,
}

impl<D: DiscoveryClient> MemCachedDiscovery<D> {
    /// Creates new [`MemCachedDiscovery`] instance with empty cache.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: Mutex::new(DiscoveryCache::default()),
        }
    }

    /// Returns wrapped [`DiscoveryClient`].
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: DiscoveryClient> DiscoveryClient for MemCachedDiscovery<D> {
    fn client(&self) -> Client {
        self.inner.client()
    }

    async fn server_groups(&self) -> Result<Arc<APIGroupList>, DiscoveryError> {
        let mut cache = self.cache.lock().await;
        if let Some(groups) = &cache.server_groups {
            return Ok(Arc::clone(groups));
        }

        let groups = self.inner.server_groups().await?;
        cache.server_groups = Some(Arc::clone(&groups));

        Ok(groups)
    }

    async fn server_resources_for_group_version(&self, group_version: &str) -> Result<Arc<APIResourceList>, DiscoveryError> {
        let mut cache = self.cache.lock().await;
        if let Some(resources) = cache.server_resources.get(group_version) {
            return Ok(Arc::clone(resources));
        }

        let resources = self.inner.server_resources_for_group_version(group_version).await?;
        tracing::trace!("Caching {} resources for {}", resources.resources.len(), group_version);
        cache
            .server_resources
            .insert(group_version.to_owned(), Arc::clone(&resources));

        Ok(resources)
    }

    async fn server_version(&self) -> Result<Info, DiscoveryError> {
        self.inner.server_version().await
    }

    async fn openapi_schema(&self) -> Result<Arc<Value>, DiscoveryError> {
        let mut cache = self.cache.lock().await;
        if let Some(schema) = &cache.openapi_schema {
            return Ok(Arc::clone(schema));
        }

        let schema = self.inner.openapi_schema().await?;
        cache.openapi_schema = Some(Arc::clone(&schema));

        Ok(schema)
    }
}

impl<D: DiscoveryClient> CachedDiscoveryClient for MemCachedDiscovery<D> {
    fn fresh(&self) -> bool {
        true
    }

    async fn invalidate(&self) {
        let mut cache = self.cache.lock().await;
        *cache = DiscoveryCache::default();
        tracing::debug!("Discovery cache invalidated");
    }
}
