use kube::core::{GroupVersion, GroupVersionKind};
use kube::{Client, Config};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::ResourceClient;
use crate::{API_PATH, APIS_PATH};

#[cfg(test)]
#[path = "./client_pool.tests.rs"]
mod client_pool_tests;

/// Function that returns API root path (e.g. `/api` or `/apis`) for the given kind.
pub type ApiPathResolver = Arc<dyn Fn(&GroupVersionKind) -> String + Send + Sync>;

/// Returns `/api` for the core group and `/apis` for all other groups.
pub fn legacy_api_path_resolver(gvk: &GroupVersionKind) -> String {
    if gvk.group.is_empty() {
        API_PATH.to_owned()
    } else {
        APIS_PATH.to_owned()
    }
}

/// Returns [`ApiPathResolver`] that uses `overrides` (keyed by API group) before falling back
/// to the [`legacy_api_path_resolver`].
pub fn overriding_api_path_resolver(overrides: HashMap<String, String>) -> ApiPathResolver {
    Arc::new(move |gvk: &GroupVersionKind| {
        overrides
            .get(&gvk.group)
            .cloned()
            .unwrap_or_else(|| legacy_api_path_resolver(gvk))
    })
}

/// Possible errors from [`ClientPool`].
#[derive(thiserror::Error, Debug)]
pub enum PoolError {
    /// Failed to build kubernetes client.
    #[error("failed to build kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

/// Client bound to a single API path and group version.
#[derive(Clone)]
pub struct DynamicClient {
    client: Client,
    api_path: String,
    group_version: GroupVersion,
}

impl DynamicClient {
    /// Creates new [`DynamicClient`] instance.
    pub fn new(client: Client, api_path: String, group_version: GroupVersion) -> Self {
        Self {
            client,
            api_path,
            group_version,
        }
    }

    /// Returns cluster scoped [`ResourceClient`] for the `resource` (plural name).
    pub fn resource(&self, resource: &str) -> ResourceClient {
        ResourceClient::new(
            self.client.clone(),
            self.api_path.clone(),
            self.group_version.clone(),
            resource.to_owned(),
        )
    }

    /// Returns API root path this client is bound to.
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns group version this client is bound to.
    pub fn group_version(&self) -> &GroupVersion {
        &self.group_version
    }
}

#[derive(Default)]
struct PoolState {
    client: Option<Client>,
    clients: HashMap<(String, String), DynamicClient>,
}

/// Pool of [`DynamicClient`]s built from one kubernetes configuration.
pub struct ClientPool {
    config: Config,
    api_path_resolver: ApiPathResolver,
    state: Mutex<PoolState>,
}

impl ClientPool {
    /// Creates new [`ClientPool`] instance that keeps its own copy of the `config`.
    pub fn new(config: &Config, api_path_resolver: ApiPathResolver) -> Self {
        Self {
            config: config.clone(),
            api_path_resolver,
            state: Mutex::new(PoolState::default()),
        }
    }

    /// Creates new [`ClientPool`] instance that uses [`legacy_api_path_resolver`].
    pub fn with_legacy_resolver(config: &Config) -> Self {
        Self::new(config, Arc::new(legacy_api_path_resolver))
    }

    /// Returns configuration used to build clients.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns number of distinct clients handed out so far.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clients.len()
    }

    /// Returns `true` if no client was handed out yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns [`DynamicClient`] for the API path and group version of the specified `gvk`.\
    /// **Note** that clients are reused, the same API path and group version share one client.
    pub fn client_for_group_version_kind(&self, gvk: &GroupVersionKind) -> Result<DynamicClient, PoolError> {
        let api_path = (self.api_path_resolver)(gvk);
        let group_version = GroupVersion::gv(&gvk.group, &gvk.version);
        let key = (api_path, group_version.api_version());

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = state.clients.get(&key) {
            return Ok(client.clone());
        }

        let client = match &state.client {
            Some(client) => client.clone(),
            None => {
                let client = Client::try_from(self.config.clone())?;
                state.client = Some(client.clone());
                client
            },
        };

        tracing::debug!("New client for {} at {}", key.1, key.0);
        let dynamic = DynamicClient::new(client, key.0.clone(), group_version);
        state.clients.insert(key, dynamic.clone());

        Ok(dynamic)
    }
}
