pub use self::client::{CachedDiscoveryClient, ClusterDiscovery, DiscoveryClient};
pub use self::memcached::MemCachedDiscovery;
pub use self::preferred::preferred_resources;

mod client;
mod memcached;
mod preferred;

#[cfg(test)]
pub(crate) mod fake;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Possible errors from the kubernetes discovery API.
#[derive(thiserror::Error, Debug)]
pub enum DiscoveryError {
    /// Discovery request failed.
    #[error("discovery request failed: {0}")]
    Kube(#[from] kube::Error),

    /// Cannot build discovery request.
    #[error("cannot build discovery request: {0}")]
    Request(#[from] http::Error),

    /// Group version string cannot be parsed.
    #[error("invalid group version '{0}'")]
    InvalidGroupVersion(String),

    /// Group version is not served by the API server.
    #[error("the server could not find the requested resource list for '{0}'")]
    NotFound(String),

    /// Some group versions could not be discovered, lists of the remaining ones are kept in `resources`.
    #[error("unable to retrieve the complete list of server APIs: {}", failed_summary(.failed))]
    GroupDiscoveryFailed {
        resources: Vec<Arc<APIResourceList>>,
        failed: BTreeMap<String, DiscoveryError>,
    },
}

impl DiscoveryError {
    /// Returns resource lists that were discovered despite the error.\
    /// **Note** that it is empty for anything other than [`DiscoveryError::GroupDiscoveryFailed`].
    pub fn partial_resources(&self) -> &[Arc<APIResourceList>] {
        match self {
            DiscoveryError::GroupDiscoveryFailed { resources, .. } => resources,
            _ => &[],
        }
    }
}

/// Turns lists discovered so far and per group version failures into the final result.
pub(crate) fn partial_result(
    resources: Vec<Arc<APIResourceList>>,
    failed: BTreeMap<String, DiscoveryError>,
) -> Result<Vec<Arc<APIResourceList>>, DiscoveryError> {
    if failed.is_empty() {
        Ok(resources)
    } else {
        Err(DiscoveryError::GroupDiscoveryFailed { resources, failed })
    }
}

fn failed_summary(failed: &BTreeMap<String, DiscoveryError>) -> String {
    failed
        .iter()
        .map(|(group_version, error)| format!("{group_version}: {error}"))
        .collect::<Vec<_>>()
        .join(", ")
}
