use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use kube::api::DynamicObject;
use kube::core::GroupVersionKind;

use crate::{ClientPool, DiscoveryClient, DiscoveryError, PoolError, ResourceClient, format_gvk, gvk_of};

#[cfg(test)]
#[path = "./resolve.tests.rs"]
mod resolve_tests;

/// Possible errors when resolving object to its REST endpoint.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    /// Object has no `apiVersion` or `kind`.
    #[error("object has no apiVersion or kind")]
    MissingTypeMeta,

    /// Object has malformed `apiVersion`.
    #[error("invalid apiVersion '{0}'")]
    InvalidApiVersion(String),

    /// Resource list for the group version could not be fetched.
    #[error("unable to fetch resource description for {group_version}: {source}")]
    ResourceDescription {
        group_version: String,
        #[source]
        source: DiscoveryError,
    },

    /// Group version is served, but none of its resources has the requested kind.
    #[error("server is unable to handle {0}")]
    UnsupportedKind(String),

    /// Client could not be obtained from the pool.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Splits discovery resource name into plural name and subresources,
/// e.g. `pods/eviction` into `pods` and `["eviction"]`.
pub fn split_resource_name(name: &str) -> (&str, Vec<String>) {
    match name.split_once('/') {
        Some((name, subresources)) => (name, subresources.split('/').map(String::from).collect()),
        None => (name, Vec::new()),
    }
}

/// Returns the first resource served for the group version of `gvk` whose kind matches exactly.
pub async fn server_resource_for_group_version_kind<D: DiscoveryClient>(
    discovery: &D,
    gvk: &GroupVersionKind,
) -> Result<APIResource, ResolveError> {
    let resources = discovery
        .server_resources_for_group_version(&gvk.api_version())
        .await
        .map_err(|source| ResolveError::ResourceDescription {
            group_version: gvk.api_version(),
            source,
        })?;

    match resources.resources.iter().find(|r| r.kind == gvk.kind) {
        Some(resource) => {
            tracing::debug!("Using resource '{}' for {}", resource.name, format_gvk(gvk));
            Ok(resource.clone())
        },
        None => Err(ResolveError::UnsupportedKind(format_gvk(gvk))),
    }
}

/// Returns [`ResourceClient`] for the `object` together with subresources needed to address it.\
/// **Note** that `default_namespace` is used for namespaced resources when the object does not specify one,
/// cluster scoped resources never get a namespace.
pub async fn client_for_resource<D: DiscoveryClient>(
    pool: &ClientPool,
    discovery: &D,
    object: &DynamicObject,
    default_namespace: &str,
) -> Result<(ResourceClient, Vec<String>), ResolveError> {
    let types = object.types.as_ref().ok_or(ResolveError::MissingTypeMeta)?;
    if types.api_version.is_empty() || types.kind.is_empty() {
        return Err(ResolveError::MissingTypeMeta);
    }

    let gvk = gvk_of(types).ok_or_else(|| ResolveError::InvalidApiVersion(types.api_version.clone()))?;
    let client = pool.client_for_group_version_kind(&gvk)?;
    let resource = server_resource_for_group_version_kind(discovery, &gvk).await?;

    let namespace = object
        .metadata
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .unwrap_or(default_namespace);

    tracing::debug!("Fetching client for {} namespace={}", resource.name, namespace);

    let (name, subresources) = split_resource_name(&resource.name);
    let resource_client = client.resource(name);
    let resource_client = if resource.namespaced && !namespace.is_empty() {
        resource_client.within(namespace)
    } else {
        resource_client
    };

    Ok((resource_client, subresources))
}
