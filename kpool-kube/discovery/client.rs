use futures::future::join_all;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIGroupList, APIResourceList, APIVersions, GroupVersionForDiscovery,
};
use k8s_openapi::apimachinery::pkg::version::Info;
use k8s_openapi::serde_json::Value;
use kube::Client;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{DiscoveryError, partial_result, preferred_resources};

#[cfg(test)]
#[path = "./client.tests.rs"]
mod client_tests;

const OPENAPI_V2_PATH: &str = "/openapi/v2";

/// Kubernetes API discovery interface.
pub trait DiscoveryClient: Send + Sync {
    /// Returns REST client used to talk to the API server.
    fn client(&self) -> Client;

    /// Returns all API groups served by the API server.\
    /// **Note** that the legacy core group (empty name) is listed first.
    fn server_groups(&self) -> impl Future<Output = Result<Arc<APIGroupList>, DiscoveryError>> + Send;

    /// Returns resources served for the given `group_version`, e.g. `v1` or `apps/v1`.
    fn server_resources_for_group_version(
        &self,
        group_version: &str,
    ) -> impl Future<Output = Result<Arc<APIResourceList>, DiscoveryError>> + Send;

    /// Returns version information of the API server.
    fn server_version(&self) -> impl Future<Output = Result<Info, DiscoveryError>> + Send;

    /// Returns OpenAPI v2 document of the API server.
    fn openapi_schema(&self) -> impl Future<Output = Result<Arc<Value>, DiscoveryError>> + Send;

    /// Returns resource lists for every version of every group.\
    /// **Note** that group versions which cannot be fetched are reported in
    /// [`DiscoveryError::GroupDiscoveryFailed`] together with all lists that were fetched.
    fn server_resources(&self) -> impl Future<Output = Result<Vec<Arc<APIResourceList>>, DiscoveryError>> + Send {
        async move {
            let groups = self.server_groups().await?;
            let group_versions = groups
                .groups
                .iter()
                .flat_map(|group| group.versions.iter().map(|v| v.group_version.as_str()))
                .collect::<Vec<_>>();

            let results = join_all(group_versions.iter().map(|gv| self.server_resources_for_group_version(gv))).await;

            let mut failed = BTreeMap::new();
            let resources = collect_lists(group_versions.into_iter().zip(results), &mut failed);

            partial_result(resources, failed)
        }
    }

    /// Returns one resource list entry per group resource, preferring the group's preferred version.\
    /// **Note** that group versions which cannot be fetched are reported in
    /// [`DiscoveryError::GroupDiscoveryFailed`] together with preferred resources of the remaining ones.
    fn server_preferred_resources(
        &self,
    ) -> impl Future<Output = Result<Vec<Arc<APIResourceList>>, DiscoveryError>> + Send {
        async move {
            let groups = self.server_groups().await?;

            let mut result = Vec::new();
            let mut failed = BTreeMap::new();
            for group in &groups.groups {
                let results = join_all(
                    group
                        .versions
                        .iter()
                        .map(|v| self.server_resources_for_group_version(&v.group_version)),
                )
                .await;

                let group_versions = group.versions.iter().map(|v| v.group_version.as_str());
                let lists = collect_lists(group_versions.zip(results), &mut failed);
                result.extend(preferred_resources(group, &lists));
            }

            partial_result(result, failed)
        }
    }

    /// Returns preferred resources that are namespace scoped.
    fn server_preferred_namespaced_resources(
        &self,
    ) -> impl Future<Output = Result<Vec<Arc<APIResourceList>>, DiscoveryError>> + Send {
        async move {
            match self.server_preferred_resources().await {
                Ok(lists) => Ok(namespaced_only(lists)),
                Err(DiscoveryError::GroupDiscoveryFailed { resources, failed }) => {
                    partial_result(namespaced_only(resources), failed)
                },
                Err(error) => Err(error),
            }
        }
    }
}

/// Discovery client that caches responses.
pub trait CachedDiscoveryClient: DiscoveryClient {
    /// Returns `true` if cached data was not loaded from a possibly stale source.
    fn fresh(&self) -> bool;

    /// Drops all cached data, next calls go to the API server again.
    fn invalidate(&self) -> impl Future<Output = ()> + Send;
}

/// [`DiscoveryClient`] that queries the kubernetes API server.
#[derive(Clone)]
pub struct ClusterDiscovery {
    client: Client,
}

impl ClusterDiscovery {
    /// Creates new [`ClusterDiscovery`] instance.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DiscoveryClient for ClusterDiscovery {
    fn client(&self) -> Client {
        self.client.clone()
    }

    async fn server_groups(&self) -> Result<Arc<APIGroupList>, DiscoveryError> {
        let core = self.client.list_core_api_versions().await?;
        let mut groups = self.client.list_api_groups().await?;

        if let Some(core_group) = core_group(&core) {
            groups.groups.insert(0, core_group);
        }

        tracing::debug!("Discovered {} API groups", groups.groups.len());
        Ok(Arc::new(groups))
    }

    async fn server_resources_for_group_version(&self, group_version: &str) -> Result<Arc<APIResourceList>, DiscoveryError> {
        let (group, version) = parse_group_version(group_version)?;

        let result = if group.is_empty() {
            self.client.list_core_api_resources(version).await
        } else {
            self.client.list_api_group_resources(group_version).await
        };

        match result {
            Ok(list) => Ok(Arc::new(list)),
            Err(kube::Error::Api(status)) if status.code == 404 => {
                Err(DiscoveryError::NotFound(group_version.to_owned()))
            },
            Err(error) => Err(error.into()),
        }
    }

    async fn server_version(&self) -> Result<Info, DiscoveryError> {
        Ok(self.client.apiserver_version().await?)
    }

    async fn openapi_schema(&self) -> Result<Arc<Value>, DiscoveryError> {
        let request = http::Request::get(OPENAPI_V2_PATH)
            .header(http::header::ACCEPT, "application/json")
            .body(Vec::new())?;

        Ok(Arc::new(self.client.request::<Value>(request).await?))
    }
}

/// Builds the legacy core API group (empty name) from versions served under `/api`.
fn core_group(core: &APIVersions) -> Option<APIGroup> {
    if core.versions.is_empty() {
        return None;
    }

    let versions = core
        .versions
        .iter()
        .map(|version| GroupVersionForDiscovery {
            group_version: version.clone(),
            version: version.clone(),
        })
        .collect::<Vec<_>>();

    Some(APIGroup {
        name: String::new(),
        preferred_version: versions.first().cloned(),
        versions,
        ..Default::default()
    })
}

/// Splits `group_version` into group and version, the group is empty for `v1`-like core versions.
fn parse_group_version(group_version: &str) -> Result<(&str, &str), DiscoveryError> {
    let (group, version) = match group_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", group_version),
    };

    if version.is_empty() || version.contains('/') || (group.is_empty() && group_version.contains('/')) {
        Err(DiscoveryError::InvalidGroupVersion(group_version.to_owned()))
    } else {
        Ok((group, version))
    }
}

/// Moves fetched lists into the result and failures into `failed`, keyed by group version.
fn collect_lists<'a>(
    results: impl Iterator<Item = (&'a str, Result<Arc<APIResourceList>, DiscoveryError>)>,
    failed: &mut BTreeMap<String, DiscoveryError>,
) -> Vec<Arc<APIResourceList>> {
    let mut lists = Vec::new();
    for (group_version, result) in results {
        match result {
            Ok(list) => lists.push(list),
            Err(error) => {
                tracing::debug!("Cannot discover resources for {}: {}", group_version, error);
                failed.insert(group_version.to_owned(), error);
            },
        }
    }

    lists
}

fn namespaced_only(lists: Vec<Arc<APIResourceList>>) -> Vec<Arc<APIResourceList>> {
    lists
        .into_iter()
        .filter_map(|list| {
            let resources = list.resources.iter().filter(|r| r.namespaced).cloned().collect::<Vec<_>>();
            (!resources.is_empty()).then(|| {
                Arc::new(APIResourceList {
                    group_version: list.group_version.clone(),
                    resources,
                })
            })
        })
        .collect()
}
