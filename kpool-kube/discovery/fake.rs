use k8s_openapi::apimachinery::pkg::apis::meta::v1::{
    APIGroup, APIGroupList, APIResource, APIResourceList, GroupVersionForDiscovery,
};
use k8s_openapi::apimachinery::pkg::version::Info;
use k8s_openapi::serde_json::{Value, json};
use kube::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DiscoveryClient, DiscoveryError};

/// Returns kubernetes client that points to a local address, usable only inside tokio runtime.
pub fn test_client() -> Client {
    let config = kube::Config::new("http://127.0.0.1:6443".parse().unwrap());
    Client::try_from(config).unwrap()
}

pub fn resource(name: &str, kind: &str, namespaced: bool, short_names: &[&str]) -> APIResource {
    APIResource {
        name: name.to_owned(),
        singular_name: kind.to_ascii_lowercase(),
        kind: kind.to_owned(),
        namespaced,
        short_names: (!short_names.is_empty()).then(|| short_names.iter().map(|s| (*s).to_owned()).collect()),
        verbs: vec!["get".to_owned(), "list".to_owned(), "create".to_owned(), "delete".to_owned()],
        ..Default::default()
    }
}

pub fn group(name: &str, versions: &[&str], preferred: &str) -> APIGroup {
    let gv = |version: &str| GroupVersionForDiscovery {
        group_version: if name.is_empty() {
            version.to_owned()
        } else {
            format!("{name}/{version}")
        },
        version: version.to_owned(),
    };

    APIGroup {
        name: name.to_owned(),
        preferred_version: Some(gv(preferred)),
        versions: versions.iter().map(|v| gv(*v)).collect(),
        ..Default::default()
    }
}

pub fn resource_list(group_version: &str, resources: Vec<APIResource>) -> APIResourceList {
    APIResourceList {
        group_version: group_version.to_owned(),
        resources,
    }
}

/// In-memory [`DiscoveryClient`] that counts calls made to it.
pub struct FakeDiscovery {
    client: Client,
    groups: APIGroupList,
    resources: HashMap<String, APIResourceList>,
    failures: AtomicUsize,
    pub groups_calls: AtomicUsize,
    pub resources_calls: AtomicUsize,
    pub version_calls: AtomicUsize,
    pub schema_calls: AtomicUsize,
}

impl FakeDiscovery {
    /// Creates [`FakeDiscovery`] serving a small cluster with core, apps, batch and example.com groups.
    pub fn new() -> Self {
        let groups = APIGroupList {
            groups: vec![
                group("", &["v1"], "v1"),
                group("apps", &["v1", "v1beta1"], "v1"),
                group("batch", &["v1"], "v1"),
                group("example.com", &["v1alpha1", "v1"], "v1"),
            ],
        };

        let lists = vec![
            resource_list(
                "v1",
                vec![
                    resource("pods", "Pod", true, &["po"]),
                    resource("pods/status", "Pod", true, &[]),
                    resource("pods/eviction", "Eviction", true, &[]),
                    resource("namespaces", "Namespace", false, &["ns"]),
                    resource("services", "Service", true, &["svc"]),
                ],
            ),
            resource_list(
                "apps/v1",
                vec![
                    resource("deployments", "Deployment", true, &["deploy"]),
                    resource("deployments/scale", "Scale", true, &[]),
                    resource("statefulsets", "StatefulSet", true, &["sts"]),
                ],
            ),
            resource_list(
                "apps/v1beta1",
                vec![
                    resource("deployments", "Deployment", true, &[]),
                    resource("controllerrevisions", "ControllerRevision", true, &[]),
                ],
            ),
            resource_list(
                "batch/v1",
                vec![
                    resource("jobs", "Job", true, &[]),
                    resource("cronjobs", "CronJob", true, &["cj"]),
                ],
            ),
            resource_list(
                "example.com/v1alpha1",
                vec![
                    resource("widgets", "Widget", true, &[]),
                    resource("gadgets", "Gadget", false, &[]),
                ],
            ),
            resource_list("example.com/v1", vec![resource("widgets", "Widget", true, &[])]),
        ];

        Self {
            client: test_client(),
            groups,
            resources: lists.into_iter().map(|l| (l.group_version.clone(), l)).collect(),
            failures: AtomicUsize::new(0),
            groups_calls: AtomicUsize::new(0),
            resources_calls: AtomicUsize::new(0),
            version_calls: AtomicUsize::new(0),
            schema_calls: AtomicUsize::new(0),
        }
    }

    /// Makes the next `count` calls fail.
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    fn should_fail(&self) -> bool {
        self.failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |f| f.checked_sub(1))
            .is_ok()
    }
}

impl DiscoveryClient for FakeDiscovery {
    fn client(&self) -> Client {
        self.client.clone()
    }

    async fn server_groups(&self) -> Result<Arc<APIGroupList>, DiscoveryError> {
        self.groups_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.should_fail() {
            return Err(DiscoveryError::NotFound("groups".to_owned()));
        }

        Ok(Arc::new(self.groups.clone()))
    }

    async fn server_resources_for_group_version(&self, group_version: &str) -> Result<Arc<APIResourceList>, DiscoveryError> {
        self.resources_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.should_fail() {
            return Err(DiscoveryError::NotFound(group_version.to_owned()));
        }

        self.resources
            .get(group_version)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| DiscoveryError::NotFound(group_version.to_owned()))
    }

    async fn server_version(&self) -> Result<Info, DiscoveryError> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);

        Ok(Info {
            git_version: "v1.31.0".to_owned(),
            major: "1".to_owned(),
            minor: "31".to_owned(),
            ..Default::default()
        })
    }

    async fn openapi_schema(&self) -> Result<Arc<Value>, DiscoveryError> {
        self.schema_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.should_fail() {
            return Err(DiscoveryError::NotFound("openapi/v2".to_owned()));
        }

        Ok(Arc::new(json!({ "swagger": "2.0", "info": { "title": "Kubernetes" } })))
    }
}
