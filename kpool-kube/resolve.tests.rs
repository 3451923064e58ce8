use k8s_openapi::serde_json::{self, json};
use kube::Config;
use rstest::rstest;

use super::*;
use crate::discovery::fake::FakeDiscovery;

fn object(api_version: &str, kind: &str, name: &str, namespace: Option<&str>) -> DynamicObject {
    let mut value = json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "name": name },
    });
    if let Some(namespace) = namespace {
        value["metadata"]["namespace"] = json!(namespace);
    }

    serde_json::from_value(value).unwrap()
}

fn test_pool() -> ClientPool {
    ClientPool::with_legacy_resolver(&Config::new("http://127.0.0.1:6443".parse().unwrap()))
}

#[rstest]
#[case("pods", "pods", vec![])]
#[case("pods/eviction", "pods", vec!["eviction"])]
#[case("deployments/scale/extra", "deployments", vec!["scale", "extra"])]
fn split_resource_name_test(#[case] input: &str, #[case] name: &str, #[case] subresources: Vec<&str>) {
    let (actual_name, actual_subresources) = split_resource_name(input);

    assert_eq!(name, actual_name);
    assert_eq!(subresources, actual_subresources);
}

#[tokio::test]
async fn server_resource_for_group_version_kind_test() {
    let discovery = FakeDiscovery::new();

    let resource = server_resource_for_group_version_kind(&discovery, &GroupVersionKind::gvk("apps", "v1", "StatefulSet"))
        .await
        .unwrap();
    assert_eq!("statefulsets", resource.name);

    let resource = server_resource_for_group_version_kind(&discovery, &GroupVersionKind::gvk("", "v1", "Pod"))
        .await
        .unwrap();
    assert_eq!("pods", resource.name);
}

#[tokio::test]
async fn server_resource_errors_test() {
    let discovery = FakeDiscovery::new();

    let result = server_resource_for_group_version_kind(&discovery, &GroupVersionKind::gvk("apps", "v1", "Pod")).await;
    let error = result.unwrap_err();
    assert!(matches!(error, ResolveError::UnsupportedKind(_)));
    assert_eq!("server is unable to handle apps/v1, Kind=Pod", error.to_string());

    let result = server_resource_for_group_version_kind(&discovery, &GroupVersionKind::gvk("unknown.io", "v1", "Thing")).await;
    let error = result.unwrap_err();
    assert!(matches!(&error, ResolveError::ResourceDescription { group_version, .. } if group_version == "unknown.io/v1"));
    assert!(error.to_string().starts_with("unable to fetch resource description for unknown.io/v1: "));
}

#[tokio::test]
async fn client_for_resource_uses_object_namespace_test() {
    let pool = test_pool();
    let discovery = FakeDiscovery::new();
    let deployment = object("apps/v1", "Deployment", "web", Some("team-a"));

    let (client, subresources) = client_for_resource(&pool, &discovery, &deployment, "default").await.unwrap();

    assert!(subresources.is_empty());
    assert_eq!(Some("team-a"), client.namespace());
    assert_eq!("/apis/apps/v1/namespaces/team-a/deployments", client.url_path());
}

#[tokio::test]
async fn client_for_resource_uses_default_namespace_test() {
    let pool = test_pool();
    let discovery = FakeDiscovery::new();
    let pod = object("v1", "Pod", "web-0", None);

    let (client, _) = client_for_resource(&pool, &discovery, &pod, "default").await.unwrap();

    assert_eq!("/api/v1/namespaces/default/pods", client.url_path());
}

#[tokio::test]
async fn client_for_cluster_resource_test() {
    let pool = test_pool();
    let discovery = FakeDiscovery::new();
    let namespace = object("v1", "Namespace", "team-a", Some("ignored"));

    let (client, _) = client_for_resource(&pool, &discovery, &namespace, "default").await.unwrap();

    assert_eq!(None, client.namespace());
    assert_eq!("/api/v1/namespaces", client.url_path());
}

#[tokio::test]
async fn client_for_subresource_test() {
    let pool = test_pool();
    let discovery = FakeDiscovery::new();
    let eviction = object("v1", "Eviction", "web-0", Some("team-a"));

    let (client, subresources) = client_for_resource(&pool, &discovery, &eviction, "default").await.unwrap();

    assert_eq!("pods", client.resource());
    assert_eq!(vec!["eviction".to_owned()], subresources);
    assert_eq!("/api/v1/namespaces/team-a/pods", client.url_path());
}

#[tokio::test]
async fn client_for_resource_errors_test() {
    let pool = test_pool();
    let discovery = FakeDiscovery::new();

    let untyped = DynamicObject {
        types: None,
        ..object("v1", "Pod", "web-0", None)
    };
    let result = client_for_resource(&pool, &discovery, &untyped, "default").await;
    assert!(matches!(result, Err(ResolveError::MissingTypeMeta)));

    let malformed = object("/v1", "Pod", "web-0", None);
    let result = client_for_resource(&pool, &discovery, &malformed, "default").await;
    assert!(matches!(result, Err(ResolveError::InvalidApiVersion(v)) if v == "/v1"));

    let unsupported = object("batch/v1", "Deployment", "web", None);
    let result = client_for_resource(&pool, &discovery, &unsupported, "default").await;
    assert!(matches!(result, Err(ResolveError::UnsupportedKind(_))));
}
