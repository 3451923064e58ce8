use std::sync::atomic::Ordering;

use super::*;
use crate::discovery::fake::FakeDiscovery;

fn calls(counter: &std::sync::atomic::AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

#[tokio::test]
async fn server_groups_are_cached_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let first = discovery.server_groups().await.unwrap();
    let second = discovery.server_groups().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(4, first.groups.len());
    assert_eq!(1, calls(&discovery.inner().groups_calls));
}

#[tokio::test]
async fn server_resources_are_cached_per_group_version_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let pods = discovery.server_resources_for_group_version("v1").await.unwrap();
    let apps = discovery.server_resources_for_group_version("apps/v1").await.unwrap();
    let pods_again = discovery.server_resources_for_group_version("v1").await.unwrap();

    assert_eq!("v1", pods.group_version);
    assert_eq!("apps/v1", apps.group_version);
    assert!(Arc::ptr_eq(&pods, &pods_again));
    assert_eq!(2, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn concurrent_requests_hit_upstream_once_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let (a, b, c) = tokio::join!(
        discovery.server_resources_for_group_version("batch/v1"),
        discovery.server_resources_for_group_version("batch/v1"),
        discovery.server_resources_for_group_version("batch/v1"),
    );

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(1, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn errors_are_not_cached_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.inner().fail_next(1);

    assert!(discovery.server_groups().await.is_err());
    assert!(discovery.server_groups().await.is_ok());
    assert!(discovery.server_groups().await.is_ok());
    assert_eq!(2, calls(&discovery.inner().groups_calls));

    let missing = discovery.server_resources_for_group_version("unknown.io/v1").await;
    assert!(matches!(missing, Err(DiscoveryError::NotFound(gv)) if gv == "unknown.io/v1"));
    assert!(discovery.server_resources_for_group_version("unknown.io/v1").await.is_err());
    assert_eq!(2, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn invalidate_clears_cache_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    discovery.server_groups().await.unwrap();
    discovery.server_resources_for_group_version("v1").await.unwrap();
    discovery.openapi_schema().await.unwrap();

    discovery.invalidate().await;

    discovery.server_groups().await.unwrap();
    discovery.server_resources_for_group_version("v1").await.unwrap();
    discovery.openapi_schema().await.unwrap();

    assert!(discovery.fresh());
    assert_eq!(2, calls(&discovery.inner().groups_calls));
    assert_eq!(2, calls(&discovery.inner().resources_calls));
    assert_eq!(2, calls(&discovery.inner().schema_calls));
}

#[tokio::test]
async fn openapi_schema_is_cached_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let schema = discovery.openapi_schema().await.unwrap();
    discovery.openapi_schema().await.unwrap();

    assert_eq!("2.0", schema["swagger"]);
    assert_eq!(1, calls(&discovery.inner().schema_calls));
}

#[tokio::test]
async fn server_version_is_not_cached_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let version = discovery.server_version().await.unwrap();
    discovery.server_version().await.unwrap();

    assert_eq!("v1.31.0", version.git_version);
    assert_eq!(2, calls(&discovery.inner().version_calls));
}

#[tokio::test]
async fn server_resources_use_cache_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let all = discovery.server_resources().await.unwrap();
    let group_versions = all.iter().map(|l| l.group_version.as_str()).collect::<Vec<_>>();
    assert_eq!(
        vec!["v1", "apps/v1", "apps/v1beta1", "batch/v1", "example.com/v1alpha1", "example.com/v1"],
        group_versions
    );

    discovery.server_resources().await.unwrap();
    assert_eq!(1, calls(&discovery.inner().groups_calls));
    assert_eq!(6, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn server_preferred_resources_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());

    let preferred = discovery.server_preferred_resources().await.unwrap();
    let summary = preferred
        .iter()
        .map(|l| {
            let names = l.resources.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
            format!("{}={}", l.group_version, names.join(","))
        })
        .collect::<Vec<_>>();

    assert_eq!(
        vec![
            "v1=pods,namespaces,services",
            "apps/v1=deployments,statefulsets",
            "apps/v1beta1=controllerrevisions",
            "batch/v1=jobs,cronjobs",
            "example.com/v1alpha1=gadgets",
            "example.com/v1=widgets",
        ],
        summary
    );

    let namespaced = discovery.server_preferred_namespaced_resources().await.unwrap();
    assert_eq!(5, namespaced.len());
    assert_eq!(vec!["pods", "services"], namespaced[0].resources.iter().map(|r| r.name.as_str()).collect::<Vec<_>>());
    assert!(namespaced.iter().all(|l| l.group_version != "example.com/v1alpha1"));

    assert_eq!(1, calls(&discovery.inner().groups_calls));
    assert_eq!(6, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn openapi_schema_errors_are_not_cached_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.inner().fail_next(1);

    assert!(discovery.openapi_schema().await.is_err());
    let first = discovery.openapi_schema().await.unwrap();
    let second = discovery.openapi_schema().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(2, calls(&discovery.inner().schema_calls));
}

#[tokio::test]
async fn server_preferred_resources_keep_discovered_groups_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.server_groups().await.unwrap();
    discovery.server_resources_for_group_version("v1").await.unwrap();
    discovery.inner().fail_next(1);

    let error = discovery.server_preferred_resources().await.unwrap_err();

    let DiscoveryError::GroupDiscoveryFailed { resources, failed } = &error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(vec!["apps/v1"], failed.keys().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        vec!["v1", "apps/v1beta1", "batch/v1", "example.com/v1alpha1", "example.com/v1"],
        resources.iter().map(|l| l.group_version.as_str()).collect::<Vec<_>>()
    );
    assert_eq!(resources.len(), error.partial_resources().len());
    assert!(error.to_string().starts_with("unable to retrieve the complete list of server APIs: apps/v1: "));

    let preferred = discovery.server_preferred_resources().await.unwrap();
    assert_eq!(6, preferred.len());
    assert_eq!(7, calls(&discovery.inner().resources_calls));
}

#[tokio::test]
async fn server_resources_keep_discovered_groups_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.server_groups().await.unwrap();
    discovery.inner().fail_next(1);

    let result = discovery.server_resources().await;

    let Err(DiscoveryError::GroupDiscoveryFailed { resources, failed }) = result else {
        panic!("expected partial discovery result");
    };
    assert_eq!(vec!["v1"], failed.keys().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(5, resources.len());
}

#[tokio::test]
async fn server_preferred_namespaced_resources_keep_discovered_groups_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.server_groups().await.unwrap();
    discovery.inner().fail_next(1);

    let result = discovery.server_preferred_namespaced_resources().await;

    let Err(DiscoveryError::GroupDiscoveryFailed { resources, failed }) = result else {
        panic!("expected partial discovery result");
    };
    assert!(failed.contains_key("v1"));
    assert!(resources.iter().all(|l| l.group_version != "v1"));
    assert!(resources.iter().all(|l| l.resources.iter().all(|r| r.namespaced)));
    assert_eq!(4, resources.len());
}
