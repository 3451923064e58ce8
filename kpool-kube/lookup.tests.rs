use rstest::rstest;

use super::*;
use crate::discovery::fake::{FakeDiscovery, resource, resource_list};
use crate::{CachedDiscoveryClient, MemCachedDiscovery};

#[rstest]
#[case("po", "v1", "Pod")]
#[case("Deployment", "apps/v1", "Deployment")]
#[case("deploy", "apps/v1", "Deployment")]
#[case("deployments.apps/v1beta1", "apps/v1beta1", "Deployment")]
#[case("widgets", "example.com/v1", "Widget")]
#[case("widget.example.com/v1alpha1", "example.com/v1alpha1", "Widget")]
#[case("gadgets.example.com", "example.com/v1alpha1", "Gadget")]
#[case("cj.batch", "batch/v1", "CronJob")]
#[tokio::test]
async fn lookup_kind_test(#[case] kind: &str, #[case] group_version: &str, #[case] expected_kind: &str) {
    let discovery = FakeDiscovery::new();

    let found = lookup_kind(&discovery, &kind.into()).await.unwrap().unwrap();

    assert_eq!(group_version, found.group_version);
    assert_eq!(expected_kind, found.resource.kind);
}

#[rstest]
#[case("eviction")]
#[case("unknown")]
#[case("pods.apps")]
#[case("deployments.apps/v2")]
#[tokio::test]
async fn lookup_kind_not_found_test(#[case] kind: &str) {
    let discovery = FakeDiscovery::new();

    assert!(lookup_kind(&discovery, &kind.into()).await.unwrap().is_none());
}

#[test]
fn find_resource_prefers_lowest_group_test() {
    let lists = vec![
        Arc::new(resource_list("zeta.io/v1", vec![resource("things", "Thing", true, &[])])),
        Arc::new(resource_list("alpha.io/v1", vec![resource("things", "Thing", true, &[])])),
        Arc::new(resource_list("beta.io/v1", vec![resource("things", "Thing", false, &[])])),
    ];

    let found = find_resource(&lists, &"things".into()).unwrap();
    assert_eq!("alpha.io/v1", found.group_version);
    assert_eq!("alpha.io", found.group());

    let found = find_resource(&lists, &"thing.beta.io".into()).unwrap();
    assert_eq!("beta.io/v1", found.group_version);
    assert!(!found.resource.namespaced);
}

#[test]
fn found_resource_gvk_test() {
    let found = FoundResource {
        group_version: "apps/v1".to_owned(),
        resource: resource("deployments", "Deployment", true, &[]),
    };
    assert_eq!(GroupVersionKind::gvk("apps", "v1", "Deployment"), found.gvk());

    let found = FoundResource {
        group_version: "v1".to_owned(),
        resource: resource("pods", "Pod", true, &[]),
    };
    assert_eq!(GroupVersionKind::gvk("", "v1", "Pod"), found.gvk());
}

#[tokio::test]
async fn lookup_kind_with_failed_group_test() {
    let discovery = MemCachedDiscovery::new(FakeDiscovery::new());
    discovery.server_groups().await.unwrap();
    discovery.inner().fail_next(1);

    let found = lookup_kind(&discovery, &"deploy".into()).await.unwrap().unwrap();
    assert_eq!("apps/v1", found.group_version);

    discovery.invalidate().await;
    discovery.server_groups().await.unwrap();
    discovery.inner().fail_next(1);

    let result = lookup_kind(&discovery, &"po".into()).await;
    assert!(matches!(result, Err(DiscoveryError::GroupDiscoveryFailed { failed, .. }) if failed.contains_key("v1")));
}
