use rstest::rstest;

use super::*;

fn test_config() -> Config {
    Config::new("http://127.0.0.1:6443".parse().unwrap())
}

#[rstest]
#[case("", "v1", "Pod", "/api")]
#[case("apps", "v1", "Deployment", "/apis")]
#[case("example.com", "v1alpha1", "Widget", "/apis")]
fn legacy_api_path_resolver_test(#[case] group: &str, #[case] version: &str, #[case] kind: &str, #[case] expected: &str) {
    assert_eq!(expected, legacy_api_path_resolver(&GroupVersionKind::gvk(group, version, kind)));
}

#[test]
fn overriding_api_path_resolver_test() {
    let resolver = overriding_api_path_resolver(HashMap::from([("example.com".to_owned(), "/custom".to_owned())]));

    assert_eq!("/custom", resolver(&GroupVersionKind::gvk("example.com", "v1", "Widget")));
    assert_eq!("/apis", resolver(&GroupVersionKind::gvk("apps", "v1", "Deployment")));
    assert_eq!("/api", resolver(&GroupVersionKind::gvk("", "v1", "Pod")));
}

#[tokio::test]
async fn clients_are_reused_test() {
    let pool = ClientPool::with_legacy_resolver(&test_config());
    assert!(pool.is_empty());

    let deployments = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("apps", "v1", "Deployment"))
        .unwrap();
    let stateful_sets = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("apps", "v1", "StatefulSet"))
        .unwrap();
    let pods = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("", "v1", "Pod"))
        .unwrap();

    assert_eq!(2, pool.len());
    assert_eq!("/apis", deployments.api_path());
    assert_eq!("/apis", stateful_sets.api_path());
    assert_eq!("apps/v1", deployments.group_version().api_version());
    assert_eq!("/api", pods.api_path());
    assert_eq!("v1", pods.group_version().api_version());
}

#[tokio::test]
async fn clients_differ_by_version_test() {
    let pool = ClientPool::with_legacy_resolver(&test_config());

    let v1 = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("apps", "v1", "Deployment"))
        .unwrap();
    let v1beta1 = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("apps", "v1beta1", "Deployment"))
        .unwrap();

    assert_eq!(2, pool.len());
    assert_eq!("/apis/apps/v1/deployments", v1.resource("deployments").url_path());
    assert_eq!(
        "/apis/apps/v1beta1/namespaces/default/deployments",
        v1beta1.resource("deployments").within("default").url_path()
    );
}

#[tokio::test]
async fn custom_resolver_test() {
    let resolver: ApiPathResolver = Arc::new(|gvk: &GroupVersionKind| format!("/proxy{}", legacy_api_path_resolver(gvk)));
    let pool = ClientPool::new(&test_config(), resolver);

    let client = pool
        .client_for_group_version_kind(&GroupVersionKind::gvk("", "v1", "ConfigMap"))
        .unwrap();

    assert_eq!("/proxy/api", client.api_path());
    assert_eq!(
        "/proxy/api/v1/namespaces/app/configmaps",
        client.resource("configmaps").within("app").url_path()
    );
    assert_eq!("http://127.0.0.1:6443/", pool.config().cluster_url.to_string());
}
