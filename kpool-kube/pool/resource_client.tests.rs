use rstest::rstest;

use super::*;
use crate::discovery::fake::test_client;

#[rstest]
#[case("/api", "", "v1", Some("default"), "pods", "/api/v1/namespaces/default/pods")]
#[case("/api", "", "v1", None, "namespaces", "/api/v1/namespaces")]
#[case("/apis", "apps", "v1", Some("kube-system"), "deployments", "/apis/apps/v1/namespaces/kube-system/deployments")]
#[case("/apis/", "rbac.authorization.k8s.io", "v1", None, "clusterroles", "/apis/rbac.authorization.k8s.io/v1/clusterroles")]
#[case("/custom/apis", "example.com", "v1alpha1", Some("ns"), "widgets", "/custom/apis/example.com/v1alpha1/namespaces/ns/widgets")]
fn resource_url_path_test(
    #[case] api_path: &str,
    #[case] group: &str,
    #[case] version: &str,
    #[case] namespace: Option<&str>,
    #[case] resource: &str,
    #[case] expected: &str,
) {
    let gv = GroupVersion::gv(group, version);
    assert_eq!(expected, resource_url_path(api_path, &gv, namespace, resource));
}

#[tokio::test]
async fn within_namespace_test() {
    let client = ResourceClient::new(
        test_client(),
        "/apis".to_owned(),
        GroupVersion::gv("batch", "v1"),
        "jobs".to_owned(),
    );

    assert_eq!(None, client.namespace());
    assert_eq!("/apis/batch/v1/jobs", client.url_path());

    let client = client.within("team-a");
    assert_eq!(Some("team-a"), client.namespace());
    assert_eq!("jobs", client.resource());
    assert_eq!("/apis/batch/v1/namespaces/team-a/jobs", client.url_path());
}

#[tokio::test]
async fn request_uri_test() {
    let client = ResourceClient::new(test_client(), "/api".to_owned(), GroupVersion::gv("", "v1"), "pods".to_owned())
        .within("default");

    let request = client.request().get("web-0", &GetParams::default()).unwrap();
    assert_eq!("/api/v1/namespaces/default/pods/web-0", request.uri().path());

    let request = client.request().get_subresource("status", "web-0").unwrap();
    assert_eq!("/api/v1/namespaces/default/pods/web-0/status", request.uri().path());
}
