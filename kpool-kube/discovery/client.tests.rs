use rstest::rstest;

use super::*;
use crate::discovery::fake::test_client;

#[rstest]
#[case("v1", "", "v1")]
#[case("apps/v1", "apps", "v1")]
#[case("example.com/v1alpha1", "example.com", "v1alpha1")]
fn parse_group_version_test(#[case] input: &str, #[case] group: &str, #[case] version: &str) {
    assert_eq!((group, version), parse_group_version(input).unwrap());
}

#[rstest]
#[case("")]
#[case("/v1")]
#[case("apps/")]
#[case("a/b/c")]
#[case("/")]
fn parse_invalid_group_version_test(#[case] input: &str) {
    assert!(matches!(parse_group_version(input), Err(DiscoveryError::InvalidGroupVersion(gv)) if gv == input));
}

#[tokio::test]
async fn invalid_group_version_is_rejected_before_request_test() {
    let discovery = ClusterDiscovery::new(test_client());

    let result = discovery.server_resources_for_group_version("apps/v1/extra").await;

    assert!(matches!(result, Err(DiscoveryError::InvalidGroupVersion(gv)) if gv == "apps/v1/extra"));
}

#[rstest]
#[case(vec![], None)]
#[case(vec!["v1"], Some("v1"))]
#[case(vec!["v1", "v2"], Some("v1"))]
fn core_group_test(#[case] versions: Vec<&str>, #[case] preferred: Option<&str>) {
    let core = APIVersions {
        versions: versions.iter().map(|v| (*v).to_owned()).collect(),
        ..Default::default()
    };

    let group = core_group(&core);

    assert_eq!(preferred.is_some(), group.is_some());
    if let Some(group) = group {
        assert_eq!("", group.name);
        assert_eq!(preferred, group.preferred_version.as_ref().map(|v| v.group_version.as_str()));
        assert_eq!(
            versions,
            group.versions.iter().map(|v| v.group_version.as_str()).collect::<Vec<_>>()
        );
        assert!(group.versions.iter().all(|v| v.group_version == v.version));
    }
}
