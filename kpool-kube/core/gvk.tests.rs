use rstest::rstest;

use super::*;

fn types(api_version: &str, kind: &str) -> TypeMeta {
    TypeMeta {
        api_version: api_version.to_owned(),
        kind: kind.to_owned(),
    }
}

#[rstest]
#[case("v1", "Pod", "", "v1")]
#[case("apps/v1", "Deployment", "apps", "v1")]
#[case("cert-manager.io/v1", "Certificate", "cert-manager.io", "v1")]
fn gvk_of_test(#[case] api_version: &str, #[case] kind: &str, #[case] group: &str, #[case] version: &str) {
    let gvk = gvk_of(&types(api_version, kind)).unwrap();

    assert_eq!(group, gvk.group);
    assert_eq!(version, gvk.version);
    assert_eq!(kind, gvk.kind);
}

#[rstest]
#[case("", "Pod")]
#[case("v1", "")]
#[case("apps/", "Deployment")]
#[case("a/b/c", "Deployment")]
fn gvk_of_invalid_test(#[case] api_version: &str, #[case] kind: &str) {
    assert!(gvk_of(&types(api_version, kind)).is_none());
}

#[test]
fn group_of_test() {
    assert_eq!("", group_of("v1"));
    assert_eq!("apps", group_of("apps/v1"));
    assert_eq!("cert-manager.io", group_of("cert-manager.io/v1"));
}

#[test]
fn format_gvk_test() {
    assert_eq!("v1, Kind=Pod", format_gvk(&GroupVersionKind::gvk("", "v1", "Pod")));
    assert_eq!(
        "apps/v1, Kind=Deployment",
        format_gvk(&GroupVersionKind::gvk("apps", "v1", "Deployment"))
    );
}
