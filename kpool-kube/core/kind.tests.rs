use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;

use super::*;

#[test]
fn kind_with_group_test() {
    let kind: Kind = "pod".into();
    assert_eq!("pod", kind.name());
    assert!(!kind.has_group());
    assert_eq!("", kind.group());
    assert!(!kind.has_version());
    assert_eq!("", kind.version());

    let kind: Kind = "deployments.apps".into();
    assert_eq!("deployments", kind.name());
    assert!(kind.has_group());
    assert_eq!("apps", kind.group());
    assert!(!kind.has_version());

    let kind: Kind = "certificates.cert-manager.io/v1".into();
    assert_eq!("certificates", kind.name());
    assert!(kind.has_group());
    assert_eq!("cert-manager.io", kind.group());
    assert!(kind.has_version());
    assert_eq!("v1", kind.version());
    assert_eq!("cert-manager.io/v1", kind.api_version());

    let kind: Kind = "pod./v1".into();
    assert_eq!("pod", kind.name());
    assert!(!kind.has_group());
    assert!(!kind.has_version());
}

#[test]
fn kind_with_version_only_test() {
    let kind: Kind = "pod./v2".into();
    assert_eq!("pod", kind.name());
    assert!(!kind.has_group());
    assert!(kind.has_version());
    assert_eq!("v2", kind.api_version());

    let kind: Kind = "widget/v1.2".into();
    assert_eq!("widget", kind.name());
    assert!(!kind.has_group());
    assert_eq!("v1.2", kind.version());
}

#[test]
fn kind_new_test() {
    assert_eq!("pods", Kind::new("pods", "", "v1").as_str());
    assert_eq!("pods", Kind::new("pods", "", "").as_str());
    assert_eq!("jobs.batch", Kind::new("jobs", "batch", "").as_str());
    assert_eq!("jobs.batch/v1", Kind::new("jobs", "batch", "v1").as_str());
}

#[test]
fn kind_matches_test() {
    let resource = APIResource {
        name: "deployments".to_owned(),
        singular_name: "deployment".to_owned(),
        kind: "Deployment".to_owned(),
        short_names: Some(vec!["deploy".to_owned()]),
        namespaced: true,
        ..Default::default()
    };
    let scale = APIResource {
        name: "deployments/scale".to_owned(),
        kind: "Scale".to_owned(),
        ..Default::default()
    };

    assert!(Kind::from("deploy").matches(&resource));
    assert!(Kind::from("Deployment").matches(&resource));
    assert!(Kind::from("deployment.apps").matches(&resource));
    assert!(Kind::from("DEPLOYMENTS").matches(&resource));
    assert!(!Kind::from("pods").matches(&resource));
    assert!(!Kind::from("scale").matches(&scale));
}
