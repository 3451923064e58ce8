use super::*;
use crate::discovery::fake::{group, resource, resource_list};

fn names(list: &APIResourceList) -> Vec<&str> {
    list.resources.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn preferred_version_wins_test() {
    let group = group("apps", &["v1beta1", "v1"], "v1");
    let lists = vec![
        Arc::new(resource_list(
            "apps/v1beta1",
            vec![
                resource("deployments", "Deployment", true, &[]),
                resource("controllerrevisions", "ControllerRevision", true, &[]),
            ],
        )),
        Arc::new(resource_list(
            "apps/v1",
            vec![
                resource("deployments", "Deployment", true, &[]),
                resource("deployments/scale", "Scale", true, &[]),
            ],
        )),
    ];

    let result = preferred_resources(&group, &lists);

    assert_eq!(2, result.len());
    assert_eq!("apps/v1beta1", result[0].group_version);
    assert_eq!(vec!["controllerrevisions"], names(&result[0]));
    assert_eq!("apps/v1", result[1].group_version);
    assert_eq!(vec!["deployments"], names(&result[1]));
}

#[test]
fn first_version_wins_when_not_preferred_test() {
    let group = group("example.com", &["v1alpha1", "v1beta1", "v1"], "v1");
    let lists = vec![
        Arc::new(resource_list("example.com/v1alpha1", vec![resource("widgets", "Widget", true, &[])])),
        Arc::new(resource_list("example.com/v1beta1", vec![resource("widgets", "Widget", true, &[])])),
        Arc::new(resource_list("example.com/v1", vec![resource("gadgets", "Gadget", false, &[])])),
    ];

    let result = preferred_resources(&group, &lists);

    assert_eq!(2, result.len());
    assert_eq!("example.com/v1alpha1", result[0].group_version);
    assert_eq!(vec!["widgets"], names(&result[0]));
    assert_eq!("example.com/v1", result[1].group_version);
    assert_eq!(vec!["gadgets"], names(&result[1]));
}

#[test]
fn empty_lists_are_skipped_test() {
    let group = group("", &["v1"], "v1");
    let lists = vec![Arc::new(resource_list("v1", vec![resource("pods/status", "Pod", true, &[])]))];

    assert!(preferred_resources(&group, &lists).is_empty());
}
