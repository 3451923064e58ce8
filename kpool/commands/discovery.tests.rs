use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResource;
use std::collections::BTreeMap;

use super::*;

fn resource(name: &str, kind: &str, short_names: Option<Vec<String>>) -> APIResource {
    APIResource {
        name: name.to_owned(),
        kind: kind.to_owned(),
        namespaced: true,
        short_names,
        ..Default::default()
    }
}

#[test]
fn resource_rows_test() {
    let lists = vec![
        Arc::new(APIResourceList {
            group_version: "v1".to_owned(),
            resources: vec![resource("services", "Service", Some(vec!["svc".to_owned()]))],
        }),
        Arc::new(APIResourceList {
            group_version: "apps/v1".to_owned(),
            resources: vec![
                resource("deployments", "Deployment", Some(vec!["deploy".to_owned(), "dep".to_owned()])),
                resource("controllerrevisions", "ControllerRevision", None),
            ],
        }),
    ];

    let rows = resource_rows(&lists);

    assert_eq!(
        vec![
            vec!["controllerrevisions", "", "apps/v1", "true", "ControllerRevision"],
            vec!["deployments", "deploy,dep", "apps/v1", "true", "Deployment"],
            vec!["services", "svc", "v1", "true", "Service"],
        ],
        rows
    );
}

#[test]
fn loaded_lists_test() {
    let list = Arc::new(APIResourceList {
        group_version: "v1".to_owned(),
        resources: vec![resource("pods", "Pod", None)],
    });

    let (lists, error) = loaded_lists(Ok(vec![list.clone()])).unwrap();
    assert_eq!(1, lists.len());
    assert!(error.is_none());

    let partial = DiscoveryError::GroupDiscoveryFailed {
        resources: vec![list],
        failed: BTreeMap::from([("metrics.k8s.io/v1beta1".to_owned(), DiscoveryError::NotFound("metrics.k8s.io/v1beta1".to_owned()))]),
    };
    let (lists, error) = loaded_lists(Err(partial)).unwrap();
    assert_eq!("v1", lists[0].group_version);
    assert!(matches!(error, Some(DiscoveryError::GroupDiscoveryFailed { .. })));

    let result = loaded_lists(Err(DiscoveryError::InvalidGroupVersion("/".to_owned())));
    assert!(matches!(result, Err(DiscoveryError::InvalidGroupVersion(_))));
}
