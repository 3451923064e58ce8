use super::*;

#[test]
fn parse_objects_test() {
    let input = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  namespace: team-a
data:
  key: value
---
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
spec:
  replicas: 2
"#;

    let objects = parse_objects(input).unwrap();

    assert_eq!(2, objects.len());
    let types = objects[0].types.as_ref().unwrap();
    assert_eq!("v1", types.api_version);
    assert_eq!("ConfigMap", types.kind);
    assert_eq!(Some("team-a"), objects[0].metadata.namespace.as_deref());
    assert_eq!("value", objects[0].data["data"]["key"]);
    assert_eq!(Some("web"), objects[1].metadata.name.as_deref());
    assert_eq!(None, objects[1].metadata.namespace.as_deref());
    assert_eq!(2, objects[1].data["spec"]["replicas"]);
}

#[test]
fn parse_objects_flattens_lists_test() {
    let input = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: Service
    metadata:
      name: web
  - apiVersion: v1
    kind: Pod
    metadata:
      name: web-0
---
apiVersion: v1
kind: Namespace
metadata:
  name: team-a
"#;

    let objects = parse_objects(input).unwrap();
    let kinds = objects
        .iter()
        .map(|o| o.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default())
        .collect::<Vec<_>>();

    assert_eq!(vec!["Service", "Pod", "Namespace"], kinds);
}

#[test]
fn parse_objects_empty_input_test() {
    assert!(parse_objects("").unwrap().is_empty());
    assert!(parse_objects("---\n---\n").unwrap().is_empty());
}

#[test]
fn parse_objects_errors_test() {
    let result = parse_objects("- just\n- a list\n");
    assert!(matches!(result, Err(ManifestError::NotAnObject { index: 0, .. })));

    let result = parse_objects("apiVersion: v1\nkind: [unclosed\n");
    assert!(matches!(result, Err(ManifestError::InvalidYaml(_))));
}
