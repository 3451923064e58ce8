use k8s_openapi::serde_json::{self, json};

use super::*;

fn config_map(namespace: Option<&str>) -> DynamicObject {
    let mut value = json!({
        "apiVersion": "v1",
        "kind": "ConfigMap",
        "metadata": {
            "name": "settings",
            "managedFields": [{ "manager": "kubectl", "operation": "Apply" }],
        },
        "data": { "key": "value" },
    });
    if let Some(namespace) = namespace {
        value["metadata"]["namespace"] = json!(namespace);
    }

    serde_json::from_value(value).unwrap()
}

#[test]
fn serialize_resource_test() {
    let object = config_map(Some("team-a"));
    assert!(object.metadata.managed_fields.is_some());

    let yaml = serialize_resource(object).unwrap();

    assert!(!yaml.contains("managedFields"));
    assert!(yaml.contains("name: settings"));
    assert!(yaml.contains("namespace: team-a"));
    assert!(yaml.contains("key: value"));
}

#[test]
fn object_ref_test() {
    assert_eq!("team-a/settings", object_ref(&config_map(Some("team-a"))));
    assert_eq!("settings", object_ref(&config_map(None)));
}
