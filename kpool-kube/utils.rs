use kube::ResourceExt;
use kube::api::DynamicObject;

#[cfg(test)]
#[path = "./utils.tests.rs"]
mod utils_tests;

/// Serializes kubernetes resource to YAML without `managedFields`.
pub fn serialize_resource(mut resource: DynamicObject) -> Result<String, serde_yaml::Error> {
    resource.metadata.managed_fields = None;
    serde_yaml::to_string(&resource)
}

/// Returns `namespace/name` of the object, or just its name for cluster scoped objects.
pub fn object_ref(resource: &DynamicObject) -> String {
    match resource.metadata.namespace.as_deref() {
        Some(namespace) if !namespace.is_empty() => format!("{}/{}", namespace, resource.name_any()),
        _ => resource.name_any(),
    }
}
