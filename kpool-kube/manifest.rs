use kube::api::DynamicObject;
use serde::Deserialize;
use serde_yaml::Value;

#[cfg(test)]
#[path = "./manifest.tests.rs"]
mod manifest_tests;

/// Possible errors from manifest parsing.
#[derive(thiserror::Error, Debug)]
pub enum ManifestError {
    /// Document is not a valid YAML.
    #[error("invalid YAML document: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// Document is not a kubernetes object.
    #[error("document {index} is not a kubernetes object: {message}")]
    NotAnObject { index: usize, message: String },
}

/// Parses multi-document YAML `input` into [`DynamicObject`]s.\
/// **Note** that empty documents are skipped and `List` kinds are flattened into their items.
pub fn parse_objects(input: &str) -> Result<Vec<DynamicObject>, ManifestError> {
    let mut objects = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(input).enumerate() {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }

        if is_list(&value) {
            if let Some(Value::Sequence(items)) = value.get("items") {
                for item in items {
                    objects.push(to_object(index, item.clone())?);
                }
            }
        } else {
            objects.push(to_object(index, value)?);
        }
    }

    tracing::debug!("Parsed {} objects from manifest", objects.len());
    Ok(objects)
}

fn is_list(value: &Value) -> bool {
    value
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"))
        && value.get("items").is_some_and(Value::is_sequence)
}

fn to_object(index: usize, value: Value) -> Result<DynamicObject, ManifestError> {
    if !value.is_mapping() {
        return Err(ManifestError::NotAnObject {
            index,
            message: "expected a mapping".to_owned(),
        });
    }

    serde_yaml::from_value(value).map_err(|error| ManifestError::NotAnObject {
        index,
        message: error.to_string(),
    })
}
