use kube::core::{GroupVersionKind, TypeMeta};

#[cfg(test)]
#[path = "./gvk.tests.rs"]
mod gvk_tests;

/// Returns [`GroupVersionKind`] for the specified `types`.\
/// **Note** that `None` is returned if `apiVersion` or `kind` is empty or `apiVersion` is malformed.
pub fn gvk_of(types: &TypeMeta) -> Option<GroupVersionKind> {
    if types.kind.is_empty() {
        return None;
    }

    let (group, version) = match types.api_version.split_once('/') {
        Some((group, version)) if !group.is_empty() => (group, version),
        Some(_) => return None,
        None => ("", types.api_version.as_str()),
    };

    if version.is_empty() || version.contains('/') {
        None
    } else {
        Some(GroupVersionKind::gvk(group, version, &types.kind))
    }
}

/// Returns group part of the `group_version` string (empty for the core group).
pub fn group_of(group_version: &str) -> &str {
    group_version.split_once('/').map_or("", |(group, _)| group)
}

/// Formats [`GroupVersionKind`] as `apiVersion, Kind=kind`.
pub fn format_gvk(gvk: &GroupVersionKind) -> String {
    format!("{}, Kind={}", gvk.api_version(), gvk.kind)
}
