use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIResource, APIResourceList};
use kube::core::GroupVersionKind;
use std::sync::Arc;

use crate::{DiscoveryClient, DiscoveryError, Kind, group_of};

#[cfg(test)]
#[path = "./lookup.tests.rs"]
mod lookup_tests;

/// Resource found for the user provided [`Kind`].
#[derive(Debug, Clone)]
pub struct FoundResource {
    pub group_version: String,
    pub resource: APIResource,
}

impl FoundResource {
    /// Returns group of the found resource (empty for the core group).
    pub fn group(&self) -> &str {
        group_of(&self.group_version)
    }

    /// Returns [`GroupVersionKind`] of the found resource.
    pub fn gvk(&self) -> GroupVersionKind {
        let version = self.group_version.rsplit('/').next().unwrap_or_default();
        GroupVersionKind::gvk(self.group(), version, &self.resource.kind)
    }
}

/// Finds resource for the specified `kind` using discovery.\
/// **Note** that all served versions are searched when `kind` specifies version, preferred ones otherwise.\
/// If some group versions cannot be discovered, the resource is still looked up in the remaining ones
/// and the discovery error is returned only when it is not found there.
pub async fn lookup_kind<D: DiscoveryClient>(discovery: &D, kind: &Kind) -> Result<Option<FoundResource>, DiscoveryError> {
    let lists = if kind.has_version() {
        discovery.server_resources().await
    } else {
        discovery.server_preferred_resources().await
    };

    match lists {
        Ok(lists) => Ok(find_resource(&lists, kind)),
        Err(error) => match find_resource(error.partial_resources(), kind) {
            Some(found) => {
                tracing::warn!("{}", error);
                Ok(Some(found))
            },
            None => Err(error),
        },
    }
}

/// Gets first matching resource for the specified `kind`.
pub fn find_resource(lists: &[Arc<APIResourceList>], kind: &Kind) -> Option<FoundResource> {
    let found = if kind.has_version() {
        find_with_version(lists, kind, &kind.api_version())
    } else if kind.has_group() && !kind.group().is_empty() {
        find_with_group(lists, kind, kind.group())
    } else {
        find_no_group(lists, kind)
    };

    found.map(|(list, resource)| FoundResource {
        group_version: list.group_version.clone(),
        resource: resource.clone(),
    })
}

fn candidates<'a>(lists: &'a [Arc<APIResourceList>], kind: &'a Kind) -> impl Iterator<Item = (&'a APIResourceList, &'a APIResource)> {
    lists
        .iter()
        .flat_map(|list| list.resources.iter().map(move |r| (list.as_ref(), r)))
        .filter(|(_, r)| kind.matches(r))
}

fn find_with_version<'a>(
    lists: &'a [Arc<APIResourceList>],
    kind: &'a Kind,
    api_version: &str,
) -> Option<(&'a APIResourceList, &'a APIResource)> {
    candidates(lists, kind).find(|(list, _)| api_version.eq_ignore_ascii_case(&list.group_version))
}

fn find_with_group<'a>(
    lists: &'a [Arc<APIResourceList>],
    kind: &'a Kind,
    group: &str,
) -> Option<(&'a APIResourceList, &'a APIResource)> {
    candidates(lists, kind).find(|(list, _)| group.eq_ignore_ascii_case(group_of(&list.group_version)))
}

fn find_no_group<'a>(lists: &'a [Arc<APIResourceList>], kind: &'a Kind) -> Option<(&'a APIResourceList, &'a APIResource)> {
    candidates(lists, kind).min_by_key(|(list, _)| group_of(&list.group_version))
}
