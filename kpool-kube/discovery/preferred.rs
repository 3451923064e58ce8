use k8s_openapi::apimachinery::pkg::apis::meta::v1::{APIGroup, APIResourceList};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(test)]
#[path = "./preferred.tests.rs"]
mod preferred_tests;

/// Selects preferred resources from `lists` fetched for all versions of the API `group`.\
/// Resource served in more than one version is taken from the group's preferred version,
/// or from the first version listing it if the preferred one does not serve it.\
/// **Note** that subresources are skipped and lists left empty are not returned.
pub fn preferred_resources(group: &APIGroup, lists: &[Arc<APIResourceList>]) -> Vec<Arc<APIResourceList>> {
    let preferred = group.preferred_version.as_ref().map(|v| v.group_version.as_str());

    let mut chosen = HashMap::<&str, usize>::new();
    for (index, list) in lists.iter().enumerate() {
        let is_preferred = preferred == Some(list.group_version.as_str());
        for resource in list.resources.iter().filter(|r| !r.name.contains('/')) {
            chosen
                .entry(resource.name.as_str())
                .and_modify(|i| {
                    if is_preferred {
                        *i = index;
                    }
                })
                .or_insert(index);
        }
    }

    lists
        .iter()
        .enumerate()
        .filter_map(|(index, list)| {
            let resources = list
                .resources
                .iter()
                .filter(|r| chosen.get(r.name.as_str()) == Some(&index))
                .cloned()
                .collect::<Vec<_>>();

            (!resources.is_empty()).then(|| {
                Arc::new(APIResourceList {
                    group_version: list.group_version.clone(),
                    resources,
                })
            })
        })
        .collect()
}
