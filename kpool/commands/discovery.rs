use anyhow::Result;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::APIResourceList;
use kpool_common::render_table;
use kpool_config::{APP_NAME, APP_VERSION};
use kpool_kube::{DiscoveryClient, DiscoveryError};
use kpool_kube::lookup::lookup_kind;
use std::sync::Arc;

use super::Session;

#[cfg(test)]
#[path = "./discovery.tests.rs"]
mod discovery_tests;

/// Prints client and server versions.
pub async fn version(session: &Session) -> Result<()> {
    let info = session.discovery.server_version().await?;

    println!("Client Version: {APP_NAME} v{APP_VERSION}");
    println!("Server Version: {}", info.git_version);

    Ok(())
}

/// Prints all group versions served by the cluster, sorted.
pub async fn api_versions(session: &Session) -> Result<()> {
    let groups = session.discovery.server_groups().await?;

    let mut versions = groups
        .groups
        .iter()
        .flat_map(|group| group.versions.iter().map(|v| v.group_version.as_str()))
        .collect::<Vec<_>>();
    versions.sort_unstable();

    for version in versions {
        println!("{version}");
    }

    Ok(())
}

/// Prints preferred resources served by the cluster as a table.\
/// **Note** that resources of group versions that could be discovered are printed
/// even if discovery of some other group versions failed.
pub async fn api_resources(session: &Session, namespaced_only: bool) -> Result<()> {
    let result = if namespaced_only {
        session.discovery.server_preferred_namespaced_resources().await
    } else {
        session.discovery.server_preferred_resources().await
    };
    let (lists, error) = loaded_lists(result)?;

    for line in render_table(&["NAME", "SHORTNAMES", "APIVERSION", "NAMESPACED", "KIND"], &resource_rows(&lists), 3) {
        println!("{line}");
    }

    match error {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Prints resource that matches the user provided `kind`.
pub async fn lookup(session: &Session, kind: &str) -> Result<()> {
    let Some(found) = lookup_kind(&session.discovery, &kind.into()).await? else {
        anyhow::bail!("the server doesn't have a resource type '{}'", kind);
    };

    let client = session.pool.client_for_group_version_kind(&found.gvk())?;
    let row = vec![
        found.resource.name.clone(),
        found.group_version.clone(),
        found.resource.kind.clone(),
        found.resource.namespaced.to_string(),
        client.resource(&found.resource.name).url_path(),
    ];
    for line in render_table(&["NAME", "APIVERSION", "KIND", "NAMESPACED", "PATH"], &[row], 3) {
        println!("{line}");
    }

    Ok(())
}

/// Splits discovery `result` into lists to print and the error to report after printing them.
fn loaded_lists(
    result: Result<Vec<Arc<APIResourceList>>, DiscoveryError>,
) -> Result<(Vec<Arc<APIResourceList>>, Option<DiscoveryError>), DiscoveryError> {
    match result {
        Ok(lists) => Ok((lists, None)),
        Err(error) if !error.partial_resources().is_empty() => {
            if let DiscoveryError::GroupDiscoveryFailed { failed, .. } = &error {
                for (group_version, source) in failed {
                    tracing::warn!("Skipping {}: {}", group_version, source);
                }
            }

            Ok((error.partial_resources().to_vec(), Some(error)))
        },
        Err(error) => Err(error),
    }
}

fn resource_rows(lists: &[Arc<APIResourceList>]) -> Vec<Vec<String>> {
    let mut rows = lists
        .iter()
        .flat_map(|list| {
            list.resources.iter().map(|resource| {
                vec![
                    resource.name.clone(),
                    resource.short_names.as_deref().unwrap_or_default().join(","),
                    list.group_version.clone(),
                    resource.namespaced.to_string(),
                    resource.kind.clone(),
                ]
            })
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| a[0].cmp(&b[0]).then_with(|| a[2].cmp(&b[2])));

    rows
}
