use anyhow::{Context, Result};
use kpool_common::render_table;
use kpool_kube::client_for_resource;
use kpool_kube::utils::{object_ref, serialize_resource};
use kube::ResourceExt;
use kube::api::{DeleteParams, DynamicObject, PostParams};

use super::Session;

/// Prints REST endpoint of every object.
pub async fn resolve(session: &Session, objects: &[DynamicObject]) -> Result<()> {
    let mut rows = Vec::with_capacity(objects.len());
    for object in objects {
        let (client, subresources) = client_for_resource(&session.pool, &session.discovery, object, &session.namespace).await?;
        rows.push(vec![
            kind_of(object).to_owned(),
            object_ref(object),
            client.url_path(),
            subresources.join("/"),
        ]);
    }

    for line in render_table(&["KIND", "NAME", "PATH", "SUBRESOURCE"], &rows, 2) {
        println!("{line}");
    }

    Ok(())
}

/// Fetches every object from the cluster and prints it as YAML.
pub async fn get(session: &Session, objects: &[DynamicObject]) -> Result<()> {
    for object in objects {
        let name = name_of(object)?;
        let (client, subresources) = client_for_resource(&session.pool, &session.discovery, object, &session.namespace).await?;

        let yaml = if subresources.is_empty() {
            let fetched = client.get(name).await.with_context(|| format!("cannot get {}", describe(object)))?;
            serialize_resource(fetched)?
        } else {
            let fetched = client
                .get_subresource(&subresources.join("/"), name)
                .await
                .with_context(|| format!("cannot get {}", describe(object)))?;
            serde_yaml::to_string(&fetched)?
        };

        println!("---");
        print!("{yaml}");
    }

    Ok(())
}

/// Creates every object in the cluster.
pub async fn create(session: &Session, objects: &[DynamicObject]) -> Result<()> {
    for object in objects {
        let (client, subresources) = client_for_resource(&session.pool, &session.discovery, object, &session.namespace).await?;
        if !subresources.is_empty() {
            anyhow::bail!("cannot create {}, it is a subresource", describe(object));
        }

        let created = client
            .create(&PostParams::default(), object)
            .await
            .with_context(|| format!("cannot create {}", describe(object)))?;
        tracing::debug!("Created {} with uid {:?}", describe(&created), created.uid());
        println!("{} created", describe(&created));
    }

    Ok(())
}

/// Deletes every object from the cluster, in reverse order.
pub async fn delete(session: &Session, objects: &[DynamicObject]) -> Result<()> {
    for object in objects.iter().rev() {
        let name = name_of(object)?;
        let (client, subresources) = client_for_resource(&session.pool, &session.discovery, object, &session.namespace).await?;
        if !subresources.is_empty() {
            anyhow::bail!("cannot delete {}, it is a subresource", describe(object));
        }

        client
            .delete(name, &DeleteParams::default())
            .await
            .with_context(|| format!("cannot delete {}", describe(object)))?;
        println!("{} deleted", describe(object));
    }

    Ok(())
}

fn kind_of(object: &DynamicObject) -> &str {
    object.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default()
}

fn name_of(object: &DynamicObject) -> Result<&str> {
    object
        .metadata
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .with_context(|| format!("{} object has no name", kind_of(object)))
}

fn describe(object: &DynamicObject) -> String {
    format!("{} '{}'", kind_of(object), object_ref(object))
}
