use k8s_openapi::serde_json::{self, Value};
use kube::Client;
use kube::api::{DeleteParams, DynamicObject, GetParams, ListParams, ObjectList, Patch, PatchParams, PostParams};
use kube::core::{GroupVersion, Request};
use serde::Serialize;
use std::fmt::Debug;

#[cfg(test)]
#[path = "./resource_client.tests.rs"]
mod resource_client_tests;

/// Builds REST path of the `resource` collection: `{api_path}/{group_version}[/namespaces/{namespace}]/{resource}`.
pub fn resource_url_path(api_path: &str, group_version: &GroupVersion, namespace: Option<&str>, resource: &str) -> String {
    let api_path = api_path.trim_end_matches('/');
    let api_version = group_version.api_version();

    match namespace {
        Some(namespace) => format!("{api_path}/{api_version}/namespaces/{namespace}/{resource}"),
        None => format!("{api_path}/{api_version}/{resource}"),
    }
}

/// Client for a single kubernetes resource type, optionally scoped to a namespace.
#[derive(Clone)]
pub struct ResourceClient {
    client: Client,
    api_path: String,
    group_version: GroupVersion,
    resource: String,
    namespace: Option<String>,
}

impl ResourceClient {
    /// Creates new cluster scoped [`ResourceClient`] instance.
    pub fn new(client: Client, api_path: String, group_version: GroupVersion, resource: String) -> Self {
        Self {
            client,
            api_path,
            group_version,
            resource,
            namespace: None,
        }
    }

    /// Scopes the client to the specified `namespace`.
    pub fn within(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_owned());
        self
    }

    /// Returns resource (plural name) this client operates on.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns namespace this client is scoped to.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns group version this client is bound to.
    pub fn group_version(&self) -> &GroupVersion {
        &self.group_version
    }

    /// Returns REST path of the resource collection.
    pub fn url_path(&self) -> String {
        resource_url_path(
            &self.api_path,
            &self.group_version,
            self.namespace.as_deref(),
            &self.resource,
        )
    }

    /// Gets the named object.
    pub async fn get(&self, name: &str) -> kube::Result<DynamicObject> {
        let request = self
            .request()
            .get(name, &GetParams::default())
            .map_err(kube::Error::BuildRequest)?;
        self.client.request::<DynamicObject>(request).await
    }

    /// Gets the `subresource` of the named object.
    pub async fn get_subresource(&self, subresource: &str, name: &str) -> kube::Result<Value> {
        let request = self
            .request()
            .get_subresource(subresource, name)
            .map_err(kube::Error::BuildRequest)?;
        self.client.request::<Value>(request).await
    }

    /// Lists objects of the resource.
    pub async fn list(&self, lp: &ListParams) -> kube::Result<ObjectList<DynamicObject>> {
        let request = self.request().list(lp).map_err(kube::Error::BuildRequest)?;
        self.client.request::<ObjectList<DynamicObject>>(request).await
    }

    /// Creates the `object`.
    pub async fn create(&self, pp: &PostParams, object: &DynamicObject) -> kube::Result<DynamicObject> {
        let data = serde_json::to_vec(object).map_err(kube::Error::SerdeError)?;
        let request = self.request().create(pp, data).map_err(kube::Error::BuildRequest)?;
        self.client.request::<DynamicObject>(request).await
    }

    /// Replaces the named object with `object`.
    pub async fn replace(&self, name: &str, pp: &PostParams, object: &DynamicObject) -> kube::Result<DynamicObject> {
        let data = serde_json::to_vec(object).map_err(kube::Error::SerdeError)?;
        let request = self.request().replace(name, pp, data).map_err(kube::Error::BuildRequest)?;
        self.client.request::<DynamicObject>(request).await
    }

    /// Patches the named object.
    pub async fn patch<P: Serialize + Debug>(
        &self,
        name: &str,
        pp: &PatchParams,
        patch: &Patch<P>,
    ) -> kube::Result<DynamicObject> {
        let request = self.request().patch(name, pp, patch).map_err(kube::Error::BuildRequest)?;
        self.client.request::<DynamicObject>(request).await
    }

    /// Deletes the named object.\
    /// **Note** that API server responds with either the deleted object or a status.
    pub async fn delete(&self, name: &str, dp: &DeleteParams) -> kube::Result<Value> {
        let request = self.request().delete(name, dp).map_err(kube::Error::BuildRequest)?;
        self.client.request::<Value>(request).await
    }

    fn request(&self) -> Request {
        Request::new(self.url_path())
    }
}
