//! Mesh resources under `/Resources`.

use super::connection::{segment, HttpCore, Query};
use crate::client::{
    MeshApplicationClient, MeshCodePackageClient, MeshGatewayClient, MeshNetworkClient,
    MeshSecretClient, MeshServiceClient, MeshVolumeClient,
};
use crate::error::Result;
use crate::types::{
    ApplicationResourceUpgradeProgressInfo, ContainerLogs, PagedData, ResourceDescription,
    SecretValue, SecretValueResourceDescription, ServiceReplicaDescription,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.4-preview";

fn query() -> Query {
    Query::new(API_VERSION)
}

/// CRUD over one top-level resource collection, e.g. `Resources/Volumes`.
struct Collection {
    core: Arc<HttpCore>,
    path: &'static str,
}

impl Collection {
    fn new(core: Arc<HttpCore>, path: &'static str) -> Self {
        Self { core, path }
    }

    fn item(&self, name: &str) -> String {
        format!("{}/{}", self.path, segment(name))
    }

    async fn create_or_update(
        &self,
        name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Creating or updating {}/{}", self.path, name);
        self.core
            .send_unit(Method::PUT, &self.item(name), &query(), Some(description), cancel)
            .await
    }

    async fn get(&self, name: &str, cancel: &CancellationToken) -> Result<ResourceDescription> {
        self.core.get_json(&self.item(name), &query(), cancel).await
    }

    async fn delete(&self, name: &str, cancel: &CancellationToken) -> Result<()> {
        tracing::info!("Deleting {}/{}", self.path, name);
        self.core
            .send_unit::<()>(Method::DELETE, &self.item(name), &query(), None, cancel)
            .await
    }

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>> {
        self.core.get_json(self.path, &query(), cancel).await
    }
}

pub(crate) struct HttpMeshApplicationClient(Collection);

impl HttpMeshApplicationClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self(Collection::new(core, "Resources/Applications"))
    }
}

#[async_trait]
impl MeshApplicationClient for HttpMeshApplicationClient {
    async fn create_or_update(
        &self,
        application_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.0
            .create_or_update(application_resource_name, description, cancel)
            .await
    }

    async fn get(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription> {
        self.0.get(application_resource_name, cancel).await
    }

    async fn delete(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.0.delete(application_resource_name, cancel).await
    }

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>> {
        self.0.list(cancel).await
    }

    async fn get_upgrade_progress(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ApplicationResourceUpgradeProgressInfo> {
        let path = format!("{}/$/GetUpgradeProgress", self.0.item(application_resource_name));
        self.0.core.get_json(&path, &query(), cancel).await
    }
}

/// Mesh clients that are plain collections.
macro_rules! collection_client {
    ($name:ident, $trait:ident, $path:expr) => {
        pub(crate) struct $name(Collection);

        impl $name {
            pub fn new(core: Arc<HttpCore>) -> Self {
                Self(Collection::new(core, $path))
            }
        }

        #[async_trait]
        impl $trait for $name {
            async fn create_or_update(
                &self,
                name: &str,
                description: &ResourceDescription,
                cancel: &CancellationToken,
            ) -> Result<()> {
                self.0.create_or_update(name, description, cancel).await
            }

            async fn get(
                &self,
                name: &str,
                cancel: &CancellationToken,
            ) -> Result<ResourceDescription> {
                self.0.get(name, cancel).await
            }

            async fn delete(&self, name: &str, cancel: &CancellationToken) -> Result<()> {
                self.0.delete(name, cancel).await
            }

            async fn list(
                &self,
                cancel: &CancellationToken,
            ) -> Result<PagedData<ResourceDescription>> {
                self.0.list(cancel).await
            }
        }
    };
}

collection_client!(HttpMeshVolumeClient, MeshVolumeClient, "Resources/Volumes");
collection_client!(HttpMeshNetworkClient, MeshNetworkClient, "Resources/Networks");
collection_client!(HttpMeshGatewayClient, MeshGatewayClient, "Resources/Gateways");

pub(crate) struct HttpMeshSecretClient(Collection);

impl HttpMeshSecretClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self(Collection::new(core, "Resources/Secrets"))
    }

    fn value_path(&self, secret: &str, value: &str) -> String {
        format!("{}/values/{}", self.0.item(secret), segment(value))
    }
}

#[async_trait]
impl MeshSecretClient for HttpMeshSecretClient {
    async fn create_or_update(
        &self,
        secret_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()> {
        self.0
            .create_or_update(secret_resource_name, description, cancel)
            .await
    }

    async fn get(
        &self,
        secret_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription> {
        self.0.get(secret_resource_name, cancel).await
    }

    async fn delete(&self, secret_resource_name: &str, cancel: &CancellationToken) -> Result<()> {
        self.0.delete(secret_resource_name, cancel).await
    }

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>> {
        self.0.list(cancel).await
    }

    async fn add_value(
        &self,
        secret_resource_name: &str,
        value: &SecretValueResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Adding value {} to secret {}", value.name, secret_resource_name);
        self.0
            .core
            .send_unit(
                Method::PUT,
                &self.value_path(secret_resource_name, &value.name),
                &query(),
                Some(value),
                cancel,
            )
            .await
    }

    async fn get_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<SecretValueResourceDescription> {
        self.0
            .core
            .get_json(
                &self.value_path(secret_resource_name, secret_value_resource_name),
                &query(),
                cancel,
            )
            .await
    }

    async fn show_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<SecretValue> {
        let path = format!(
            "{}/list_value",
            self.value_path(secret_resource_name, secret_value_resource_name)
        );
        let response = self
            .0
            .core
            .invoke(Method::POST, &path, &query(), None, cancel)
            .await?;
        response.json()
    }

    async fn delete_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!(
            "Deleting value {} of secret {}",
            secret_value_resource_name,
            secret_resource_name
        );
        self.0
            .core
            .send_unit::<()>(
                Method::DELETE,
                &self.value_path(secret_resource_name, secret_value_resource_name),
                &query(),
                None,
                cancel,
            )
            .await
    }

    async fn list_values(
        &self,
        secret_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<SecretValueResourceDescription>> {
        let path = format!("{}/values", self.0.item(secret_resource_name));
        self.0.core.get_json(&path, &query(), cancel).await
    }
}

pub(crate) struct HttpMeshServiceClient {
    core: Arc<HttpCore>,
}

impl HttpMeshServiceClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn services_path(application: &str) -> String {
    format!("Resources/Applications/{}/Services", segment(application))
}

fn replicas_path(application: &str, service: &str) -> String {
    format!("{}/{}/Replicas", services_path(application), segment(service))
}

#[async_trait]
impl MeshServiceClient for HttpMeshServiceClient {
    async fn get(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription> {
        let path = format!(
            "{}/{}",
            services_path(application_resource_name),
            segment(service_resource_name)
        );
        self.core.get_json(&path, &query(), cancel).await
    }

    async fn list(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ResourceDescription>> {
        self.core
            .get_json(&services_path(application_resource_name), &query(), cancel)
            .await
    }

    async fn get_replica(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        replica_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ServiceReplicaDescription> {
        let path = format!(
            "{}/{}",
            replicas_path(application_resource_name, service_resource_name),
            segment(replica_name)
        );
        self.core.get_json(&path, &query(), cancel).await
    }

    async fn list_replicas(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ServiceReplicaDescription>> {
        self.core
            .get_json(
                &replicas_path(application_resource_name, service_resource_name),
                &query(),
                cancel,
            )
            .await
    }
}

pub(crate) struct HttpMeshCodePackageClient {
    core: Arc<HttpCore>,
}

impl HttpMeshCodePackageClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

#[async_trait]
impl MeshCodePackageClient for HttpMeshCodePackageClient {
    async fn get_container_logs(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        replica_name: &str,
        code_package_name: &str,
        tail: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<ContainerLogs> {
        let path = format!(
            "{}/{}/CodePackages/{}/Logs",
            replicas_path(application_resource_name, service_resource_name),
            segment(replica_name),
            segment(code_package_name)
        );
        self.core
            .get_json(&path, &query().opt("Tail", tail), cancel)
            .await
    }
}
