//! Mesh resource clients.
//!
//! Mesh resources are addressed by name and described by a
//! [`ResourceDescription`]. Create-or-update is idempotent: sending the same
//! description twice leaves the resource unchanged.

use crate::error::Result;
use crate::types::{
    ApplicationResourceUpgradeProgressInfo, ContainerLogs, PagedData, ResourceDescription,
    SecretValue, SecretValueResourceDescription, ServiceReplicaDescription,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait MeshApplicationClient: Send + Sync {
    async fn create_or_update(
        &self,
        application_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn delete(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>>;

    async fn get_upgrade_progress(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ApplicationResourceUpgradeProgressInfo>;
}

#[async_trait]
pub trait MeshVolumeClient: Send + Sync {
    async fn create_or_update(
        &self,
        volume_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get(
        &self,
        volume_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn delete(&self, volume_resource_name: &str, cancel: &CancellationToken) -> Result<()>;

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>>;
}

#[async_trait]
pub trait MeshNetworkClient: Send + Sync {
    async fn create_or_update(
        &self,
        network_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get(
        &self,
        network_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn delete(&self, network_resource_name: &str, cancel: &CancellationToken) -> Result<()>;

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>>;
}

/// Secrets and their named values.
#[async_trait]
pub trait MeshSecretClient: Send + Sync {
    async fn create_or_update(
        &self,
        secret_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get(
        &self,
        secret_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn delete(&self, secret_resource_name: &str, cancel: &CancellationToken) -> Result<()>;

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>>;

    /// Add a value. Values are immutable once added.
    async fn add_value(
        &self,
        secret_resource_name: &str,
        value: &SecretValueResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Value metadata, without the secret itself.
    async fn get_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<SecretValueResourceDescription>;

    /// The unencrypted secret value.
    async fn show_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<SecretValue>;

    async fn delete_value(
        &self,
        secret_resource_name: &str,
        secret_value_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn list_values(
        &self,
        secret_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<SecretValueResourceDescription>>;
}

#[async_trait]
pub trait MeshGatewayClient: Send + Sync {
    async fn create_or_update(
        &self,
        gateway_resource_name: &str,
        description: &ResourceDescription,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get(
        &self,
        gateway_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn delete(&self, gateway_resource_name: &str, cancel: &CancellationToken) -> Result<()>;

    async fn list(&self, cancel: &CancellationToken) -> Result<PagedData<ResourceDescription>>;
}

/// Services of a mesh application and their replicas. Services are created
/// through their application's description.
#[async_trait]
pub trait MeshServiceClient: Send + Sync {
    async fn get(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ResourceDescription>;

    async fn list(
        &self,
        application_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ResourceDescription>>;

    async fn get_replica(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        replica_name: &str,
        cancel: &CancellationToken,
    ) -> Result<ServiceReplicaDescription>;

    async fn list_replicas(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ServiceReplicaDescription>>;
}

#[async_trait]
pub trait MeshCodePackageClient: Send + Sync {
    /// Container logs of one code package in a replica. `tail` limits the
    /// number of lines from the end.
    async fn get_container_logs(
        &self,
        application_resource_name: &str,
        service_resource_name: &str,
        replica_name: &str,
        code_package_name: &str,
        tail: Option<u64>,
        cancel: &CancellationToken,
    ) -> Result<ContainerLogs>;
}
