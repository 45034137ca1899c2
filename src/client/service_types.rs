use crate::error::Result;
use crate::types::{
    ApplicationId, DeployedServiceTypeInfo, ManifestInfo, ServerTimeout, ServiceTypeInfo,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Service types declared by application types and registered on nodes.
#[async_trait]
pub trait ServiceTypeClient: Send + Sync {
    async fn get_service_type_info_list(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<ServiceTypeInfo>>;

    /// `None` when the application type version has no such service type.
    async fn get_service_type_info_by_name(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        service_type_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Option<ServiceTypeInfo>>;

    async fn get_service_manifest(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        service_manifest_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ManifestInfo>;

    async fn get_deployed_service_type_info_list(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        service_manifest_name: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedServiceTypeInfo>>;

    /// A service type may be registered by several service packages, so
    /// this returns a list.
    async fn get_deployed_service_type_info_by_name(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        service_type_name: &str,
        service_manifest_name: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedServiceTypeInfo>>;
}
