use crate::error::Result;
use crate::types::{
    ApplicationTypeByNameQuery, ApplicationTypeInfo, ApplicationTypeListQuery, ManifestInfo,
    PagedData, ProvisionApplicationTypeDescription, ServerTimeout,
    UnprovisionApplicationTypeDescription,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Application type provisioning and queries.
#[async_trait]
pub trait ApplicationTypeClient: Send + Sync {
    async fn get_application_type_info_list(
        &self,
        query: &ApplicationTypeListQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationTypeInfo>>;

    /// Versions of a single application type.
    async fn get_application_type_info_list_by_name(
        &self,
        application_type_name: &str,
        query: &ApplicationTypeByNameQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationTypeInfo>>;

    async fn provision_application_type(
        &self,
        description: &ProvisionApplicationTypeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn unprovision_application_type(
        &self,
        application_type_name: &str,
        description: &UnprovisionApplicationTypeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get_application_manifest(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ManifestInfo>;
}
