use crate::error::Result;
use crate::types::{
    ApplicationDescription, ApplicationHealth, ApplicationHealthQuery, ApplicationId,
    ApplicationInfo, ApplicationListQuery, ApplicationLoadInfo, ApplicationUpgradeDescription,
    ApplicationUpgradeProgressInfo, PagedData, ServerTimeout,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Application lifecycle, health and upgrade operations.
#[async_trait]
pub trait ApplicationClient: Send + Sync {
    /// Create an application from a provisioned application type.
    async fn create_application(
        &self,
        description: &ApplicationDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Delete an application. `force_remove` skips graceful service shutdown.
    async fn delete_application(
        &self,
        application_id: &ApplicationId,
        force_remove: bool,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get_application_info(
        &self,
        application_id: &ApplicationId,
        exclude_application_parameters: bool,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationInfo>;

    /// One page of applications.
    async fn get_application_info_list(
        &self,
        query: &ApplicationListQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationInfo>>;

    async fn get_application_load_info(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationLoadInfo>;

    async fn get_application_health(
        &self,
        application_id: &ApplicationId,
        query: &ApplicationHealthQuery,
        cancel: &CancellationToken,
    ) -> Result<ApplicationHealth>;

    async fn start_application_upgrade(
        &self,
        application_id: &ApplicationId,
        description: &ApplicationUpgradeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get_application_upgrade(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationUpgradeProgressInfo>;

    /// Roll back an in-progress upgrade to the previous version.
    async fn rollback_application_upgrade(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;
}
