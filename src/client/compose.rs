use crate::error::Result;
use crate::types::{
    ComposeDeploymentStatusInfo, ComposeDeploymentUpgradeDescription,
    ComposeDeploymentUpgradeProgressInfo, CreateComposeDeploymentDescription, PagedData,
    PagingOptions, ServerTimeout,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Docker compose deployments.
#[async_trait]
pub trait ComposeDeploymentClient: Send + Sync {
    async fn create_compose_deployment(
        &self,
        description: &CreateComposeDeploymentDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get_compose_deployment_status(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ComposeDeploymentStatusInfo>;

    async fn get_compose_deployment_status_list(
        &self,
        paging: &PagingOptions,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ComposeDeploymentStatusInfo>>;

    async fn get_compose_deployment_upgrade_progress(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ComposeDeploymentUpgradeProgressInfo>;

    async fn remove_compose_deployment(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn start_compose_deployment_upgrade(
        &self,
        deployment_name: &str,
        description: &ComposeDeploymentUpgradeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn start_rollback_compose_deployment_upgrade(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;
}
