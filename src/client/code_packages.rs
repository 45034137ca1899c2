use crate::error::Result;
use crate::types::{
    ApplicationId, ContainerLogs, ContainerLogsQuery, DeployedCodePackageInfo,
    DeployedCodePackageQuery, RestartDeployedCodePackageDescription, ServerTimeout,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Code packages deployed on cluster nodes.
#[async_trait]
pub trait CodePackageClient: Send + Sync {
    async fn get_deployed_code_package_info_list(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        query: &DeployedCodePackageQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedCodePackageInfo>>;

    async fn restart_deployed_code_package(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        description: &RestartDeployedCodePackageDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn get_container_logs_deployed_on_node(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        query: &ContainerLogsQuery,
        cancel: &CancellationToken,
    ) -> Result<ContainerLogs>;
}
