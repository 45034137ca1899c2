use crate::error::Result;
use crate::types::ServerTimeout;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Commands and queries against infrastructure service instances.
///
/// Command text and results are opaque to this crate; the infrastructure
/// service defines both.
#[async_trait]
pub trait InfrastructureClient: Send + Sync {
    /// Invoke a state-changing command. `service_id` selects the instance
    /// when the cluster runs more than one.
    async fn invoke_infrastructure_command(
        &self,
        command: &str,
        service_id: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<String>;

    /// Invoke a read-only query.
    async fn invoke_infrastructure_query(
        &self,
        command: &str,
        service_id: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<String>;
}
