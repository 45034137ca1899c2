use crate::error::Result;
use crate::types::{
    RepairTask, RepairTaskCancelDescription, RepairTaskQuery,
    RepairTaskUpdateHealthPolicyDescription, RepairTaskUpdateInfo, RepairTaskVersionedId,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Repair task management. Every mutation returns the task's new version.
#[async_trait]
pub trait RepairManagementClient: Send + Sync {
    async fn create_repair_task(
        &self,
        task: &RepairTask,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo>;

    async fn cancel_repair_task(
        &self,
        description: &RepairTaskCancelDescription,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo>;

    /// Delete a completed task.
    async fn delete_repair_task(
        &self,
        task: &RepairTaskVersionedId,
        cancel: &CancellationToken,
    ) -> Result<()>;

    async fn force_approve_repair_task(
        &self,
        task: &RepairTaskVersionedId,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo>;

    async fn update_repair_task_health_policy(
        &self,
        description: &RepairTaskUpdateHealthPolicyDescription,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo>;

    /// Executor-side state transition. `task` carries the full new state.
    async fn update_repair_execution_state(
        &self,
        task: &RepairTask,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo>;

    async fn get_repair_task_list(
        &self,
        query: &RepairTaskQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<RepairTask>>;
}
