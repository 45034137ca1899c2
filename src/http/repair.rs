use super::connection::{HttpCore, Query};
use crate::client::RepairManagementClient;
use crate::error::Result;
use crate::types::{
    RepairTask, RepairTaskCancelDescription, RepairTaskQuery,
    RepairTaskUpdateHealthPolicyDescription, RepairTaskUpdateInfo, RepairTaskVersionedId,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";

pub(crate) struct HttpRepairManagementClient {
    core: Arc<HttpCore>,
}

impl HttpRepairManagementClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

#[async_trait]
impl RepairManagementClient for HttpRepairManagementClient {
    async fn create_repair_task(
        &self,
        task: &RepairTask,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo> {
        tracing::info!("Creating repair task {} ({})", task.task_id, task.action);
        self.core
            .post_json("$/CreateRepairTask", &Query::new(API_VERSION), task, cancel)
            .await
    }

    async fn cancel_repair_task(
        &self,
        description: &RepairTaskCancelDescription,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo> {
        tracing::info!("Cancelling repair task {}", description.task_id);
        self.core
            .post_json("$/CancelRepairTask", &Query::new(API_VERSION), description, cancel)
            .await
    }

    async fn delete_repair_task(
        &self,
        task: &RepairTaskVersionedId,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Deleting repair task {}", task.task_id);
        self.core
            .send_unit(
                Method::POST,
                "$/DeleteRepairTask",
                &Query::new(API_VERSION),
                Some(task),
                cancel,
            )
            .await
    }

    async fn force_approve_repair_task(
        &self,
        task: &RepairTaskVersionedId,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo> {
        tracing::info!("Force approving repair task {}", task.task_id);
        self.core
            .post_json("$/ForceApproveRepairTask", &Query::new(API_VERSION), task, cancel)
            .await
    }

    async fn update_repair_task_health_policy(
        &self,
        description: &RepairTaskUpdateHealthPolicyDescription,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo> {
        self.core
            .post_json(
                "$/UpdateRepairTaskHealthPolicy",
                &Query::new(API_VERSION),
                description,
                cancel,
            )
            .await
    }

    async fn update_repair_execution_state(
        &self,
        task: &RepairTask,
        cancel: &CancellationToken,
    ) -> Result<RepairTaskUpdateInfo> {
        self.core
            .post_json("$/UpdateRepairExecutionState", &Query::new(API_VERSION), task, cancel)
            .await
    }

    async fn get_repair_task_list(
        &self,
        query: &RepairTaskQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<RepairTask>> {
        let mut params =
            Query::new(API_VERSION).opt("TaskIdFilter", query.task_id_filter.as_deref());
        if query.state_filter.bits() != 0 {
            params = params.param("StateFilter", query.state_filter.bits());
        }
        let params = params.opt("ExecutorFilter", query.executor_filter.as_deref());
        self.core.get_json("$/GetRepairTaskList", &params, cancel).await
    }
}
