use super::connection::{segment, HttpCore, Query};
use crate::client::ComposeDeploymentClient;
use crate::error::Result;
use crate::types::{
    ComposeDeploymentStatusInfo, ComposeDeploymentUpgradeDescription,
    ComposeDeploymentUpgradeProgressInfo, CreateComposeDeploymentDescription, PagedData,
    PagingOptions, ServerTimeout,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0-preview";
const ROLLBACK_API_VERSION: &str = "6.4-preview";

pub(crate) struct HttpComposeDeploymentClient {
    core: Arc<HttpCore>,
}

impl HttpComposeDeploymentClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn deployment_path(deployment_name: &str, action: &str) -> String {
    format!("ComposeDeployments/{}{}", segment(deployment_name), action)
}

#[async_trait]
impl ComposeDeploymentClient for HttpComposeDeploymentClient {
    async fn create_compose_deployment(
        &self,
        description: &CreateComposeDeploymentDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Creating compose deployment {}", description.deployment_name);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(
                Method::PUT,
                "ComposeDeployments/$/Create",
                &query,
                Some(description),
                cancel,
            )
            .await
    }

    async fn get_compose_deployment_status(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ComposeDeploymentStatusInfo> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .get_json(&deployment_path(deployment_name, ""), &query, cancel)
            .await
    }

    async fn get_compose_deployment_status_list(
        &self,
        paging: &PagingOptions,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ComposeDeploymentStatusInfo>> {
        let query = Query::new(API_VERSION).paging(paging);
        self.core.get_json("ComposeDeployments", &query, cancel).await
    }

    async fn get_compose_deployment_upgrade_progress(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ComposeDeploymentUpgradeProgressInfo> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .get_json(
                &deployment_path(deployment_name, "/$/GetUpgradeProgress"),
                &query,
                cancel,
            )
            .await
    }

    async fn remove_compose_deployment(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Removing compose deployment {}", deployment_name);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit::<()>(
                Method::POST,
                &deployment_path(deployment_name, "/$/Delete"),
                &query,
                None,
                cancel,
            )
            .await
    }

    async fn start_compose_deployment_upgrade(
        &self,
        deployment_name: &str,
        description: &ComposeDeploymentUpgradeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Upgrading compose deployment {}", deployment_name);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(
                Method::POST,
                &deployment_path(deployment_name, "/$/Upgrade"),
                &query,
                Some(description),
                cancel,
            )
            .await
    }

    async fn start_rollback_compose_deployment_upgrade(
        &self,
        deployment_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Rolling back compose deployment {}", deployment_name);
        let query = Query::new(ROLLBACK_API_VERSION).timeout(server_timeout);
        self.core
            .send_unit::<()>(
                Method::POST,
                &deployment_path(deployment_name, "/$/RollbackUpgrade"),
                &query,
                None,
                cancel,
            )
            .await
    }
}
