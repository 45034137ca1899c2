use super::connection::{segment, HttpCore, Query};
use crate::client::CodePackageClient;
use crate::error::Result;
use crate::types::{
    ApplicationId, ContainerLogs, ContainerLogsQuery, DeployedCodePackageInfo,
    DeployedCodePackageQuery, RestartDeployedCodePackageDescription, ServerTimeout,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";
const LOGS_API_VERSION: &str = "6.2";

pub(crate) struct HttpCodePackageClient {
    core: Arc<HttpCore>,
}

impl HttpCodePackageClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn code_packages_path(node_name: &str, application_id: &ApplicationId, action: &str) -> String {
    format!(
        "Nodes/{}/$/GetApplications/{}/$/GetCodePackages{}",
        segment(node_name),
        segment(application_id.as_str()),
        action
    )
}

#[async_trait]
impl CodePackageClient for HttpCodePackageClient {
    async fn get_deployed_code_package_info_list(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        query: &DeployedCodePackageQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedCodePackageInfo>> {
        let params = Query::new(API_VERSION)
            .opt("ServiceManifestName", query.service_manifest_name.as_deref())
            .opt("CodePackageName", query.code_package_name.as_deref())
            .timeout(query.server_timeout);
        self.core
            .get_json(&code_packages_path(node_name, application_id, ""), &params, cancel)
            .await
    }

    async fn restart_deployed_code_package(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        description: &RestartDeployedCodePackageDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!(
            "Restarting code package {} on node {}",
            description.code_package_name,
            node_name
        );
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(
                Method::POST,
                &code_packages_path(node_name, application_id, "/$/Restart"),
                &query,
                Some(description),
                cancel,
            )
            .await
    }

    async fn get_container_logs_deployed_on_node(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        query: &ContainerLogsQuery,
        cancel: &CancellationToken,
    ) -> Result<ContainerLogs> {
        let params = Query::new(LOGS_API_VERSION)
            .param("ServiceManifestName", &query.service_manifest_name)
            .param("CodePackageName", &query.code_package_name)
            .opt("Tail", query.tail)
            .param("Previous", query.previous)
            .timeout(query.server_timeout);
        self.core
            .get_json(
                &code_packages_path(node_name, application_id, "/$/ContainerLogs"),
                &params,
                cancel,
            )
            .await
    }
}
