use super::connection::{segment, HttpCore, Query};
use crate::client::ApplicationClient;
use crate::error::Result;
use crate::types::{
    ApplicationDescription, ApplicationHealth, ApplicationHealthQuery, ApplicationId,
    ApplicationInfo, ApplicationListQuery, ApplicationLoadInfo, ApplicationUpgradeDescription,
    ApplicationUpgradeProgressInfo, PagedData, ServerTimeout,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";
const LIST_API_VERSION: &str = "6.1";

pub(crate) struct HttpApplicationClient {
    core: Arc<HttpCore>,
}

impl HttpApplicationClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn application_path(application_id: &ApplicationId, action: &str) -> String {
    format!("Applications/{}{}", segment(application_id.as_str()), action)
}

#[async_trait]
impl ApplicationClient for HttpApplicationClient {
    async fn create_application(
        &self,
        description: &ApplicationDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Creating application {}", description.name);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(Method::POST, "Applications/$/Create", &query, Some(description), cancel)
            .await
    }

    async fn delete_application(
        &self,
        application_id: &ApplicationId,
        force_remove: bool,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Deleting application {} (force={})", application_id, force_remove);
        let query = Query::new(API_VERSION)
            .param("ForceRemove", force_remove)
            .timeout(server_timeout);
        self.core
            .send_unit::<()>(
                Method::POST,
                &application_path(application_id, "/$/Delete"),
                &query,
                None,
                cancel,
            )
            .await
    }

    async fn get_application_info(
        &self,
        application_id: &ApplicationId,
        exclude_application_parameters: bool,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationInfo> {
        let query = Query::new(API_VERSION)
            .param("ExcludeApplicationParameters", exclude_application_parameters)
            .timeout(server_timeout);
        self.core
            .get_json(&application_path(application_id, ""), &query, cancel)
            .await
    }

    async fn get_application_info_list(
        &self,
        query: &ApplicationListQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationInfo>> {
        let params = Query::new(LIST_API_VERSION)
            .param("ApplicationDefinitionKindFilter", query.definition_kind_filter)
            .opt("ApplicationTypeName", query.application_type_name.as_deref())
            .param("ExcludeApplicationParameters", query.exclude_application_parameters)
            .paging(&query.paging);
        self.core.get_json("Applications", &params, cancel).await
    }

    async fn get_application_load_info(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationLoadInfo> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .get_json(
                &application_path(application_id, "/$/GetLoadInformation"),
                &query,
                cancel,
            )
            .await
    }

    async fn get_application_health(
        &self,
        application_id: &ApplicationId,
        query: &ApplicationHealthQuery,
        cancel: &CancellationToken,
    ) -> Result<ApplicationHealth> {
        let params = Query::new(API_VERSION)
            .param("EventsHealthStateFilter", query.events_health_state_filter.bits())
            .param(
                "DeployedApplicationsHealthStateFilter",
                query.deployed_applications_health_state_filter.bits(),
            )
            .param("ServicesHealthStateFilter", query.services_health_state_filter.bits())
            .param("ExcludeHealthStatistics", query.exclude_health_statistics)
            .timeout(query.server_timeout);
        self.core
            .get_json(&application_path(application_id, "/$/GetHealth"), &params, cancel)
            .await
    }

    async fn start_application_upgrade(
        &self,
        application_id: &ApplicationId,
        description: &ApplicationUpgradeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!(
            "Upgrading application {} to {}",
            application_id,
            description.target_application_type_version
        );
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(
                Method::POST,
                &application_path(application_id, "/$/Upgrade"),
                &query,
                Some(description),
                cancel,
            )
            .await
    }

    async fn get_application_upgrade(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ApplicationUpgradeProgressInfo> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .get_json(
                &application_path(application_id, "/$/GetUpgradeProgress"),
                &query,
                cancel,
            )
            .await
    }

    async fn rollback_application_upgrade(
        &self,
        application_id: &ApplicationId,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Rolling back upgrade of application {}", application_id);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit::<()>(
                Method::POST,
                &application_path(application_id, "/$/RollbackUpgrade"),
                &query,
                None,
                cancel,
            )
            .await
    }
}
