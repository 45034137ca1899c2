use super::connection::{segment, HttpCore, Query};
use crate::client::ApplicationTypeClient;
use crate::error::Result;
use crate::types::{
    ApplicationTypeByNameQuery, ApplicationTypeInfo, ApplicationTypeListQuery, ManifestInfo,
    PagedData, ProvisionApplicationTypeDescription, ServerTimeout,
    UnprovisionApplicationTypeDescription,
};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";
const PROVISION_API_VERSION: &str = "6.2";

pub(crate) struct HttpApplicationTypeClient {
    core: Arc<HttpCore>,
}

impl HttpApplicationTypeClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

#[async_trait]
impl ApplicationTypeClient for HttpApplicationTypeClient {
    async fn get_application_type_info_list(
        &self,
        query: &ApplicationTypeListQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationTypeInfo>> {
        let params = Query::new(API_VERSION)
            .param("ApplicationTypeDefinitionKindFilter", query.definition_kind_filter)
            .param("ExcludeApplicationParameters", query.exclude_application_parameters)
            .paging(&query.paging);
        self.core.get_json("ApplicationTypes", &params, cancel).await
    }

    async fn get_application_type_info_list_by_name(
        &self,
        application_type_name: &str,
        query: &ApplicationTypeByNameQuery,
        cancel: &CancellationToken,
    ) -> Result<PagedData<ApplicationTypeInfo>> {
        let params = Query::new(API_VERSION)
            .opt("ApplicationTypeVersion", query.application_type_version.as_deref())
            .param("ExcludeApplicationParameters", query.exclude_application_parameters)
            .paging(&query.paging);
        let path = format!("ApplicationTypes/{}", segment(application_type_name));
        self.core.get_json(&path, &params, cancel).await
    }

    async fn provision_application_type(
        &self,
        description: &ProvisionApplicationTypeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Provisioning application type: {:?}", description);
        let query = Query::new(PROVISION_API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(
                Method::POST,
                "ApplicationTypes/$/Provision",
                &query,
                Some(description),
                cancel,
            )
            .await
    }

    async fn unprovision_application_type(
        &self,
        application_type_name: &str,
        description: &UnprovisionApplicationTypeDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!(
            "Unprovisioning application type {} version {}",
            application_type_name,
            description.application_type_version
        );
        let query = Query::new(API_VERSION).timeout(server_timeout);
        let path = format!(
            "ApplicationTypes/{}/$/Unprovision",
            segment(application_type_name)
        );
        self.core
            .send_unit(Method::POST, &path, &query, Some(description), cancel)
            .await
    }

    async fn get_application_manifest(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ManifestInfo> {
        let query = Query::new(API_VERSION)
            .param("ApplicationTypeVersion", application_type_version)
            .timeout(server_timeout);
        let path = format!(
            "ApplicationTypes/{}/$/GetApplicationManifest",
            segment(application_type_name)
        );
        self.core.get_json(&path, &query, cancel).await
    }
}
