use super::connection::{segment, HttpCore, Query};
use crate::client::ServiceTypeClient;
use crate::error::Result;
use crate::types::{
    ApplicationId, DeployedServiceTypeInfo, ManifestInfo, ServerTimeout, ServiceTypeInfo,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";

pub(crate) struct HttpServiceTypeClient {
    core: Arc<HttpCore>,
}

impl HttpServiceTypeClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn deployed_path(
    node_name: &str,
    application_id: &ApplicationId,
    service_type: Option<&str>,
) -> String {
    let mut path = format!(
        "Nodes/{}/$/GetApplications/{}/$/GetServiceTypes",
        segment(node_name),
        segment(application_id.as_str())
    );
    if let Some(name) = service_type {
        path.push('/');
        path.push_str(&segment(name));
    }
    path
}

#[async_trait]
impl ServiceTypeClient for HttpServiceTypeClient {
    async fn get_service_type_info_list(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<ServiceTypeInfo>> {
        let query = Query::new(API_VERSION)
            .param("ApplicationTypeVersion", application_type_version)
            .timeout(server_timeout);
        let path = format!(
            "ApplicationTypes/{}/$/GetServiceTypes",
            segment(application_type_name)
        );
        self.core.get_json(&path, &query, cancel).await
    }

    async fn get_service_type_info_by_name(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        service_type_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Option<ServiceTypeInfo>> {
        let query = Query::new(API_VERSION)
            .param("ApplicationTypeVersion", application_type_version)
            .timeout(server_timeout);
        let path = format!(
            "ApplicationTypes/{}/$/GetServiceTypes/{}",
            segment(application_type_name),
            segment(service_type_name)
        );
        self.core.get_optional_json(&path, &query, cancel).await
    }

    async fn get_service_manifest(
        &self,
        application_type_name: &str,
        application_type_version: &str,
        service_manifest_name: &str,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ManifestInfo> {
        let query = Query::new(API_VERSION)
            .param("ApplicationTypeVersion", application_type_version)
            .param("ServiceManifestName", service_manifest_name)
            .timeout(server_timeout);
        let path = format!(
            "ApplicationTypes/{}/$/GetServiceManifest",
            segment(application_type_name)
        );
        self.core.get_json(&path, &query, cancel).await
    }

    async fn get_deployed_service_type_info_list(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        service_manifest_name: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedServiceTypeInfo>> {
        let query = Query::new(API_VERSION)
            .opt("ServiceManifestName", service_manifest_name)
            .timeout(server_timeout);
        self.core
            .get_json(&deployed_path(node_name, application_id, None), &query, cancel)
            .await
    }

    async fn get_deployed_service_type_info_by_name(
        &self,
        node_name: &str,
        application_id: &ApplicationId,
        service_type_name: &str,
        service_manifest_name: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Vec<DeployedServiceTypeInfo>> {
        let query = Query::new(API_VERSION)
            .opt("ServiceManifestName", service_manifest_name)
            .timeout(server_timeout);
        self.core
            .get_json(
                &deployed_path(node_name, application_id, Some(service_type_name)),
                &query,
                cancel,
            )
            .await
    }
}
