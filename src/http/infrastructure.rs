use super::connection::{HttpCore, Query};
use crate::client::InfrastructureClient;
use crate::error::Result;
use crate::types::ServerTimeout;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.0";

pub(crate) struct HttpInfrastructureClient {
    core: Arc<HttpCore>,
}

impl HttpInfrastructureClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn command_query(command: &str, service_id: Option<&str>, server_timeout: ServerTimeout) -> Query {
    Query::new(API_VERSION)
        .param("Command", command)
        .opt("ServiceId", service_id)
        .timeout(server_timeout)
}

#[async_trait]
impl InfrastructureClient for HttpInfrastructureClient {
    async fn invoke_infrastructure_command(
        &self,
        command: &str,
        service_id: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<String> {
        tracing::info!("Invoking infrastructure command: {}", command);
        let query = command_query(command, service_id, server_timeout);
        self.core
            .post_text("$/InvokeInfrastructureCommand", &query, cancel)
            .await
    }

    async fn invoke_infrastructure_query(
        &self,
        command: &str,
        service_id: Option<&str>,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let query = command_query(command, service_id, server_timeout);
        self.core
            .get_text("$/InvokeInfrastructureQuery", &query, cancel)
            .await
    }
}
