//! HTTP transport
//!
//! Talks to the cluster's HTTP gateway with reqwest. Registered in the
//! default [`TransportRegistry`] for the `http` and `https` schemes.
//!
//! # Module Structure
//!
//! - `connection` - session handling, request execution, typed helpers
//! - `errors` - cluster error bodies to [`Error`](crate::Error)
//! - one module per resource domain, each a thin mapping of operations to
//!   REST paths and query parameters

mod application_types;
mod applications;
mod chaos;
mod code_packages;
mod compose;
mod connection;
mod errors;
mod infrastructure;
mod mesh;
mod repair;
mod service_types;

pub use errors::describe_error;

use self::connection::HttpCore;
use crate::client::{
    ApplicationClient, ApplicationTypeClient, ChaosClient, CodePackageClient,
    ComposeDeploymentClient, InfrastructureClient, MeshApplicationClient, MeshCodePackageClient,
    MeshGatewayClient, MeshNetworkClient, MeshSecretClient, MeshServiceClient, MeshVolumeClient,
    RawResponse, RepairManagementClient, RequestFactory, ServiceFabricClient, ServiceTypeClient,
};
use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::settings::ClientSettings;
use crate::transport::{transport_factory, SharedClient, TransportRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Register the HTTP transport for `http` and `https`.
pub fn register(registry: &mut TransportRegistry) {
    let factory = transport_factory(|ctx| async move {
        let connect = HttpServiceFabricClient::connect(ctx.endpoints, ctx.settings);
        let client = tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => return Err(Error::Cancelled),
            client = connect => client?,
        };
        Ok(Arc::new(client) as SharedClient)
    });
    registry.register("http", factory.clone());
    registry.register("https", factory);
}

/// [`ServiceFabricClient`] over the cluster's HTTP gateway.
///
/// Every resource client is built up front and shares one connection core.
pub struct HttpServiceFabricClient {
    core: Arc<HttpCore>,
    applications: applications::HttpApplicationClient,
    application_types: application_types::HttpApplicationTypeClient,
    chaos: chaos::HttpChaosClient,
    code_packages: code_packages::HttpCodePackageClient,
    compose_deployments: compose::HttpComposeDeploymentClient,
    infrastructure: infrastructure::HttpInfrastructureClient,
    repair_management: repair::HttpRepairManagementClient,
    service_types: service_types::HttpServiceTypeClient,
    mesh_applications: mesh::HttpMeshApplicationClient,
    mesh_volumes: mesh::HttpMeshVolumeClient,
    mesh_networks: mesh::HttpMeshNetworkClient,
    mesh_secrets: mesh::HttpMeshSecretClient,
    mesh_gateways: mesh::HttpMeshGatewayClient,
    mesh_services: mesh::HttpMeshServiceClient,
    mesh_code_packages: mesh::HttpMeshCodePackageClient,
}

impl HttpServiceFabricClient {
    /// Resolve security settings and build the client.
    pub async fn connect(endpoints: Endpoints, settings: ClientSettings) -> Result<Self> {
        let core = Arc::new(HttpCore::connect(endpoints, settings).await?);

        Ok(Self {
            applications: applications::HttpApplicationClient::new(core.clone()),
            application_types: application_types::HttpApplicationTypeClient::new(core.clone()),
            chaos: chaos::HttpChaosClient::new(core.clone()),
            code_packages: code_packages::HttpCodePackageClient::new(core.clone()),
            compose_deployments: compose::HttpComposeDeploymentClient::new(core.clone()),
            infrastructure: infrastructure::HttpInfrastructureClient::new(core.clone()),
            repair_management: repair::HttpRepairManagementClient::new(core.clone()),
            service_types: service_types::HttpServiceTypeClient::new(core.clone()),
            mesh_applications: mesh::HttpMeshApplicationClient::new(core.clone()),
            mesh_volumes: mesh::HttpMeshVolumeClient::new(core.clone()),
            mesh_networks: mesh::HttpMeshNetworkClient::new(core.clone()),
            mesh_secrets: mesh::HttpMeshSecretClient::new(core.clone()),
            mesh_gateways: mesh::HttpMeshGatewayClient::new(core.clone()),
            mesh_services: mesh::HttpMeshServiceClient::new(core.clone()),
            mesh_code_packages: mesh::HttpMeshCodePackageClient::new(core.clone()),
            core,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        self.core.endpoints()
    }

    pub fn settings(&self) -> &ClientSettings {
        self.core.settings()
    }
}

#[async_trait]
impl ServiceFabricClient for HttpServiceFabricClient {
    fn applications(&self) -> &dyn ApplicationClient {
        &self.applications
    }

    fn application_types(&self) -> &dyn ApplicationTypeClient {
        &self.application_types
    }

    fn chaos(&self) -> &dyn ChaosClient {
        &self.chaos
    }

    fn code_packages(&self) -> &dyn CodePackageClient {
        &self.code_packages
    }

    fn compose_deployments(&self) -> &dyn ComposeDeploymentClient {
        &self.compose_deployments
    }

    fn infrastructure(&self) -> &dyn InfrastructureClient {
        &self.infrastructure
    }

    fn repair_management(&self) -> &dyn RepairManagementClient {
        &self.repair_management
    }

    fn service_types(&self) -> &dyn ServiceTypeClient {
        &self.service_types
    }

    fn mesh_applications(&self) -> &dyn MeshApplicationClient {
        &self.mesh_applications
    }

    fn mesh_volumes(&self) -> &dyn MeshVolumeClient {
        &self.mesh_volumes
    }

    fn mesh_networks(&self) -> &dyn MeshNetworkClient {
        &self.mesh_networks
    }

    fn mesh_secrets(&self) -> &dyn MeshSecretClient {
        &self.mesh_secrets
    }

    fn mesh_gateways(&self) -> &dyn MeshGatewayClient {
        &self.mesh_gateways
    }

    fn mesh_services(&self) -> &dyn MeshServiceClient {
        &self.mesh_services
    }

    fn mesh_code_packages(&self) -> &dyn MeshCodePackageClient {
        &self.mesh_code_packages
    }

    async fn send(
        &self,
        relative_path: &str,
        request: &RequestFactory<'_>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        self.core.execute(relative_path, request, cancel).await
    }
}

impl Drop for HttpServiceFabricClient {
    fn drop(&mut self) {
        tracing::debug!(
            "Closing HTTP client for {} endpoint(s)",
            self.core.endpoints().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_both_schemes() {
        let mut registry = TransportRegistry::new();
        register(&mut registry);
        assert!(registry.supports("http"));
        assert!(registry.supports("HTTPS"));
        assert!(!registry.supports("tcp"));
    }

    #[tokio::test]
    async fn test_factory_observes_cancellation() {
        let registry = TransportRegistry::with_defaults();
        let factory = registry.resolve("http").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ctx = crate::transport::TransportContext {
            endpoints: Endpoints::parse(["http://localhost:19080"]).unwrap(),
            settings: ClientSettings::default(),
            cancel,
        };
        assert!(matches!(factory(ctx).await, Err(Error::Cancelled)));
    }
}
