//! Client contracts
//!
//! One trait per resource domain, plus [`ServiceFabricClient`], the single
//! entry point a transport implements.
//!
//! # Module Structure
//!
//! - [`applications`] - application lifecycle, health and upgrades
//! - [`application_types`] - provisioning and application type queries
//! - [`chaos`] - chaos runs, events and schedules
//! - [`code_packages`] - code packages deployed on nodes
//! - [`compose`] - compose deployments
//! - [`infrastructure`] - infrastructure service commands
//! - [`repair`] - repair tasks
//! - [`service_types`] - service types
//! - [`mesh`] - mesh resources
//!
//! # Example
//!
//! ```no_run
//! use sfclient::{ServiceFabricClientBuilder, types::ApplicationListQuery};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> sfclient::Result<()> {
//! let cancel = CancellationToken::new();
//! let client = ServiceFabricClientBuilder::new()
//!     .use_endpoints(["http://localhost:19080"])?
//!     .build(&cancel)
//!     .await?;
//!
//! let page = client
//!     .applications()
//!     .get_application_info_list(&ApplicationListQuery::default(), &cancel)
//!     .await?;
//! for app in page.items {
//!     println!("{} ({})", app.name, app.type_version);
//! }
//! # Ok(())
//! # }
//! ```

pub mod application_types;
pub mod applications;
pub mod chaos;
pub mod code_packages;
pub mod compose;
pub mod infrastructure;
pub mod mesh;
pub mod repair;
pub mod service_types;

pub use application_types::ApplicationTypeClient;
pub use applications::ApplicationClient;
pub use chaos::ChaosClient;
pub use code_packages::CodePackageClient;
pub use compose::ComposeDeploymentClient;
pub use infrastructure::InfrastructureClient;
pub use mesh::{
    MeshApplicationClient, MeshCodePackageClient, MeshGatewayClient, MeshNetworkClient,
    MeshSecretClient, MeshServiceClient, MeshVolumeClient,
};
pub use repair::RepairManagementClient;
pub use service_types::ServiceTypeClient;

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// A request to send through [`ServiceFabricClient::send`]. The path is
/// supplied separately; the transport resolves it against an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RawRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body and content type.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self.with_header("Content-Type", "application/json"))
    }
}

/// Response returned by [`ServiceFabricClient::send`], unprocessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }
}

/// Builds the request for [`ServiceFabricClient::send`]. Called again if the
/// transport has to resend after refreshing credentials.
pub type RequestFactory<'a> = dyn Fn() -> RawRequest + Send + Sync + 'a;

/// Aggregate client: one accessor per resource domain plus a low-level send.
///
/// Implementations own their network resources and release them on drop.
/// A built client is safe to share across tasks.
#[async_trait]
pub trait ServiceFabricClient: Send + Sync {
    fn applications(&self) -> &dyn ApplicationClient;
    fn application_types(&self) -> &dyn ApplicationTypeClient;
    fn chaos(&self) -> &dyn ChaosClient;
    fn code_packages(&self) -> &dyn CodePackageClient;
    fn compose_deployments(&self) -> &dyn ComposeDeploymentClient;
    fn infrastructure(&self) -> &dyn InfrastructureClient;
    fn repair_management(&self) -> &dyn RepairManagementClient;
    fn service_types(&self) -> &dyn ServiceTypeClient;
    fn mesh_applications(&self) -> &dyn MeshApplicationClient;
    fn mesh_volumes(&self) -> &dyn MeshVolumeClient;
    fn mesh_networks(&self) -> &dyn MeshNetworkClient;
    fn mesh_secrets(&self) -> &dyn MeshSecretClient;
    fn mesh_gateways(&self) -> &dyn MeshGatewayClient;
    fn mesh_services(&self) -> &dyn MeshServiceClient;
    fn mesh_code_packages(&self) -> &dyn MeshCodePackageClient;

    /// Send a request to `relative_path` and return the response as-is,
    /// whatever its status.
    async fn send(
        &self,
        relative_path: &str,
        request: &RequestFactory<'_>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse>;
}
