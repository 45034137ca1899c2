//! Client factory
//!
//! Stateless resolution of a client from endpoints and settings. Unlike the
//! builder, an unregistered scheme is not an error: the factory reports it
//! as [`Resolution::Unsupported`] so callers can fall back to another
//! transport.

use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::settings::ClientSettings;
use crate::transport::{SharedClient, TransportContext, TransportRegistry};
use tokio_util::sync::CancellationToken;

/// Outcome of factory resolution.
pub enum Resolution {
    Client(SharedClient),
    /// No transport is registered for the endpoints' scheme.
    Unsupported { scheme: String },
}

impl Resolution {
    pub fn client(self) -> Option<SharedClient> {
        match self {
            Resolution::Client(client) => Some(client),
            Resolution::Unsupported { .. } => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Resolution::Unsupported { .. })
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Client(_) => f.write_str("Resolution::Client(..)"),
            Resolution::Unsupported { scheme } => write!(f, "Resolution::Unsupported({})", scheme),
        }
    }
}

pub struct ServiceFabricClientFactory;

impl ServiceFabricClientFactory {
    /// Create a client using the default transports.
    pub async fn create<I, S>(
        endpoints: I,
        settings: Option<ClientSettings>,
        cancel: &CancellationToken,
    ) -> Result<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::create_with(&TransportRegistry::with_defaults(), endpoints, settings, cancel).await
    }

    /// Create a client using the given registry.
    ///
    /// Endpoint validation (non-empty, no blank entries, consistent scheme)
    /// runs before dispatch and fails with a configuration error.
    pub async fn create_with<I, S>(
        registry: &TransportRegistry,
        endpoints: I,
        settings: Option<ClientSettings>,
        cancel: &CancellationToken,
    ) -> Result<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let endpoints = Endpoints::parse(endpoints)?;
        let scheme = endpoints.scheme();

        let Some(factory) = registry.resolve(&scheme) else {
            tracing::warn!("No transport registered for scheme '{}'", scheme);
            return Ok(Resolution::Unsupported { scheme });
        };

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let client = factory(TransportContext {
            endpoints,
            settings: settings.unwrap_or_default(),
            cancel: cancel.clone(),
        })
        .await?;

        Ok(Resolution::Client(client))
    }
}
