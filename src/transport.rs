//! Transport registry
//!
//! Maps a URI scheme to the factory that builds a [`ServiceFabricClient`]
//! for it. Transports are registered when the registry is composed; there
//! is no lookup by type name at runtime.

use crate::client::ServiceFabricClient;
use crate::endpoints::Endpoints;
use crate::error::Result;
use crate::settings::ClientSettings;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A built client, shareable across tasks.
pub type SharedClient = Arc<dyn ServiceFabricClient>;

/// Everything a transport needs to construct a client.
#[derive(Debug, Clone)]
pub struct TransportContext {
    pub endpoints: Endpoints,
    pub settings: ClientSettings,
    pub cancel: CancellationToken,
}

/// Builds a client for a validated endpoint set.
pub type TransportFactory =
    Arc<dyn Fn(TransportContext) -> BoxFuture<'static, Result<SharedClient>> + Send + Sync>;

/// Wrap an async closure as a [`TransportFactory`].
pub fn transport_factory<F, Fut>(f: F) -> TransportFactory
where
    F: Fn(TransportContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SharedClient>> + Send + 'static,
{
    Arc::new(move |ctx| -> BoxFuture<'static, Result<SharedClient>> { Box::pin(f(ctx)) })
}

/// Scheme -> transport factory. Scheme keys are case-insensitive.
#[derive(Clone)]
pub struct TransportRegistry {
    factories: HashMap<String, TransportFactory>,
}

impl TransportRegistry {
    /// Registry with no transports.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry with the HTTP transport registered for `http` and `https`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::http::register(&mut registry);
        registry
    }

    /// Register a factory, returning the one it replaced.
    pub fn register(
        &mut self,
        scheme: impl AsRef<str>,
        factory: TransportFactory,
    ) -> Option<TransportFactory> {
        let scheme = scheme.as_ref().to_ascii_lowercase();
        tracing::debug!("Registering transport for scheme '{}'", scheme);
        self.factories.insert(scheme, factory)
    }

    pub fn with(mut self, scheme: impl AsRef<str>, factory: TransportFactory) -> Self {
        self.register(scheme, factory);
        self
    }

    pub fn resolve(&self, scheme: &str) -> Option<TransportFactory> {
        self.factories.get(&scheme.to_ascii_lowercase()).cloned()
    }

    pub fn supports(&self, scheme: &str) -> bool {
        self.factories.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Registered schemes, sorted.
    pub fn schemes(&self) -> Vec<String> {
        let mut schemes: Vec<String> = self.factories.keys().cloned().collect();
        schemes.sort();
        schemes
    }
}

/// Same as [`TransportRegistry::new`]: no transports are registered.
impl Default for TransportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}
