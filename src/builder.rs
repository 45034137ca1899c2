//! Client builder
//!
//! Fluent configuration for a [`ServiceFabricClient`](crate::ServiceFabricClient).
//! The security mode is part of the builder's type: a builder starts
//! [`Unconfigured`], and each `use_*_security` call moves it to that mode.
//! Re-selecting the same mode is allowed; selecting a different one does not
//! compile.
//!
//! ```compile_fail
//! use sfclient::ServiceFabricClientBuilder;
//! use sfclient::security::{static_security, SecuritySettings};
//!
//! let builder = ServiceFabricClientBuilder::new()
//!     .use_windows_security()
//!     .use_x509_security(static_security(SecuritySettings::None));
//! ```
//!
//! ```
//! use sfclient::ServiceFabricClientBuilder;
//!
//! let builder = ServiceFabricClientBuilder::new()
//!     .use_windows_security()
//!     .use_windows_security();
//! assert_eq!(builder.security_kind(), sfclient::security::SecurityKind::Windows);
//! ```

use crate::endpoints::Endpoints;
use crate::error::{ConfigError, Error, Result};
use crate::security::{SecurityConfig, SecurityKind, SecuritySettingsProvider};
use crate::settings::ClientSettings;
use crate::transport::{SharedClient, TransportContext, TransportRegistry};
use std::marker::PhantomData;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

mod sealed {
    pub trait Sealed {}
}

/// Marker for the builder's security mode.
pub trait SecurityMode: sealed::Sealed {}

/// No security selected yet.
#[derive(Debug)]
pub struct Unconfigured;
/// Explicitly unsecured cluster.
#[derive(Debug)]
pub struct NoSecurity;
#[derive(Debug)]
pub struct Windows;
#[derive(Debug)]
pub struct X509;
/// Token-based security (e.g. Azure Active Directory).
#[derive(Debug)]
pub struct Claims;

impl sealed::Sealed for Unconfigured {}
impl sealed::Sealed for NoSecurity {}
impl sealed::Sealed for Windows {}
impl sealed::Sealed for X509 {}
impl sealed::Sealed for Claims {}
impl SecurityMode for Unconfigured {}
impl SecurityMode for NoSecurity {}
impl SecurityMode for Windows {}
impl SecurityMode for X509 {}
impl SecurityMode for Claims {}

/// Builder for a cluster client.
pub struct ServiceFabricClientBuilder<M: SecurityMode = Unconfigured> {
    endpoints: Option<Endpoints>,
    security: SecurityConfig,
    client_timeout: Option<Duration>,
    image_store_connection_string: Option<String>,
    registry: TransportRegistry,
    _mode: PhantomData<M>,
}

impl ServiceFabricClientBuilder<Unconfigured> {
    pub fn new() -> Self {
        Self {
            endpoints: None,
            security: SecurityConfig::None,
            client_timeout: None,
            image_store_connection_string: None,
            registry: TransportRegistry::with_defaults(),
            _mode: PhantomData,
        }
    }

    pub fn use_no_security(self) -> ServiceFabricClientBuilder<NoSecurity> {
        self.into_mode(SecurityConfig::None)
    }

    pub fn use_windows_security(self) -> ServiceFabricClientBuilder<Windows> {
        self.into_mode(SecurityConfig::Windows)
    }

    pub fn use_x509_security(
        self,
        provider: SecuritySettingsProvider,
    ) -> ServiceFabricClientBuilder<X509> {
        self.into_mode(SecurityConfig::X509(provider))
    }

    pub fn use_claims_security(
        self,
        provider: SecuritySettingsProvider,
    ) -> ServiceFabricClientBuilder<Claims> {
        self.into_mode(SecurityConfig::Claims(provider))
    }
}

impl Default for ServiceFabricClientBuilder<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceFabricClientBuilder<NoSecurity> {
    pub fn use_no_security(self) -> Self {
        self
    }
}

impl ServiceFabricClientBuilder<Windows> {
    pub fn use_windows_security(self) -> Self {
        self
    }
}

impl ServiceFabricClientBuilder<X509> {
    /// Replace the certificate provider.
    pub fn use_x509_security(mut self, provider: SecuritySettingsProvider) -> Self {
        self.security = SecurityConfig::X509(provider);
        self
    }
}

impl ServiceFabricClientBuilder<Claims> {
    /// Replace the token provider.
    pub fn use_claims_security(mut self, provider: SecuritySettingsProvider) -> Self {
        self.security = SecurityConfig::Claims(provider);
        self
    }
}

impl<M: SecurityMode> ServiceFabricClientBuilder<M> {
    fn into_mode<N: SecurityMode>(self, security: SecurityConfig) -> ServiceFabricClientBuilder<N> {
        ServiceFabricClientBuilder {
            endpoints: self.endpoints,
            security,
            client_timeout: self.client_timeout,
            image_store_connection_string: self.image_store_connection_string,
            registry: self.registry,
            _mode: PhantomData,
        }
    }

    /// Set the cluster endpoints. Fails immediately on an empty list, blank
    /// or unparseable entries, or mixed schemes.
    pub fn use_endpoints<I, S>(mut self, endpoints: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.endpoints = Some(Endpoints::parse(endpoints)?);
        Ok(self)
    }

    pub fn use_endpoint_urls(mut self, urls: Vec<Url>) -> std::result::Result<Self, ConfigError> {
        self.endpoints = Some(Endpoints::from_urls(urls)?);
        Ok(self)
    }

    pub fn use_client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = Some(timeout);
        self
    }

    pub fn use_image_store_connection_string(mut self, value: impl Into<String>) -> Self {
        self.image_store_connection_string = Some(value.into());
        self
    }

    /// Replace the transport registry (defaults to [`TransportRegistry::with_defaults`]).
    pub fn with_registry(mut self, registry: TransportRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn security_kind(&self) -> SecurityKind {
        self.security.kind()
    }

    pub fn endpoints(&self) -> Option<&Endpoints> {
        self.endpoints.as_ref()
    }

    /// Resolve the transport for the endpoints' scheme and construct the
    /// client. Errors from the transport propagate unchanged.
    pub async fn build(self, cancel: &CancellationToken) -> Result<SharedClient> {
        let endpoints = self.endpoints.ok_or(ConfigError::MissingEndpoints)?;
        let scheme = endpoints.scheme();
        let factory = self
            .registry
            .resolve(&scheme)
            .ok_or_else(|| ConfigError::UnsupportedScheme(scheme.clone()))?;

        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut settings = ClientSettings::new(
            Some(self.security.clone().into_provider()),
            self.client_timeout,
        );
        settings.set_image_store_connection_string(self.image_store_connection_string);

        tracing::info!(
            "Building client: {} endpoint(s), scheme={}, security={}",
            endpoints.len(),
            scheme,
            self.security.kind()
        );

        factory(TransportContext {
            endpoints,
            settings,
            cancel: cancel.clone(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpServiceFabricClient;
    use crate::security::{static_security, ClaimsSecuritySettings, SecuritySettings};
    use crate::transport::transport_factory;
    use std::sync::{Arc, Mutex};

    /// Registry whose http factory records the security kind it was handed
    /// and builds an unsecured HTTP client.
    fn recording_registry(seen: Arc<Mutex<Vec<SecurityKind>>>) -> TransportRegistry {
        TransportRegistry::new().with(
            "http",
            transport_factory(move |ctx: TransportContext| {
                let seen = seen.clone();
                async move {
                    let provider = ctx.settings.security_settings().cloned().expect("provider");
                    let settings = provider().await?;
                    seen.lock().unwrap().push(settings.kind());
                    let client =
                        HttpServiceFabricClient::connect(ctx.endpoints, ClientSettings::default())
                            .await?;
                    Ok(Arc::new(client) as SharedClient)
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_build_without_endpoints_fails() {
        let result = ServiceFabricClientBuilder::new()
            .build(&CancellationToken::new())
            .await;
        assert!(matches!(result, Err(Error::Config(ConfigError::MissingEndpoints))));
    }

    #[test]
    fn test_use_endpoints_rejects_empty_list() {
        let none: Vec<String> = Vec::new();
        let result = ServiceFabricClientBuilder::new().use_endpoints(none);
        assert!(matches!(result, Err(ConfigError::EmptyEndpoints)));
    }

    #[tokio::test]
    async fn test_windows_security_twice_builds() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let client = ServiceFabricClientBuilder::new()
            .use_windows_security()
            .use_windows_security()
            .with_registry(recording_registry(seen.clone()))
            .use_endpoints(["http://localhost:19080"])
            .unwrap()
            .build(&CancellationToken::new())
            .await;
        assert!(client.is_ok());
        assert_eq!(*seen.lock().unwrap(), vec![SecurityKind::Windows]);
    }

    #[tokio::test]
    async fn test_reselecting_claims_replaces_provider() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = static_security(SecuritySettings::Claims(ClaimsSecuritySettings::new("one")));
        let second = static_security(SecuritySettings::None);
        let builder = ServiceFabricClientBuilder::new()
            .use_claims_security(first)
            .use_claims_security(second)
            .with_registry(recording_registry(seen.clone()))
            .use_endpoints(["http://localhost:19080"])
            .unwrap();
        assert_eq!(builder.security_kind(), SecurityKind::Claims);
        builder.build(&CancellationToken::new()).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![SecurityKind::None]);
    }

    #[tokio::test]
    async fn test_unregistered_scheme_fails() {
        let result = ServiceFabricClientBuilder::new()
            .use_endpoints(["tcp://localhost:19000"])
            .unwrap()
            .build(&CancellationToken::new())
            .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::UnsupportedScheme(ref s))) if s == "tcp"
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_build() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = ServiceFabricClientBuilder::new()
            .use_endpoints(["http://localhost:19080"])
            .unwrap()
            .build(&cancel)
            .await;
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}
