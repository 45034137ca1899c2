//! Security settings
//!
//! Describes how calls to the cluster are secured. A
//! [`SecuritySettingsProvider`] is called when a client is built and again
//! whenever the cluster rejects the current credentials, so it should return
//! fresh settings (e.g. a renewed token) on each call.

use crate::error::Result;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Client certificate security.
#[derive(Clone, PartialEq, Eq)]
pub struct X509SecuritySettings {
    /// PEM with the client certificate chain and its private key.
    pub client_identity_pem: Vec<u8>,
    /// Extra PEM root used to validate the cluster certificate.
    pub server_ca_pem: Option<Vec<u8>>,
    /// Accept cluster certificates that fail validation (test clusters only).
    pub accept_invalid_server_certs: bool,
}

impl X509SecuritySettings {
    pub fn new(client_identity_pem: impl Into<Vec<u8>>) -> Self {
        Self {
            client_identity_pem: client_identity_pem.into(),
            server_ca_pem: None,
            accept_invalid_server_certs: false,
        }
    }

    pub fn with_server_ca(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.server_ca_pem = Some(pem.into());
        self
    }
}

/// Claims (token) security, e.g. Azure Active Directory.
#[derive(Clone, PartialEq, Eq)]
pub struct ClaimsSecuritySettings {
    pub token: String,
    pub server_ca_pem: Option<Vec<u8>>,
    pub accept_invalid_server_certs: bool,
}

impl ClaimsSecuritySettings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            server_ca_pem: None,
            accept_invalid_server_certs: false,
        }
    }
}

// Key material and tokens stay out of logs.
impl fmt::Debug for X509SecuritySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X509SecuritySettings")
            .field("client_identity_pem", &"<redacted>")
            .field("server_ca_pem", &self.server_ca_pem.as_ref().map(|p| p.len()))
            .field("accept_invalid_server_certs", &self.accept_invalid_server_certs)
            .finish()
    }
}

impl fmt::Debug for ClaimsSecuritySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsSecuritySettings")
            .field("token", &"<redacted>")
            .field("server_ca_pem", &self.server_ca_pem.as_ref().map(|p| p.len()))
            .field("accept_invalid_server_certs", &self.accept_invalid_server_certs)
            .finish()
    }
}

/// Credential configuration used to secure calls to the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SecuritySettings {
    #[default]
    None,
    Windows,
    X509(X509SecuritySettings),
    Claims(ClaimsSecuritySettings),
}

impl SecuritySettings {
    pub fn kind(&self) -> SecurityKind {
        match self {
            SecuritySettings::None => SecurityKind::None,
            SecuritySettings::Windows => SecurityKind::Windows,
            SecuritySettings::X509(_) => SecurityKind::X509,
            SecuritySettings::Claims(_) => SecurityKind::Claims,
        }
    }
}

/// Kind of security, without credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityKind {
    None,
    Windows,
    X509,
    Claims,
}

impl SecurityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SecurityKind::None => "none",
            SecurityKind::Windows => "windows",
            SecurityKind::X509 => "x509",
            SecurityKind::Claims => "claims",
        }
    }
}

impl fmt::Display for SecurityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces the security settings to use for the next connection.
pub type SecuritySettingsProvider =
    Arc<dyn Fn() -> BoxFuture<'static, Result<SecuritySettings>> + Send + Sync>;

/// Wrap an async closure as a [`SecuritySettingsProvider`].
pub fn security_provider<F, Fut>(f: F) -> SecuritySettingsProvider
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SecuritySettings>> + Send + 'static,
{
    Arc::new(move || -> BoxFuture<'static, Result<SecuritySettings>> { Box::pin(f()) })
}

/// Provider that always returns the same settings.
pub fn static_security(settings: SecuritySettings) -> SecuritySettingsProvider {
    security_provider(move || {
        let settings = settings.clone();
        async move { Ok(settings) }
    })
}

/// Security selected for a client: the mode plus, where the mode carries
/// credentials, the provider that produces them.
#[derive(Clone, Default)]
pub enum SecurityConfig {
    #[default]
    None,
    Windows,
    X509(SecuritySettingsProvider),
    Claims(SecuritySettingsProvider),
}

impl SecurityConfig {
    pub fn kind(&self) -> SecurityKind {
        match self {
            SecurityConfig::None => SecurityKind::None,
            SecurityConfig::Windows => SecurityKind::Windows,
            SecurityConfig::X509(_) => SecurityKind::X509,
            SecurityConfig::Claims(_) => SecurityKind::Claims,
        }
    }

    /// Provider for this configuration. Modes without credentials yield a
    /// provider of the fixed variant.
    pub fn into_provider(self) -> SecuritySettingsProvider {
        match self {
            SecurityConfig::None => static_security(SecuritySettings::None),
            SecurityConfig::Windows => static_security(SecuritySettings::Windows),
            SecurityConfig::X509(provider) | SecurityConfig::Claims(provider) => provider,
        }
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecurityConfig({})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_credentials() {
        let claims = SecuritySettings::Claims(ClaimsSecuritySettings::new("super-secret-token"));
        let rendered = format!("{:?}", claims);
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_config_into_provider() {
        let settings = SecurityConfig::Windows.into_provider()().await.unwrap();
        assert_eq!(settings.kind(), SecurityKind::Windows);

        let provider = static_security(SecuritySettings::Claims(ClaimsSecuritySettings::new("t")));
        let config = SecurityConfig::Claims(provider);
        assert_eq!(config.kind(), SecurityKind::Claims);
        let settings = config.into_provider()().await.unwrap();
        assert!(matches!(settings, SecuritySettings::Claims(ref c) if c.token == "t"));
    }
}
