//! Error types
//!
//! Every failure surfaces unchanged to the caller. Configuration problems are
//! reported as [`ConfigError`] at configuration time; everything that happens
//! on the wire is an [`Error`] variant.

use thiserror::Error;

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring a client (endpoints, security, arguments).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Endpoint list was empty.
    #[error("at least one cluster endpoint is required")]
    EmptyEndpoints,

    /// An endpoint entry was blank.
    #[error("endpoint at index {index} is blank")]
    BlankEndpoint { index: usize },

    /// An endpoint entry could not be parsed as a URI.
    #[error("invalid endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },

    /// Endpoints do not share the same URI scheme.
    #[error("all endpoints must use the same scheme: expected '{expected}', found '{found}'")]
    MixedSchemes { expected: String, found: String },

    /// `build` was called before any endpoint was configured.
    #[error("no endpoints configured; call use_endpoints before build")]
    MissingEndpoints,

    /// No transport is registered for the scheme.
    #[error("no transport registered for scheme '{0}'")]
    UnsupportedScheme(String),

    /// The transport cannot apply this kind of security.
    #[error("security mode '{0}' is not supported by this transport")]
    UnsupportedSecurity(&'static str),

    /// An operation argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur when talking to a cluster.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication was rejected by the cluster.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Network, DNS, TLS or timeout failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The cluster rejected the operation.
    #[error("remote error [{code}] (HTTP {status}): {message}")]
    Remote {
        status: u16,
        code: String,
        message: String,
        transient: bool,
    },

    /// The caller's cancellation token fired.
    #[error("operation cancelled")]
    Cancelled,

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Response did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Remote { transient, .. } => *transient,
            Error::Transport(_) => true,
            _ => false,
        }
    }

    /// Remote error code, if the cluster supplied one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Error::Remote { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Serialization(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_transience_flag() {
        let busy = Error::Remote {
            status: 503,
            code: "FABRIC_E_SERVICE_TOO_BUSY".to_string(),
            message: "busy".to_string(),
            transient: true,
        };
        assert!(busy.is_transient());
        assert_eq!(busy.error_code(), Some("FABRIC_E_SERVICE_TOO_BUSY"));

        let missing = Error::Remote {
            status: 404,
            code: "FABRIC_E_APPLICATION_NOT_FOUND".to_string(),
            message: "missing".to_string(),
            transient: false,
        };
        assert!(!missing.is_transient());
    }

    #[test]
    fn test_cancelled_is_distinct() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::Cancelled.is_transient());
        assert!(Error::Cancelled.error_code().is_none());
    }

    #[test]
    fn test_config_error_converts() {
        let err: Error = ConfigError::MissingEndpoints.into();
        assert!(matches!(err, Error::Config(ConfigError::MissingEndpoints)));
        assert!(err.to_string().contains("use_endpoints"));
    }
}
