//! Shared HTTP machinery: endpoint rotation, security sessions, request
//! execution with cancellation, and typed JSON helpers.

use super::errors::{error_from_response, sanitize_for_log};
use crate::client::{RawRequest, RawResponse, RequestFactory};
use crate::endpoints::Endpoints;
use crate::error::{ConfigError, Error, Result};
use crate::security::{static_security, SecuritySettings, SecuritySettingsProvider};
use crate::settings::ClientSettings;
use crate::types::{PagingOptions, ServerTimeout};
use reqwest::{Certificate, Client, Identity, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use url::Url;
use uuid::Uuid;

const USER_AGENT: &str = concat!("sfclient/", env!("CARGO_PKG_VERSION"));

/// Query string of one call. Every call carries an `api-version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Query(Vec<(String, String)>);

impl Query {
    pub fn new(api_version: &str) -> Self {
        Self(vec![("api-version".to_string(), api_version.to_string())])
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn timeout(self, timeout: ServerTimeout) -> Self {
        self.param("timeout", timeout.as_secs())
    }

    /// Continuation token (when non-empty), `MaxResults` and `timeout`.
    pub fn paging(self, paging: &PagingOptions) -> Self {
        let token = paging
            .continuation_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| t.as_str().to_string());
        self.opt("ContinuationToken", token)
            .param("MaxResults", paging.max_results.get())
            .timeout(paging.server_timeout)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// A reqwest client configured for one generation of security settings.
struct Session {
    http: Client,
    security: SecuritySettings,
    generation: u64,
}

pub(crate) struct HttpCore {
    endpoints: Endpoints,
    settings: ClientSettings,
    provider: SecuritySettingsProvider,
    session: RwLock<Arc<Session>>,
    next_endpoint: AtomicUsize,
}

impl HttpCore {
    /// Load security settings and build the first session.
    pub async fn connect(endpoints: Endpoints, settings: ClientSettings) -> Result<Self> {
        let provider = settings
            .security_settings()
            .cloned()
            .unwrap_or_else(|| static_security(SecuritySettings::None));

        let security = provider().await?;
        let http = build_http_client(&security, &settings)?;

        tracing::debug!(
            "HTTP transport ready: {} endpoint(s), security={}",
            endpoints.len(),
            security.kind()
        );

        Ok(Self {
            endpoints,
            settings,
            provider,
            session: RwLock::new(Arc::new(Session {
                http,
                security,
                generation: 0,
            })),
            next_endpoint: AtomicUsize::new(0),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Replace the session unless another caller already did since
    /// `stale_generation` was read.
    async fn refresh_security(&self, stale_generation: u64) -> Result<Arc<Session>> {
        let mut session = self.session.write().await;
        if session.generation != stale_generation {
            return Ok(session.clone());
        }

        tracing::debug!("Refreshing security settings");
        let security = (self.provider)().await?;
        let http = build_http_client(&security, &self.settings)?;
        *session = Arc::new(Session {
            http,
            security,
            generation: stale_generation + 1,
        });
        Ok(session.clone())
    }

    fn url_for(&self, relative_path: &str, query: &[(String, String)]) -> Result<Url> {
        let n = self.next_endpoint.fetch_add(1, Ordering::Relaxed);
        let base = self.endpoints.pick(n).as_str().trim_end_matches('/');
        let raw = format!("{}/{}", base, relative_path.trim_start_matches('/'));

        let mut url = Url::parse(&raw).map_err(|e| {
            Error::Config(ConfigError::InvalidArgument(format!(
                "invalid request path '{}': {}",
                relative_path, e
            )))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send the request once; no status handling.
    async fn send_once(
        &self,
        session: &Session,
        relative_path: &str,
        request: RawRequest,
        request_id: &Uuid,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        let url = self.url_for(relative_path, &request.query)?;
        tracing::debug!(request_id = %request_id, "{} {}", request.method, url);

        let mut builder = session.http.request(request.method, url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let SecuritySettings::Claims(claims) = &session.security {
            builder = builder.bearer_auth(&claims.token);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
                .collect();
            let body = response.bytes().await?.to_vec();
            Ok::<_, Error>(RawResponse {
                status,
                headers,
                body,
            })
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(request_id = %request_id, "Request cancelled");
                Err(Error::Cancelled)
            }
            result = exchange => result,
        }
    }

    /// Send a request, refreshing security and resending once if the
    /// cluster rejects the credentials. Returns the final response whatever
    /// its status.
    pub async fn execute(
        &self,
        relative_path: &str,
        request: &RequestFactory<'_>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let request_id = Uuid::new_v4();
        let session = self.session.read().await.clone();
        let response = self
            .send_once(&session, relative_path, request(), &request_id, cancel)
            .await?;

        if response.status != 401 && response.status != 403 {
            return Ok(response);
        }

        tracing::warn!(
            request_id = %request_id,
            "Cluster rejected credentials (HTTP {}), refreshing",
            response.status
        );
        let session = self.refresh_security(session.generation).await?;
        self.send_once(&session, relative_path, request(), &request_id, cancel)
            .await
    }

    /// Execute and turn non-success statuses into errors.
    pub async fn invoke(
        &self,
        method: Method,
        relative_path: &str,
        query: &Query,
        body: Option<Vec<u8>>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        let factory = || {
            let mut request = RawRequest::new(method.clone());
            request.query = query.pairs().to_vec();
            if let Some(body) = &body {
                request.body = Some(body.clone());
                request
                    .headers
                    .push(("Content-Type".to_string(), "application/json".to_string()));
            }
            request
        };

        let response = self.execute(relative_path, &factory, cancel).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response.status, &response.body))
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        relative_path: &str,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let response = self.invoke(Method::GET, relative_path, query, None, cancel).await?;
        parse_json(&response)
    }

    /// GET that yields `None` for an empty (204 or blank) response.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        relative_path: &str,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let response = self.invoke(Method::GET, relative_path, query, None, cancel).await?;
        if response.status == 204 || response.body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        parse_json(&response).map(Some)
    }

    pub async fn get_text(
        &self,
        relative_path: &str,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let response = self.invoke(Method::GET, relative_path, query, None, cancel).await?;
        Ok(response.text())
    }

    /// Send a JSON body (or none) and discard the response body.
    pub async fn send_unit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        relative_path: &str,
        query: &Query,
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let body = body.map(serde_json::to_vec).transpose()?;
        self.invoke(method, relative_path, query, body, cancel).await?;
        Ok(())
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        relative_path: &str,
        query: &Query,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = serde_json::to_vec(body)?;
        let response = self
            .invoke(Method::POST, relative_path, query, Some(body), cancel)
            .await?;
        parse_json(&response)
    }

    pub async fn post_text(
        &self,
        relative_path: &str,
        query: &Query,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let response = self
            .invoke(Method::POST, relative_path, query, None, cancel)
            .await?;
        Ok(response.text())
    }
}

fn parse_json<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::error!(
            "Failed to parse response JSON: {} - {}",
            e,
            sanitize_for_log(&response.text())
        );
        Error::UnexpectedResponse(format!("failed to parse response JSON: {}", e))
    })
}

fn build_http_client(security: &SecuritySettings, settings: &ClientSettings) -> Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);

    if let Some(timeout) = settings.client_timeout() {
        builder = builder.timeout(timeout);
    }

    let (server_ca, accept_invalid) = match security {
        SecuritySettings::None => (None, false),
        SecuritySettings::Windows => {
            return Err(ConfigError::UnsupportedSecurity("windows").into());
        }
        SecuritySettings::X509(x509) => {
            let identity = Identity::from_pem(&x509.client_identity_pem).map_err(|e| {
                ConfigError::InvalidArgument(format!("invalid client certificate: {}", e))
            })?;
            builder = builder.identity(identity);
            (x509.server_ca_pem.as_deref(), x509.accept_invalid_server_certs)
        }
        SecuritySettings::Claims(claims) => {
            (claims.server_ca_pem.as_deref(), claims.accept_invalid_server_certs)
        }
    };

    if let Some(pem) = server_ca {
        let certificate = Certificate::from_pem(pem).map_err(|e| {
            ConfigError::InvalidArgument(format!("invalid server CA certificate: {}", e))
        })?;
        builder = builder.add_root_certificate(certificate);
    }
    if accept_invalid {
        tracing::warn!("Server certificate validation is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| Error::Transport(format!("failed to create HTTP client: {}", e)))
}
