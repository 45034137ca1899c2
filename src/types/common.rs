//! Shared value types: paging, server timeouts, application identities and
//! health filters.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scheme prefix of fully qualified application names.
pub const FABRIC_URI_SCHEME: &str = "fabric:/";

/// Opaque pagination cursor returned by list operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results from a list operation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PagedData<T> {
    #[serde(default)]
    pub continuation_token: Option<ContinuationToken>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> PagedData<T> {
    /// An empty or absent continuation token marks the final page.
    pub fn is_last_page(&self) -> bool {
        self.next_token().is_none()
    }

    /// Token for the next page, if there is one.
    pub fn next_token(&self) -> Option<&ContinuationToken> {
        self.continuation_token.as_ref().filter(|t| !t.is_empty())
    }
}

impl<T> Default for PagedData<T> {
    fn default() -> Self {
        Self {
            continuation_token: None,
            items: Vec::new(),
        }
    }
}

/// Upper bound, in seconds, on server-side processing time for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerTimeout(u64);

impl ServerTimeout {
    pub const DEFAULT_SECS: u64 = 60;

    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }
}

impl Default for ServerTimeout {
    fn default() -> Self {
        Self(Self::DEFAULT_SECS)
    }
}

/// Maximum number of results per page. Zero lets the cluster return as many
/// as fit in one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaxResults(u64);

impl MaxResults {
    pub const UNBOUNDED: MaxResults = MaxResults(0);

    pub const fn new(max: u64) -> Self {
        Self(max)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_unbounded(self) -> bool {
        self.0 == 0
    }
}

/// Paging and timeout parameters shared by every list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingOptions {
    pub continuation_token: Option<ContinuationToken>,
    pub max_results: MaxResults,
    pub server_timeout: ServerTimeout,
}

impl PagingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_continuation_token(mut self, token: ContinuationToken) -> Self {
        self.continuation_token = Some(token);
        self
    }

    pub fn with_max_results(mut self, max: u64) -> Self {
        self.max_results = MaxResults::new(max);
        self
    }

    pub fn with_server_timeout(mut self, timeout: ServerTimeout) -> Self {
        self.server_timeout = timeout;
        self
    }

    /// Options for the page following `page`, or `None` if `page` was the last.
    pub fn next_page<T>(&self, page: &PagedData<T>) -> Option<Self> {
        page.next_token().map(|token| Self {
            continuation_token: Some(token.clone()),
            ..self.clone()
        })
    }
}

/// Identity of an application in request paths.
///
/// Application `fabric:/Shop/Orders` has id `Shop~Orders`. Older cluster
/// versions used `/` as the segment delimiter; such ids are accepted and
/// normalized to `~`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Derive the id from a full application name (`fabric:/a/b`).
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        let Some(rest) = name.trim().strip_prefix(FABRIC_URI_SCHEME) else {
            return Err(ConfigError::InvalidArgument(format!(
                "application name '{}' must start with '{}'",
                name, FABRIC_URI_SCHEME
            )));
        };
        Self::parse(rest)
    }

    /// Parse an id, a legacy `/`-delimited id, or a full application name.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.starts_with(FABRIC_URI_SCHEME) {
            return Self::from_name(value);
        }

        let normalized = value.trim_matches('/').replace('/', "~");
        if normalized.is_empty() || normalized.split('~').any(|segment| segment.is_empty()) {
            return Err(ConfigError::InvalidArgument(format!(
                "invalid application id '{}'",
                value
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full application name for this id.
    pub fn to_name(&self) -> String {
        format!("{}{}", FABRIC_URI_SCHEME, self.0.replace('~', "/"))
    }
}

impl FromStr for ApplicationId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aggregated health of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HealthState {
    Invalid,
    Ok,
    Warning,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Bit mask selecting which health states are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HealthStateFilter(u32);

impl HealthStateFilter {
    pub const DEFAULT: HealthStateFilter = HealthStateFilter(0);
    pub const NONE: HealthStateFilter = HealthStateFilter(1);
    pub const OK: HealthStateFilter = HealthStateFilter(2);
    pub const WARNING: HealthStateFilter = HealthStateFilter(4);
    pub const ERROR: HealthStateFilter = HealthStateFilter(8);
    pub const ALL: HealthStateFilter = HealthStateFilter(65535);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: HealthStateFilter) -> Self {
        Self(self.0 | other.0)
    }
}

/// Key/value application parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationParameter {
    pub key: String,
    pub value: String,
}

impl ApplicationParameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        assert_eq!(ServerTimeout::default().as_secs(), 60);
        assert!(MaxResults::default().is_unbounded());
        let paging = PagingOptions::default();
        assert!(paging.continuation_token.is_none());
        assert_eq!(paging.max_results.get(), 0);
        assert_eq!(paging.server_timeout.as_secs(), 60);
    }

    #[test]
    fn test_application_id_from_name() {
        let id = ApplicationId::from_name("fabric:/Shop/Orders").unwrap();
        assert_eq!(id.as_str(), "Shop~Orders");
        assert_eq!(id.to_name(), "fabric:/Shop/Orders");
    }

    #[test]
    fn test_application_id_legacy_delimiter() {
        let legacy: ApplicationId = "Shop/Orders".parse().unwrap();
        let current: ApplicationId = "Shop~Orders".parse().unwrap();
        assert_eq!(legacy, current);
    }

    #[test]
    fn test_application_id_rejects_blank() {
        assert!(ApplicationId::parse("").is_err());
        assert!(ApplicationId::parse("fabric:/").is_err());
        assert!(ApplicationId::parse("a~~b").is_err());
        assert!(ApplicationId::from_name("Shop").is_err());
    }

    #[test]
    fn test_paged_data_last_page() {
        let page: PagedData<String> = serde_json::from_value(json!({
            "ContinuationToken": "",
            "Items": ["a", "b"]
        }))
        .unwrap();
        assert!(page.is_last_page());
        assert_eq!(page.items.len(), 2);

        let page: PagedData<String> = serde_json::from_value(json!({
            "ContinuationToken": "next",
            "Items": []
        }))
        .unwrap();
        assert!(!page.is_last_page());
        let next = PagingOptions::new().with_max_results(5).next_page(&page).unwrap();
        assert_eq!(next.continuation_token.unwrap().as_str(), "next");
        assert_eq!(next.max_results.get(), 5);
    }

    #[test]
    fn test_health_state_unknown_value() {
        let state: HealthState = serde_json::from_value(json!("Degraded")).unwrap();
        assert_eq!(state, HealthState::Unknown);
        let state: HealthState = serde_json::from_value(json!("Warning")).unwrap();
        assert_eq!(state, HealthState::Warning);
    }

    #[test]
    fn test_health_filter_union() {
        let filter = HealthStateFilter::WARNING.union(HealthStateFilter::ERROR);
        assert_eq!(filter.bits(), 12);
    }
}
