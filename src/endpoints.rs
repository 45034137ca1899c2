//! Cluster endpoint set
//!
//! A non-empty, ordered list of cluster management URIs sharing one scheme.

use crate::error::ConfigError;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    urls: Vec<Url>,
}

impl Endpoints {
    /// Parse and validate endpoint strings.
    ///
    /// Checks run in order: non-empty list, no blank entries, every entry
    /// parses, all schemes match (case-insensitive).
    pub fn parse<I, S>(endpoints: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<S> = endpoints.into_iter().collect();
        if raw.is_empty() {
            return Err(ConfigError::EmptyEndpoints);
        }

        if let Some(index) = raw.iter().position(|e| e.as_ref().trim().is_empty()) {
            return Err(ConfigError::BlankEndpoint { index });
        }

        let urls = raw
            .iter()
            .map(|e| {
                let value = e.as_ref().trim();
                Url::parse(value).map_err(|err| ConfigError::InvalidEndpoint {
                    value: value.to_string(),
                    reason: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_urls(urls)
    }

    /// Validate already-parsed URLs.
    pub fn from_urls(urls: Vec<Url>) -> Result<Self, ConfigError> {
        let Some(first) = urls.first() else {
            return Err(ConfigError::EmptyEndpoints);
        };

        let expected = first.scheme().to_ascii_lowercase();
        for url in &urls[1..] {
            if !url.scheme().eq_ignore_ascii_case(&expected) {
                return Err(ConfigError::MixedSchemes {
                    expected,
                    found: url.scheme().to_string(),
                });
            }
        }

        Ok(Self { urls })
    }

    /// Shared scheme, lowercased.
    pub fn scheme(&self) -> String {
        self.urls[0].scheme().to_ascii_lowercase()
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    // Never true; kept for clippy's len_without_is_empty.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Endpoint for the n-th request, rotating through the list.
    pub fn pick(&self, n: usize) -> &Url {
        &self.urls[n % self.urls.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_fails() {
        let none: Vec<&str> = Vec::new();
        assert_eq!(Endpoints::parse(none), Err(ConfigError::EmptyEndpoints));
        assert_eq!(Endpoints::from_urls(Vec::new()), Err(ConfigError::EmptyEndpoints));
    }

    #[test]
    fn test_blank_entry_fails() {
        let result = Endpoints::parse(["http://a:19080", "  "]);
        assert_eq!(result, Err(ConfigError::BlankEndpoint { index: 1 }));
    }

    #[test]
    fn test_unparseable_entry_fails() {
        let result = Endpoints::parse(["http://a:19080", "not a uri"]);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_scheme_case_is_ignored() {
        let endpoints = Endpoints::parse(["HTTP://a:19080", "http://b:19080"]).unwrap();
        assert_eq!(endpoints.scheme(), "http");
        assert_eq!(endpoints.len(), 2);
    }

    #[test]
    fn test_mixed_schemes_fail() {
        let result = Endpoints::parse(["http://a:19080", "tcp://b:19000"]);
        assert_eq!(
            result,
            Err(ConfigError::MixedSchemes {
                expected: "http".to_string(),
                found: "tcp".to_string()
            })
        );
    }

    #[test]
    fn test_pick_rotates() {
        let endpoints = Endpoints::parse(["https://a:19080", "https://b:19080"]).unwrap();
        assert_eq!(endpoints.pick(0).host_str(), Some("a"));
        assert_eq!(endpoints.pick(1).host_str(), Some("b"));
        assert_eq!(endpoints.pick(2).host_str(), Some("a"));
    }
}
