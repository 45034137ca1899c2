//! Property-based tests using proptest
//!
//! These tests verify application id normalization, endpoint validation and
//! paging with randomized inputs.

use proptest::prelude::*;
use sfclient::types::{ApplicationId, ContinuationToken, PagedData, PagingOptions};
use sfclient::{ConfigError, Endpoints, ServiceFabricClientFactory};
use tokio_test::block_on;
use tokio_util::sync::CancellationToken;

/// Generate one application name segment
fn arb_segment() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9._-]{0,15}"
}

/// Generate the segments of an application name
fn arb_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 1..5)
}

/// Generate a host:port authority
fn arb_authority() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,20}", 1024u16..65535).prop_map(|(host, port)| format!("{}:{}", host, port))
}

/// Randomly re-case a scheme
fn arb_scheme_casing(scheme: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), scheme.len()).prop_map(move |upper| {
        scheme
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

proptest! {
    /// Ids derived from names never contain the legacy delimiter
    #[test]
    fn id_from_name_uses_tilde(segments in arb_segments()) {
        let name = format!("fabric:/{}", segments.join("/"));
        let id = ApplicationId::from_name(&name).unwrap();
        prop_assert!(!id.as_str().contains('/'));
        prop_assert_eq!(id.as_str(), segments.join("~"));
    }

    /// Legacy and current ids normalize to the same value
    #[test]
    fn legacy_and_current_ids_agree(segments in arb_segments()) {
        let legacy = ApplicationId::parse(&segments.join("/")).unwrap();
        let current = ApplicationId::parse(&segments.join("~")).unwrap();
        prop_assert_eq!(legacy, current);
    }

    /// Name to id to name is lossless
    #[test]
    fn id_name_round_trip(segments in arb_segments()) {
        let name = format!("fabric:/{}", segments.join("/"));
        let id = ApplicationId::from_name(&name).unwrap();
        prop_assert_eq!(id.to_name(), name.clone());
        prop_assert_eq!(ApplicationId::parse(&name).unwrap(), id);
    }

    /// Normalization is idempotent
    #[test]
    fn normalization_is_idempotent(segments in arb_segments()) {
        let once = ApplicationId::parse(&segments.join("/")).unwrap();
        let twice = ApplicationId::parse(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Whitespace-only ids are rejected
    #[test]
    fn blank_ids_rejected(blank in "[ \t]{0,5}") {
        prop_assert!(ApplicationId::parse(&blank).is_err());
    }

    /// Scheme comparison ignores case
    #[test]
    fn scheme_case_is_ignored(
        scheme in arb_scheme_casing("https"),
        authorities in prop::collection::vec(arb_authority(), 1..6)
    ) {
        let endpoints: Vec<String> = authorities
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if i % 2 == 0 {
                    format!("{}://{}", scheme, a)
                } else {
                    format!("https://{}", a)
                }
            })
            .collect();
        let parsed = Endpoints::parse(&endpoints).unwrap();
        prop_assert_eq!(parsed.scheme(), "https");
        prop_assert_eq!(parsed.len(), endpoints.len());
    }

    /// Any casing of http resolves to a client without touching the network
    #[test]
    fn factory_resolves_http_in_any_case(
        scheme in arb_scheme_casing("http"),
        a in arb_authority()
    ) {
        let endpoint = format!("{}://{}", scheme, a);
        let resolution = block_on(ServiceFabricClientFactory::create(
            [endpoint],
            None,
            &CancellationToken::new(),
        ))
        .unwrap();
        prop_assert!(resolution.client().is_some());
    }

    /// Any blank entry fails validation and reports its position
    #[test]
    fn blank_entry_reported(
        authorities in prop::collection::vec(arb_authority(), 1..6),
        index in 0usize..6,
        blank in "[ ]{0,3}"
    ) {
        let mut endpoints: Vec<String> =
            authorities.iter().map(|a| format!("http://{}", a)).collect();
        let index = index % (endpoints.len() + 1);
        endpoints.insert(index, blank);
        prop_assert_eq!(
            Endpoints::parse(&endpoints).unwrap_err(),
            ConfigError::BlankEndpoint { index }
        );
    }

    /// Mixing http with any other scheme fails
    #[test]
    fn mixed_schemes_rejected(
        other in prop_oneof!["tcp", "https", "fabric"],
        a in arb_authority(),
        b in arb_authority()
    ) {
        let endpoints = [format!("http://{}", a), format!("{}://{}", other, b)];
        let is_mixed = matches!(
            Endpoints::parse(endpoints),
            Err(ConfigError::MixedSchemes { .. })
        );
        prop_assert!(is_mixed);
    }

    /// Round-robin picks stay within the set and cycle through it
    #[test]
    fn pick_cycles_through_endpoints(
        authorities in prop::collection::vec(arb_authority(), 1..6),
        start in 0usize..1000
    ) {
        let endpoints: Vec<String> = authorities.iter().map(|a| format!("http://{}", a)).collect();
        let parsed = Endpoints::parse(&endpoints).unwrap();
        let n = parsed.len();
        for offset in 0..n {
            prop_assert_eq!(parsed.pick(start + offset), &parsed.urls()[(start + offset) % n]);
        }
    }

    /// Paging continues exactly while the token is non-empty
    #[test]
    fn next_page_follows_non_empty_tokens(token in "[ a-zA-Z0-9]{0,12}", max in 0u64..100) {
        let page: PagedData<u32> = PagedData {
            continuation_token: Some(ContinuationToken::new(token.clone())),
            items: vec![],
        };
        let options = PagingOptions::new().with_max_results(max);
        let next = options.next_page(&page);
        prop_assert_eq!(next.is_some(), !token.trim().is_empty());
        prop_assert_eq!(page.is_last_page(), token.trim().is_empty());
        if let Some(next) = next {
            prop_assert_eq!(next.max_results, options.max_results);
        }
    }
}
