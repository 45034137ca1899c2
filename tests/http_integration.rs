//! Integration tests for the HTTP transport using wiremock
//!
//! These tests drive the public client API against a mocked cluster gateway,
//! covering query defaults, error mapping, credential refresh, cancellation
//! and paging.

use serde_json::json;
use sfclient::types::{
    ApplicationDescription, ApplicationId, ApplicationListQuery, ChaosEventsFilter,
    ChaosEventsQuery, ContinuationToken, PagingOptions, RepairTaskQuery, RepairTaskStateFilter,
    ResourceDescription, ServerTimeout,
};
use sfclient::{
    security_provider, ClaimsSecuritySettings, ConfigError, Error, RawRequest, SecuritySettings,
    ServiceFabricClientBuilder, ServiceFabricClientFactory, SharedClient,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{bearer_token, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn unsecured_client(server: &MockServer) -> SharedClient {
    ServiceFabricClientBuilder::new()
        .use_endpoints([server.uri()])
        .expect("valid endpoint")
        .use_no_security()
        .build(&CancellationToken::new())
        .await
        .expect("client should build")
}

fn application_json(id: &str) -> serde_json::Value {
    json!({
        "Id": id,
        "Name": format!("fabric:/{}", id.replace('~', "/")),
        "TypeName": "ShopType",
        "TypeVersion": "1.0.0",
        "Status": "Ready",
        "HealthState": "Ok"
    })
}

/// Test module for request shaping
mod request_tests {
    use super::*;

    /// Omitted paging options send the named defaults
    #[tokio::test]
    async fn test_list_sends_default_timeout_and_max_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Applications"))
            .and(query_param("api-version", "6.1"))
            .and(query_param("timeout", "60"))
            .and(query_param("MaxResults", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ContinuationToken": "",
                "Items": [application_json("Shop"), application_json("Shop~Orders")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let page = client
            .applications()
            .get_application_info_list(&ApplicationListQuery::default(), &CancellationToken::new())
            .await
            .expect("list should succeed");

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].name, "fabric:/Shop/Orders");
        assert!(page.is_last_page());
    }

    /// Legacy `/` ids are normalized before they reach the path
    #[tokio::test]
    async fn test_application_id_is_normalized_in_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Applications/Shop~Orders"))
            .and(query_param("ExcludeApplicationParameters", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(application_json("Shop~Orders")))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let id = ApplicationId::parse("Shop/Orders").unwrap();
        let app = client
            .applications()
            .get_application_info(&id, true, ServerTimeout::default(), &CancellationToken::new())
            .await
            .expect("get should succeed");

        assert_eq!(app.id, "Shop~Orders");
    }

    /// Create posts the description as PascalCase JSON
    #[tokio::test]
    async fn test_create_application_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/Applications/$/Create"))
            .and(query_param("timeout", "30"))
            .and(body_partial_json(json!({
                "Name": "fabric:/Shop",
                "TypeName": "ShopType",
                "ParameterList": [{"Key": "Replicas", "Value": "3"}]
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let description = ApplicationDescription::new("fabric:/Shop", "ShopType", "1.0.0")
            .with_parameter("Replicas", "3");
        client
            .applications()
            .create_application(
                &description,
                ServerTimeout::from_secs(30),
                &CancellationToken::new(),
            )
            .await
            .expect("create should succeed");
    }

    /// Chaos events over a time range send file times, not a token
    #[tokio::test]
    async fn test_chaos_events_time_range_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos/Events"))
            .and(query_param("StartTimeUtc", "116444736000000000"))
            .and(query_param("EndTimeUtc", "116444736010000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ContinuationToken": "",
                "History": [{
                    "ChaosEvent": {
                        "Kind": "Started",
                        "TimeStampUtc": "1970-01-01T00:00:00.5Z",
                        "ChaosParameters": {}
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let query = ChaosEventsQuery {
            filter: ChaosEventsFilter::TimeRange {
                start: chrono::DateTime::from_timestamp(0, 0),
                end: chrono::DateTime::from_timestamp(1, 0),
            },
            ..Default::default()
        };
        let segment = client
            .chaos()
            .get_chaos_events(&query, &CancellationToken::new())
            .await
            .expect("events should load");

        assert!(segment.is_last_page());
        assert_eq!(segment.history[0].chaos_event.kind, "Started");
    }

    /// Repair task listing omits an unset state filter
    #[tokio::test]
    async fn test_repair_task_filters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/$/GetRepairTaskList"))
            .and(query_param("StateFilter", "63"))
            .and(query_param("TaskIdFilter", "sfctl/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "TaskId": "sfctl/reboot-1",
                "Version": "42",
                "State": "Executing",
                "Action": "System.Reboot"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let query = RepairTaskQuery {
            task_id_filter: Some("sfctl/".to_string()),
            state_filter: RepairTaskStateFilter::ACTIVE,
            executor_filter: None,
        };
        let tasks = client
            .repair_management()
            .get_repair_task_list(&query, &CancellationToken::new())
            .await
            .expect("list should succeed");

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].version.as_deref(), Some("42"));
    }

    /// Mesh resources use camelCase envelopes and PUT for create-or-update
    #[tokio::test]
    async fn test_mesh_create_or_update() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/Resources/Volumes/data"))
            .and(query_param("api-version", "6.4-preview"))
            .and(body_partial_json(json!({
                "name": "data",
                "properties": {"provider": "SFAzureFile"}
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(2)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let mut properties = serde_json::Map::new();
        properties.insert("provider".to_string(), json!("SFAzureFile"));
        let volume = ResourceDescription::new("data", properties);
        let cancel = CancellationToken::new();

        for _ in 0..2 {
            client
                .mesh_volumes()
                .create_or_update("data", &volume, &cancel)
                .await
                .expect("create or update should succeed");
        }
    }

    /// An empty response maps to "not found" for optional lookups
    #[tokio::test]
    async fn test_service_type_by_name_absent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ApplicationTypes/ShopType/$/GetServiceTypes/Missing"))
            .and(query_param("ApplicationTypeVersion", "1.0.0"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let found = client
            .service_types()
            .get_service_type_info_by_name(
                "ShopType",
                "1.0.0",
                "Missing",
                ServerTimeout::default(),
                &CancellationToken::new(),
            )
            .await
            .expect("lookup should succeed");

        assert!(found.is_none());
    }

    /// Raw send returns non-success responses unprocessed
    #[tokio::test]
    async fn test_raw_send_passes_status_through() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/$/GetClusterHealth"))
            .and(query_param("api-version", "6.0"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let request = RawRequest::get().with_query("api-version", "6.0");
        let response = client
            .send("/$/GetClusterHealth", &|| request.clone(), &CancellationToken::new())
            .await
            .expect("send should complete");

        assert_eq!(response.status, 500);
        assert_eq!(response.text(), "boom");
    }
}

/// Test module for error mapping
mod error_tests {
    use super::*;

    /// Cluster error bodies become remote errors with their code
    #[tokio::test]
    async fn test_not_found_maps_to_remote_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Applications/Gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "Error": {
                    "Code": "FABRIC_E_APPLICATION_NOT_FOUND",
                    "Message": "Application not found"
                }
            })))
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let err = client
            .applications()
            .get_application_info(
                &ApplicationId::parse("Gone").unwrap(),
                false,
                ServerTimeout::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), Some("FABRIC_E_APPLICATION_NOT_FOUND"));
        assert!(!err.is_transient());
        assert!(matches!(err, Error::Remote { status: 404, .. }));
    }

    /// Busy responses are flagged transient
    #[tokio::test]
    async fn test_service_unavailable_is_transient() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let err = client
            .chaos()
            .get_chaos(ServerTimeout::default(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_transient());
        assert_eq!(err.error_code(), Some("HTTP_503"));
    }

    /// Malformed success bodies are reported, not panicked on
    #[tokio::test]
    async fn test_malformed_json_is_unexpected_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos/Schedule"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json {{{"))
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let err = client
            .chaos()
            .get_chaos_schedule(ServerTimeout::default(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    /// Unreachable clusters surface as transport errors
    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = ServiceFabricClientBuilder::new()
            .use_endpoints(["http://127.0.0.1:1"])
            .unwrap()
            .use_no_security()
            .build(&CancellationToken::new())
            .await
            .unwrap();
        let err = client
            .infrastructure()
            .invoke_infrastructure_query(
                "GetJobs",
                None,
                ServerTimeout::default(),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }
}

/// Test module for credentials and cancellation
mod session_tests {
    use super::*;

    /// A rejected token is refreshed from the provider and the call resent once
    #[tokio::test]
    async fn test_bearer_token_refreshed_on_401() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos"))
            .and(bearer_token("stale-token"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos"))
            .and(bearer_token("fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Status": "Stopped",
                "ScheduleStatus": "Stopped"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider = security_provider(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                let token = if n == 0 { "stale-token" } else { "fresh-token" };
                Ok(SecuritySettings::Claims(ClaimsSecuritySettings::new(token)))
            }
        });

        let client = ServiceFabricClientBuilder::new()
            .use_endpoints([server.uri()])
            .unwrap()
            .use_claims_security(provider)
            .build(&CancellationToken::new())
            .await
            .unwrap();

        let chaos = client
            .chaos()
            .get_chaos(ServerTimeout::default(), &CancellationToken::new())
            .await
            .expect("refreshed call should succeed");

        assert_eq!(chaos.status, sfclient::types::ChaosStatus::Stopped);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// A second rejection surfaces as invalid credentials
    #[tokio::test]
    async fn test_persistent_401_is_invalid_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos"))
            .respond_with(ResponseTemplate::new(401))
            .expect(2)
            .mount(&server)
            .await;

        let provider = security_provider(|| async {
            Ok(SecuritySettings::Claims(ClaimsSecuritySettings::new("revoked")))
        });
        let client = ServiceFabricClientBuilder::new()
            .use_endpoints([server.uri()])
            .unwrap()
            .use_claims_security(provider)
            .build(&CancellationToken::new())
            .await
            .unwrap();

        let err = client
            .chaos()
            .get_chaos(ServerTimeout::default(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCredentials(_)));
    }

    /// Cancelling an in-flight call yields Cancelled, not a remote failure
    #[tokio::test]
    async fn test_cancellation_interrupts_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/Tools/Chaos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"Status": "Running"}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = client
            .chaos()
            .get_chaos(ServerTimeout::default(), &cancel)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
    }

    /// An already-cancelled token never reaches the network
    #[tokio::test]
    async fn test_precancelled_token_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/Tools/Chaos/$/Stop"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .chaos()
            .stop_chaos(ServerTimeout::default(), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Cancelled));
    }
}

/// Test module for paging and factory resolution
mod paging_tests {
    use super::*;

    /// Following continuation tokens stops at the empty token
    #[tokio::test]
    async fn test_paging_terminates_on_empty_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ComposeDeployments"))
            .and(query_param("ContinuationToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ContinuationToken": "",
                "Items": [{"Name": "web", "Status": "Ready"}]
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/ComposeDeployments"))
            .and(query_param("MaxResults", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ContinuationToken": "page-2",
                "Items": [{"Name": "db", "Status": "Ready"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = unsecured_client(&server).await;
        let cancel = CancellationToken::new();
        let mut paging = PagingOptions::new().with_max_results(1);
        let mut names = Vec::new();

        loop {
            let page = client
                .compose_deployments()
                .get_compose_deployment_status_list(&paging, &cancel)
                .await
                .expect("page should load");
            names.extend(page.items.iter().map(|d| d.name.clone()));
            match paging.next_page(&page) {
                Some(next) => paging = next,
                None => break,
            }
        }

        assert_eq!(names, vec!["db".to_string(), "web".to_string()]);
        assert_eq!(
            paging.continuation_token,
            Some(ContinuationToken::new("page-2"))
        );
    }

    /// The factory builds a working client for http endpoints
    #[tokio::test]
    async fn test_factory_client_reaches_cluster() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/$/InvokeInfrastructureCommand"))
            .and(query_param("Command", "StartJob"))
            .and(query_param("ServiceId", "fabric:/System/InfrastructureService/Node"))
            .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
            .expect(1)
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        let client = ServiceFabricClientFactory::create([server.uri()], None, &cancel)
            .await
            .unwrap()
            .client()
            .expect("http is supported");

        let reply = client
            .infrastructure()
            .invoke_infrastructure_command(
                "StartJob",
                Some("fabric:/System/InfrastructureService/Node"),
                ServerTimeout::default(),
                &cancel,
            )
            .await
            .unwrap();

        assert_eq!(reply, "accepted");
    }

    /// Unknown schemes are reported, not guessed
    #[tokio::test]
    async fn test_factory_unsupported_scheme() {
        let resolution = ServiceFabricClientFactory::create(
            ["tcp://localhost:19000"],
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(resolution.is_unsupported());

        let err = ServiceFabricClientFactory::create(
            ["http://a:19080", "tcp://b:19000"],
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MixedSchemes { .. })));
    }
}
