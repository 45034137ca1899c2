use super::connection::{HttpCore, Query};
use crate::client::ChaosClient;
use crate::error::{ConfigError, Result};
use crate::types::{
    to_file_time, Chaos, ChaosEventsFilter, ChaosEventsQuery, ChaosEventsSegment,
    ChaosParameters, ChaosScheduleDescription, ServerTimeout,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const API_VERSION: &str = "6.2";

pub(crate) struct HttpChaosClient {
    core: Arc<HttpCore>,
}

impl HttpChaosClient {
    pub fn new(core: Arc<HttpCore>) -> Self {
        Self { core }
    }
}

fn file_time(time: DateTime<Utc>) -> Result<i64> {
    to_file_time(time).ok_or_else(|| {
        ConfigError::InvalidArgument(
            "chaos events time is outside the file-time range".to_string(),
        )
        .into()
    })
}

/// Query for one read of chaos history. An open range starts at the
/// beginning of history and ends now.
pub(crate) fn events_query(query: &ChaosEventsQuery) -> Result<Query> {
    let params = Query::new(API_VERSION);
    let params = match &query.filter {
        ChaosEventsFilter::Continue(token) => {
            if token.is_empty() {
                return Err(ConfigError::InvalidArgument(
                    "chaos events continuation token is empty".to_string(),
                )
                .into());
            }
            params.param("ContinuationToken", token.as_str())
        }
        ChaosEventsFilter::TimeRange { start, end } => {
            let start = match start {
                Some(start) => file_time(*start)?,
                None => 0,
            };
            let end = file_time(end.unwrap_or_else(Utc::now))?;
            if start > end {
                return Err(ConfigError::InvalidArgument(
                    "chaos events start time is after end time".to_string(),
                )
                .into());
            }
            params
                .param("StartTimeUtc", start)
                .param("EndTimeUtc", end)
        }
    };
    Ok(params
        .param("MaxResults", query.max_results.get())
        .timeout(query.server_timeout))
}

#[async_trait]
impl ChaosClient for HttpChaosClient {
    async fn get_chaos(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Chaos> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core.get_json("Tools/Chaos", &query, cancel).await
    }

    async fn start_chaos(
        &self,
        parameters: &ChaosParameters,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Starting chaos");
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(Method::POST, "Tools/Chaos/$/Start", &query, Some(parameters), cancel)
            .await
    }

    async fn stop_chaos(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Stopping chaos");
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit::<()>(Method::POST, "Tools/Chaos/$/Stop", &query, None, cancel)
            .await
    }

    async fn get_chaos_events(
        &self,
        query: &ChaosEventsQuery,
        cancel: &CancellationToken,
    ) -> Result<ChaosEventsSegment> {
        let params = events_query(query)?;
        self.core.get_json("Tools/Chaos/Events", &params, cancel).await
    }

    async fn get_chaos_schedule(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ChaosScheduleDescription> {
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core.get_json("Tools/Chaos/Schedule", &query, cancel).await
    }

    async fn post_chaos_schedule(
        &self,
        schedule: &ChaosScheduleDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()> {
        tracing::info!("Updating chaos schedule (version {:?})", schedule.version);
        let query = Query::new(API_VERSION).timeout(server_timeout);
        self.core
            .send_unit(Method::POST, "Tools/Chaos/Schedule", &query, Some(schedule), cancel)
            .await
    }
}
