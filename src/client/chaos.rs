use crate::error::Result;
use crate::types::{
    Chaos, ChaosEventsQuery, ChaosEventsSegment, ChaosParameters, ChaosScheduleDescription,
    ServerTimeout,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Chaos testing control.
#[async_trait]
pub trait ChaosClient: Send + Sync {
    async fn get_chaos(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<Chaos>;

    /// Start a chaos run. Fails remotely if one is already running.
    async fn start_chaos(
        &self,
        parameters: &ChaosParameters,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Stop the running chaos run and any schedule.
    async fn stop_chaos(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;

    /// Read chaos history, either continuing a previous read or over a time
    /// range (see [`crate::types::ChaosEventsFilter`]).
    async fn get_chaos_events(
        &self,
        query: &ChaosEventsQuery,
        cancel: &CancellationToken,
    ) -> Result<ChaosEventsSegment>;

    async fn get_chaos_schedule(
        &self,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<ChaosScheduleDescription>;

    /// Replace the chaos schedule. The version must match the current one.
    async fn post_chaos_schedule(
        &self,
        schedule: &ChaosScheduleDescription,
        server_timeout: ServerTimeout,
        cancel: &CancellationToken,
    ) -> Result<()>;
}
