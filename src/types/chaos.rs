//! Chaos testing descriptors.

use super::common::{ContinuationToken, MaxResults, ServerTimeout};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 100ns intervals between 1601-01-01 and the Unix epoch.
const FILETIME_UNIX_EPOCH: i64 = 116_444_736_000_000_000;

/// Windows file time (100ns ticks since 1601-01-01 UTC) used by the cluster
/// for chaos time ranges. `None` when the tick count does not fit in an `i64`.
pub fn to_file_time(time: DateTime<Utc>) -> Option<i64> {
    time.timestamp()
        .checked_mul(10_000_000)?
        .checked_add(i64::from(time.timestamp_subsec_nanos() / 100))?
        .checked_add(FILETIME_UNIX_EPOCH)
}

/// Parameters of a chaos run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosParameters {
    /// Total run time as a decimal string of seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_run_in_seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cluster_stabilization_timeout_in_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_faults: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_move_replica_faults: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time_between_faults_in_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time_between_iterations_in_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_health_policy: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chaos_target_filter: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChaosStatus {
    Invalid,
    Running,
    Stopped,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChaosScheduleStatus {
    Invalid,
    Stopped,
    Active,
    Expired,
    Pending,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Current chaos state of the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Chaos {
    #[serde(default)]
    pub chaos_parameters: Option<ChaosParameters>,
    #[serde(default)]
    pub status: ChaosStatus,
    #[serde(default)]
    pub schedule_status: ChaosScheduleStatus,
}

/// One chaos event. Kind-specific fields stay in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosEvent {
    pub kind: String,
    pub time_stamp_utc: DateTime<Utc>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosEventWrapper {
    pub chaos_event: ChaosEvent,
}

/// A page of chaos history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosEventsSegment {
    #[serde(default)]
    pub continuation_token: Option<ContinuationToken>,
    #[serde(default)]
    pub history: Vec<ChaosEventWrapper>,
}

impl ChaosEventsSegment {
    pub fn is_last_page(&self) -> bool {
        self.continuation_token
            .as_ref()
            .map(|t| t.is_empty())
            .unwrap_or(true)
    }
}

/// Which slice of chaos history to read: continue a previous read, or start
/// a new one over a time range. The two cannot be combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChaosEventsFilter {
    Continue(ContinuationToken),
    TimeRange {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

impl Default for ChaosEventsFilter {
    fn default() -> Self {
        Self::TimeRange {
            start: None,
            end: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChaosEventsQuery {
    pub filter: ChaosEventsFilter,
    pub max_results: MaxResults,
    pub server_timeout: ServerTimeout,
}

/// Versioned chaos schedule. The schedule body is passed through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChaosScheduleDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_file_time_of_unix_epoch() {
        let epoch = Utc.timestamp_opt(0, 0).single().unwrap();
        assert_eq!(to_file_time(epoch), Some(FILETIME_UNIX_EPOCH));

        let later = Utc.timestamp_opt(1, 500).single().unwrap();
        assert_eq!(to_file_time(later), Some(FILETIME_UNIX_EPOCH + 10_000_005));
    }

    #[test]
    fn test_file_time_out_of_range() {
        let far = Utc.with_ymd_and_hms(40000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(to_file_time(far), None);
        assert_eq!(to_file_time(DateTime::<Utc>::MAX_UTC), None);
    }

    #[test]
    fn test_events_segment_parses() {
        let segment: ChaosEventsSegment = serde_json::from_value(json!({
            "ContinuationToken": "",
            "History": [{
                "ChaosEvent": {
                    "Kind": "Started",
                    "TimeStampUtc": "2024-01-01T00:00:00Z",
                    "ChaosParameters": {"MaxConcurrentFaults": 2}
                }
            }]
        }))
        .unwrap();
        assert!(segment.is_last_page());
        assert_eq!(segment.history[0].chaos_event.kind, "Started");
        assert!(segment.history[0].chaos_event.details.contains_key("ChaosParameters"));
    }

    #[test]
    fn test_default_filter_is_open_range() {
        assert_eq!(
            ChaosEventsFilter::default(),
            ChaosEventsFilter::TimeRange {
                start: None,
                end: None
            }
        );
    }
}
