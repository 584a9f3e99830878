//! Timing facts for a single monitored operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::format_duration_ms;

/// The timing record of one monitored operation.
///
/// Created when its timer starts, mutated by the caller while the operation
/// runs (failure flag, comments, item count), finalized at stop and immutable
/// afterwards. Used for rendering and structured serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEntry {
    /// Display name of the invoked operation
    pub name: String,
    /// Pre-rendered HTTP-endpoint prefix, e.g. `"[GET] /documents"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_endpoint: Option<String>,
    /// Correlation id shared by every timer in one call chain
    pub chain_id: String,
    /// Wall-clock start, for human-readable display only
    pub started_at: DateTime<Utc>,
    /// Wall-clock end, set once at stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Elapsed milliseconds, measured on the monotonic clock
    pub duration_ms: u64,
    /// Whether the monitored operation failed
    pub failed: bool,
    /// Free-text comments in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// Number of items the operation processed, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u64>,
    /// Average milliseconds per item; present iff `item_count` is positive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_ms_per_item: Option<f64>,
}

impl TimerEntry {
    /// Create a fresh entry for a root operation, starting now.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_context(name, None, Uuid::new_v4().to_string())
    }

    /// Create an entry with an explicit endpoint prefix and chain id.
    pub(crate) fn with_context(
        name: impl Into<String>,
        http_endpoint: Option<String>,
        chain_id: String,
    ) -> Self {
        Self {
            name: name.into(),
            http_endpoint,
            chain_id,
            started_at: Utc::now(),
            ended_at: None,
            duration_ms: 0,
            failed: false,
            comments: Vec::new(),
            item_count: None,
            avg_ms_per_item: None,
        }
    }

    /// Recompute the derived per-item average from duration and item count.
    pub fn recompute_average(&mut self) {
        self.avg_ms_per_item = match self.item_count {
            Some(n) if n > 0 => Some(self.duration_ms as f64 / n as f64),
            _ => None,
        };
    }

    /// Operation name prefixed with the HTTP endpoint when one is known.
    pub fn display_name(&self) -> String {
        match &self.http_endpoint {
            Some(prefix) => format!("{prefix} {}", self.name),
            None => self.name.clone(),
        }
    }

    /// Status verb plus formatted duration.
    ///
    /// Failure takes precedence over item throughput: a failed operation
    /// reports `failed after`, a successful one with a positive item count
    /// reports item throughput, everything else `executed in`.
    pub fn outcome_phrase(&self) -> String {
        let duration = format_duration_ms(self.duration_ms);

        if self.failed {
            return format!("failed after {duration}");
        }

        match (self.item_count, self.avg_ms_per_item) {
            (Some(n), Some(avg)) if n > 0 => {
                format!(
                    "processed {n} item(s) in {duration} ({} ms/item)",
                    format_average(avg)
                )
            }
            _ => format!("executed in {duration}"),
        }
    }
}

fn format_average(avg: f64) -> String {
    if avg.fract() == 0.0 {
        format!("{}", avg as u64)
    } else {
        format!("{avg:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_defaults() {
        let entry = TimerEntry::new("save_document");
        assert_eq!(entry.name, "save_document");
        assert!(entry.http_endpoint.is_none());
        assert!(!entry.chain_id.is_empty());
        assert!(entry.ended_at.is_none());
        assert_eq!(entry.duration_ms, 0);
        assert!(!entry.failed);
        assert!(entry.comments.is_empty());
        assert!(entry.item_count.is_none());
        assert!(entry.avg_ms_per_item.is_none());
    }

    #[test]
    fn test_display_name_with_endpoint() {
        let entry = TimerEntry::with_context(
            "list_users",
            Some("[GET] /users".to_string()),
            "chain".to_string(),
        );
        assert_eq!(entry.display_name(), "[GET] /users list_users");
    }

    #[test]
    fn test_average_requires_positive_item_count() {
        let mut entry = TimerEntry::new("batch");
        entry.duration_ms = 500;

        entry.item_count = Some(0);
        entry.recompute_average();
        assert!(entry.avg_ms_per_item.is_none());

        entry.item_count = Some(100);
        entry.recompute_average();
        assert_eq!(entry.avg_ms_per_item, Some(5.0));
    }

    #[test]
    fn test_outcome_phrase_success() {
        let mut entry = TimerEntry::new("op");
        entry.duration_ms = 42;
        assert_eq!(entry.outcome_phrase(), "executed in 42 ms");
    }

    #[test]
    fn test_outcome_phrase_failure() {
        let mut entry = TimerEntry::new("op");
        entry.duration_ms = 1_500;
        entry.failed = true;
        assert_eq!(entry.outcome_phrase(), "failed after 1 s 500 ms");
    }

    #[test]
    fn test_outcome_phrase_item_throughput() {
        let mut entry = TimerEntry::new("batch");
        entry.duration_ms = 500;
        entry.item_count = Some(100);
        entry.recompute_average();
        assert_eq!(
            entry.outcome_phrase(),
            "processed 100 item(s) in 500 ms (5 ms/item)"
        );
    }

    #[test]
    fn test_outcome_phrase_fractional_average() {
        let mut entry = TimerEntry::new("batch");
        entry.duration_ms = 10;
        entry.item_count = Some(3);
        entry.recompute_average();
        assert_eq!(
            entry.outcome_phrase(),
            "processed 3 item(s) in 10 ms (3.33 ms/item)"
        );
    }

    #[test]
    fn test_failure_takes_precedence_over_items() {
        let mut entry = TimerEntry::new("batch");
        entry.duration_ms = 200;
        entry.item_count = Some(10);
        entry.recompute_average();
        entry.failed = true;
        assert_eq!(entry.outcome_phrase(), "failed after 200 ms");
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let mut entry = TimerEntry::new("op");
        entry.duration_ms = 7;

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"name\":\"op\""));
        assert!(json.contains("\"duration_ms\":7"));
        assert!(!json.contains("ended_at"));
        assert!(!json.contains("item_count"));
        assert!(!json.contains("comments"));
        assert!(!json.contains("http_endpoint"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut entry = TimerEntry::new("op");
        entry.ended_at = Some(Utc::now());
        entry.duration_ms = 500;
        entry.comments.push("c1".to_string());
        entry.item_count = Some(100);
        entry.recompute_average();

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: TimerEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.name, entry.name);
        assert_eq!(parsed.duration_ms, 500);
        assert_eq!(parsed.comments, vec!["c1".to_string()]);
        assert_eq!(parsed.item_count, Some(100));
        assert_eq!(parsed.avg_ms_per_item, Some(5.0));
    }
}
