// Interaction log - in-memory record of user interactions
//
// Every interaction of interest (section navigation, card activation, ...)
// is appended here as a timestamped record. The log is append-only for the
// lifetime of the process and is never transmitted anywhere; the TUI can
// display it and copy it to the clipboard as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// A single recorded interaction
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    /// Interaction kind, e.g. "section_navigation" or "card_click"
    pub kind: String,
    /// Free-form payload describing the interaction
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Append-only interaction log, shared via cheap clones
///
/// One instance is created in main and handed to every component that needs
/// to record interactions. Cloning shares the underlying storage, so all
/// handles observe the same sequence.
#[derive(Clone)]
pub struct InteractionLog {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a record. Never fails, never drops prior entries.
    pub fn append(&self, kind: &str, data: serde_json::Value) {
        let record = EventRecord {
            kind: kind.to_string(),
            data,
            timestamp: Utc::now(),
        };
        self.records.lock().unwrap().push(record);
    }

    /// Owned copy of all records in append order
    ///
    /// Mutating the returned Vec has no effect on the log itself.
    pub fn snapshot(&self) -> Vec<EventRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the full log as JSON Lines, one record per line
    pub fn to_jsonl(&self) -> String {
        self.snapshot()
            .iter()
            .filter_map(|r| serde_json::to_string(r).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_then_snapshot_returns_records_in_order() {
        let log = InteractionLog::new();
        log.append("section_navigation", json!({"section_id": "overview"}));
        log.append("card_click", json!({"card_title": "Budget"}));
        log.append("section_navigation", json!({"section_id": "rollout"}));

        let snap = log.snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0].kind, "section_navigation");
        assert_eq!(snap[1].kind, "card_click");
        assert_eq!(snap[2].data["section_id"], "rollout");
    }

    #[test]
    fn snapshot_is_isolated_from_internal_state() {
        let log = InteractionLog::new();
        log.append("card_click", json!({}));

        let mut snap = log.snapshot();
        snap.clear();
        snap.push(EventRecord {
            kind: "bogus".into(),
            data: json!(null),
            timestamp: Utc::now(),
        });

        assert_eq!(log.len(), 1);
        assert_eq!(log.snapshot()[0].kind, "card_click");
    }

    #[test]
    fn clones_share_the_same_sequence() {
        let log = InteractionLog::new();
        let other = log.clone();
        other.append("section_navigation", json!({"section_id": "academy"}));

        assert_eq!(log.len(), 1);
        assert_eq!(log.snapshot().last().unwrap().kind, "section_navigation");
    }

    #[test]
    fn timestamps_are_monotonic_in_append_order() {
        let log = InteractionLog::new();
        for i in 0..5 {
            log.append("tick", json!({ "i": i }));
        }
        let snap = log.snapshot();
        for pair in snap.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn jsonl_export_has_one_line_per_record() {
        let log = InteractionLog::new();
        log.append("a", json!({}));
        log.append("b", json!({"x": 1}));
        let jsonl = log.to_jsonl();
        assert_eq!(jsonl.lines().count(), 2);
        assert!(jsonl.lines().nth(1).unwrap().contains("\"x\":1"));
    }
}
