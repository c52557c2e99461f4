//! Volatile per-session history of completed pipeline runs.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::client::PipelineRun;

/// Display and wire format for history timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One completed pipeline run.
///
/// `extracted_data` and `diagnosis` are opaque payloads owned by the remote
/// services; nothing here inspects their fields. The `id` exists so exports
/// can address an entry over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    pub input_text: String,
    pub extracted_data: Value,
    pub diagnosis: Value,
}

impl HistoryEntry {
    /// Record a completed run, stamped now.
    pub fn from_run(run: PipelineRun) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input_text: run.input_text,
            extracted_data: run.extracted_data,
            diagnosis: run.diagnosis,
        }
    }
}

mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Append-only store of history entries, keyed by session id.
///
/// Entries live only as long as the process. No deletion, no deduplication;
/// append order is the only ordering guarantee.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Vec<HistoryEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Append an entry to a session's history.
    pub fn append(&self, session: Uuid, entry: HistoryEntry) {
        self.sessions.entry(session).or_default().push(entry);
    }

    /// All entries for a session, in append order.
    pub fn entries(&self, session: Uuid) -> Vec<HistoryEntry> {
        self.sessions
            .get(&session)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Look up one entry by id within a session.
    pub fn entry(&self, session: Uuid, id: Uuid) -> Option<HistoryEntry> {
        self.sessions
            .get(&session)
            .and_then(|entries| entries.iter().find(|e| e.id == id).cloned())
    }

    /// Number of entries recorded for a session.
    pub fn len(&self, session: Uuid) -> usize {
        self.sessions.get(&session).map_or(0, |entries| entries.len())
    }

    /// Number of sessions that have recorded at least one run.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(text: &str) -> HistoryEntry {
        HistoryEntry::from_run(PipelineRun {
            input_text: text.to_string(),
            extracted_data: json!({ "sintomas": ["fever"] }),
            diagnosis: json!({ "diagnostico": "flu" }),
        })
    }

    #[test]
    fn entries_come_back_in_append_order() {
        let store = SessionStore::new();
        let session = Uuid::new_v4();

        store.append(session, entry("first"));
        store.append(session, entry("second"));
        store.append(session, entry("third"));

        let texts: Vec<_> = store
            .entries(session)
            .into_iter()
            .map(|e| e.input_text)
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[test]
    fn sessions_do_not_see_each_other() {
        let store = SessionStore::new();
        let ana = Uuid::new_v4();
        let luis = Uuid::new_v4();

        store.append(ana, entry("ana's visit"));

        assert_eq!(store.len(ana), 1);
        assert_eq!(store.len(luis), 0);
        assert!(store.entries(luis).is_empty());
    }

    #[test]
    fn entry_lookup_is_scoped_to_the_session() {
        let store = SessionStore::new();
        let session = Uuid::new_v4();
        let other = Uuid::new_v4();

        let recorded = entry("visit");
        let id = recorded.id;
        store.append(session, recorded);

        assert!(store.entry(session, id).is_some());
        assert!(store.entry(other, id).is_none());
        assert!(store.entry(session, Uuid::new_v4()).is_none());
    }

    #[test]
    fn timestamp_serializes_in_the_report_format() {
        let recorded = entry("visit");
        let value = serde_json::to_value(&recorded).unwrap();

        let timestamp = value["timestamp"].as_str().unwrap();
        // e.g. "2025-07-14 09:30:12"
        assert_eq!(timestamp.len(), 19);
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[10..11], " ");

        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back.input_text, "visit");
    }

    #[test]
    fn entry_keeps_the_four_run_fields() {
        let recorded = entry("visit");

        assert_eq!(recorded.input_text, "visit");
        assert_eq!(recorded.extracted_data["sintomas"][0], "fever");
        assert_eq!(recorded.diagnosis["diagnostico"], "flu");
        assert!(recorded.timestamp <= Utc::now());
    }
}
