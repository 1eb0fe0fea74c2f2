//! Per-player deposit summary written by the DepositBox plugin.
//!
//! The summary is a JSON object keyed by player id:
//! `{ "76561198000000000": { "total_deposited": 1200, ... } }`.
//! Key order is kept because it breaks ranking ties.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

use crate::core::error::LeaderboardError;

/// Deposit totals of a single player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositRecord {
    pub total_deposited: u64,
}

/// Snapshot of every player's deposits, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DepositSummary {
    records: IndexMap<String, DepositRecord>,
}

impl DepositSummary {
    /// Parse the summary document. Entries without a usable `total_deposited`
    /// fail the whole read.
    pub fn from_json_str(raw: &str) -> Result<Self, LeaderboardError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Object(entries) = value else {
            return Err(LeaderboardError::MalformedDocument(
                "deposit summary must be a JSON object keyed by player id".to_string(),
            ));
        };

        let mut records = IndexMap::with_capacity(entries.len());
        for (player_id, entry) in entries {
            let total_deposited = total_deposited(&player_id, &entry)?;
            records.insert(player_id, DepositRecord { total_deposited });
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DepositRecord)> {
        self.records.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// Sum of all deposits. Saturates instead of overflowing.
    pub fn grand_total(&self) -> u64 {
        self.records
            .values()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_deposited))
    }
}

impl FromIterator<(String, u64)> for DepositSummary {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|(id, total_deposited)| (id, DepositRecord { total_deposited }))
                .collect(),
        }
    }
}

fn total_deposited(player_id: &str, entry: &Value) -> Result<u64, LeaderboardError> {
    let raw = entry
        .as_object()
        .and_then(|o| o.get("total_deposited"))
        .ok_or_else(|| {
            LeaderboardError::Computation(format!(
                "player {} has no total_deposited value",
                player_id
            ))
        })?;

    if let Some(n) = raw.as_u64() {
        return Ok(n);
    }
    // Integral floats (e.g. 100.0) are accepted.
    if let Some(f) = raw.as_f64()
        && f >= 0.0
        && f.fract() == 0.0
        && f <= u64::MAX as f64
    {
        return Ok(f as u64);
    }
    Err(LeaderboardError::Computation(format!(
        "player {} has an invalid total_deposited value: {}",
        player_id, raw
    )))
}

/// Source of the deposit summary.
pub trait SummaryStore {
    fn read_summary(&self) -> Result<DepositSummary, LeaderboardError>;
}

/// Summary read from `DepositBoxSummary.json` on disk.
#[derive(Clone, Debug)]
pub struct FileSummaryStore {
    path: PathBuf,
}

impl FileSummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SummaryStore for FileSummaryStore {
    fn read_summary(&self) -> Result<DepositSummary, LeaderboardError> {
        if !self.exists() {
            return Err(LeaderboardError::MissingInput {
                what: "Deposit summary",
                path: self.path.clone(),
            });
        }
        let raw = fs::read_to_string(&self.path)?;
        log::debug!("{} contents:\n{}", self.path.display(), raw);
        let summary = DepositSummary::from_json_str(&raw)?;
        log::info!(
            "Loaded {} deposit record(s), {} deposited in total",
            summary.len(),
            summary.grand_total()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_in_document_order() {
        let summary = DepositSummary::from_json_str(
            r#"{"b":{"total_deposited":5},"a":{"total_deposited":7,"last_deposit":"x"}}"#,
        )
        .unwrap();
        let ids: Vec<_> = summary.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summary.grand_total(), 12);
    }

    #[test]
    fn empty_object_is_valid() {
        let summary = DepositSummary::from_json_str("{}").unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.grand_total(), 0);
    }

    #[test]
    fn integral_float_is_accepted() {
        let summary = DepositSummary::from_json_str(r#"{"a":{"total_deposited":100.0}}"#).unwrap();
        assert_eq!(summary.grand_total(), 100);
    }

    #[test]
    fn missing_total_is_computation_error() {
        let err = DepositSummary::from_json_str(r#"{"a":{"deposits":3}}"#).unwrap_err();
        match err {
            LeaderboardError::Computation(msg) => assert!(msg.contains("player a")),
            other => panic!("expected Computation, got {:?}", other),
        }
    }

    #[test]
    fn string_total_is_computation_error() {
        let err = DepositSummary::from_json_str(r#"{"a":{"total_deposited":"12"}}"#).unwrap_err();
        assert!(matches!(err, LeaderboardError::Computation(_)));
    }

    #[test]
    fn negative_or_fractional_total_is_rejected() {
        for raw in [
            r#"{"a":{"total_deposited":-4}}"#,
            r#"{"a":{"total_deposited":1.5}}"#,
        ] {
            let err = DepositSummary::from_json_str(raw).unwrap_err();
            assert!(matches!(err, LeaderboardError::Computation(_)), "{}", raw);
        }
    }

    #[test]
    fn non_object_document_is_malformed() {
        let err = DepositSummary::from_json_str("[1,2,3]").unwrap_err();
        assert!(matches!(err, LeaderboardError::MalformedDocument(_)));
    }

    #[test]
    fn grand_total_saturates() {
        let summary: DepositSummary = [("a".to_string(), u64::MAX), ("b".to_string(), 1)]
            .into_iter()
            .collect();
        assert_eq!(summary.grand_total(), u64::MAX);
    }

    #[test]
    fn file_store_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSummaryStore::new(dir.path().join("DepositBoxSummary.json"));
        let err = store.read_summary().unwrap_err();
        assert!(matches!(err, LeaderboardError::MissingInput { .. }));
    }

    #[test]
    fn file_store_reads_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DepositBoxSummary.json");
        std::fs::write(&path, r#"{"a":{"total_deposited":3}}"#).unwrap();
        let summary = FileSummaryStore::new(&path).read_summary().unwrap();
        assert_eq!(summary.len(), 1);
    }
}
