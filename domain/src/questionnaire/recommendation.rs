//! Recommendation and result value objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single backend-produced recommendation (Value Object)
///
/// Opaque to the engine; only ever displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub goal: String,
    pub activity: String,
}

impl Recommendation {
    pub fn new(
        trait_name: impl Into<String>,
        goal: impl Into<String>,
        activity: impl Into<String>,
    ) -> Self {
        Self {
            trait_name: trait_name.into(),
            goal: goal.into(),
            activity: activity.into(),
        }
    }
}

/// Finalized outcome of a submitted check-in (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInResult {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub produced_at: DateTime<Utc>,
}

impl CheckInResult {
    pub fn new(
        summary: impl Into<String>,
        recommendations: Vec<Recommendation>,
        produced_at: DateTime<Utc>,
    ) -> Self {
        Self {
            summary: summary.into(),
            recommendations,
            produced_at,
        }
    }
}

/// Kind of log entry a historical result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Generated when the child's profile was first created
    Initial,
    /// A regular guided check-in
    Checkin,
    /// An out-of-band emergency check-in
    Emergency,
    #[serde(other)]
    Unknown,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Initial => "initial",
            EntryType::Checkin => "checkin",
            EntryType::Emergency => "emergency",
            EntryType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One past result in a child's recommendation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub result: CheckInResult,
    pub entry_type: EntryType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_serializes_trait_key() {
        let rec = Recommendation::new("Sleep", "Rest well", "Read before bed");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["trait"], "Sleep");
        assert!(json.get("trait_name").is_none());
    }

    #[test]
    fn test_entry_type_unknown_fallback() {
        let parsed: EntryType = serde_json::from_str("\"dr_bloom\"").unwrap();
        assert_eq!(parsed, EntryType::Unknown);
        let parsed: EntryType = serde_json::from_str("\"checkin\"").unwrap();
        assert_eq!(parsed, EntryType::Checkin);
    }
}
