//! Recommendation History use case
//!
//! Loads the past check-in results for a child.

use crate::ports::checkin_gateway::{CheckInGateway, GatewayError};
use checkin_domain::{ChildId, EntryType, HistoryEntry};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading history
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendationHistoryError {
    #[error("Child id cannot be empty")]
    BlankChildId,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Input for the RecommendationHistory use case
#[derive(Debug, Clone)]
pub struct RecommendationHistoryInput {
    pub child_id: ChildId,
    /// Restrict to one entry type
    pub entry_type: Option<EntryType>,
    /// Keep at most this many entries (newest first)
    pub limit: Option<usize>,
}

impl RecommendationHistoryInput {
    pub fn new(child_id: impl Into<ChildId>) -> Self {
        Self {
            child_id: child_id.into(),
            entry_type: None,
            limit: None,
        }
    }

    pub fn only(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Use case for listing a child's past results, newest first
pub struct RecommendationHistoryUseCase<G: CheckInGateway + ?Sized> {
    gateway: Arc<G>,
}

impl<G: CheckInGateway + ?Sized> RecommendationHistoryUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        input: RecommendationHistoryInput,
    ) -> Result<Vec<HistoryEntry>, RecommendationHistoryError> {
        if input.child_id.is_blank() {
            return Err(RecommendationHistoryError::BlankChildId);
        }

        let mut entries = self
            .gateway
            .recommendation_history(&input.child_id)
            .await?;

        if let Some(entry_type) = input.entry_type {
            entries.retain(|e| e.entry_type == entry_type);
        }

        // Stable sort keeps backend order for equal timestamps
        entries.sort_by(|a, b| b.result.produced_at.cmp(&a.result.produced_at));

        if let Some(limit) = input.limit {
            entries.truncate(limit);
        }

        info!(
            child_id = %input.child_id,
            entry_count = entries.len(),
            "Loaded recommendation history"
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use checkin_domain::{Answer, CheckInResult, Question};
    use chrono::{Duration, TimeZone, Utc};

    struct HistoryGateway {
        entries: Result<Vec<HistoryEntry>, GatewayError>,
    }

    #[async_trait]
    impl CheckInGateway for HistoryGateway {
        async fn fetch_questions(
            &self,
            _child_id: &ChildId,
        ) -> Result<Vec<Question>, GatewayError> {
            Ok(vec![])
        }

        async fn submit_answers(
            &self,
            _child_id: &ChildId,
            _answers: &[Answer],
        ) -> Result<CheckInResult, GatewayError> {
            Err(GatewayError::Validation("not used".to_string()))
        }

        async fn recommendation_history(
            &self,
            _child_id: &ChildId,
        ) -> Result<Vec<HistoryEntry>, GatewayError> {
            self.entries.clone()
        }
    }

    fn entry(summary: &str, days_ago: i64, entry_type: EntryType) -> HistoryEntry {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        HistoryEntry {
            result: CheckInResult::new(summary, vec![], base - Duration::days(days_ago)),
            entry_type,
        }
    }

    fn use_case(entries: Vec<HistoryEntry>) -> RecommendationHistoryUseCase<HistoryGateway> {
        RecommendationHistoryUseCase::new(Arc::new(HistoryGateway {
            entries: Ok(entries),
        }))
    }

    #[tokio::test]
    async fn test_history_sorted_newest_first() {
        let uc = use_case(vec![
            entry("oldest", 10, EntryType::Initial),
            entry("newest", 1, EntryType::Checkin),
            entry("middle", 5, EntryType::Checkin),
        ]);

        let entries = uc
            .execute(RecommendationHistoryInput::new("child-1"))
            .await
            .unwrap();
        let summaries: Vec<_> = entries.iter().map(|e| e.result.summary.as_str()).collect();
        assert_eq!(summaries, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_history_filter_and_limit() {
        let uc = use_case(vec![
            entry("initial", 10, EntryType::Initial),
            entry("a", 3, EntryType::Checkin),
            entry("b", 2, EntryType::Checkin),
            entry("c", 1, EntryType::Checkin),
        ]);

        let entries = uc
            .execute(
                RecommendationHistoryInput::new("child-1")
                    .only(EntryType::Checkin)
                    .with_limit(2),
            )
            .await
            .unwrap();
        let summaries: Vec<_> = entries.iter().map(|e| e.result.summary.as_str()).collect();
        assert_eq!(summaries, vec!["c", "b"]);
    }

    #[tokio::test]
    async fn test_blank_child_id_rejected() {
        let uc = use_case(vec![]);
        let err = uc
            .execute(RecommendationHistoryInput::new(" "))
            .await
            .unwrap_err();
        assert_eq!(err, RecommendationHistoryError::BlankChildId);
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let uc = RecommendationHistoryUseCase::new(Arc::new(HistoryGateway {
            entries: Err(GatewayError::Auth("expired token".to_string())),
        }));
        let err = uc
            .execute(RecommendationHistoryInput::new("child-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecommendationHistoryError::Gateway(GatewayError::Auth(_))));
    }
}
