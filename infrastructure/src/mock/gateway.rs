//! In-memory Check-in Gateway implementation

use super::question_bank::questions_for;
use super::rules::{recommend, summarize};
use async_trait::async_trait;
use checkin_application::ports::checkin_gateway::{CheckInGateway, GatewayError};
use checkin_domain::{Answer, CheckInResult, ChildId, EntryType, HistoryEntry, Question};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Deterministic stand-in for the check-in service
///
/// Questions are derived from the child id alone. Submissions are checked
/// against that question set, scored with keyword rules, and remembered so
/// that `recommendation_history` reflects completed check-ins.
pub struct MockCheckInGateway {
    latency: Duration,
    history: Mutex<HashMap<ChildId, Vec<HistoryEntry>>>,
}

impl MockCheckInGateway {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            history: Mutex::new(HashMap::new()),
        }
    }

    /// Delay every call, to exercise loading states
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn ensure_known(child_id: &ChildId) -> Result<(), GatewayError> {
        if child_id.is_blank() {
            return Err(GatewayError::NotFound(
                "No check-in available for an empty child id".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_answers(questions: &[Question], answers: &[Answer]) -> Result<(), GatewayError> {
        if answers.len() != questions.len() {
            return Err(GatewayError::Validation(format!(
                "Expected {} answers, got {}",
                questions.len(),
                answers.len()
            )));
        }

        for (position, (question, answer)) in questions.iter().zip(answers).enumerate() {
            if answer.question_id != question.id() {
                return Err(GatewayError::Validation(format!(
                    "Answer {} is for '{}', expected '{}'",
                    position + 1,
                    answer.question_id,
                    question.id()
                )));
            }
            if question.options().get(answer.selected_index) != Some(&answer.selected_text) {
                return Err(GatewayError::Validation(format!(
                    "Answer {} does not match any option of '{}'",
                    position + 1,
                    question.id()
                )));
            }
        }

        Ok(())
    }
}

impl Default for MockCheckInGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CheckInGateway for MockCheckInGateway {
    async fn fetch_questions(&self, child_id: &ChildId) -> Result<Vec<Question>, GatewayError> {
        self.simulate_latency().await;
        Self::ensure_known(child_id)?;

        let questions = questions_for(child_id);
        debug!(child_id = %child_id, count = questions.len(), "Mock questions served");
        Ok(questions)
    }

    async fn submit_answers(
        &self,
        child_id: &ChildId,
        answers: &[Answer],
    ) -> Result<CheckInResult, GatewayError> {
        self.simulate_latency().await;
        Self::ensure_known(child_id)?;
        Self::validate_answers(&questions_for(child_id), answers)?;

        let recommendations = recommend(answers);
        let summary = summarize(child_id, answers, &recommendations);
        let result = CheckInResult::new(summary, recommendations, Utc::now());

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(child_id.clone())
            .or_default()
            .push(HistoryEntry {
                result: result.clone(),
                entry_type: EntryType::Checkin,
            });

        debug!(
            child_id = %child_id,
            recommendations = result.recommendations.len(),
            "Mock check-in scored"
        );
        Ok(result)
    }

    async fn recommendation_history(
        &self,
        child_id: &ChildId,
    ) -> Result<Vec<HistoryEntry>, GatewayError> {
        self.simulate_latency().await;
        Self::ensure_known(child_id)?;

        Ok(self
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(child_id)
            .cloned()
            .unwrap_or_default())
    }
}
