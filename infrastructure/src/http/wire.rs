//! JSON bodies exchanged with the check-in service

use checkin_application::ports::checkin_gateway::GatewayError;
use checkin_domain::{Answer, CheckInResult, EntryType, HistoryEntry, Question, Recommendation};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    pub questions: Vec<QuestionDto>,
    /// Informational note from the service
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "prompt")]
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl QuestionsResponse {
    /// Convert to domain questions, assigning `q1`, `q2`, ... where ids are missing
    pub fn into_questions(self) -> Result<Vec<Question>, GatewayError> {
        self.questions
            .into_iter()
            .enumerate()
            .map(|(i, dto)| {
                let id = dto
                    .id
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(|| format!("q{}", i + 1));
                let question = Question::new(id, dto.question, dto.options)
                    .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
                Ok(match dto.category {
                    Some(category) => question.with_category(category),
                    None => question,
                })
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub answers: Vec<AnswerDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerDto<'a> {
    pub question_id: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    pub selected_index: usize,
}

impl<'a> SubmitRequest<'a> {
    pub fn from_answers(answers: &'a [Answer]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|a| AnswerDto {
                    question_id: &a.question_id,
                    question: &a.prompt_snapshot,
                    answer: &a.selected_text,
                    selected_index: a.selected_index,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl SubmitResponse {
    pub fn into_result(self, received_at: DateTime<Utc>) -> CheckInResult {
        let produced_at = self
            .timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(received_at);
        CheckInResult::new(self.summary, self.recommendations, produced_at)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryEntryDto {
    pub timestamp: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default = "checkin_entry_type")]
    pub entry_type: EntryType,
}

fn checkin_entry_type() -> EntryType {
    EntryType::Checkin
}

impl HistoryEntryDto {
    pub fn into_entry(self) -> Result<HistoryEntry, GatewayError> {
        let produced_at = parse_timestamp(&self.timestamp).ok_or_else(|| {
            GatewayError::MalformedResponse(format!("Invalid timestamp '{}'", self.timestamp))
        })?;
        Ok(HistoryEntry {
            result: CheckInResult::new(self.summary, self.recommendations, produced_at),
            entry_type: self.entry_type,
        })
    }
}

/// RFC 3339, or a naive ISO-8601 datetime taken as UTC
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
