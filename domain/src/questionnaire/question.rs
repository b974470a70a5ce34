//! Question value object

use super::answer::Answer;
use crate::core::error::DomainError;
use serde::Serialize;

/// A single check-in question (Value Object)
///
/// Immutable once fetched. Identity is `id`, which is unique within a
/// session's question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: String,
    prompt: String,
    options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl Question {
    /// Create a new question
    ///
    /// Fails if the id or prompt is blank or there are no options.
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let prompt = prompt.into();

        if id.trim().is_empty() {
            return Err(DomainError::EmptyQuestionId);
        }
        if prompt.trim().is_empty() {
            return Err(DomainError::EmptyPrompt(id));
        }
        if options.is_empty() {
            return Err(DomainError::NoOptions(id));
        }

        Ok(Self {
            id,
            prompt,
            options,
            category: None,
        })
    }

    /// Attach a category label
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Build the answer for selecting `index`, or `None` if out of range
    pub fn answer_with(&self, index: usize) -> Option<Answer> {
        self.options.get(index).map(|text| Answer {
            question_id: self.id.clone(),
            prompt_snapshot: self.prompt.clone(),
            selected_text: text.clone(),
            selected_index: index,
        })
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_question_creation() {
        let q = Question::new("q1", "How is sleep?", opts(&["Good", "Bad"]))
            .unwrap()
            .with_category("sleep");
        assert_eq!(q.id(), "q1");
        assert_eq!(q.option_count(), 2);
        assert_eq!(q.category(), Some("sleep"));
    }

    #[test]
    fn test_rejects_blank_id() {
        let err = Question::new("  ", "Prompt", opts(&["A"])).unwrap_err();
        assert_eq!(err, DomainError::EmptyQuestionId);
    }

    #[test]
    fn test_rejects_empty_prompt() {
        let err = Question::new("q1", "", opts(&["A"])).unwrap_err();
        assert_eq!(err, DomainError::EmptyPrompt("q1".to_string()));
    }

    #[test]
    fn test_rejects_no_options() {
        let err = Question::new("q1", "Prompt", vec![]).unwrap_err();
        assert_eq!(err, DomainError::NoOptions("q1".to_string()));
    }

    #[test]
    fn test_answer_with_denormalizes_option_text() {
        let q = Question::new("q1", "How is sleep?", opts(&["Good", "Bad"])).unwrap();
        let answer = q.answer_with(1).unwrap();
        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.prompt_snapshot, "How is sleep?");
        assert_eq!(answer.selected_text, "Bad");
        assert_eq!(answer.selected_index, 1);
    }

    #[test]
    fn test_answer_with_out_of_range() {
        let q = Question::new("q1", "How is sleep?", opts(&["Good"])).unwrap();
        assert!(q.answer_with(1).is_none());
    }

    #[test]
    fn test_serializes_without_missing_category() {
        let q = Question::new("q1", "How is sleep?", opts(&["Good"])).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["id"], "q1");
        assert!(json.get("category").is_none());
    }
}
