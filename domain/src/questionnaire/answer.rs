//! Answer value object

use serde::Serialize;

/// A recorded answer to one question (Value Object)
///
/// `selected_text` is a copy of the chosen option so the answer stays
/// meaningful for resubmission even without the originating question.
/// Built through [`Question::answer_with`](super::question::Question::answer_with).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: String,
    pub prompt_snapshot: String,
    pub selected_text: String,
    pub selected_index: usize,
}
