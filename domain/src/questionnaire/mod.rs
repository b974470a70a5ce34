//! Questionnaire value objects.
//!
//! - [`question::Question`]: a question with its ordered answer options
//! - [`answer::Answer`]: the option a parent picked for one question
//! - [`recommendation::CheckInResult`]: summary and recommendations returned after submission

pub mod answer;
pub mod question;
pub mod recommendation;
