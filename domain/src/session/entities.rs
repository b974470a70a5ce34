//! Session aggregate

use super::error::SessionError;
use crate::core::child::ChildId;
use crate::questionnaire::{answer::Answer, question::Question, recommendation::CheckInResult};
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of [`Session::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the given position
    Moved(usize),
    /// The cursor is on the last question; the caller should submit next
    ReadyToSubmit,
}

/// One check-in attempt for a single child (Aggregate Root)
///
/// Holds the fetched question list, the answers recorded so far and the
/// cursor. `answers[i]` always belongs to `questions[i]`; answers are only
/// ever written at the cursor, so `answers.len() >= cursor` holds at all times.
///
/// A session is Active until [`Session::complete`] attaches a result, after
/// which it is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    child_id: ChildId,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    cursor: usize,
    result: Option<CheckInResult>,
}

impl Session {
    /// Create an Active session positioned on the first question
    pub fn new(child_id: ChildId, questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(SessionError::DuplicateQuestionId(question.id().to_string()));
            }
        }

        Ok(Self {
            child_id,
            questions,
            answers: Vec::new(),
            cursor: 0,
            result: None,
        })
    }

    pub fn child_id(&self) -> &ChildId {
        &self.child_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result(&self) -> Option<&CheckInResult> {
        self.result.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    /// The question under the cursor
    pub fn current_question(&self) -> &Question {
        &self.questions[self.cursor]
    }

    /// The answer recorded for `position`, if any
    pub fn answer_at(&self, position: usize) -> Option<&Answer> {
        self.answers.get(position)
    }

    /// The answer recorded for the question under the cursor, if any
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answer_at(self.cursor)
    }

    pub fn is_last_question(&self) -> bool {
        self.cursor + 1 == self.questions.len()
    }

    /// Every position has an answer, regardless of where the cursor is
    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    /// `(cursor + 1) / questions.len()`, always in `(0, 1]`
    pub fn progress_fraction(&self) -> f64 {
        (self.cursor + 1) as f64 / self.questions.len() as f64
    }

    /// Record the option at `selected_index` for the current question
    ///
    /// Appends when the cursor is at the end of the answer list, otherwise
    /// replaces the existing answer. Recording the same index again leaves
    /// the session unchanged.
    pub fn record_answer(&mut self, selected_index: usize) -> Result<&Answer, SessionError> {
        self.ensure_active()?;

        let question = &self.questions[self.cursor];
        let answer =
            question
                .answer_with(selected_index)
                .ok_or(SessionError::InvalidSelection {
                    index: selected_index,
                    option_count: question.option_count(),
                })?;

        debug_assert!(self.cursor <= self.answers.len());
        if self.cursor == self.answers.len() {
            self.answers.push(answer);
        } else {
            self.answers[self.cursor] = answer;
        }

        Ok(&self.answers[self.cursor])
    }

    /// Move to the next question
    ///
    /// Requires an answer at the cursor. On the last question the cursor
    /// stays put and [`Advance::ReadyToSubmit`] is returned.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.ensure_active()?;

        if self.current_answer().is_none() {
            return Err(SessionError::UnansweredQuestion {
                position: self.cursor,
            });
        }

        if self.is_last_question() {
            return Ok(Advance::ReadyToSubmit);
        }

        self.cursor += 1;
        Ok(Advance::Moved(self.cursor))
    }

    /// Move back one question, keeping every recorded answer
    pub fn retreat(&mut self) -> Result<usize, SessionError> {
        self.ensure_active()?;

        if self.cursor == 0 {
            return Err(SessionError::AtFirstQuestion);
        }

        self.cursor -= 1;
        Ok(self.cursor)
    }

    /// Attach the backend result, making the session read-only
    pub fn complete(&mut self, result: CheckInResult) -> Result<(), SessionError> {
        self.ensure_active()?;

        if !self.is_complete() {
            return Err(SessionError::IncompleteAnswers {
                answered: self.answers.len(),
                total: self.questions.len(),
            });
        }

        self.result = Some(result);
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.is_completed() {
            Err(SessionError::AlreadyCompleted)
        } else {
            Ok(())
        }
    }
}
