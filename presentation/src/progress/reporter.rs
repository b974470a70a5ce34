//! Progress reporting while a gateway request is in flight

use checkin_application::SessionState;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Shows a spinner while the controller is Loading or Submitting
pub struct ProgressReporter {
    enabled: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            enabled: true,
            spinner: Mutex::new(None),
        }
    }

    /// A reporter that never draws
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn busy_message(state: SessionState) -> Option<&'static str> {
        match state {
            SessionState::Loading => Some("Loading questions..."),
            SessionState::Submitting => Some("Submitting answers..."),
            _ => None,
        }
    }

    /// Start, update or clear the spinner for the new state
    pub fn on_state(&self, state: SessionState) {
        if !self.enabled {
            return;
        }

        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match Self::busy_message(state) {
            Some(message) => {
                let pb = spinner.get_or_insert_with(|| {
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(100));
                    pb
                });
                pb.set_message(message.to_string());
            }
            None => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
        }
    }

    /// Whether a spinner is currently drawn
    #[cfg(test)]
    pub fn is_spinning(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_follows_busy_states() {
        let reporter = ProgressReporter::new();
        reporter.on_state(SessionState::Loading);
        assert!(reporter.is_spinning());
        reporter.on_state(SessionState::Active);
        assert!(!reporter.is_spinning());
        reporter.on_state(SessionState::Submitting);
        assert!(reporter.is_spinning());
        reporter.on_state(SessionState::Completed);
        assert!(!reporter.is_spinning());
    }

    #[test]
    fn test_hidden_reporter_never_spins() {
        let reporter = ProgressReporter::hidden();
        reporter.on_state(SessionState::Loading);
        assert!(!reporter.is_spinning());
    }
}
