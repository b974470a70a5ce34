//! Non-interactive check-in from a fixed list of answers

use super::pump::SnapshotPump;
use checkin_application::{CheckInGateway, ControllerError, SessionController};
use checkin_domain::{Advance, CheckInResult, ChildId};

/// Answer each question in order with `answers`, then submit
///
/// Stops answering once the last question is reached; indices beyond the
/// question count are ignored. Too few indices surface as
/// [`ControllerError::IncompleteAnswers`] from the submit.
pub async fn run_with_answers<G: CheckInGateway + ?Sized>(
    controller: &SessionController<G>,
    pump: &mut SnapshotPump,
    child_id: ChildId,
    answers: &[usize],
) -> Result<CheckInResult, ControllerError> {
    pump.run(controller.start(child_id)).await?;

    for &index in answers {
        controller.answer(index)?;
        if controller.next()? == Advance::ReadyToSubmit {
            break;
        }
    }

    pump.run(controller.submit()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::reporter::ProgressReporter;
    use async_trait::async_trait;
    use checkin_application::{ErrorKind, GatewayError, SessionState};
    use checkin_domain::{Answer, HistoryEntry, Question, Recommendation};
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockGateway {
        submitted: Mutex<Vec<Answer>>,
    }

    #[async_trait]
    impl CheckInGateway for MockGateway {
        async fn fetch_questions(&self, _child_id: &ChildId) -> Result<Vec<Question>, GatewayError> {
            Ok((1..=3)
                .map(|i| {
                    Question::new(
                        format!("q{i}"),
                        format!("Question {i}?"),
                        vec!["A".to_string(), "B".to_string()],
                    )
                    .unwrap()
                })
                .collect())
        }

        async fn submit_answers(
            &self,
            _child_id: &ChildId,
            answers: &[Answer],
        ) -> Result<CheckInResult, GatewayError> {
            *self.submitted.lock().unwrap() = answers.to_vec();
            Ok(CheckInResult::new(
                "ok",
                vec![Recommendation::new("Focus", "Goal", "Activity")],
                Utc::now(),
            ))
        }

        async fn recommendation_history(
            &self,
            _child_id: &ChildId,
        ) -> Result<Vec<HistoryEntry>, GatewayError> {
            Ok(vec![])
        }
    }

    fn setup() -> (Arc<MockGateway>, SessionController<MockGateway>, SnapshotPump) {
        let gateway = Arc::new(MockGateway::default());
        let controller = SessionController::new(Arc::clone(&gateway));
        let pump = SnapshotPump::new(controller.subscribe(), ProgressReporter::hidden());
        (gateway, controller, pump)
    }

    #[tokio::test]
    async fn test_answers_submitted_in_order() {
        let (gateway, controller, mut pump) = setup();

        let result = run_with_answers(&controller, &mut pump, "child-1".into(), &[1, 0, 1, 0])
            .await
            .unwrap();

        assert_eq!(result.summary, "ok");
        assert_eq!(controller.state(), SessionState::Completed);
        let indices: Vec<_> = gateway
            .submitted
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.selected_index)
            .collect();
        assert_eq!(indices, vec![1, 0, 1]);
        assert_eq!(pump.drain().last().map(|s| s.state), Some(SessionState::Completed));
    }

    #[tokio::test]
    async fn test_too_few_answers() {
        let (gateway, controller, mut pump) = setup();

        let err = run_with_answers(&controller, &mut pump, "child-1".into(), &[0])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IncompleteAnswers);
        assert!(gateway.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_answer() {
        let (_gateway, controller, mut pump) = setup();

        let err = run_with_answers(&controller, &mut pump, "child-1".into(), &[0, 5, 0])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidSelection);
        assert_eq!(controller.snapshot().session.unwrap().cursor(), 1);
    }
}
