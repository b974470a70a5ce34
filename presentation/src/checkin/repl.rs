//! REPL (Read-Eval-Print Loop) for an interactive check-in

use super::command::ReplCommand;
use super::pump::SnapshotPump;
use crate::ConsoleFormatter;
use crate::ProgressReporter;
use checkin_application::{
    CheckInGateway, RecommendationHistoryInput, RecommendationHistoryUseCase, SessionController,
};
use checkin_domain::{Advance, ChildId};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;

/// Interactive check-in REPL
pub struct CheckInRepl<G: CheckInGateway + ?Sized + 'static> {
    controller: SessionController<G>,
    history: RecommendationHistoryUseCase<G>,
    child_id: ChildId,
    show_progress: bool,
}

impl<G: CheckInGateway + ?Sized + 'static> CheckInRepl<G> {
    /// Create a new CheckInRepl
    pub fn new(gateway: Arc<G>, child_id: impl Into<ChildId>) -> Self {
        Self {
            controller: SessionController::new(Arc::clone(&gateway)),
            history: RecommendationHistoryUseCase::new(gateway),
            child_id: child_id.into(),
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;
        let progress = if self.show_progress {
            ProgressReporter::new()
        } else {
            ProgressReporter::hidden()
        };
        let mut pump = SnapshotPump::new(self.controller.subscribe(), progress);

        self.print_welcome();
        // A failed start is rendered from its snapshot
        let _ = pump.run(self.controller.start(self.child_id.clone())).await;
        Self::render(&mut pump);

        loop {
            match rl.readline("check-in> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    match ReplCommand::parse(line) {
                        Ok(ReplCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => self.dispatch(command, &mut pump).await,
                        Err(message) => {
                            println!("{}", message);
                            println!("Type ? for available commands");
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&self, command: ReplCommand, pump: &mut SnapshotPump) {
        // Session operations report failures as snapshots carrying last_error,
        // which the pump renders, so their results are dropped here
        match command {
            ReplCommand::Select(index) => {
                let _ = self.controller.answer(index);
            }
            ReplCommand::Next => {
                if let Ok(Advance::ReadyToSubmit) = self.controller.next() {
                    println!("All questions answered. Type 's' to submit.");
                }
            }
            ReplCommand::Back => {
                let _ = self.controller.previous();
            }
            ReplCommand::Submit => {
                let _ = pump.run(self.controller.submit()).await;
            }
            ReplCommand::Restart => {
                let _ = pump.run(self.controller.start(self.child_id.clone())).await;
            }
            ReplCommand::History => {
                let input = RecommendationHistoryInput::new(self.child_id.clone());
                match pump.run(self.history.execute(input)).await {
                    Ok(entries) => println!("{}", ConsoleFormatter::history(&entries)),
                    Err(e) => eprintln!("Error: {}", e),
                }
                return;
            }
            ReplCommand::Help => {
                Self::print_help();
                return;
            }
            ReplCommand::Quit => return,
        }
        Self::render(pump);
    }

    fn render(pump: &mut SnapshotPump) {
        for snapshot in pump.drain() {
            println!("{}", ConsoleFormatter::snapshot(&snapshot));
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Bloom Check-in                   │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Child: {}", self.child_id);
        Self::print_help();
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  1, 2, ...          - Choose an option");
        println!("  n, next            - Next question");
        println!("  b, back            - Previous question");
        println!("  s, submit          - Submit answers");
        println!("  r, restart         - Start a new check-in");
        println!("  h, history         - Show past recommendations");
        println!("  ?, help            - Show this help");
        println!("  q, quit            - Exit");
        println!();
    }
}
