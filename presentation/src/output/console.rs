//! Console output formatter for check-in sessions and results

use checkin_application::{ControllerError, ErrorKind, SessionSnapshot, SessionState};
use checkin_domain::{CheckInResult, HistoryEntry, Session};
use colored::Colorize;

/// Width of the textual progress bar
const PROGRESS_WIDTH: usize = 20;

/// Formats check-in sessions and results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors on or off for all output
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Render a snapshot as emitted by the controller
    ///
    /// Busy states render as a single status line; the spinner owns the
    /// terminal while a request is in flight.
    pub fn snapshot(snapshot: &SessionSnapshot) -> String {
        let mut output = String::new();

        if let Some(error) = &snapshot.last_error {
            output.push_str(&Self::error(error));
            output.push('\n');
        }

        match (snapshot.state, &snapshot.session) {
            (SessionState::Loading, _) => {
                output.push_str(&format!("{}\n", "Loading questions...".dimmed()));
            }
            (SessionState::Submitting, _) => {
                output.push_str(&format!("{}\n", "Submitting answers...".dimmed()));
            }
            (SessionState::Completed, Some(session)) => {
                if let Some(result) = session.result() {
                    output.push_str(&Self::result(result));
                }
            }
            (SessionState::Active, Some(session)) => {
                output.push_str(&Self::question(session));
            }
            _ => {
                output.push_str(&format!(
                    "{}\n",
                    "No active check-in. Type 'r' to start one.".dimmed()
                ));
            }
        }

        output
    }

    /// The current question with its options, marking the recorded answer
    pub fn question(session: &Session) -> String {
        let mut output = String::new();
        let position = session.cursor() + 1;
        let total = session.questions().len();
        let question = session.current_question();
        let selected = session.current_answer().map(|a| a.selected_index);

        output.push_str(&format!(
            "\n{} {}\n",
            Self::progress_bar(session.progress_fraction()).cyan(),
            format!("Question {} of {}", position, total).bold()
        ));
        if let Some(category) = question.category() {
            output.push_str(&format!("{}\n", category.dimmed()));
        }
        output.push_str(&format!("\n{}\n\n", question.prompt().bold()));

        for (i, option) in question.options().iter().enumerate() {
            if Some(i) == selected {
                output.push_str(&format!(
                    "  {} {}\n",
                    format!("[{}]", i + 1).green().bold(),
                    option.green()
                ));
            } else {
                output.push_str(&format!("   {}  {}\n", i + 1, option));
            }
        }

        let hint = if selected.is_none() {
            "Choose an option by number."
        } else if session.is_last_question() {
            "Type 's' to submit, 'b' to go back."
        } else {
            "Type 'n' for the next question, 'b' to go back."
        };
        output.push_str(&format!("\n{}\n", hint.dimmed()));

        output
    }

    /// Summary and recommendations of a completed check-in
    pub fn result(result: &CheckInResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Check-in Results"));
        output.push('\n');
        output.push_str(&format!("\n{}\n", "Summary:".cyan().bold()));
        output.push_str(&Self::indent(&result.summary, "  "));
        output.push('\n');

        output.push_str(&Self::section_header("Recommendations"));
        if result.recommendations.is_empty() {
            output.push_str(&format!("  {}\n", "No recommendations this time.".dimmed()));
        }
        for (i, rec) in result.recommendations.iter().enumerate() {
            output.push_str(&format!(
                "\n{}\n",
                format!("{}. {}", i + 1, rec.trait_name).yellow().bold()
            ));
            output.push_str(&format!("   {} {}\n", "Goal:".bold(), rec.goal));
            output.push_str(&format!("   {} {}\n", "Try:".bold(), rec.activity));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Past results, in the order given
    pub fn history(entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No recommendation history yet.".dimmed());
        }

        let mut output = String::new();
        output.push_str(&Self::header("Recommendation History"));
        output.push('\n');

        for entry in entries {
            output.push_str(&format!(
                "\n{} {}\n",
                entry
                    .result
                    .produced_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .cyan()
                    .bold(),
                format!("({})", entry.entry_type).dimmed()
            ));
            output.push_str(&Self::indent(&entry.result.summary, "  "));
            output.push('\n');
            for rec in &entry.result.recommendations {
                output.push_str(&format!("  * {}: {}\n", rec.trait_name.bold(), rec.goal));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One-line, user-facing description of a controller error
    pub fn error(error: &ControllerError) -> String {
        let message = match error.kind() {
            ErrorKind::Transport => format!("Could not reach the check-in service. {}", error),
            ErrorKind::Auth => format!("Access denied. Check your API key or token. {}", error),
            ErrorKind::Server => format!("The check-in service failed. Please retry. {}", error),
            ErrorKind::NotFound => format!("Child not found. {}", error),
            ErrorKind::UnansweredQuestion => {
                "Choose an option before moving on.".to_string()
            }
            ErrorKind::AtFirstQuestion => "Already at the first question.".to_string(),
            ErrorKind::SessionCompleted => {
                "This check-in is finished. Type 'r' to start another.".to_string()
            }
            ErrorKind::SessionBusy => "Please wait, a request is still running.".to_string(),
            _ => error.to_string(),
        };
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Format a result as JSON
    pub fn result_json(result: &CheckInResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format history entries as a JSON array
    pub fn history_json(entries: &[HistoryEntry]) -> String {
        serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
    }

    fn progress_bar(fraction: f64) -> String {
        let filled = ((fraction.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round()) as usize;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled)
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
