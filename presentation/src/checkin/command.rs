//! Commands accepted by the interactive check-in

/// One line of REPL input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    /// Choose an option of the current question (zero-based)
    Select(usize),
    Next,
    Back,
    Submit,
    Restart,
    History,
    Help,
    Quit,
}

impl ReplCommand {
    /// Parse user input; options are typed one-based
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return match number {
                0 => Err("Options are numbered from 1".to_string()),
                n => Ok(ReplCommand::Select(n - 1)),
            };
        }

        match input.to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(ReplCommand::Next),
            "b" | "back" | "p" | "prev" => Ok(ReplCommand::Back),
            "s" | "submit" => Ok(ReplCommand::Submit),
            "r" | "restart" => Ok(ReplCommand::Restart),
            "h" | "history" => Ok(ReplCommand::History),
            "?" | "help" => Ok(ReplCommand::Help),
            "q" | "quit" | "exit" => Ok(ReplCommand::Quit),
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}
