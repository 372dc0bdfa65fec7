//! Interactive request/response channel
//!
//! Every user decision goes through a [`Prompter`]. Commands pick
//! [`InquirePrompter`] on a terminal and [`LinePrompter`] otherwise, so piped
//! answers drive the same flow a person would. Unit tests use a scripted one.

mod line;
#[cfg(test)]
mod scripted;
mod terminal;

use std::io::IsTerminal;

use crate::error::Result;

pub use line::LinePrompter;
#[cfg(test)]
pub use scripted::ScriptedPrompter;
pub use terminal::InquirePrompter;

/// Synchronous question/answer capability
pub trait Prompter {
    /// Ask `question`; an empty answer yields `default`
    fn prompt(&mut self, question: &str, default: &str) -> Result<String>;

    /// Show a line of text that needs no answer
    fn message(&mut self, text: &str);

    /// Yes/no question
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = self.prompt(&format!("{question} {hint}"), "")?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }

    /// Numbered menu. Returns the chosen index, or `None` for an answer that
    /// names no option.
    fn select(&mut self, title: &str, options: &[String], default: usize) -> Result<Option<usize>> {
        self.message(title);
        for (idx, option) in options.iter().enumerate() {
            self.message(&format!("  {}. {option}", idx + 1));
        }
        let answer = self.prompt("Select", &(default + 1).to_string())?;
        Ok(parse_choice(&answer, options.len()))
    }
}

/// Prompter for the current process: terminal UI when stdin is a TTY
pub fn stdio_prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        Box::new(InquirePrompter)
    } else {
        Box::new(LinePrompter::stdio())
    }
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// 1-based menu answer to a 0-based index
pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=count).contains(n))
        .map(|n| n - 1)
}
