//! Terminal prompter built on inquire

use inquire::{Confirm, Select, Text};

use crate::error::Result;

use super::Prompter;

pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn prompt(&mut self, question: &str, default: &str) -> Result<String> {
        let mut text = Text::new(question);
        if !default.is_empty() {
            text = text.with_default(default);
        }
        let answer = text.prompt()?;
        Ok(answer.trim().to_string())
    }

    fn message(&mut self, text: &str) {
        println!("{text}");
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(question)
            .with_default(default)
            .with_help_message("Press Enter for the default, or type y/n")
            .prompt()?)
    }

    fn select(&mut self, title: &str, options: &[String], default: usize) -> Result<Option<usize>> {
        let selection = Select::new(title, options.to_vec())
            .with_starting_cursor(default.min(options.len().saturating_sub(1)))
            .with_page_size(10)
            .without_filtering()
            .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
            .raw_prompt_skippable()?;
        Ok(selection.map(|option| option.index))
    }
}
