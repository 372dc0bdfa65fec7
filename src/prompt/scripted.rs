//! Prompter that replays canned answers

use std::collections::VecDeque;

use crate::error::{KibraryError, Result};

use super::Prompter;

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
    messages: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, question: &str, default: &str) -> Result<String> {
        self.questions.push(question.to_string());
        let answer = self
            .answers
            .pop_front()
            .ok_or_else(|| KibraryError::PromptFailed {
                message: format!("no scripted answer for '{question}'"),
            })?;
        if answer.trim().is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.trim().to_string())
        }
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
