//! Line-oriented prompter over any reader/writer pair

use std::io::{BufRead, Stdout, StdinLock, Write};

use crate::error::Result;

use super::Prompter;

/// Writes `question [default]: ` and reads one line per answer.
///
/// End of input answers every remaining question with its default.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, question: &str, default: &str) -> Result<String> {
        if default.is_empty() {
            write!(self.writer, "{question}: ")?;
        } else {
            write!(self.writer, "{question} [{default}]: ")?;
        }
        self.writer.flush()?;

        let mut answer = String::new();
        if self.reader.read_line(&mut answer)? == 0 {
            writeln!(self.writer)?;
            return Ok(default.to_string());
        }

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }

    fn message(&mut self, text: &str) {
        let _ = writeln!(self.writer, "{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_lines_and_defaults() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new(Cursor::new("timer\n\n"), &mut out);

        assert_eq!(prompter.prompt("Component description", "").unwrap(), "timer");
        assert_eq!(prompter.prompt("Default reference", "U").unwrap(), "U");
        // Input exhausted
        assert_eq!(prompter.prompt("Library description", "Foo_KSL").unwrap(), "Foo_KSL");

        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("Component description: Default reference [U]: "));
    }

    #[test]
    fn test_confirm_over_lines() {
        let mut out = Vec::new();
        let mut prompter = LinePrompter::new(Cursor::new("y\n"), &mut out);
        assert!(prompter.confirm("Component Bar exists in 'Foo_KSL'. Add anyway?", false).unwrap());

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("Add anyway? [y/N]: "));
    }
}
