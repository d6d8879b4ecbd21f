use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const YES: &str = "sim";

/// Line-oriented dialogue over any reader/writer pair.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", line.as_ref())?;
        Ok(())
    }

    /// Print `question` without a newline and read one answer, trimmed.
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer)?;
        if read == 0 {
            tracing::debug!("Input closed while asking: {}", question.trim());
            writeln!(self.output)?;
        }
        Ok(answer.trim().to_string())
    }

    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.to_lowercase() == YES)
    }

    /// Comma-separated answer, each item trimmed, blanks dropped.
    pub fn ask_list(&mut self, question: &str) -> Result<Vec<String>> {
        Ok(split_list(&self.ask(question)?))
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_and_echoes_question() {
        let mut console = Console::new(Cursor::new("  Vegan \n"), Vec::new());
        assert_eq!(console.ask("Dieta: ").unwrap(), "Vegan");
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Dieta: ");
    }

    #[test]
    fn test_eof_is_empty_answer() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert_eq!(console.ask("?").unwrap(), "");
        assert!(!console.confirm("?").unwrap());
    }

    #[test]
    fn test_confirm_is_case_insensitive() {
        let mut console = Console::new(Cursor::new("SIM\nnao\n"), Vec::new());
        assert!(console.confirm("?").unwrap());
        assert!(!console.confirm("?").unwrap());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" tomato, rice ,,egg"), vec!["tomato", "rice", "egg"]);
        assert!(split_list("   ").is_empty());
    }
}
