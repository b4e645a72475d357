//! Line-based input and output for the session.

use std::io::{self, BufRead, Write};

pub struct Terminal<R, W> {
    input: R,
    pub output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Yes/no question; anything other than `y`/`yes` means no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.read_line(&format!("{} [y/N] ", question))?;
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
