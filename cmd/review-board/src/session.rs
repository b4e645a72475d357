//! Translates parsed commands into controller calls and prints the result.
//!
//! Validation problems and bad input are printed and the session goes on.
//! Storage failures are returned and end the process.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::FixedOffset;
use domains::DomainError;
use services::{ClearOutcome, ReviewController};

use crate::commands::{self, Command, HELP};
use crate::render;
use crate::terminal::Terminal;

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    controller: ReviewController,
    offset: FixedOffset,
}

impl Session {
    pub fn new(controller: ReviewController, offset: FixedOffset) -> Self {
        Self { controller, offset }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ReviewController {
        &self.controller
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, term: &mut Terminal<R, W>) -> Result<()> {
        self.print_view(term)?;
        while let Some(line) = term.read_line(PROMPT).context("reading command")? {
            match commands::parse(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if self.handle(command, term)? == Flow::Quit {
                        break;
                    }
                }
                Err(e) => writeln!(term.output, "{}", e)?,
            }
        }
        Ok(())
    }

    pub fn handle<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        term: &mut Terminal<R, W>,
    ) -> Result<Flow> {
        match command {
            Command::Name(text) => self.controller.form_mut().name = text,
            Command::Title(text) => self.controller.form_mut().title = text,
            Command::Message(text) => {
                self.controller.form_mut().message = text;
                writeln!(term.output, "{} chars", self.controller.form().message_len())?;
            }
            Command::Rate(rating) => {
                self.controller.select_rating(rating);
                writeln!(term.output, "{}", render::form(self.controller.form()))?;
            }
            Command::Form => writeln!(term.output, "{}", render::form(self.controller.form()))?,
            Command::Submit => match self.controller.submit() {
                Ok(review) => {
                    writeln!(term.output, "Saved review {}", review.id)?;
                    self.print_view(term)?;
                }
                Err(DomainError::Validation(_)) => {
                    writeln!(term.output, "{}", render::form(self.controller.form()))?;
                }
                Err(e) => return Err(e).context("saving review"),
            },
            Command::Delete(id) => {
                let removed = self.controller.delete(&id).context("deleting review")?;
                if !removed {
                    tracing::debug!(id = %id, "delete of unknown review ignored");
                }
                self.print_view(term)?;
            }
            Command::Clear => {
                let mut read_error = None;
                let outcome = self
                    .controller
                    .clear_all(|prompt| {
                        term.confirm(prompt).unwrap_or_else(|e| {
                            read_error = Some(e);
                            false
                        })
                    })
                    .context("clearing reviews")?;
                if let Some(e) = read_error {
                    return Err(e).context("reading confirmation");
                }
                if outcome != ClearOutcome::Declined {
                    self.print_view(term)?;
                }
            }
            Command::Search(text) => {
                self.controller.set_search(text);
                self.print_view(term)?;
            }
            Command::Filter(filter) => {
                self.controller.set_filter(filter);
                self.print_view(term)?;
            }
            Command::Sort(sort) => {
                self.controller.set_sort(sort);
                self.print_view(term)?;
            }
            Command::List => self.print_view(term)?,
            Command::Help => writeln!(term.output, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn print_view<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> Result<()> {
        let projection = self.controller.view();
        write!(
            term.output,
            "{}",
            render::view(&projection, self.controller.params(), &self.offset)
        )?;
        Ok(())
    }
}
