//! Parsing of the line-oriented commands typed into the terminal.

use domains::{ParseViewError, Rating, RatingFilter, SortMode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Name(String),
    Title(String),
    Message(String),
    /// `None` clears the star picker.
    Rate(Option<Rating>),
    Submit,
    Delete(String),
    Clear,
    Search(String),
    Filter(RatingFilter),
    Sort(SortMode),
    List,
    Form,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("rating must be 1-5 or `none`, got {0:?}")]
    InvalidRating(String),
    #[error(transparent)]
    View(#[from] ParseViewError),
}

pub const HELP: &str = "\
Form:    name <text> | title <text> | message <text> | rate <1-5|none> | submit | form
Reviews: delete <id> | clear
View:    search [text] | filter <all|1-5> | sort <newest|oldest|highest|lowest> | list
Other:   help | quit";

/// Returns `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        // Text fields keep inner spacing; trimming happens on submit.
        "name" => Command::Name(rest.to_string()),
        "title" => Command::Title(rest.to_string()),
        "message" | "msg" => Command::Message(rest.to_string()),
        "rate" => Command::Rate(parse_rating(arg)?),
        "submit" => Command::Submit,
        "delete" | "del" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("delete"));
            }
            Command::Delete(arg.to_string())
        }
        "clear" => Command::Clear,
        "search" => Command::Search(arg.to_string()),
        "filter" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("filter"));
            }
            Command::Filter(arg.parse()?)
        }
        "sort" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument("sort"));
            }
            Command::Sort(arg.parse()?)
        }
        "list" | "ls" => Command::List,
        "form" => Command::Form,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_rating(arg: &str) -> Result<Option<Rating>, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument("rate"));
    }
    if arg.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    arg.parse::<i64>()
        .ok()
        .and_then(|n| Rating::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| CommandError::InvalidRating(arg.to_string()))
}
