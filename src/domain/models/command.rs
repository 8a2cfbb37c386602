#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::fmt;

use serde_derive::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Please enter a command")]
    Empty,
}

/// A trimmed, non-empty instruction typed by the user. The only way to build
/// one is through `Command::parse`, so holders never need to re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Command(String);

impl Command {
    pub fn parse(text: &str) -> Result<Command, CommandError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CommandError::Empty);
        }

        return Ok(Command(trimmed.to_string()));
    }

    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}
