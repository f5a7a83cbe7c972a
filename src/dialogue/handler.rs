//! Handler capability shared by both dialects
//!
//! A handler answers two questions per state: what to ask when the
//! conversation arrives in the state, and how to consume the user's answer
//! while the conversation waits in it. Both return whether the step engine
//! should keep cascading into the next state within the same reply.

use super::{DialogueContext, DialogueState, Intent};
use async_trait::async_trait;
use thiserror::Error;

/// Inbound input for one turn
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    pub message: &'a str,
    pub intent: &'a Intent,
}

#[async_trait]
pub trait DialogueHandler: Send + Sync {
    /// Emit the prompt for `state` without consuming input.
    async fn ask_question(
        &self,
        state: DialogueState,
        ctx: &mut DialogueContext,
        out: &mut ResponseText,
    ) -> bool;

    /// Consume the user's answer while the conversation waits in `state`.
    async fn consume_answer(
        &self,
        state: DialogueState,
        ctx: &mut DialogueContext,
        turn: &Turn<'_>,
        out: &mut ResponseText,
    ) -> bool;
}

/// Rejected user input. The message is the re-ask text shown to the user;
/// the conversation stays in its state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error(":warning:Please enter a number! :warning:")]
    NotANumber,
    #[error(":warning:Please enter a number between {min} and {max}!:warning:")]
    OutOfRange { min: i64, max: i64 },
    #[error("Entered body is no valid JSON! Please try again.")]
    InvalidJson,
    #[error("I could not understand that. Please enter a valid type.")]
    UnknownType,
    #[error("I could not understand that. Please try again.")]
    UnrecognizedIntent,
    #[error("The answer must not be empty. Please try again.")]
    Empty,
}

/// Parse a 1-based choice from a numbered list of `count` entries.
pub fn parse_choice(message: &str, count: usize) -> Result<usize, ValidationError> {
    let max = i64::try_from(count).unwrap_or(i64::MAX);
    let number = parse_number(message)?;
    if !(1..=max).contains(&number) {
        return Err(ValidationError::OutOfRange { min: 1, max });
    }
    usize::try_from(number).map_err(|_| ValidationError::OutOfRange { min: 1, max })
}

pub fn parse_number(message: &str) -> Result<i64, ValidationError> {
    message
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber)
}

pub fn parse_status_code(message: &str) -> Result<u16, ValidationError> {
    const RANGE: std::ops::RangeInclusive<i64> = 100..=599;
    let number = parse_number(message)?;
    if !RANGE.contains(&number) {
        return Err(ValidationError::OutOfRange {
            min: *RANGE.start(),
            max: *RANGE.end(),
        });
    }
    u16::try_from(number).map_err(|_| ValidationError::NotANumber)
}

/// Only the two fixed yes/no intents count as an answer.
pub fn yes_no(intent: &Intent) -> Result<bool, ValidationError> {
    match intent {
        Intent::Yes => Ok(true),
        Intent::No => Ok(false),
        _ => Err(ValidationError::UnrecognizedIntent),
    }
}

pub fn non_empty(message: &str) -> Result<&str, ValidationError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Empty)
    } else {
        Ok(trimmed)
    }
}

/// Reply text accumulated over one turn
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResponseText {
    text: String,
}

impl ResponseText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append verbatim.
    pub fn push(&mut self, text: impl AsRef<str>) {
        self.text.push_str(text.as_ref());
    }

    /// Append as a sentence, space-separated from what came before.
    pub fn sentence(&mut self, text: impl AsRef<str>) {
        if !self.text.is_empty() && !self.text.ends_with(['\n', ' ']) {
            self.text.push(' ');
        }
        self.text.push_str(text.as_ref());
    }

    /// Append on a new line.
    pub fn line(&mut self, text: impl AsRef<str>) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(text.as_ref());
    }

    /// Append a block of lines starting on a new line.
    pub fn lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.line(line);
        }
    }

    pub fn reject(&mut self, error: &ValidationError) {
        self.sentence(error.to_string());
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
