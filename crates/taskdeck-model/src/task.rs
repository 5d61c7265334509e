// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const TITLE_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
    NotPositive(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
            Self::NotPositive(name) => write!(f, "{name} must be a positive integer"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Positive row identifier assigned by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Accepts only unsigned decimal digits (`^[0-9]+$`) with a value > 0.
    /// Signs, decimal points, and surrounding characters all reject.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("id"));
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat("id must contain only digits"));
        }
        let value = input
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidFormat("id is out of range"))?;
        Self::new(value)
    }

    pub fn new(value: i64) -> Result<Self, ParseError> {
        if value <= 0 {
            return Err(ParseError::NotPositive("id"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title, trimmed on parse. Never empty or whitespace-only once held.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    /// Trims surrounding whitespace before the emptiness and length checks,
    /// so an all-whitespace title rejects as empty.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty("title"));
        }
        if trimmed.chars().count() > TITLE_MAX_LEN {
            return Err(ParseError::TooLong("title", TITLE_MAX_LEN));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: TaskId,
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// `id` and `created_at` are immutable after creation; `updated_at`
    /// never precedes `created_at`.
    #[must_use]
    pub fn timestamps_consistent(&self) -> bool {
        self.updated_at >= self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_parses_plain_digits() {
        assert_eq!(TaskId::parse("7").expect("valid id").get(), 7);
        assert_eq!(TaskId::parse("123456").expect("valid id").get(), 123_456);
    }

    #[test]
    fn task_id_rejects_non_digit_tokens() {
        for raw in ["", "0", "-1", "12.5", "+3", " 7", "7 ", "1x", "abc"] {
            assert!(TaskId::parse(raw).is_err(), "expected rejection for {raw:?}");
        }
    }

    #[test]
    fn title_trims_before_length_and_emptiness_checks() {
        let title = Title::parse("  Buy milk  ").expect("valid title");
        assert_eq!(title.as_str(), "Buy milk");
        assert!(matches!(
            Title::parse("   "),
            Err(ParseError::Empty("title"))
        ));
        let overlong = "a".repeat(TITLE_MAX_LEN + 1);
        assert!(matches!(
            Title::parse(&overlong),
            Err(ParseError::TooLong("title", TITLE_MAX_LEN))
        ));
        // Exactly at the limit after trimming is fine.
        let padded = format!(" {} ", "a".repeat(TITLE_MAX_LEN));
        assert!(Title::parse(&padded).is_ok());
    }
}
