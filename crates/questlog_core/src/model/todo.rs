//! Todo domain model.
//!
//! # Responsibility
//! - Define the dated, owned unit of work tracked by QuestLog.
//! - Validate text/date/identity before persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another todo.
//! - `xp_awarded == true` implies the todo was completed at least once;
//!   only the completion gate mutates the pair.
//! - `date` is a calendar date (`YYYY-MM-DD`) with no time component.

use crate::progression::completion::CompletionState;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a todo.
pub type TodoId = Uuid;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid date regex"));

/// Validation failure for persisted or about-to-be-persisted todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    /// `uuid` is the nil UUID.
    NilUuid,
    /// Owner subject id is empty or whitespace.
    EmptySubjectId,
    /// Text is empty after trimming.
    EmptyText,
    /// Date is not a plausible `YYYY-MM-DD` calendar date.
    InvalidDate(String),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "todo uuid cannot be nil"),
            Self::EmptySubjectId => write!(f, "todo subject id cannot be empty"),
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::InvalidDate(value) => {
                write!(f, "todo date must be YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for TodoValidationError {}

/// Calendar date scope of a todo, validated at construction.
///
/// Kept as a checked newtype so repositories and services can pass dates
/// around without re-validating, and so a raw string never reaches SQL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoDate(String);

impl TodoDate {
    /// Parses and validates a `YYYY-MM-DD` date string.
    ///
    /// Month must be 01-12 and day 01-31. Core does not model per-month
    /// day counts; the date is an opaque grouping key, not an instant.
    pub fn parse(value: &str) -> Result<Self, TodoValidationError> {
        let trimmed = value.trim();
        let captures = DATE_RE
            .captures(trimmed)
            .ok_or_else(|| TodoValidationError::InvalidDate(value.to_string()))?;

        let month: u32 = captures[2]
            .parse()
            .map_err(|_| TodoValidationError::InvalidDate(value.to_string()))?;
        let day: u32 = captures[3]
            .parse()
            .map_err(|_| TodoValidationError::InvalidDate(value.to_string()))?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(TodoValidationError::InvalidDate(value.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TodoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TodoDate {
    type Error = TodoValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TodoDate> for String {
    fn from(value: TodoDate) -> Self {
        value.0
    }
}

/// Dated, owned unit of work with completion and XP-award flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Stable global ID used for patching and deletion.
    pub uuid: TodoId,
    /// Owning account; todos are never shared or reassigned.
    pub subject_id: String,
    /// Calendar date the todo belongs to.
    pub date: TodoDate,
    /// Non-empty display text.
    pub text: String,
    /// Current checkbox state.
    pub completed: bool,
    /// Sticky award flag; set once by the completion gate, never cleared.
    pub xp_awarded: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Last mutation timestamp in epoch milliseconds.
    pub updated_at: i64,
}

impl Todo {
    /// Creates a new todo in the sole initial state
    /// (`completed: false, xp_awarded: false`).
    pub fn new(subject_id: impl Into<String>, date: TodoDate, text: impl Into<String>) -> Self {
        let now = super::now_epoch_ms();
        Self {
            uuid: Uuid::new_v4(),
            subject_id: subject_id.into(),
            date,
            text: text.into(),
            completed: false,
            xp_awarded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Projects the two gate-owned booleans.
    pub fn completion(&self) -> CompletionState {
        CompletionState {
            completed: self.completed,
            xp_awarded: self.xp_awarded,
        }
    }

    /// Writes back a gate decision.
    pub fn set_completion(&mut self, state: CompletionState) {
        self.completed = state.completed;
        self.xp_awarded = state.xp_awarded;
    }

    /// Checks all todo invariants enforceable on a single record.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.uuid.is_nil() {
            return Err(TodoValidationError::NilUuid);
        }
        if self.subject_id.trim().is_empty() {
            return Err(TodoValidationError::EmptySubjectId);
        }
        if self.text.trim().is_empty() {
            return Err(TodoValidationError::EmptyText);
        }
        Ok(())
    }
}
