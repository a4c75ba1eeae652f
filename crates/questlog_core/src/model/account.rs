//! Account domain model.
//!
//! # Responsibility
//! - Define the per-subject progression record (xp + derived level).
//! - Validate state before it reaches persistence.
//!
//! # Invariants
//! - `subject_id` is an opaque, already-authenticated external identity;
//!   core never parses or re-validates it beyond non-emptiness.
//! - `level == xp / 100 + 1` at all times; writers recompute it from xp.
//! - xp never decreases within core-owned operations.

use crate::progression::xp::{level_for_xp, XpGrant};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for persisted or about-to-be-persisted accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Subject id is empty or whitespace.
    EmptySubjectId,
    /// XP total is negative.
    NegativeXp(i64),
    /// Stored level disagrees with the level derived from xp.
    LevelMismatch { xp: i64, level: i64 },
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySubjectId => write!(f, "account subject id cannot be empty"),
            Self::NegativeXp(xp) => write!(f, "account xp cannot be negative, got {xp}"),
            Self::LevelMismatch { xp, level } => write!(
                f,
                "account level {level} does not match level derived from xp {xp}"
            ),
        }
    }
}

impl Error for AccountValidationError {}

/// Per-subject progression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque external identity string supplied by the identity collaborator.
    pub subject_id: String,
    /// Monotonically non-decreasing XP total.
    pub xp: i64,
    /// Always `xp / 100 + 1`. Persisted redundantly, recomputed on write.
    pub level: i64,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Account {
    /// Creates the initial state for a newly observed subject.
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            xp: 0,
            level: 1,
            created_at: super::now_epoch_ms(),
        }
    }

    /// Applies a calculator result to this account in memory.
    pub fn apply_grant(&mut self, grant: &XpGrant) {
        self.xp = grant.xp;
        self.level = grant.level;
    }

    /// Checks all account invariants.
    ///
    /// Called by repository write paths before SQL mutations and by read
    /// paths after row parsing, so invalid state is rejected instead of
    /// silently propagated.
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.subject_id.trim().is_empty() {
            return Err(AccountValidationError::EmptySubjectId);
        }
        if self.xp < 0 {
            return Err(AccountValidationError::NegativeXp(self.xp));
        }
        if self.level != level_for_xp(self.xp) {
            return Err(AccountValidationError::LevelMismatch {
                xp: self.xp,
                level: self.level,
            });
        }
        Ok(())
    }
}
