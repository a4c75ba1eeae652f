//! XP/Level calculator.
//!
//! # Responsibility
//! - Apply a positive XP increment to a current total.
//! - Derive the level from the resulting total.
//!
//! # Invariants
//! - Level is always derived from XP, never an independent fact.
//! - Level boundaries are closed on the low end: `xp=99` is level 1,
//!   `xp=100` is level 2. There is no upper bound on xp or level.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// XP needed to advance one level.
pub const XP_PER_LEVEL: i64 = 100;

/// Input validation failure for [`apply_xp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpError {
    /// Increment was zero or negative.
    InvalidAmount(i64),
    /// Current total was negative, which no valid account state produces.
    NegativeCurrentXp(i64),
}

impl Display for XpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(amount) => {
                write!(f, "xp amount must be a positive integer, got {amount}")
            }
            Self::NegativeCurrentXp(xp) => {
                write!(f, "current xp must be non-negative, got {xp}")
            }
        }
    }
}

impl Error for XpError {}

/// Result of one XP grant: the new total and its derived level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGrant {
    pub xp: i64,
    pub level: i64,
}

/// Derives the level for an XP total.
pub fn level_for_xp(xp: i64) -> i64 {
    xp / XP_PER_LEVEL + 1
}

/// Applies a positive XP increment and derives the new level.
///
/// # Contract
/// - `amount <= 0` is rejected with [`XpError::InvalidAmount`].
/// - `current_xp < 0` is rejected with [`XpError::NegativeCurrentXp`].
/// - Pure and deterministic; no side effects.
pub fn apply_xp(current_xp: i64, amount: i64) -> Result<XpGrant, XpError> {
    if amount <= 0 {
        return Err(XpError::InvalidAmount(amount));
    }
    if current_xp < 0 {
        return Err(XpError::NegativeCurrentXp(current_xp));
    }

    let xp = current_xp + amount;
    Ok(XpGrant {
        xp,
        level: level_for_xp(xp),
    })
}
