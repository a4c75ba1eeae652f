//! Domain models for accounts and todos.
//!
//! # Responsibility
//! - Define the canonical records used by core business logic.
//! - Own per-record validation rules enforced by persistence write paths.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId` and exactly one owner.
//! - Account level is always derivable from xp; a stored level that
//!   disagrees is corrupt state, not an alternative truth.

pub mod account;
pub mod todo;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall clock in epoch milliseconds, clamped to zero before 1970.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
