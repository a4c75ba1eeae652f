//! Pure progression rules: XP arithmetic and the completion gate.
//!
//! # Responsibility
//! - Define the XP/level accrual rule as a pure, deterministic function.
//! - Decide when a todo completion may grant XP, at most once per todo.
//!
//! # Invariants
//! - `level == xp / 100 + 1` for every account state produced here.
//! - A todo grants XP exactly once across its whole lifetime, regardless of
//!   how many times it is toggled.
//!
//! These functions hold no state and perform no I/O; persistence of their
//! results is the caller's job.

pub mod completion;
pub mod xp;
