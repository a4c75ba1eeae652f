//! Todo completion gate.
//!
//! # Responsibility
//! - Compute the next completion/award state for a requested toggle.
//! - Report how much XP the transition earns, if any.
//!
//! # Invariants
//! - `xp_awarded` never reverts to `false` once set.
//! - Unchecking a todo never revokes XP already granted.
//! - Re-checking a previously awarded todo grants nothing.

use serde::{Deserialize, Serialize};

/// XP granted for the first completion of a todo.
pub const XP_PER_COMPLETION: i64 = 1;

/// The two booleans the gate operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionState {
    pub completed: bool,
    pub xp_awarded: bool,
}

/// Gate decision: the state to persist and the XP the caller should grant.
///
/// The gate does not touch accounts itself; when `xp_delta > 0` the caller
/// feeds it to [`crate::progression::xp::apply_xp`] and persists the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub state: CompletionState,
    pub xp_delta: i64,
}

/// Decides the next state for a completion toggle. Total over all inputs.
pub fn toggle_completion(state: CompletionState, requested_completed: bool) -> CompletionOutcome {
    if !requested_completed {
        // Unchecking clears `completed` only; the award flag is sticky.
        return CompletionOutcome {
            state: CompletionState {
                completed: false,
                xp_awarded: state.xp_awarded,
            },
            xp_delta: 0,
        };
    }

    if state.xp_awarded {
        // Re-checking after an earlier award: no double grant.
        return CompletionOutcome {
            state: CompletionState {
                completed: true,
                xp_awarded: true,
            },
            xp_delta: 0,
        };
    }

    CompletionOutcome {
        state: CompletionState {
            completed: true,
            xp_awarded: true,
        },
        xp_delta: XP_PER_COMPLETION,
    }
}
