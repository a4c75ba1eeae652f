//! Core domain logic for QuestLog.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod progression;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountValidationError};
pub use model::todo::{Todo, TodoDate, TodoId, TodoValidationError};
pub use progression::completion::{
    toggle_completion, CompletionOutcome, CompletionState, XP_PER_COMPLETION,
};
pub use progression::xp::{apply_xp, level_for_xp, XpError, XpGrant, XP_PER_LEVEL};
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::todo_repo::{SqliteTodoRepository, TodoRepository};
pub use repo::{RepoError, RepoResult};
pub use service::progress_service::{ProgressService, ProgressServiceError, XpGrantRequest};
pub use service::todo_service::{
    NewTodoRequest, TodoPatch, TodoService, TodoServiceError, TodoUpdateOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
