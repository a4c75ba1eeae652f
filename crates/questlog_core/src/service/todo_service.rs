//! Todo use-case service.
//!
//! # Responsibility
//! - Provide create/list/patch/delete APIs for dated todos.
//! - Route completion toggles through the completion gate and apply the
//!   resulting XP grant to the owner account.
//! - Define the schema-validated request types accepted at the boundary.
//!
//! # Invariants
//! - Patch requests are whitelisted: only `text`, `completed` and
//!   `xpAwarded` are read; unknown fields are silently ignored.
//! - The completion gate is the only writer of `completed`/`xp_awarded`;
//!   a client-supplied `xpAwarded` value is never applied directly.
//! - XP grant order: todo state is persisted first, then the account.
//!   No partial-failure recovery is attempted.

use crate::model::todo::{Todo, TodoDate, TodoId, TodoValidationError};
use crate::progression::completion::toggle_completion;
use crate::progression::xp::{apply_xp, XpError};
use crate::repo::account_repo::AccountRepository;
use crate::repo::todo_repo::TodoRepository;
use crate::repo::RepoError;
use crate::Account;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Request failed model validation (empty text, bad date).
    Validation(TodoValidationError),
    /// Target todo does not exist or belongs to another account.
    TodoNotFound(TodoId),
    /// XP arithmetic rejected the gate-produced delta.
    Xp(XpError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
            Self::Xp(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent todo state: {details}")
            }
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Xp(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::TodoNotFound(_) => None,
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidTodo(err) => Self::Validation(err),
            RepoError::TodoNotFound(id) => Self::TodoNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<XpError> for TodoServiceError {
    fn from(value: XpError) -> Self {
        Self::Xp(value)
    }
}

/// Request model for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodoRequest {
    /// Display text; trimmed, must be non-empty.
    pub text: String,
    /// Calendar date the todo belongs to.
    pub date: TodoDate,
}

/// Whitelisted patch request for an existing todo.
///
/// Deserialization ignores any field not listed here, so arbitrary JSON
/// keys never reach storage. `xp_awarded` is accepted for wire
/// compatibility but the completion gate owns the award state; honoring a
/// client-supplied `false` would re-arm a spent award.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub xp_awarded: Option<bool>,
}

/// Result envelope for a patch: the stored todo plus the updated account
/// snapshot when the transition granted XP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoUpdateOutcome {
    pub todo: Todo,
    pub progress: Option<Account>,
}

/// Use-case service wrapper for todo operations.
pub struct TodoService<T: TodoRepository, A: AccountRepository> {
    todos: T,
    accounts: A,
}

impl<T: TodoRepository, A: AccountRepository> TodoService<T, A> {
    /// Creates a service using the provided repository implementations.
    pub fn new(todos: T, accounts: A) -> Self {
        Self { todos, accounts }
    }

    /// Creates a todo for the caller in the initial (uncompleted) state.
    ///
    /// Ensures the owner account row exists first, since todos reference
    /// it with an enforced foreign key.
    pub fn create_todo(
        &self,
        subject_id: &str,
        request: &NewTodoRequest,
    ) -> Result<Todo, TodoServiceError> {
        self.accounts.get_or_create_account(subject_id)?;

        let todo = Todo::new(subject_id, request.date.clone(), request.text.trim());
        self.todos.create_todo(&todo)?;
        Ok(todo)
    }

    /// Lists the caller's todos for one calendar date, oldest first.
    pub fn list_todos(
        &self,
        subject_id: &str,
        date: &TodoDate,
    ) -> Result<Vec<Todo>, TodoServiceError> {
        Ok(self.todos.list_todos(subject_id, date)?)
    }

    /// Applies a whitelisted patch to the caller's todo.
    ///
    /// # Contract
    /// - A missing or foreign-owned todo is `TodoNotFound`.
    /// - `text` is trimmed and must remain non-empty.
    /// - `completed` transitions go through the completion gate; when the
    ///   gate reports a positive delta the owner account is granted that
    ///   amount and returned in the outcome.
    pub fn patch_todo(
        &self,
        subject_id: &str,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<TodoUpdateOutcome, TodoServiceError> {
        let mut todo = self
            .todos
            .get_todo(subject_id, id)?
            .ok_or(TodoServiceError::TodoNotFound(id))?;

        if let Some(text) = &patch.text {
            todo.text = text.trim().to_string();
        }

        let mut xp_delta = 0;
        if let Some(requested) = patch.completed {
            let outcome = toggle_completion(todo.completion(), requested);
            todo.set_completion(outcome.state);
            xp_delta = outcome.xp_delta;
        }

        self.todos.update_todo(&todo)?;

        let progress = if xp_delta > 0 {
            let mut account = self.accounts.get_or_create_account(subject_id)?;
            let grant = apply_xp(account.xp, xp_delta)?;
            account.apply_grant(&grant);
            let saved = self.accounts.save_account(&account)?;
            info!(
                "event=todo_complete module=service status=ok xp_delta={xp_delta} xp={} level={}",
                saved.xp, saved.level
            );
            Some(saved)
        } else {
            None
        };

        // Read back so the caller sees the storage-owned updated_at.
        let todo = self
            .todos
            .get_todo(subject_id, id)?
            .ok_or(TodoServiceError::InconsistentState(
                "todo row missing right after update",
            ))?;

        Ok(TodoUpdateOutcome { todo, progress })
    }

    /// Hard-deletes the caller's todo. XP already granted is kept.
    pub fn delete_todo(&self, subject_id: &str, id: TodoId) -> Result<(), TodoServiceError> {
        Ok(self.todos.delete_todo(subject_id, id)?)
    }
}
