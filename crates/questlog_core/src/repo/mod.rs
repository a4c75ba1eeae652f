//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must validate models before persistence.
//! - Repository APIs return semantic errors (`AccountNotFound`,
//!   `TodoNotFound`) in addition to DB transport errors.
//! - Cross-account reads never surface another owner's rows.

pub mod account_repo;
pub mod todo_repo;

use crate::db::DbError;
use crate::model::account::AccountValidationError;
use crate::model::todo::{TodoId, TodoValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for account and todo persistence.
#[derive(Debug)]
pub enum RepoError {
    InvalidAccount(AccountValidationError),
    InvalidTodo(TodoValidationError),
    Db(DbError),
    AccountNotFound(String),
    TodoNotFound(TodoId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAccount(err) => write!(f, "{err}"),
            Self::InvalidTodo(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::AccountNotFound(subject_id) => {
                write!(f, "account not found: {subject_id}")
            }
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAccount(err) => Some(err),
            Self::InvalidTodo(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::AccountNotFound(_) => None,
            Self::TodoNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<AccountValidationError> for RepoError {
    fn from(value: AccountValidationError) -> Self {
        Self::InvalidAccount(value)
    }
}

impl From<TodoValidationError> for RepoError {
    fn from(value: TodoValidationError) -> Self {
        Self::InvalidTodo(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
