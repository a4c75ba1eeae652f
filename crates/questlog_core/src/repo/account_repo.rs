//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable account persistence APIs over the `users` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save_account` recomputes `level` from `xp`; the stored level is never
//!   trusted as an independent fact.
//! - Read paths reject rows whose stored level disagrees with xp instead of
//!   masking the corruption.

use crate::model::account::{Account, AccountValidationError};
use crate::progression::xp::level_for_xp;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ACCOUNT_SELECT_SQL: &str = "SELECT
    subject_id,
    xp,
    level,
    created_at
FROM users";

/// Repository interface for account persistence.
pub trait AccountRepository {
    fn get_account(&self, subject_id: &str) -> RepoResult<Option<Account>>;
    fn create_account(&self, subject_id: &str) -> RepoResult<Account>;
    fn save_account(&self, account: &Account) -> RepoResult<Account>;

    /// Returns the existing account or creates the initial one
    /// (`xp=0, level=1`) on first observation of the subject.
    fn get_or_create_account(&self, subject_id: &str) -> RepoResult<Account> {
        if let Some(account) = self.get_account(subject_id)? {
            return Ok(account);
        }
        self.create_account(subject_id)
    }
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn get_account(&self, subject_id: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE subject_id = ?1;"))?;

        let mut rows = stmt.query([subject_id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn create_account(&self, subject_id: &str) -> RepoResult<Account> {
        if subject_id.trim().is_empty() {
            return Err(AccountValidationError::EmptySubjectId.into());
        }

        self.conn.execute(
            "INSERT INTO users (subject_id, xp, level) VALUES (?1, 0, 1);",
            [subject_id],
        )?;

        self.get_account(subject_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "account row for `{subject_id}` missing right after insert"
            ))
        })
    }

    fn save_account(&self, account: &Account) -> RepoResult<Account> {
        account.validate()?;

        let changed = self.conn.execute(
            "UPDATE users SET xp = ?1, level = ?2 WHERE subject_id = ?3;",
            params![
                account.xp,
                // Level is derived state; recompute on every write.
                level_for_xp(account.xp),
                account.subject_id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::AccountNotFound(account.subject_id.clone()));
        }

        self.get_account(&account.subject_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "account row for `{}` missing right after update",
                account.subject_id
            ))
        })
    }
}

fn parse_account_row(row: &Row<'_>) -> RepoResult<Account> {
    let account = Account {
        subject_id: row.get("subject_id")?,
        xp: row.get("xp")?,
        level: row.get("level")?,
        created_at: row.get("created_at")?,
    };
    account.validate()?;
    Ok(account)
}
