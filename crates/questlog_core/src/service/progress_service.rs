//! Account progression use-case service.
//!
//! # Responsibility
//! - Expose the current-profile and XP-grant operations used by the
//!   transport layer (the `/me` and `/xp/add` endpoints).
//! - Delegate arithmetic to the pure calculator and persistence to the
//!   account repository.
//!
//! # Invariants
//! - First observation of a subject creates the `xp=0, level=1` account.
//! - Invalid amounts are rejected before any persistence happens.
//! - Service APIs never bypass repository validation contracts.

use crate::progression::xp::{apply_xp, XpError};
use crate::repo::account_repo::AccountRepository;
use crate::repo::RepoError;
use crate::Account;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Request model for granting XP (`{"amount": n}` on the wire).
///
/// Non-numeric amounts fail deserialization at the boundary; non-positive
/// ones are rejected by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGrantRequest {
    pub amount: i64,
}

/// Service error for progression use-cases.
#[derive(Debug)]
pub enum ProgressServiceError {
    /// Amount failed calculator validation; surfaced as a client rejection.
    Xp(XpError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProgressServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xp(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProgressServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xp(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<XpError> for ProgressServiceError {
    fn from(value: XpError) -> Self {
        Self::Xp(value)
    }
}

impl From<RepoError> for ProgressServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service wrapper for account progression.
pub struct ProgressService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> ProgressService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the caller's progression snapshot, creating the initial
    /// account on first observation of the subject.
    pub fn profile(&self, subject_id: &str) -> Result<Account, ProgressServiceError> {
        Ok(self.repo.get_or_create_account(subject_id)?)
    }

    /// Grants a positive XP amount to the caller's account.
    ///
    /// # Contract
    /// - `amount <= 0` fails with `Xp(InvalidAmount)` and writes nothing.
    /// - Level is derived from the new total, never adjusted independently.
    pub fn grant(
        &self,
        subject_id: &str,
        request: &XpGrantRequest,
    ) -> Result<Account, ProgressServiceError> {
        self.grant_xp(subject_id, request.amount)
    }

    /// [`Self::grant`] with a bare amount, for callers inside core.
    pub fn grant_xp(&self, subject_id: &str, amount: i64) -> Result<Account, ProgressServiceError> {
        let mut account = self.repo.get_or_create_account(subject_id)?;
        let grant = apply_xp(account.xp, amount)?;
        account.apply_grant(&grant);

        let saved = self.repo.save_account(&account)?;
        // Metadata only; subject ids stay out of logs.
        info!(
            "event=xp_grant module=service status=ok amount={amount} xp={} level={}",
            saved.xp, saved.level
        );
        Ok(saved)
    }
}
