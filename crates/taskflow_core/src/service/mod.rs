//! Use-case services over repository traits.
//!
//! # Responsibility
//! - Validate input and enforce cross-record rules (ownership, uniqueness).
//! - Stamp identifiers and timestamps.
//! - Delegate persistence to repositories.
//!
//! # Invariants
//! - Services never bypass repository contracts.
//! - Every failure maps to one [`ServiceError`] variant.

pub mod auth_service;
pub mod project_service;
pub mod seed;
pub mod task_service;

use crate::repo::RepoError;
use crate::store::auth_state::SESSION_EXPIRED_MESSAGE;
use crate::validation::{format_validation_errors, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Service-layer error.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    #[error(transparent)]
    Repo(RepoError),
}

impl ServiceError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

/// Returns `Err(Validation)` when `errors` is non-empty.
pub(crate) fn ensure_valid(errors: Vec<ValidationError>) -> ServiceResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}
