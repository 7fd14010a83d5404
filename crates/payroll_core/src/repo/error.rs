//! Repository error taxonomy.
//!
//! # Responsibility
//! - Give every repository/reporter failure one typed result.
//! - Classify SQLite failures into constraint vs. availability problems.
//!
//! # Invariants
//! - `InvalidArgument` and `Validation` are only produced before any store
//!   interaction.
//! - Error messages never include SSN values.

use crate::db::DbError;
use crate::model::employee::{EmployeeId, EmployeeValidationError};
use crate::model::period::PeriodError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// What a failed required lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    EmployeeId(EmployeeId),
    EmployeeSsn,
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeId(id) => write!(f, "employee id {id}"),
            Self::EmployeeSsn => write!(f, "employee with given ssn"),
        }
    }
}

/// Coarse classification consumers map to messages or status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    Validation,
    ConstraintViolation,
    StoreUnavailable,
    Internal,
}

/// Error type for payroll repository, adjuster and reporter operations.
#[derive(Debug)]
pub enum RepoError {
    /// A required row does not exist.
    NotFound(Lookup),
    /// Caller-supplied argument violates a precondition.
    InvalidArgument(String),
    /// Record failed model validation before being written.
    Validation(EmployeeValidationError),
    /// Store rejected a write (unique, not-null, check or foreign key).
    ConstraintViolation(rusqlite::Error),
    /// Store could not be reached or is locked/busy.
    StoreUnavailable(DbError),
    /// Any other storage failure.
    Db(DbError),
    /// A persisted row could not be decoded.
    InvalidData(String),
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            Self::Db(_) | Self::InvalidData(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code for log lines.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Validation => "validation_failed",
            ErrorKind::ConstraintViolation => "constraint_violation",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::Internal => "db_error",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(lookup) => write!(f, "not found: {lookup}"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ConstraintViolation(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidArgument(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PeriodError> for RepoError {
    fn from(value: PeriodError) -> Self {
        Self::InvalidArgument(value.to_string())
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Sqlite(err) => Self::from(err),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Self::ConstraintViolation(value),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::SystemIoFailure
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied,
            ) => Self::StoreUnavailable(DbError::Sqlite(value)),
            _ => Self::Db(DbError::Sqlite(value)),
        }
    }
}
