//! Employee domain model.
//!
//! # Responsibility
//! - Define the canonical employee record stored in `employee`.
//! - Provide caller-side validation used before create/update.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on create, and never changes
//!   afterwards.
//! - `ssn` is globally unique; uniqueness is enforced by the store, not here.
//! - `is_full_time` defaults to `true`.
//!
//! # See also
//! - crates/payroll_core/src/db/schema/0001_init.sql

use crate::model::money::Money;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SSN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}$").expect("valid ssn regex"));

/// Store-assigned employee identifier.
pub type EmployeeId = i64;

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Assigned by the store on create.
    #[serde(default)]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    /// Nine ASCII digits, no separators.
    pub ssn: String,
    pub job_title: String,
    pub division: String,
    #[serde(default)]
    pub address: Option<String>,
    pub salary: Money,
    #[serde(default = "default_full_time")]
    pub is_full_time: bool,
}

fn default_full_time() -> bool {
    true
}

impl Employee {
    /// Creates an unsaved full-time employee with no address.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        ssn: impl Into<String>,
        job_title: impl Into<String>,
        division: impl Into<String>,
        salary: Money,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ssn: ssn.into(),
            job_title: job_title.into(),
            division: division.into(),
            address: None,
            salary,
            is_full_time: default_full_time(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn part_time(mut self) -> Self {
        self.is_full_time = false;
        self
    }

    /// Display name in `First Last` order.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Validates caller-side invariants.
    ///
    /// The repository does not call this; services and front-ends do, so
    /// that a store write is never the first place bad input is noticed.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankField("first_name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(EmployeeValidationError::BlankField("last_name"));
        }
        if self.job_title.trim().is_empty() {
            return Err(EmployeeValidationError::BlankField("job_title"));
        }
        if self.division.trim().is_empty() {
            return Err(EmployeeValidationError::BlankField("division"));
        }
        if !is_valid_ssn(&self.ssn) {
            return Err(EmployeeValidationError::InvalidSsn);
        }
        if self.salary.is_negative() {
            return Err(EmployeeValidationError::NegativeSalary(self.salary));
        }
        Ok(())
    }
}

/// Returns whether `ssn` is exactly nine ASCII digits.
pub fn is_valid_ssn(ssn: &str) -> bool {
    SSN_RE.is_match(ssn)
}

/// Employee validation failures.
///
/// Messages never echo the SSN value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    BlankField(&'static str),
    InvalidSsn,
    NegativeSalary(Money),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "{field} must not be blank"),
            Self::InvalidSsn => write!(f, "ssn must be exactly 9 digits"),
            Self::NegativeSalary(salary) => write!(f, "salary must not be negative, got {salary}"),
        }
    }
}

impl Error for EmployeeValidationError {}
