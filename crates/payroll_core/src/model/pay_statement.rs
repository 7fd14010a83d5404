//! Pay statement domain model.
//!
//! # Invariants
//! - Every statement belongs to exactly one existing employee; the store's
//!   foreign key enforces this.
//! - `net_pay` is stored as given. It is not checked against
//!   `gross_pay - deductions`.

use crate::model::employee::EmployeeId;
use crate::model::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned pay statement identifier.
pub type PayStatementId = i64;

/// One pay period's statement for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayStatement {
    #[serde(default)]
    pub id: Option<PayStatementId>,
    pub employee_id: EmployeeId,
    pub pay_date: NaiveDate,
    pub gross_pay: Money,
    #[serde(default)]
    pub deductions: Money,
    pub net_pay: Money,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PayStatement {
    /// Creates an unsaved statement; `net_pay` is taken verbatim.
    pub fn new(
        employee_id: EmployeeId,
        pay_date: NaiveDate,
        gross_pay: Money,
        deductions: Money,
        net_pay: Money,
    ) -> Self {
        Self {
            id: None,
            employee_id,
            pay_date,
            gross_pay,
            deductions,
            net_pay,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
