//! Payroll domain model.
//!
//! # Responsibility
//! - Define the records stored in `employee` and `pay_statement`.
//! - Define the read-only report projections derived from them.
//!
//! # Invariants
//! - Monetary values are exact cents (`Money`), never floating point.
//! - Report rows are projections only; nothing writes them back.

pub mod employee;
pub mod money;
pub mod pay_statement;
pub mod period;
pub mod report;
