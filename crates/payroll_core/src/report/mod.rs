//! Read-only payroll reporting.
//!
//! # Responsibility
//! - Expose aggregation queries joining employees with pay statements.
//! - Keep report row shaping inside core.

pub mod payroll;
