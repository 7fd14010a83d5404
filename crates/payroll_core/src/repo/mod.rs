//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every operation acquires its own connection from `Store` and releases
//!   it before returning, on success and on error.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidArgument`,
//!   `ConstraintViolation`) in addition to DB transport errors.

pub mod employee_repo;
pub mod error;
pub mod pay_statement_repo;
pub mod salary_adjuster;
