//! Core data-access and reporting engine for the employee payroll store.
//! This crate is the single source of truth for record and report invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod service;

pub use config::{ConfigError, NameMatch, StoreConfig};
pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError};
pub use model::money::{Money, MoneyError, MAX_CENTS};
pub use model::pay_statement::{PayStatement, PayStatementId};
pub use model::period::{MonthPeriod, PeriodError};
pub use model::report::{CombinedPay, DivisionPayTotal, JobTitlePayTotal};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::error::{ErrorKind, Lookup, RepoError, RepoResult};
pub use repo::pay_statement_repo::{PayStatementRepository, SqlitePayStatementRepository};
pub use repo::salary_adjuster::SalaryRangeAdjuster;
pub use report::payroll::PayrollReporter;
pub use service::employee_service::{EmployeeChanges, EmployeeService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
