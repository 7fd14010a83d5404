//! Pay statement repository contracts and SQLite implementation.
//!
//! # Invariants
//! - A statement for an unknown employee is rejected by the foreign key and
//!   surfaces as `ConstraintViolation`.
//! - Amounts are stored exactly as given; net pay is not recomputed.

use crate::db::Store;
use crate::model::employee::EmployeeId;
use crate::model::pay_statement::{PayStatement, PayStatementId};
use crate::repo::error::RepoResult;
use log::debug;
use rusqlite::{params, Row};

/// Repository interface for pay statements.
pub trait PayStatementRepository {
    fn create_pay_statement(&self, statement: &PayStatement) -> RepoResult<PayStatementId>;
    /// Statements for one employee, newest pay date first.
    fn list_pay_statements(&self, employee_id: EmployeeId) -> RepoResult<Vec<PayStatement>>;
}

/// SQLite-backed pay statement repository.
#[derive(Debug, Clone)]
pub struct SqlitePayStatementRepository {
    store: Store,
}

impl SqlitePayStatementRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl PayStatementRepository for SqlitePayStatementRepository {
    fn create_pay_statement(&self, statement: &PayStatement) -> RepoResult<PayStatementId> {
        let conn = self.store.connect()?;
        conn.execute(
            "INSERT INTO pay_statement (
                employee_id,
                pay_date,
                gross_pay,
                deductions,
                net_pay,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                statement.employee_id,
                statement.pay_date,
                statement.gross_pay,
                statement.deductions,
                statement.net_pay,
                statement.notes.as_deref(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(
            "event=pay_statement_create module=repo status=ok employee_id={} pay_statement_id={id}",
            statement.employee_id
        );
        Ok(id)
    }

    fn list_pay_statements(&self, employee_id: EmployeeId) -> RepoResult<Vec<PayStatement>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(
            "SELECT
                id,
                employee_id,
                pay_date,
                gross_pay,
                deductions,
                net_pay,
                notes
             FROM pay_statement
             WHERE employee_id = ?1
             ORDER BY pay_date DESC, id DESC;",
        )?;
        let mut rows = stmt.query([employee_id])?;
        let mut statements = Vec::new();
        while let Some(row) = rows.next()? {
            statements.push(parse_pay_statement_row(row)?);
        }
        Ok(statements)
    }
}

fn parse_pay_statement_row(row: &Row<'_>) -> RepoResult<PayStatement> {
    Ok(PayStatement {
        id: Some(row.get("id")?),
        employee_id: row.get("employee_id")?,
        pay_date: row.get("pay_date")?,
        gross_pay: row.get("gross_pay")?,
        deductions: row.get("deductions")?,
        net_pay: row.get("net_pay")?,
        notes: row.get("notes")?,
    })
}
