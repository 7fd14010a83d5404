//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/lookup/search/update APIs over `employee`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each call opens its own connection and runs one statement on it.
//! - Lookups report absence as `Ok(None)`; searches report it as an empty list.
//! - `update_employee` reports a missing row as `Ok(false)`, never an error.
//! - Writes do not re-validate the record; callers validate first.

use crate::config::NameMatch;
use crate::db::Store;
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::error::{RepoError, RepoResult};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    address,
    ssn,
    job_title,
    division,
    salary,
    is_full_time
FROM employee";

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// Inserts a new row and returns the store-assigned id.
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn find_by_ssn(&self, ssn: &str) -> RepoResult<Option<Employee>>;
    /// Employees whose first or last name contains `fragment`.
    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>>;
    /// Every employee ordered by last name, then first name.
    fn list_all(&self) -> RepoResult<Vec<Employee>>;
    /// Overwrites every mutable column; `false` when no row has the id.
    fn update_employee(&self, employee: &Employee) -> RepoResult<bool>;
}

/// SQLite-backed employee repository.
#[derive(Debug, Clone)]
pub struct SqliteEmployeeRepository {
    store: Store,
}

impl SqliteEmployeeRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository {
    fn create_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        let conn = self.store.connect()?;

        let inserted = conn.execute(
            "INSERT INTO employee (
                first_name,
                last_name,
                address,
                ssn,
                job_title,
                division,
                salary,
                is_full_time
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.address.as_deref(),
                employee.ssn.as_str(),
                employee.job_title.as_str(),
                employee.division.as_str(),
                employee.salary,
                employee.is_full_time,
            ],
        );

        if let Err(err) = inserted {
            let err = RepoError::from(err);
            warn!(
                "event=employee_create module=repo status=error error_code={}",
                err.code()
            );
            return Err(err);
        }

        let id = conn.last_insert_rowid();
        debug!("event=employee_create module=repo status=ok employee_id={id}");
        Ok(id)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let conn = self.store.connect()?;
        query_one(
            &conn,
            &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
            params![id],
        )
    }

    fn find_by_ssn(&self, ssn: &str) -> RepoResult<Option<Employee>> {
        let conn = self.store.connect()?;
        query_one(
            &conn,
            &format!("{EMPLOYEE_SELECT_SQL} WHERE ssn = ?1;"),
            params![ssn],
        )
    }

    fn find_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Employee>> {
        let conn = self.store.connect()?;
        let (predicate, pattern) = match self.store.config().name_match {
            NameMatch::CaseInsensitive => (
                "first_name LIKE ?1 ESCAPE '\\' OR last_name LIKE ?1 ESCAPE '\\'",
                format!("%{}%", escape_like(fragment)),
            ),
            NameMatch::CaseSensitive => (
                "instr(first_name, ?1) > 0 OR instr(last_name, ?1) > 0",
                fragment.to_string(),
            ),
        };

        let mut stmt = conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE {predicate}
             ORDER BY last_name ASC, first_name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![pattern])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn list_all(&self) -> RepoResult<Vec<Employee>> {
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL} ORDER BY last_name ASC, first_name ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<bool> {
        let Some(id) = employee.id else {
            debug!("event=employee_update module=repo status=skipped reason=unsaved");
            return Ok(false);
        };

        let conn = self.store.connect()?;
        let changed = conn.execute(
            "UPDATE employee
             SET
                first_name = ?1,
                last_name = ?2,
                address = ?3,
                ssn = ?4,
                job_title = ?5,
                division = ?6,
                salary = ?7,
                is_full_time = ?8
             WHERE id = ?9;",
            params![
                employee.first_name.as_str(),
                employee.last_name.as_str(),
                employee.address.as_deref(),
                employee.ssn.as_str(),
                employee.job_title.as_str(),
                employee.division.as_str(),
                employee.salary,
                employee.is_full_time,
                id,
            ],
        )?;

        debug!("event=employee_update module=repo status=ok employee_id={id} changed={changed}");
        Ok(changed > 0)
    }
}

fn query_one(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> RepoResult<Option<Employee>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_employee_row(row)?)),
        None => Ok(None),
    }
}

/// Decodes one `EMPLOYEE_SELECT_SQL` row.
fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    Ok(Employee {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        ssn: row.get("ssn")?,
        job_title: row.get("job_title")?,
        division: row.get("division")?,
        address: row.get("address")?,
        salary: row.get("salary")?,
        is_full_time: parse_flag(row.get("is_full_time")?, "employee.is_full_time")?,
    })
}

fn parse_flag(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
