//! Payroll aggregation queries.
//!
//! # Responsibility
//! - Join `employee` with `pay_statement` into report rows.
//! - Sum gross/net pay per job title or division for one calendar month.
//!
//! # Invariants
//! - Read-only; every query is one statement on its own connection.
//! - Inner join semantics: employees without statements produce no rows.
//! - Month filtering is half-open on `pay_date`: `[first day, next first day)`.
//! - Empty results are `Ok(vec![])`, never an error.

use crate::db::Store;
use crate::model::money::Money;
use crate::model::period::MonthPeriod;
use crate::model::report::{CombinedPay, DivisionPayTotal, JobTitlePayTotal};
use crate::repo::error::RepoResult;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::time::Instant;

/// Column a monthly total is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupKey {
    JobTitle,
    Division,
}

impl GroupKey {
    fn column(self) -> &'static str {
        match self {
            Self::JobTitle => "e.job_title",
            Self::Division => "e.division",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Self::JobTitle => "report_total_by_job_title",
            Self::Division => "report_total_by_division",
        }
    }
}

/// One grouped row before it is shaped into a typed total.
struct GroupTotal {
    key: String,
    total_gross: Money,
    total_net: Money,
}

/// Read-only payroll reports.
#[derive(Debug, Clone)]
pub struct PayrollReporter {
    store: Store,
}

impl PayrollReporter {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Every full-time employee's pay statements.
    ///
    /// Ordered by last name ascending, then pay date descending within each
    /// employee.
    pub fn full_time_employee_pay_history(&self) -> RepoResult<Vec<CombinedPay>> {
        let started_at = Instant::now();
        let conn = self.store.connect()?;
        let mut stmt = conn.prepare(
            "SELECT
                e.id AS employee_id,
                e.first_name AS first_name,
                e.last_name AS last_name,
                e.ssn AS ssn,
                e.job_title AS job_title,
                e.division AS division,
                e.salary AS salary,
                p.pay_date AS pay_date,
                p.gross_pay AS gross_pay,
                p.deductions AS deductions,
                p.net_pay AS net_pay,
                p.notes AS notes
             FROM employee e
             INNER JOIN pay_statement p ON p.employee_id = e.id
             WHERE e.is_full_time = 1
             ORDER BY e.last_name ASC, e.first_name ASC, e.id ASC, p.pay_date DESC, p.id DESC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut history = Vec::new();
        while let Some(row) = rows.next()? {
            history.push(parse_combined_pay_row(row)?);
        }

        debug!(
            "event=report_full_time_history module=report status=ok duration_ms={} rows={}",
            started_at.elapsed().as_millis(),
            history.len()
        );
        Ok(history)
    }

    /// Gross and net pay per job title for statements dated in the month.
    ///
    /// Ordered by summed gross pay descending.
    ///
    /// # Errors
    /// - `InvalidArgument` when `month` is outside 1..=12.
    pub fn total_pay_by_job_title(
        &self,
        year: i32,
        month: u32,
    ) -> RepoResult<Vec<JobTitlePayTotal>> {
        let period = MonthPeriod::new(year, month)?;
        let totals = self.grouped_totals(GroupKey::JobTitle, period)?;
        Ok(totals
            .into_iter()
            .map(|total| JobTitlePayTotal {
                job_title: total.key,
                total_gross: total.total_gross,
                total_net: total.total_net,
            })
            .collect())
    }

    /// Gross and net pay per division for statements dated in the month.
    ///
    /// Ordered by summed gross pay descending.
    ///
    /// # Errors
    /// - `InvalidArgument` when `month` is outside 1..=12.
    pub fn total_pay_by_division(
        &self,
        year: i32,
        month: u32,
    ) -> RepoResult<Vec<DivisionPayTotal>> {
        let period = MonthPeriod::new(year, month)?;
        let totals = self.grouped_totals(GroupKey::Division, period)?;
        Ok(totals
            .into_iter()
            .map(|total| DivisionPayTotal {
                division: total.key,
                total_gross: total.total_gross,
                total_net: total.total_net,
            })
            .collect())
    }

    fn grouped_totals(&self, key: GroupKey, period: MonthPeriod) -> RepoResult<Vec<GroupTotal>> {
        let started_at = Instant::now();
        let conn = self.store.connect()?;
        let totals = query_grouped_totals(&conn, key, period)?;
        debug!(
            "event={} module=report status=ok period={} duration_ms={} rows={}",
            key.event(),
            period,
            started_at.elapsed().as_millis(),
            totals.len()
        );
        Ok(totals)
    }
}

fn query_grouped_totals(
    conn: &Connection,
    key: GroupKey,
    period: MonthPeriod,
) -> RepoResult<Vec<GroupTotal>> {
    let column = key.column();
    let (start, end) = period.bounds();
    let mut stmt = conn.prepare(&format!(
        "SELECT
            {column} AS group_key,
            SUM(p.gross_pay) AS total_gross,
            SUM(p.net_pay) AS total_net
         FROM employee e
         INNER JOIN pay_statement p ON p.employee_id = e.id
         WHERE p.pay_date >= ?1
           AND p.pay_date < ?2
         GROUP BY {column}
         ORDER BY total_gross DESC, group_key ASC;"
    ))?;

    let mut rows = stmt.query(params![start, end])?;
    let mut totals = Vec::new();
    while let Some(row) = rows.next()? {
        totals.push(GroupTotal {
            key: row.get("group_key")?,
            total_gross: row.get("total_gross")?,
            total_net: row.get("total_net")?,
        });
    }
    Ok(totals)
}

fn parse_combined_pay_row(row: &Row<'_>) -> RepoResult<CombinedPay> {
    Ok(CombinedPay {
        employee_id: row.get("employee_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        ssn: row.get("ssn")?,
        job_title: row.get("job_title")?,
        division: row.get("division")?,
        salary: row.get("salary")?,
        pay_date: row.get("pay_date")?,
        gross_pay: row.get("gross_pay")?,
        deductions: row.get("deductions")?,
        net_pay: row.get("net_pay")?,
        notes: row.get("notes")?,
    })
}
