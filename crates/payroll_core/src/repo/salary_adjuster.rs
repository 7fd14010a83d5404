//! Bulk salary raise over a half-open salary interval.
//!
//! # Responsibility
//! - Apply one percentage raise to every employee in `[min, max)`.
//!
//! # Invariants
//! - The percentage is checked before a connection is opened; a rejected
//!   call touches no row.
//! - The raise is one `UPDATE` statement, so the qualifying set is updated
//!   atomically by SQLite without an explicit transaction.
//! - The new salary is computed in integer cents and rounded half away from
//!   zero; no binary floating point is involved.
//! - A result beyond the salary `CHECK` fails the whole statement with
//!   `ConstraintViolation`.

use crate::db::Store;
use crate::model::money::Money;
use crate::repo::error::{RepoError, RepoResult};
use log::{info, warn};
use rust_decimal::Decimal;
use rusqlite::params;
use std::time::Instant;

/// Fraction digits accepted in a raise percentage.
const PERCENT_SCALE: u32 = 2;
/// 100% expressed in hundredths of a percent.
const RAISE_DENOMINATOR: i64 = 10_000;
/// Upper bound on a single raise; keeps `salary * factor` inside `i64`.
const MAX_RAISE_PERCENT: i64 = 1_000;

/// Applies range-scoped percentage raises.
#[derive(Debug, Clone)]
pub struct SalaryRangeAdjuster {
    store: Store,
}

impl SalaryRangeAdjuster {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Multiplies every salary in `[min_inclusive, max_exclusive)` by
    /// `1 + percent / 100` and returns the number of rows changed.
    ///
    /// # Errors
    /// - `InvalidArgument` when `percent` is not in `(0, 1000]` or has more
    ///   than two decimal places. Raised before any store interaction.
    /// - `ConstraintViolation` when a raised salary would leave the storable
    ///   range; no row is changed.
    pub fn adjust_salary_by_range(
        &self,
        percent: Decimal,
        min_inclusive: Money,
        max_exclusive: Money,
    ) -> RepoResult<usize> {
        let factor = raise_factor(percent)?;

        let started_at = Instant::now();
        let conn = self.store.connect()?;
        let changed = conn
            .execute(
                "UPDATE employee
                 SET salary = CASE
                    WHEN salary >= 0 THEN (salary * ?1 + ?4 / 2) / ?4
                    ELSE -((-salary * ?1 + ?4 / 2) / ?4)
                 END
                 WHERE salary >= ?2
                   AND salary < ?3;",
                params![factor, min_inclusive, max_exclusive, RAISE_DENOMINATOR],
            )
            .map_err(|err| {
                let err = RepoError::from(err);
                warn!(
                    "event=salary_range_adjust module=repo status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                err
            })?;

        info!(
            "event=salary_range_adjust module=repo status=ok duration_ms={} affected={}",
            started_at.elapsed().as_millis(),
            changed
        );
        Ok(changed)
    }
}

/// Multiplier over `RAISE_DENOMINATOR`, e.g. 3.2% becomes 10_320.
fn raise_factor(percent: Decimal) -> RepoResult<i64> {
    if percent <= Decimal::ZERO {
        return Err(RepoError::InvalidArgument(format!(
            "percentage must be positive, got {percent}"
        )));
    }
    if percent > Decimal::from(MAX_RAISE_PERCENT) {
        return Err(RepoError::InvalidArgument(format!(
            "percentage must be at most {MAX_RAISE_PERCENT}, got {percent}"
        )));
    }

    let mut scaled = percent.normalize();
    if scaled.scale() > PERCENT_SCALE {
        return Err(RepoError::InvalidArgument(format!(
            "percentage allows at most {PERCENT_SCALE} decimal places, got {percent}"
        )));
    }
    scaled.rescale(PERCENT_SCALE);
    let hundredths = i64::try_from(scaled.mantissa()).map_err(|_| {
        RepoError::InvalidArgument(format!("percentage out of range, got {percent}"))
    })?;
    Ok(RAISE_DENOMINATOR + hundredths)
}
