//! Money amounts backed by `rust_decimal`.
//!
//! # Responsibility
//! - Hold `DECIMAL(12,2)` amounts as a two-place `Decimal`.
//! - Convert to and from integer cents at the storage edge.
//!
//! # Invariants
//! - Every `Money` carries exactly two fraction digits; inputs with more are
//!   rounded half away from zero.
//! - `Money::new` rejects amounts beyond ±9999999999.99. The cent-based
//!   constructors do not check; the schema `CHECK` rejects such rows.

use rust_decimal::{Decimal, RoundingStrategy};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;

/// Largest storable magnitude in cents, matching `DECIMAL(12,2)`.
pub const MAX_CENTS: i64 = 999_999_999_999;

/// Exact monetary amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl Money {
    pub const ZERO: Money = Money(Decimal::from_parts(0, 0, 0, false, DECIMAL_PLACES));

    /// Rounds `amount` to cents and checks the storable range.
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        let mut rounded =
            amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMAL_PLACES);
        if rounded.abs() > Decimal::new(MAX_CENTS, DECIMAL_PLACES) {
            return Err(MoneyError::OutOfRange(amount));
        }
        Ok(Self(rounded))
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, DECIMAL_PLACES))
    }

    /// Whole currency units, e.g. `Money::from_units(58_000)` is 58000.00.
    pub fn from_units(units: i64) -> Self {
        let mut amount = Decimal::from(units);
        amount.rescale(DECIMAL_PLACES);
        Self(amount)
    }

    pub fn amount(self) -> Decimal {
        self.0
    }

    /// Integer cents, or `None` when the amount does not fit `i64`.
    pub fn cents(self) -> Option<i64> {
        i64::try_from(self.0.mantissa()).ok()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(value.trim()).map_err(MoneyError::Parse)?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

/// Money conversion failure.
#[derive(Debug, Clone)]
pub enum MoneyError {
    Parse(rust_decimal::Error),
    OutOfRange(Decimal),
}

impl Display for MoneyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid amount: {err}"),
            Self::OutOfRange(value) => {
                write!(f, "amount {value} is outside ±9999999999.99")
            }
        }
    }
}

impl Error for MoneyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange(_) => None,
        }
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let cents = self.cents().ok_or_else(|| {
            rusqlite::Error::ToSqlConversionFailure(Box::new(MoneyError::OutOfRange(self.0)))
        })?;
        Ok(ToSqlOutput::from(cents))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Money::from_cents)
    }
}
