//! Derived payroll report rows. Never persisted.

use crate::model::employee::EmployeeId;
use crate::model::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee joined with one of that employee's pay statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedPay {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub job_title: String,
    pub division: String,
    pub salary: Money,
    pub pay_date: NaiveDate,
    pub gross_pay: Money,
    pub deductions: Money,
    pub net_pay: Money,
    pub notes: Option<String>,
}

/// Monthly gross/net totals for one job title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitlePayTotal {
    pub job_title: String,
    pub total_gross: Money,
    pub total_net: Money,
}

/// Monthly gross/net totals for one division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionPayTotal {
    pub division: String,
    pub total_gross: Money,
    pub total_net: Money,
}
