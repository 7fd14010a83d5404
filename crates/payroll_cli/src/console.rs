//! Line-oriented payroll console.
//!
//! # Responsibility
//! - Drive employee maintenance, salary raises and reports from a menu.
//! - Parse operator input into typed core calls.
//!
//! # Invariants
//! - Input or store failures print one `Error:` line and return to the menu.
//! - End of input ends the session cleanly.
//! - Only write failures on the output stream abort the loop.

use payroll_core::{
    CombinedPay, DivisionPayTotal, Employee, EmployeeChanges, EmployeeId, EmployeeService,
    JobTitlePayTotal, Money, PayrollReporter, RepoError, SalaryRangeAdjuster,
    SqliteEmployeeRepository, Store,
};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

/// Console loop failure.
#[derive(Debug)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    Io(io::Error),
    /// Input stream closed while a value was expected.
    EndOfInput,
    /// Operator typed something that does not parse.
    Input(String),
    /// Core call failed.
    Repo(RepoError),
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::EndOfInput => write!(f, "input closed"),
            Self::Input(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::EndOfInput | Self::Input(_) => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ConsoleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

type ConsoleResult<T> = Result<T, ConsoleError>;

/// Interactive menu over any line reader and writer.
pub struct Console<R, W> {
    employees: EmployeeService<SqliteEmployeeRepository>,
    adjuster: SalaryRangeAdjuster,
    reporter: PayrollReporter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self {
            employees: EmployeeService::new(SqliteEmployeeRepository::new(store.clone())),
            adjuster: SalaryRangeAdjuster::new(store.clone()),
            reporter: PayrollReporter::new(store),
            input,
            output,
        }
    }

    /// Runs until the operator exits or input ends.
    pub fn run(&mut self) -> ConsoleResult<()> {
        writeln!(self.output, "Employee payroll console")?;
        loop {
            self.print_menu()?;
            let choice = match self.prompt("Select: ") {
                Ok(choice) => choice,
                Err(ConsoleError::EndOfInput) => break,
                Err(err) => return Err(err),
            };

            let outcome = match choice.as_str() {
                "1" => self.insert_employee(),
                "2" => self.search_employees(),
                "3" => self.update_employee(),
                "4" => self.adjust_salary_range(),
                "5" => self.show_reports(),
                "0" | "q" | "exit" => break,
                _ => {
                    writeln!(self.output, "Unknown option")?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(ConsoleError::EndOfInput) => break,
                Err(ConsoleError::Io(err)) => return Err(ConsoleError::Io(err)),
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
        writeln!(self.output, "Exiting.")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> ConsoleResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "1) Insert new employee")?;
        writeln!(self.output, "2) Search employee by ID / SSN / name")?;
        writeln!(self.output, "3) Update employee (by ID)")?;
        writeln!(self.output, "4) Update salary by range")?;
        writeln!(self.output, "5) Reports")?;
        writeln!(self.output, "0) Exit")?;
        Ok(())
    }

    fn insert_employee(&mut self) -> ConsoleResult<()> {
        let first_name = self.prompt("First name: ")?;
        let last_name = self.prompt("Last name: ")?;
        let ssn = self.prompt("SSN (9 digits, no dashes): ")?;
        let job_title = self.prompt("Job title: ")?;
        let division = self.prompt("Division: ")?;
        let salary = parse_money("salary", &self.prompt("Salary: ")?)?;
        let address = non_blank(self.prompt("Address (enter to skip): ")?);
        let full_time = parse_yes_no(&self.prompt("Full-time? [Y/n]: ")?)?.unwrap_or(true);

        let mut employee = Employee::new(first_name, last_name, ssn, job_title, division, salary);
        employee.address = address;
        employee.is_full_time = full_time;

        self.employees.create_employee(&mut employee)?;
        writeln!(self.output, "Inserted: {}", format_employee(&employee))?;
        Ok(())
    }

    fn search_employees(&mut self) -> ConsoleResult<()> {
        let mode = self.prompt("Search by (1) ID (2) SSN (3) Name fragment: ")?;
        match mode.as_str() {
            "1" => {
                let id = parse_id(&self.prompt("ID: ")?)?;
                let found = self.employees.find_employee(id)?;
                self.print_optional_employee(found.as_ref())
            }
            "2" => {
                let ssn = self.prompt("SSN: ")?;
                let found = self.employees.find_employee_by_ssn(&ssn)?;
                self.print_optional_employee(found.as_ref())
            }
            "3" => {
                let fragment = self.prompt("Name fragment: ")?;
                let matches = self.employees.search_by_name(&fragment)?;
                let lines = matches.iter().map(format_employee).collect::<Vec<_>>();
                self.print_lines(&lines)
            }
            _ => {
                writeln!(self.output, "Unknown search mode")?;
                Ok(())
            }
        }
    }

    fn update_employee(&mut self) -> ConsoleResult<()> {
        let id = parse_id(&self.prompt("Employee ID to update: ")?)?;
        let Some(current) = self.employees.find_employee(id)? else {
            writeln!(self.output, "Employee not found")?;
            return Ok(());
        };
        writeln!(self.output, "Current: {}", format_employee(&current))?;

        let changes = EmployeeChanges {
            first_name: non_blank(self.prompt("New first name (enter to keep): ")?),
            last_name: non_blank(self.prompt("New last name (enter to keep): ")?),
            ssn: non_blank(self.prompt("New SSN (enter to keep): ")?),
            job_title: non_blank(self.prompt("New job title (enter to keep): ")?),
            division: non_blank(self.prompt("New division (enter to keep): ")?),
            address: non_blank(self.prompt("New address (enter to keep): ")?),
            salary: non_blank(self.prompt("New salary (enter to keep): ")?)
                .map(|value| parse_money("salary", &value))
                .transpose()?,
            is_full_time: parse_yes_no(&self.prompt("Full-time? [y/n, enter to keep]: ")?)?,
        };

        if changes.is_empty() {
            writeln!(self.output, "No changes")?;
            return Ok(());
        }

        let updated = self.employees.merge_update(id, &changes)?;
        writeln!(self.output, "Updated: {}", format_employee(&updated))?;
        Ok(())
    }

    fn adjust_salary_range(&mut self) -> ConsoleResult<()> {
        let percent = parse_percent(&self.prompt("Increase percentage (e.g. 3.2): ")?)?;
        let min = parse_money("minimum salary", &self.prompt("Min salary (inclusive): ")?)?;
        let max = parse_money("maximum salary", &self.prompt("Max salary (exclusive): ")?)?;

        let changed = self.adjuster.adjust_salary_by_range(percent, min, max)?;
        writeln!(self.output, "Rows updated: {changed}")?;
        Ok(())
    }

    fn show_reports(&mut self) -> ConsoleResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Reports:")?;
        writeln!(self.output, "1) Full-time employees with pay history")?;
        writeln!(self.output, "2) Total pay for month by job title")?;
        writeln!(self.output, "3) Total pay for month by division")?;
        let choice = self.prompt("Select report: ")?;

        let lines = match choice.as_str() {
            "1" => self
                .reporter
                .full_time_employee_pay_history()?
                .iter()
                .map(format_combined_pay)
                .collect::<Vec<_>>(),
            "2" => {
                let (year, month) = self.prompt_month()?;
                self.reporter
                    .total_pay_by_job_title(year, month)?
                    .iter()
                    .map(format_job_title_total)
                    .collect()
            }
            "3" => {
                let (year, month) = self.prompt_month()?;
                self.reporter
                    .total_pay_by_division(year, month)?
                    .iter()
                    .map(format_division_total)
                    .collect()
            }
            _ => {
                writeln!(self.output, "Unknown report")?;
                return Ok(());
            }
        };
        self.print_lines(&lines)
    }

    fn prompt_month(&mut self) -> ConsoleResult<(i32, u32)> {
        let year = parse_number::<i32>("year", &self.prompt("Year (e.g. 2025): ")?)?;
        let month = parse_number::<u32>("month", &self.prompt("Month (1-12): ")?)?;
        Ok((year, month))
    }

    fn print_optional_employee(&mut self, employee: Option<&Employee>) -> ConsoleResult<()> {
        match employee {
            Some(employee) => writeln!(self.output, "{}", format_employee(employee))?,
            None => writeln!(self.output, "Not found")?,
        }
        Ok(())
    }

    fn print_lines(&mut self, lines: &[String]) -> ConsoleResult<()> {
        if lines.is_empty() {
            writeln!(self.output, "No results")?;
        }
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    /// Writes `label`, then reads one trimmed line.
    fn prompt(&mut self, label: &str) -> ConsoleResult<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_id(value: &str) -> ConsoleResult<EmployeeId> {
    parse_number("employee id", value)
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> ConsoleResult<T> {
    value
        .parse::<T>()
        .map_err(|_| ConsoleError::Input(format!("{field} must be a whole number, got `{value}`")))
}

fn parse_money(field: &str, value: &str) -> ConsoleResult<Money> {
    value
        .parse::<Money>()
        .map_err(|err| ConsoleError::Input(format!("{field}: {err}")))
}

fn parse_percent(value: &str) -> ConsoleResult<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|_| ConsoleError::Input(format!("percentage must be a number, got `{value}`")))
}

/// Blank is `None`; otherwise y/yes/n/no, case-insensitive.
fn parse_yes_no(value: &str) -> ConsoleResult<Option<bool>> {
    match value.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "y" | "yes" => Ok(Some(true)),
        "n" | "no" => Ok(Some(false)),
        _ => Err(ConsoleError::Input(format!("expected y or n, got `{value}`"))),
    }
}

fn mask_ssn(ssn: &str) -> String {
    let tail: String = ssn
        .chars()
        .skip(ssn.chars().count().saturating_sub(4))
        .collect();
    format!("***-**-{tail}")
}

fn format_employee(employee: &Employee) -> String {
    let id = employee
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if employee.is_full_time {
        "full-time"
    } else {
        "part-time"
    };
    format!(
        "#{id} {} | ssn {} | {} / {} | salary {} | {status}",
        employee.full_name(),
        mask_ssn(&employee.ssn),
        employee.job_title,
        employee.division,
        employee.salary
    )
}

fn format_combined_pay(row: &CombinedPay) -> String {
    format!(
        "#{} {}, {} | {} | gross {} | deductions {} | net {}",
        row.employee_id,
        row.last_name,
        row.first_name,
        row.pay_date,
        row.gross_pay,
        row.deductions,
        row.net_pay
    )
}

fn format_job_title_total(total: &JobTitlePayTotal) -> String {
    format!(
        "{} | gross {} | net {}",
        total.job_title, total.total_gross, total.total_net
    )
}

fn format_division_total(total: &DivisionPayTotal) -> String {
    format!(
        "{} | gross {} | net {}",
        total.division, total.total_gross, total.total_net
    )
}
