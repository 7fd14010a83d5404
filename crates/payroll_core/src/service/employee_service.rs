//! Employee use-case service.
//!
//! # Responsibility
//! - Validate records before they reach the repository.
//! - Turn optional lookups into `NotFound` where a row is required.
//! - Pre-merge partial edits into a full record before update.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{Employee, EmployeeId};
use crate::model::money::Money;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::error::{Lookup, RepoError, RepoResult};

/// Partial edit for an existing employee; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ssn: Option<String>,
    pub job_title: Option<String>,
    pub division: Option<String>,
    pub address: Option<String>,
    pub salary: Option<Money>,
    pub is_full_time: Option<bool>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies every present change onto `employee`.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(value) = &self.first_name {
            employee.first_name = value.clone();
        }
        if let Some(value) = &self.last_name {
            employee.last_name = value.clone();
        }
        if let Some(value) = &self.ssn {
            employee.ssn = value.clone();
        }
        if let Some(value) = &self.job_title {
            employee.job_title = value.clone();
        }
        if let Some(value) = &self.division {
            employee.division = value.clone();
        }
        if let Some(value) = &self.address {
            employee.address = Some(value.clone());
        }
        if let Some(value) = self.salary {
            employee.salary = value;
        }
        if let Some(value) = self.is_full_time {
            employee.is_full_time = value;
        }
    }
}

/// Use-case service wrapper for employee operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts `employee`, storing the assigned id back on it.
    pub fn create_employee(&self, employee: &mut Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;
        let id = self.repo.create_employee(employee)?;
        employee.id = Some(id);
        Ok(id)
    }

    /// Gets one employee by id, or `NotFound`.
    pub fn require_employee(&self, id: EmployeeId) -> RepoResult<Employee> {
        self.repo
            .find_by_id(id)?
            .ok_or(RepoError::NotFound(Lookup::EmployeeId(id)))
    }

    /// Gets one employee by SSN, or `NotFound`.
    pub fn require_employee_by_ssn(&self, ssn: &str) -> RepoResult<Employee> {
        self.repo
            .find_by_ssn(ssn)?
            .ok_or(RepoError::NotFound(Lookup::EmployeeSsn))
    }

    pub fn find_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.find_by_id(id)
    }

    pub fn find_employee_by_ssn(&self, ssn: &str) -> RepoResult<Option<Employee>> {
        self.repo.find_by_ssn(ssn)
    }

    pub fn search_by_name(&self, fragment: &str) -> RepoResult<Vec<Employee>> {
        self.repo.find_by_name_fragment(fragment)
    }

    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_all()
    }

    /// Validates and overwrites the full record; `false` when the id is unknown.
    pub fn update_employee(&self, employee: &Employee) -> RepoResult<bool> {
        employee.validate()?;
        self.repo.update_employee(employee)
    }

    /// Loads the employee, applies `changes`, validates and writes back.
    ///
    /// Returns the record as written.
    pub fn merge_update(&self, id: EmployeeId, changes: &EmployeeChanges) -> RepoResult<Employee> {
        let mut employee = self.require_employee(id)?;
        changes.apply_to(&mut employee);
        if !self.update_employee(&employee)? {
            return Err(RepoError::NotFound(Lookup::EmployeeId(id)));
        }
        Ok(employee)
    }
}
