use std::collections::{BTreeSet, HashSet};

use uuid::Uuid;

use super::domain::{Employee, EmployeeId, PayrollNumber};

/// Storage abstraction consumed by the importer and the listing routes.
pub trait EmployeeRepository: Send + Sync {
    type Batch: EmployeeBatch;

    /// Returns the subset of `candidates` that is already stored.
    fn existing_payroll_numbers(
        &self,
        candidates: &BTreeSet<PayrollNumber>,
    ) -> Result<HashSet<PayrollNumber>, RepositoryError>;

    /// Opens a unit of work owned by one import call. `initiated_by` is an
    /// audit value the store may record.
    fn begin_batch(&self, initiated_by: Option<Uuid>) -> Self::Batch;

    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    /// All employees, most recently created first.
    fn list_newest_first(&self) -> Result<Vec<Employee>, RepositoryError>;

    fn update(&self, employee: Employee) -> Result<(), RepositoryError>;

    fn remove(&self, id: &EmployeeId) -> Result<Employee, RepositoryError>;
}

/// Entities staged for a single all-or-nothing commit.
pub trait EmployeeBatch {
    fn add_pending(&mut self, employee: Employee);

    fn pending(&self) -> usize;

    /// Persists every staged employee as one unit and returns how many were written.
    fn commit(self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("payroll number {0} already exists")]
    Conflict(PayrollNumber),
    #[error("employee not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
