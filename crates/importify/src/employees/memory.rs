use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain::{Employee, EmployeeId, PayrollNumber};
use super::repository::{EmployeeBatch, EmployeeRepository, RepositoryError};

/// Audit entry written for every successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub initiated_by: Option<Uuid>,
    pub employees: usize,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Store {
    employees: HashMap<EmployeeId, Employee>,
    commits: Vec<CommitRecord>,
}

/// Process-local store enforcing payroll-number uniqueness on commit.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEmployeeRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryEmployeeRepository {
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(lock(&self.store)?.employees.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.len()? == 0)
    }

    /// Audit entries, oldest commit first.
    pub fn commits(&self) -> Result<Vec<CommitRecord>, RepositoryError> {
        Ok(lock(&self.store)?.commits.clone())
    }
}

fn lock(store: &Mutex<Store>) -> Result<MutexGuard<'_, Store>, RepositoryError> {
    store
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
}

impl EmployeeRepository for InMemoryEmployeeRepository {
    type Batch = InMemoryBatch;

    fn existing_payroll_numbers(
        &self,
        candidates: &BTreeSet<PayrollNumber>,
    ) -> Result<HashSet<PayrollNumber>, RepositoryError> {
        let store = lock(&self.store)?;
        Ok(store
            .employees
            .values()
            .map(Employee::payroll_number)
            .filter(|payroll| candidates.contains(*payroll))
            .cloned()
            .collect())
    }

    fn begin_batch(&self, initiated_by: Option<Uuid>) -> Self::Batch {
        InMemoryBatch {
            store: Arc::clone(&self.store),
            initiated_by,
            pending: Vec::new(),
        }
    }

    fn fetch(&self, id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(lock(&self.store)?.employees.get(id).cloned())
    }

    fn list_newest_first(&self) -> Result<Vec<Employee>, RepositoryError> {
        let mut employees: Vec<Employee> =
            lock(&self.store)?.employees.values().cloned().collect();
        employees.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.payroll_number().cmp(b.payroll_number()))
        });
        Ok(employees)
    }

    fn update(&self, employee: Employee) -> Result<(), RepositoryError> {
        let mut store = lock(&self.store)?;
        if !store.employees.contains_key(&employee.id()) {
            return Err(RepositoryError::NotFound);
        }
        let taken = store.employees.values().any(|existing| {
            existing.id() != employee.id() && existing.payroll_number() == employee.payroll_number()
        });
        if taken {
            return Err(RepositoryError::Conflict(employee.payroll_number().clone()));
        }
        store.employees.insert(employee.id(), employee);
        Ok(())
    }

    fn remove(&self, id: &EmployeeId) -> Result<Employee, RepositoryError> {
        lock(&self.store)?
            .employees
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }
}

/// Unit of work handed out by [`InMemoryEmployeeRepository::begin_batch`].
#[derive(Debug)]
pub struct InMemoryBatch {
    store: Arc<Mutex<Store>>,
    initiated_by: Option<Uuid>,
    pending: Vec<Employee>,
}

impl EmployeeBatch for InMemoryBatch {
    fn add_pending(&mut self, employee: Employee) {
        self.pending.push(employee);
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn commit(self) -> Result<usize, RepositoryError> {
        let mut store = lock(&self.store)?;

        let mut seen: HashSet<&PayrollNumber> = store
            .employees
            .values()
            .map(Employee::payroll_number)
            .collect();
        for employee in &self.pending {
            if !seen.insert(employee.payroll_number()) {
                return Err(RepositoryError::Conflict(employee.payroll_number().clone()));
            }
        }
        drop(seen);

        let written = self.pending.len();
        for employee in self.pending {
            store.employees.insert(employee.id(), employee);
        }
        store.commits.push(CommitRecord {
            initiated_by: self.initiated_by,
            employees: written,
            committed_at: Utc::now(),
        });

        Ok(written)
    }
}
