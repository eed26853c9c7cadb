use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;
use uuid::Uuid;

use crate::employees::domain::{Employee, EmployeeId, PayrollNumber};
use crate::employees::repository::{EmployeeBatch, EmployeeRepository, RepositoryError};
use crate::employees::{CsvDecoderConfig, EmployeeImporter, InMemoryEmployeeRepository};

pub(super) const HEADER: &str = "Personnel_Records.Payroll_Number,Personnel_Records.Forenames,Personnel_Records.Surname,\
Personnel_Records.Date_of_Birth,Personnel_Records.Telephone,Personnel_Records.Mobile,Personnel_Records.Address,\
Personnel_Records.Address_2,Personnel_Records.Postcode,Personnel_Records.EMail_Home,Personnel_Records.Start_Date";

/// A syntactically valid data line for `payroll`.
pub(super) fn valid_line(payroll: &str, forename: &str) -> String {
    format!(
        "{payroll},{forename},Doe,1980-01-01,123,456,Main St,City,0000,{}@example.com,2020-01-01",
        forename.to_ascii_lowercase()
    )
}

pub(super) fn csv_of(lines: &[String]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for line in lines {
        csv.push_str(line);
        csv.push('\n');
    }
    csv
}

pub(super) fn payroll(value: &str) -> PayrollNumber {
    PayrollNumber::parse(value).expect("valid payroll number")
}

pub(super) fn memory_importer() -> (
    EmployeeImporter<InMemoryEmployeeRepository>,
    Arc<InMemoryEmployeeRepository>,
) {
    let repository = Arc::new(InMemoryEmployeeRepository::default());
    let importer = EmployeeImporter::new(repository.clone(), CsvDecoderConfig::default());
    (importer, repository)
}

/// Records every interaction so tests can assert the storage contract.
#[derive(Default)]
pub(super) struct RecordingRepository {
    pub(super) known: HashSet<PayrollNumber>,
    pub(super) lookups: Mutex<Vec<BTreeSet<PayrollNumber>>>,
    pub(super) staged: Arc<Mutex<Vec<Employee>>>,
    pub(super) commits: Arc<Mutex<usize>>,
}

impl RecordingRepository {
    pub(super) fn knowing(payrolls: &[&str]) -> Self {
        Self {
            known: payrolls.iter().map(|value| payroll(value)).collect(),
            ..Self::default()
        }
    }

    pub(super) fn lookups(&self) -> Vec<BTreeSet<PayrollNumber>> {
        self.lookups.lock().expect("lookup mutex poisoned").clone()
    }

    pub(super) fn staged_payrolls(&self) -> Vec<String> {
        self.staged
            .lock()
            .expect("staged mutex poisoned")
            .iter()
            .map(|employee| employee.payroll_number().to_string())
            .collect()
    }

    pub(super) fn commit_count(&self) -> usize {
        *self.commits.lock().expect("commit mutex poisoned")
    }
}

pub(super) struct RecordingBatch {
    pending: Vec<Employee>,
    staged: Arc<Mutex<Vec<Employee>>>,
    commits: Arc<Mutex<usize>>,
}

impl EmployeeBatch for RecordingBatch {
    fn add_pending(&mut self, employee: Employee) {
        self.pending.push(employee);
    }

    fn pending(&self) -> usize {
        self.pending.len()
    }

    fn commit(self) -> Result<usize, RepositoryError> {
        let written = self.pending.len();
        self.staged
            .lock()
            .expect("staged mutex poisoned")
            .extend(self.pending);
        *self.commits.lock().expect("commit mutex poisoned") += 1;
        Ok(written)
    }
}

impl EmployeeRepository for RecordingRepository {
    type Batch = RecordingBatch;

    fn existing_payroll_numbers(
        &self,
        candidates: &BTreeSet<PayrollNumber>,
    ) -> Result<HashSet<PayrollNumber>, RepositoryError> {
        self.lookups
            .lock()
            .expect("lookup mutex poisoned")
            .push(candidates.clone());
        Ok(candidates
            .iter()
            .filter(|candidate| self.known.contains(*candidate))
            .cloned()
            .collect())
    }

    fn begin_batch(&self, _initiated_by: Option<Uuid>) -> Self::Batch {
        RecordingBatch {
            pending: Vec::new(),
            staged: Arc::clone(&self.staged),
            commits: Arc::clone(&self.commits),
        }
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(None)
    }

    fn list_newest_first(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(self.staged.lock().expect("staged mutex poisoned").clone())
    }

    fn update(&self, _employee: Employee) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn remove(&self, _id: &EmployeeId) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

pub(super) struct UnavailableBatch;

impl EmployeeBatch for UnavailableBatch {
    fn add_pending(&mut self, _employee: Employee) {}

    fn pending(&self) -> usize {
        0
    }

    fn commit(self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

impl EmployeeRepository for UnavailableRepository {
    type Batch = UnavailableBatch;

    fn existing_payroll_numbers(
        &self,
        _candidates: &BTreeSet<PayrollNumber>,
    ) -> Result<HashSet<PayrollNumber>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn begin_batch(&self, _initiated_by: Option<Uuid>) -> Self::Batch {
        UnavailableBatch
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_newest_first(&self) -> Result<Vec<Employee>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _employee: Employee) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &EmployeeId) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Lookup succeeds but every commit fails, as when the store loses its connection mid-batch.
pub(super) struct FailingCommitRepository;

impl EmployeeRepository for FailingCommitRepository {
    type Batch = UnavailableBatch;

    fn existing_payroll_numbers(
        &self,
        _candidates: &BTreeSet<PayrollNumber>,
    ) -> Result<HashSet<PayrollNumber>, RepositoryError> {
        Ok(HashSet::new())
    }

    fn begin_batch(&self, _initiated_by: Option<Uuid>) -> Self::Batch {
        UnavailableBatch
    }

    fn fetch(&self, _id: &EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        Ok(None)
    }

    fn list_newest_first(&self) -> Result<Vec<Employee>, RepositoryError> {
        Ok(Vec::new())
    }

    fn update(&self, _employee: Employee) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn remove(&self, _id: &EmployeeId) -> Result<Employee, RepositoryError> {
        Err(RepositoryError::NotFound)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
