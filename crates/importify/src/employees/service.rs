use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::decoder::{decode_rows, CsvDecoderConfig, DecodeError};
use super::domain::{Employee, EmployeeView, PayrollNumber};
use super::record::RawEmployeeRow;
use super::report::{ImportResult, ImportTally};
use super::repository::{EmployeeBatch, EmployeeRepository, RepositoryError};
use super::row_importer::{import_row, RowRejection};

/// Batch pipeline turning a personnel export into stored employees.
pub struct EmployeeImporter<R> {
    repository: Arc<R>,
    decoder: CsvDecoderConfig,
}

impl<R> EmployeeImporter<R>
where
    R: EmployeeRepository + 'static,
{
    pub fn new(repository: Arc<R>, decoder: CsvDecoderConfig) -> Self {
        Self {
            repository,
            decoder,
        }
    }

    pub fn import_path<P: AsRef<Path>>(
        &self,
        path: P,
        initiated_by: Option<Uuid>,
    ) -> Result<ImportResult, ImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file, initiated_by)
    }

    /// Imports every row of `reader`.
    ///
    /// Row-level problems end up in the returned [`ImportResult`]; only an
    /// undecodable stream or a failing store aborts the call. Valid rows are
    /// committed together in a single batch after the whole file is read.
    pub fn import_reader<In: Read>(
        &self,
        reader: In,
        initiated_by: Option<Uuid>,
    ) -> Result<ImportResult, ImportError> {
        let rows = decode_rows(reader, &self.decoder)?;

        let candidates: BTreeSet<PayrollNumber> = rows
            .iter()
            .filter_map(|row| PayrollNumber::parse(&row.payroll_number))
            .collect();
        let existing = self.repository.existing_payroll_numbers(&candidates)?;
        debug!(
            rows = rows.len(),
            distinct = candidates.len(),
            existing = existing.len(),
            "payroll number lookup complete"
        );

        let total = rows.len();
        let mut seen_in_file = HashSet::with_capacity(total);
        let mut batch = self.repository.begin_batch(initiated_by);
        let mut tally = ImportTally::default();

        for (index, row) in rows.into_iter().enumerate() {
            let line = index + 2;
            match self.screen_row(&row, &mut seen_in_file, &existing) {
                Ok(employee) => {
                    batch.add_pending(employee);
                    tally.record_success();
                }
                Err(rejection) => {
                    if rejection.is_duplicate() {
                        debug!(line, reason = %rejection, "row skipped");
                    } else {
                        warn!(line, reason = %rejection, "row failed");
                    }
                    tally.record_failure(line, &rejection, row);
                }
            }
        }

        let staged = batch.pending();
        debug!(staged, "committing employee batch");
        let committed = batch.commit()?;
        if committed != staged {
            warn!(staged, committed, "store reported a different commit size");
        }
        let result = tally.finish();

        info!(
            success = result.success(),
            total,
            failed = result.failed(),
            committed,
            initiated_by = ?initiated_by,
            "employee import finished"
        );

        Ok(result)
    }

    /// Stored employees for listing, newest first.
    pub fn employees(&self) -> Result<Vec<EmployeeView>, RepositoryError> {
        Ok(self
            .repository
            .list_newest_first()?
            .iter()
            .map(Employee::view)
            .collect())
    }

    fn screen_row(
        &self,
        row: &RawEmployeeRow,
        seen_in_file: &mut HashSet<PayrollNumber>,
        existing: &HashSet<PayrollNumber>,
    ) -> Result<Employee, RowRejection> {
        if let Some(payroll) = PayrollNumber::parse(&row.payroll_number) {
            if !seen_in_file.insert(payroll.clone()) {
                return Err(RowRejection::DuplicateInFile(payroll));
            }
            if existing.contains(&payroll) {
                return Err(RowRejection::DuplicateInStore(payroll));
            }
        }

        import_row(row, self.decoder.date_locale, Utc::now())
    }
}

/// Error raised when an import cannot produce a trustworthy result.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read personnel export: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("employee store failed: {0}")]
    Repository(#[from] RepositoryError),
}
