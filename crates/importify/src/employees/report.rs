use std::io::Write;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::record::{RawEmployeeRow, COLUMNS};
use super::row_importer::RowRejection;

/// A row that was left out of the import, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based file line; the header is line 1.
    pub line: usize,
    pub message: String,
    pub row: RawEmployeeRow,
}

/// Outcome of one import call.
///
/// `total == success + failed` and `failed == errors().len()` always hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    success: usize,
    errors: Vec<RowError>,
}

impl ImportResult {
    pub fn total(&self) -> usize {
        self.success + self.errors.len()
    }

    pub fn success(&self) -> usize {
        self.success
    }

    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Rejected rows in file order.
    pub fn errors(&self) -> &[RowError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        self.failed() > 0
    }

    /// Writes the rejected rows as CSV so operators can fix and re-submit them.
    pub fn write_errors_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["Line", "Message"];
        header.extend(COLUMNS);
        csv_writer.write_record(&header)?;

        for error in &self.errors {
            let line = error.line.to_string();
            let mut record = vec![line.as_str(), error.message.as_str()];
            record.extend(error.row.fields());
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl Serialize for ImportResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImportResult", 5)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("success", &self.success)?;
        state.serialize_field("failed", &self.failed())?;
        state.serialize_field("has_errors", &self.has_errors())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Accumulates row outcomes while a batch is processed.
#[derive(Debug, Default)]
pub(crate) struct ImportTally {
    result: ImportResult,
}

impl ImportTally {
    pub(crate) fn record_success(&mut self) {
        self.result.success += 1;
    }

    pub(crate) fn record_failure(
        &mut self,
        line: usize,
        rejection: &RowRejection,
        row: RawEmployeeRow,
    ) {
        self.result.errors.push(RowError {
            line,
            message: rejection.to_string(),
            row,
        });
    }

    pub(crate) fn finish(self) -> ImportResult {
        self.result
    }
}
