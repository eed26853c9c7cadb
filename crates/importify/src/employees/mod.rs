//! Personnel record import: CSV decoding, value-object validation, two-tier
//! duplicate detection, and a single batched commit per file.

pub mod decoder;
pub mod domain;
pub mod memory;
pub mod record;
pub mod report;
pub mod repository;
pub mod router;
pub mod row_importer;
pub mod service;
pub mod values;

#[cfg(test)]
mod tests;

pub use decoder::{
    decode_rows, CsvDecoderConfig, DateLocale, DateParseError, DecodeError, HeaderPolicy,
    UnknownDateLocale,
};
pub use domain::{Employee, EmployeeDetails, EmployeeId, EmployeeView, PayrollNumber};
pub use memory::{CommitRecord, InMemoryBatch, InMemoryEmployeeRepository};
pub use record::{RawEmployeeRow, COLUMNS};
pub use report::{ImportResult, RowError};
pub use repository::{EmployeeBatch, EmployeeRepository, RepositoryError};
pub use router::{employee_router, ImportRequest};
pub use row_importer::{import_row, RowRejection};
pub use service::{EmployeeImporter, ImportError};
pub use values::{EmailAddress, InvalidValue, Name, PostalAddress};
