use chrono::{DateTime, Utc};

use super::decoder::{DateLocale, DateParseError};
use super::domain::{Employee, EmployeeDetails, PayrollNumber};
use super::record::RawEmployeeRow;
use super::values::{EmailAddress, Name, PostalAddress};

/// Why a single row was left out of the batch. The `Display` text is the
/// message reported back to operators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowRejection {
    #[error("Duplicate payroll number in file: {0}")]
    DuplicateInFile(PayrollNumber),
    #[error("Duplicate payroll number in database: {0}")]
    DuplicateInStore(PayrollNumber),
    #[error("Missing payroll number.")]
    MissingPayrollNumber,
    #[error("Invalid name.")]
    InvalidName,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Invalid address.")]
    InvalidAddress,
    #[error("Invalid date of birth: {0}")]
    DateOfBirth(DateParseError),
    #[error("Invalid start date: {0}")]
    StartDate(DateParseError),
}

impl RowRejection {
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            RowRejection::DuplicateInFile(_) | RowRejection::DuplicateInStore(_)
        )
    }
}

/// Builds an [`Employee`] from one decoded row, stopping at the first field
/// that fails validation.
pub fn import_row(
    row: &RawEmployeeRow,
    date_locale: DateLocale,
    created_at: DateTime<Utc>,
) -> Result<Employee, RowRejection> {
    let payroll_number =
        PayrollNumber::parse(&row.payroll_number).ok_or(RowRejection::MissingPayrollNumber)?;
    let name = Name::parse(&row.forenames, &row.surname).ok_or(RowRejection::InvalidName)?;
    let email = EmailAddress::parse(&row.email).ok_or(RowRejection::InvalidEmail)?;
    let address = PostalAddress::parse(&row.address, &row.address_2, &row.postcode)
        .ok_or(RowRejection::InvalidAddress)?;
    let date_of_birth = date_locale
        .parse_date(&row.date_of_birth)
        .map_err(RowRejection::DateOfBirth)?;
    let start_date = date_locale
        .parse_date(&row.start_date)
        .map_err(RowRejection::StartDate)?;

    let details = EmployeeDetails {
        payroll_number,
        name,
        date_of_birth,
        telephone: row.telephone.trim().to_string(),
        mobile: row.mobile.trim().to_string(),
        address,
        email,
        start_date,
    };

    Ok(Employee::create(details, created_at))
}
