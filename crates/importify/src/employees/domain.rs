use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::values::{EmailAddress, Name, PostalAddress};

/// System-generated identifier of a stored employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// External business key carried by every personnel record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PayrollNumber(String);

impl PayrollNumber {
    /// Trims the raw value; blank input has no payroll number.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PayrollNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PayrollNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated attributes required to create an [`Employee`].
///
/// Every field is already a checked type, so any value of this struct
/// describes a valid employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    pub payroll_number: PayrollNumber,
    pub name: Name,
    pub date_of_birth: NaiveDate,
    pub telephone: String,
    pub mobile: String,
    pub address: PostalAddress,
    pub email: EmailAddress,
    pub start_date: NaiveDate,
}

/// Personnel record as persisted by an [`EmployeeRepository`](super::EmployeeRepository).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: EmployeeId,
    payroll_number: PayrollNumber,
    name: Name,
    date_of_birth: NaiveDate,
    telephone: String,
    mobile: String,
    address: PostalAddress,
    email: EmailAddress,
    start_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Employee {
    /// Creates a new employee with a fresh identifier, stamped at `created_at`.
    pub fn create(details: EmployeeDetails, created_at: DateTime<Utc>) -> Self {
        Self::assemble(EmployeeId::random(), details, created_at)
    }

    /// Replaces the personal details while keeping identity and creation time.
    pub fn with_details(&self, details: EmployeeDetails) -> Self {
        Self::assemble(self.id, details, self.created_at)
    }

    fn assemble(id: EmployeeId, details: EmployeeDetails, created_at: DateTime<Utc>) -> Self {
        let EmployeeDetails {
            payroll_number,
            name,
            date_of_birth,
            telephone,
            mobile,
            address,
            email,
            start_date,
        } = details;

        Self {
            id,
            payroll_number,
            name,
            date_of_birth,
            telephone,
            mobile,
            address,
            email,
            start_date,
            created_at,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn payroll_number(&self) -> &PayrollNumber {
        &self.payroll_number
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn telephone(&self) -> &str {
        &self.telephone
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn address(&self) -> &PostalAddress {
        &self.address
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn view(&self) -> EmployeeView {
        EmployeeView {
            id: self.id,
            payroll_number: self.payroll_number.to_string(),
            first_name: self.name.first().to_string(),
            surname: self.name.last().to_string(),
            email: self.email.to_string(),
            telephone: self.telephone.clone(),
            mobile: self.mobile.clone(),
            address: self.address.to_string(),
            date_of_birth: self.date_of_birth,
            start_date: self.start_date,
        }
    }
}

/// Flattened representation used by listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub payroll_number: String,
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub telephone: String,
    pub mobile: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub start_date: NaiveDate,
}
