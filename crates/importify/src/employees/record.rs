use serde::Serialize;

/// Column headers of the personnel export, in export order.
pub const COLUMNS: [&str; 11] = [
    "Personnel_Records.Payroll_Number",
    "Personnel_Records.Forenames",
    "Personnel_Records.Surname",
    "Personnel_Records.Date_of_Birth",
    "Personnel_Records.Telephone",
    "Personnel_Records.Mobile",
    "Personnel_Records.Address",
    "Personnel_Records.Address_2",
    "Personnel_Records.Postcode",
    "Personnel_Records.EMail_Home",
    "Personnel_Records.Start_Date",
];

/// One undecorated data line of a personnel export.
///
/// Columns missing from the file decode as empty strings and unknown columns
/// are ignored; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawEmployeeRow {
    pub payroll_number: String,
    pub forenames: String,
    pub surname: String,
    pub date_of_birth: String,
    pub telephone: String,
    pub mobile: String,
    pub address: String,
    pub address_2: String,
    pub postcode: String,
    pub email: String,
    pub start_date: String,
}

impl RawEmployeeRow {
    /// Builds a row from values given in [`COLUMNS`] order.
    pub fn from_columns(values: [String; 11]) -> Self {
        let [
            payroll_number,
            forenames,
            surname,
            date_of_birth,
            telephone,
            mobile,
            address,
            address_2,
            postcode,
            email,
            start_date,
        ] = values;
        Self {
            payroll_number,
            forenames,
            surname,
            date_of_birth,
            telephone,
            mobile,
            address,
            address_2,
            postcode,
            email,
            start_date,
        }
    }

    /// Field values in [`COLUMNS`] order.
    pub fn fields(&self) -> [&str; 11] {
        [
            &self.payroll_number,
            &self.forenames,
            &self.surname,
            &self.date_of_birth,
            &self.telephone,
            &self.mobile,
            &self.address,
            &self.address_2,
            &self.postcode,
            &self.email,
            &self.start_date,
        ]
    }
}
