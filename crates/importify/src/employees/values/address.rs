use std::fmt;

use serde::Serialize;

use super::{non_blank, InvalidValue};

/// Postal address with a required first line and postcode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PostalAddress {
    line1: String,
    line2: String,
    postcode: String,
}

impl PostalAddress {
    pub fn new(line1: &str, line2: &str, postcode: &str) -> Result<Self, InvalidValue> {
        let line1 = non_blank(line1).ok_or(InvalidValue::MissingAddressLine)?;
        let postcode = non_blank(postcode).ok_or(InvalidValue::MissingPostcode)?;
        Ok(Self {
            line1: line1.to_string(),
            line2: line2.trim().to_string(),
            postcode: postcode.to_string(),
        })
    }

    pub fn parse(line1: &str, line2: &str, postcode: &str) -> Option<Self> {
        Self::new(line1, line2, postcode).ok()
    }

    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Empty when the source row had no second line.
    pub fn line2(&self) -> &str {
        &self.line2
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }
}

impl fmt::Display for PostalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.line1, self.line2, self.postcode)
    }
}
