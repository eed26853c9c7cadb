use std::fmt;

use serde::Serialize;

use super::{non_blank, InvalidValue};

/// Forename and surname of an employee, both trimmed and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Name {
    first: String,
    last: String,
}

impl Name {
    pub fn new(first: &str, last: &str) -> Result<Self, InvalidValue> {
        let first = non_blank(first).ok_or(InvalidValue::EmptyFirstName)?;
        let last = non_blank(last).ok_or(InvalidValue::EmptyLastName)?;
        Ok(Self {
            first: first.to_string(),
            last: last.to_string(),
        })
    }

    pub fn parse(first: &str, last: &str) -> Option<Self> {
        Self::new(first, last).ok()
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}
