use std::fmt;

use serde::Serialize;
use validator::ValidateEmail;

use super::InvalidValue;

/// Well-formed e-mail address stored in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Accepts the address only when it is already canonical, so inputs that
    /// carry a display name or surrounding whitespace are refused.
    pub fn new(value: &str) -> Result<Self, InvalidValue> {
        match canonical_form(value) {
            Some(canonical) if canonical == value => Ok(Self(canonical)),
            _ => Err(InvalidValue::Email(value.to_string())),
        }
    }

    /// Lenient variant for row data: `"Jane <jane@example.com>"` yields
    /// `jane@example.com`.
    pub fn parse(value: &str) -> Option<Self> {
        canonical_form(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_form(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let address = bare_address(trimmed)?;
    address.validate_email().then(|| address.to_string())
}

/// Strips an optional `Display Name <address>` wrapper.
fn bare_address(value: &str) -> Option<&str> {
    let Some(open) = value.find('<') else {
        return Some(value);
    };

    let inner = value[open + 1..].strip_suffix('>')?;
    if inner.contains(['<', '>']) {
        return None;
    }

    is_display_name(value[..open].trim()).then(|| inner.trim())
}

/// A quoted string, or plain words free of address delimiters.
fn is_display_name(name: &str) -> bool {
    if let Some(quoted) = name
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return !quoted.contains('"');
    }

    !name.contains(['<', '>', '@', '"'])
}
