use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::record::{RawEmployeeRow, COLUMNS};

/// How the header row is checked against [`COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// Unknown columns are ignored and missing columns decode as blank.
    #[default]
    Lenient,
    /// Every expected column must be present.
    Strict,
}

/// Locale-independent date conventions accepted for date columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLocale {
    /// ISO dates plus month-first slashed dates.
    #[default]
    Invariant,
    /// ISO dates plus day-first slashed dates.
    DayFirst,
}

impl FromStr for DateLocale {
    type Err = UnknownDateLocale;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "invariant" | "iso" | "us" => Ok(Self::Invariant),
            "day-first" | "day_first" | "uk" | "gb" => Ok(Self::DayFirst),
            _ => Err(UnknownDateLocale(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not one of invariant or day-first")]
pub struct UnknownDateLocale(pub String);

impl DateLocale {
    fn formats(self) -> &'static [&'static str] {
        match self {
            DateLocale::Invariant => &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%d %b %Y"],
            DateLocale::DayFirst => &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d %B %Y", "%d %b %Y"],
        }
    }

    /// Parses a calendar date, accepting a trailing time component.
    pub fn parse_date(self, raw: &str) -> Result<NaiveDate, DateParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::Missing);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.date_naive());
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
            return Ok(dt.date());
        }

        self.formats()
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
            .ok_or_else(|| DateParseError::Unrecognized(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("value is empty")]
    Missing,
    #[error("'{0}' is not a recognized calendar date")]
    Unrecognized(String),
}

/// Tabular settings for one decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDecoderConfig {
    pub delimiter: u8,
    pub header_policy: HeaderPolicy,
    pub date_locale: DateLocale,
}

impl Default for CsvDecoderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header_policy: HeaderPolicy::Lenient,
            date_locale: DateLocale::Invariant,
        }
    }
}

/// The input could not be read as a personnel export at all.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Reads every data row, in file order, header excluded.
pub fn decode_rows<R: Read>(
    reader: R,
    config: &CsvDecoderConfig,
) -> Result<Vec<RawEmployeeRow>, DecodeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    // A column that appears more than once is read from its first occurrence.
    let positions: [Option<usize>; 11] =
        COLUMNS.map(|column| headers.iter().position(|header| header == column));

    if config.header_policy == HeaderPolicy::Strict {
        let missing: Vec<String> = COLUMNS
            .iter()
            .zip(positions)
            .filter(|(_, position)| position.is_none())
            .map(|(column, _)| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DecodeError::MissingColumns(missing));
        }
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let values = positions.map(|position| {
            position
                .and_then(|index| record.get(index))
                .unwrap_or_default()
                .to_string()
        });
        rows.push(RawEmployeeRow::from_columns(values));
    }

    Ok(rows)
}

fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
