use metrics_exporter_prometheus::PrometheusHandle;
use std::fmt;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reasons an input file is refused before it is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileValidationError {
    Missing,
    NotCsv,
}

impl fmt::Display for FileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileValidationError::Missing => write!(f, "File is required."),
            FileValidationError::NotCsv => write!(f, "Only CSV files are allowed."),
        }
    }
}

impl std::error::Error for FileValidationError {}

pub(crate) fn validate_csv_file(path: &Path) -> Result<(), FileValidationError> {
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(FileValidationError::Missing);
    }

    let is_csv = mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.essence_str() == "text/csv");
    if is_csv {
        Ok(())
    } else {
        Err(FileValidationError::NotCsv)
    }
}

pub(crate) fn parse_operator(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as an operator UUID ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn accepts_existing_csv_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("personnel.csv");
        fs::write(&path, "Personnel_Records.Payroll_Number\n").expect("write csv");

        assert_eq!(validate_csv_file(&path), Ok(()));
    }

    #[test]
    fn rejects_missing_or_empty_paths() {
        let dir = tempfile::tempdir().expect("tempdir");

        assert_eq!(
            validate_csv_file(&dir.path().join("absent.csv")),
            Err(FileValidationError::Missing)
        );
        assert_eq!(
            validate_csv_file(&PathBuf::new()),
            Err(FileValidationError::Missing)
        );
        assert_eq!(
            FileValidationError::Missing.to_string(),
            "File is required."
        );
    }

    #[test]
    fn rejects_other_file_types() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("personnel.xlsx");
        fs::write(&path, b"PK").expect("write file");

        let err = validate_csv_file(&path).expect_err("xlsx is refused");
        assert_eq!(err, FileValidationError::NotCsv);
        assert_eq!(err.to_string(), "Only CSV files are allowed.");
    }

    #[test]
    fn parses_operator_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_operator(&format!(" {id} ")), Ok(id));
        assert!(parse_operator("operator-7").is_err());
    }
}
