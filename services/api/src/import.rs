use crate::infra::{parse_operator, validate_csv_file};
use chrono::Local;
use clap::Args;
use importify::config::AppConfig;
use importify::employees::{
    CsvDecoderConfig, DateLocale, EmployeeImporter, ImportResult, InMemoryEmployeeRepository,
};
use importify::error::AppError;
use importify::telemetry;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Personnel export to import
    pub(crate) file: PathBuf,
    /// Earlier exports loaded into the store first, so their payroll numbers count as existing
    #[arg(long)]
    pub(crate) baseline: Vec<PathBuf>,
    /// Operator recorded against the committed batch
    #[arg(long, value_parser = parse_operator)]
    pub(crate) initiated_by: Option<Uuid>,
    /// Parse slashed dates as day/month/year regardless of IMPORT_DATE_LOCALE
    #[arg(long)]
    pub(crate) day_first: bool,
    /// Write rejected rows to this CSV file
    #[arg(long)]
    pub(crate) errors_csv: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let ImportArgs {
        file,
        baseline,
        initiated_by,
        day_first,
        errors_csv,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut decoder = config.import.decoder();
    if day_first {
        decoder.date_locale = DateLocale::DayFirst;
    }

    let repository = Arc::new(InMemoryEmployeeRepository::default());
    let importer = EmployeeImporter::new(repository.clone(), decoder);

    for path in &baseline {
        let result = import_file(&importer, path, None)?;
        println!(
            "Baseline {}: {} of {} rows loaded",
            path.display(),
            result.success(),
            result.total()
        );
    }

    let result = import_file(&importer, &file, initiated_by)?;

    if json {
        println!("{}", report_json(&result)?);
    } else {
        render_report(&file, &result, initiated_by);
        println!("Employees on record: {}", repository.len()?);
    }

    if let Some(path) = errors_csv {
        result.write_errors_csv(File::create(&path)?)?;
        println!("Rejected rows written to {}", path.display());
    }

    Ok(())
}

fn import_file(
    importer: &EmployeeImporter<InMemoryEmployeeRepository>,
    path: &Path,
    initiated_by: Option<Uuid>,
) -> Result<ImportResult, AppError> {
    validate_csv_file(path).map_err(|err| AppError::InvalidInput(err.to_string()))?;
    Ok(importer.import_path(path, initiated_by)?)
}

fn report_json(result: &ImportResult) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub(crate) fn render_report(file: &Path, result: &ImportResult, initiated_by: Option<Uuid>) {
    println!("Employee import report");
    println!(
        "Source: {} (run {})",
        file.display(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    if let Some(operator) = initiated_by {
        println!("Initiated by: {operator}");
    }
    println!(
        "- {} rows | {} imported | {} rejected",
        result.total(),
        result.success(),
        result.failed()
    );

    if !result.has_errors() {
        return;
    }

    println!("Rejected rows:");
    for error in result.errors() {
        let payroll = if error.row.payroll_number.is_empty() {
            "<blank>"
        } else {
            error.row.payroll_number.as_str()
        };
        println!("  - line {} [{}]: {}", error.line, payroll, error.message);
    }
}
