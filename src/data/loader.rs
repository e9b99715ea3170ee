use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use zip::ZipArchive;

use super::error::LoadError;
use super::model::{DropReason, DroppedRow, LoadReport, UnemploymentRecord, UnemploymentTable};

/// Source format of the date column, e.g. `31-12-2020`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ---------------------------------------------------------------------------
// Dataset location and schema
// ---------------------------------------------------------------------------

/// Names of the three columns every dataset must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredColumns {
    pub date: String,
    pub region: String,
    pub rate: String,
}

impl Default for RequiredColumns {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            region: "Region".to_string(),
            rate: "Estimated Unemployment Rate (%)".to_string(),
        }
    }
}

/// Where the bundled dataset lives and what it must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// Archive path; relative paths resolve against the working directory.
    pub archive_path: PathBuf,
    /// Name of the CSV entry inside the archive.
    pub entry_name: String,
    pub columns: RequiredColumns,
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from("archive (3).zip"),
            entry_name: "Unemployment_Rate_upto_11_2020.csv".to_string(),
            columns: RequiredColumns::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the dataset, resolving the archive against the current
/// working directory.
pub fn load(source: &DatasetSource) -> Result<LoadReport, LoadError> {
    let cwd = std::env::current_dir()?;
    load_from(&cwd, source)
}

/// Load and clean the dataset, resolving the archive against `base_dir`.
pub fn load_from(base_dir: &Path, source: &DatasetSource) -> Result<LoadReport, LoadError> {
    let path = base_dir.join(&source.archive_path);
    if !path.exists() {
        return Err(LoadError::ArchiveNotFound { path });
    }

    let file = File::open(&path)?;
    let mut archive = ZipArchive::new(file)?;

    if !archive.file_names().any(|name| name == source.entry_name) {
        return Err(LoadError::EntryNotFound {
            entry: source.entry_name.clone(),
            archive: path,
        });
    }

    let entry = archive.by_name(&source.entry_name)?;
    let report = read_table(entry, &source.columns)?;

    log::info!(
        "Loaded {} records ({} dropped) from '{}' in {}",
        report.table.len(),
        report.dropped.len(),
        source.entry_name,
        path.display()
    );
    Ok(report)
}

// ---------------------------------------------------------------------------
// CSV cleaning
// ---------------------------------------------------------------------------

/// Parse and clean a CSV table.
///
/// * Header names and every cell are whitespace-trimmed.
/// * All required columns must be present, otherwise
///   [`LoadError::SchemaMismatch`] lists the missing ones.
/// * Rows with an unparseable date or rate are dropped and recorded in
///   [`LoadReport::dropped`]; the date is checked first.
/// * Short rows are tolerated, missing cells read as empty.
pub fn read_table<R: Read>(reader: R, columns: &RequiredColumns) -> Result<LoadReport, LoadError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let date_idx = position(&columns.date);
    let region_idx = position(&columns.region);
    let rate_idx = position(&columns.rate);

    let (date_idx, region_idx, rate_idx) = match (date_idx, region_idx, rate_idx) {
        (Some(d), Some(g), Some(r)) => (d, g, r),
        _ => {
            let missing: Vec<String> = [
                (date_idx, &columns.date),
                (region_idx, &columns.region),
                (rate_idx, &columns.rate),
            ]
            .into_iter()
            .filter(|(idx, _)| idx.is_none())
            .map(|(_, name)| name.clone())
            .collect();
            log::error!("Dataset is missing columns {missing:?}; found {headers:?}");
            return Err(LoadError::SchemaMismatch { missing });
        }
    };

    let extra_idx: Vec<usize> = (0..headers.len())
        .filter(|i| ![date_idx, region_idx, rate_idx].contains(i))
        .collect();
    let extra_columns: Vec<String> = extra_idx.iter().map(|&i| headers[i].clone()).collect();

    let mut records = Vec::new();
    let mut dropped = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result?;

        let raw_date = cell(&record, date_idx);
        let Some(date) = parse_date(raw_date) else {
            log::debug!("Dropping row {row}: invalid date '{raw_date}'");
            dropped.push(DroppedRow {
                row,
                reason: DropReason::InvalidDate(raw_date.to_string()),
            });
            continue;
        };

        let raw_rate = cell(&record, rate_idx);
        let Some(rate) = parse_rate(raw_rate) else {
            log::debug!("Dropping row {row}: invalid rate '{raw_rate}'");
            dropped.push(DroppedRow {
                row,
                reason: DropReason::InvalidRate(raw_rate.to_string()),
            });
            continue;
        };

        records.push(UnemploymentRecord {
            date,
            region: cell(&record, region_idx).to_string(),
            rate,
            extra: extra_idx
                .iter()
                .map(|&idx| cell(&record, idx).to_string())
                .collect(),
        });
    }

    if !dropped.is_empty() {
        log::warn!("Dropped {} rows with invalid date or rate", dropped.len());
    }

    Ok(LoadReport {
        table: UnemploymentTable::from_records(records, extra_columns),
        dropped,
    })
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

/// Parse a `dd-mm-yyyy` date; anything else is `None`.
///
/// The year must be exactly four digits: chrono's `%Y` alone also takes
/// `20` or `+2020`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let year = raw.rsplit('-').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Parse a finite rate; empty, non-numeric and non-finite text is `None`.
pub fn parse_rate(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
