use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – structural failures that stop the dashboard from rendering
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded.
///
/// Row-level problems (bad dates, bad rates) are never errors; they end up
/// in [`LoadReport::dropped`](super::model::LoadReport::dropped).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}. Please check the file path.", path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("CSV file '{entry}' not found in the ZIP archive {}.", archive.display())]
    EntryNotFound { entry: String, archive: PathBuf },

    #[error("Missing expected columns: {missing:?}. Check your dataset.")]
    SchemaMismatch { missing: Vec<String> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unreadable archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
