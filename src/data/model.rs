use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// UnemploymentRecord – one cleaned row of the source table
// ---------------------------------------------------------------------------

/// A single observation: one region's unemployment rate on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct UnemploymentRecord {
    pub date: NaiveDate,
    /// Trimmed region label; may be empty.
    pub region: String,
    /// Estimated unemployment rate in percent. Always finite.
    pub rate: f64,
    /// Trimmed values of the pass-through columns, aligned with
    /// [`UnemploymentTable::extra_columns`].
    pub extra: Vec<String>,
}

// ---------------------------------------------------------------------------
// UnemploymentTable – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with a pre-computed region index.
#[derive(Debug, Clone, Default)]
pub struct UnemploymentTable {
    /// Records in source order, minus dropped rows.
    pub records: Vec<UnemploymentRecord>,
    /// Names of the columns that are not date/region/rate, in source order.
    pub extra_columns: Vec<String>,
    /// Distinct non-empty regions in order of first appearance.
    pub regions: Vec<String>,
}

impl UnemploymentTable {
    /// Build the region index from the cleaned records.
    pub fn from_records(records: Vec<UnemploymentRecord>, extra_columns: Vec<String>) -> Self {
        let mut regions: Vec<String> = Vec::new();
        for rec in &records {
            if !rec.region.is_empty() && !regions.contains(&rec.region) {
                regions.push(rec.region.clone());
            }
        }
        UnemploymentTable {
            records,
            extra_columns,
            regions,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dropped rows
// ---------------------------------------------------------------------------

/// Why a source row did not make it into the cleaned table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The date cell is not in `dd-mm-yyyy` form.
    InvalidDate(String),
    /// The rate cell is not a finite number.
    InvalidRate(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::InvalidDate(raw) => write!(f, "invalid date '{raw}'"),
            DropReason::InvalidRate(raw) => write!(f, "invalid rate '{raw}'"),
        }
    }
}

/// A source row that was discarded during cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    pub reason: DropReason,
}

impl fmt::Display for DroppedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.reason)
    }
}

// ---------------------------------------------------------------------------
// LoadReport – what a successful load hands back
// ---------------------------------------------------------------------------

/// The cleaned table together with the rows that were discarded.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub table: UnemploymentTable,
    pub dropped: Vec<DroppedRow>,
}

impl LoadReport {
    /// Total number of data rows read from the source.
    pub fn rows_read(&self) -> usize {
        self.table.len() + self.dropped.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, rate: f64) -> UnemploymentRecord {
        UnemploymentRecord {
            date: NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
            region: region.to_string(),
            rate,
            extra: Vec::new(),
        }
    }

    #[test]
    fn regions_keep_first_appearance_order_and_skip_empty() {
        let table = UnemploymentTable::from_records(
            vec![
                record("South", 1.0),
                record("", 2.0),
                record("North", 3.0),
                record("South", 4.0),
            ],
            Vec::new(),
        );
        assert_eq!(table.regions, vec!["South", "North"]);
        assert_eq!(table.len(), 4);
        assert!(!table.is_empty());
        assert!(UnemploymentTable::default().is_empty());
    }

    #[test]
    fn dropped_row_display() {
        let row = DroppedRow {
            row: 7,
            reason: DropReason::InvalidRate("N/A".into()),
        };
        assert_eq!(row.to_string(), "row 7: invalid rate 'N/A'");
    }
}
