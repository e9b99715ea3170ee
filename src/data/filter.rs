use std::fmt;

use super::model::UnemploymentTable;

// ---------------------------------------------------------------------------
// Region filter
// ---------------------------------------------------------------------------

/// Which region the user selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegionFilter {
    /// No filter: every record is visible.
    #[default]
    All,
    /// Only records whose region equals this label exactly.
    Only(String),
}

impl RegionFilter {
    /// Whether a record with `region` passes the filter.
    /// Matching is exact and case-sensitive.
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(selected) => selected == region,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => write!(f, "All"),
            RegionFilter::Only(region) => write!(f, "{region}"),
        }
    }
}

/// Return indices of records that pass the filter, in table order.
pub fn filtered_indices(table: &UnemploymentTable, filter: &RegionFilter) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(&rec.region))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::UnemploymentRecord;

    fn table(regions: &[&str]) -> UnemploymentTable {
        let records = regions
            .iter()
            .map(|r| UnemploymentRecord {
                date: NaiveDate::from_ymd_opt(2020, 5, 31).unwrap(),
                region: r.to_string(),
                rate: 1.0,
                extra: Vec::new(),
            })
            .collect();
        UnemploymentTable::from_records(records, Vec::new())
    }

    #[test]
    fn only_keeps_exact_matches() {
        let t = table(&["North", "South", "North", "north", "North "]);
        let idx = filtered_indices(&t, &RegionFilter::Only("North".into()));
        assert_eq!(idx, vec![0, 2]);
        assert!(idx.iter().all(|&i| t.records[i].region == "North"));
    }

    #[test]
    fn all_is_identity() {
        let t = table(&["North", "South", ""]);
        assert_eq!(filtered_indices(&t, &RegionFilter::All), vec![0, 1, 2]);
    }

    #[test]
    fn unknown_region_yields_nothing() {
        let t = table(&["North", "South"]);
        assert!(filtered_indices(&t, &RegionFilter::Only("East".into())).is_empty());
    }
}
