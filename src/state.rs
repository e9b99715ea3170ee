use crate::data::error::LoadError;
use crate::data::filter::{RegionFilter, filtered_indices};
use crate::data::loader::{self, DatasetSource};
use crate::data::model::{LoadReport, UnemploymentRecord};
use crate::data::stats::{self, Summary};

// ---------------------------------------------------------------------------
// Session: one successful load
// ---------------------------------------------------------------------------

/// Everything produced by one load of the dataset. Immutable once built.
pub struct DashboardSession {
    pub report: LoadReport,
}

impl DashboardSession {
    pub fn new(report: LoadReport) -> Self {
        Self { report }
    }

    /// Records at the given indices, in index order.
    pub fn records<'a>(
        &'a self,
        indices: &'a [usize],
    ) -> impl Iterator<Item = &'a UnemploymentRecord> + 'a {
        indices.iter().map(|&i| &self.report.table.records[i])
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the dataset is loaded from.
    pub source: DatasetSource,

    /// Loaded dataset (None when loading failed).
    pub session: Option<DashboardSession>,

    /// Current region selection.
    pub filter: RegionFilter,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source,
            session: None,
            filter: RegionFilter::All,
            visible_indices: Vec::new(),
            status_message: None,
        }
    }

    /// Run the loader against `source` and ingest the outcome.
    pub fn reload(&mut self) {
        let result = loader::load(&self.source);
        self.apply_load_result(result);
    }

    /// Ingest the outcome of a load. Errors clear the session.
    pub fn apply_load_result(&mut self, result: Result<LoadReport, LoadError>) {
        match result {
            Ok(report) => self.set_report(report),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.session = None;
                self.visible_indices.clear();
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset and reset the filter.
    pub fn set_report(&mut self, report: LoadReport) {
        self.visible_indices = (0..report.table.len()).collect();
        self.filter = RegionFilter::All;
        self.session = Some(DashboardSession::new(report));
        self.status_message = None;
    }

    /// Change the region selection and recompute the visible rows.
    pub fn set_filter(&mut self, filter: RegionFilter) {
        if self.filter != filter {
            log::debug!("Region filter: {filter}");
            self.filter = filter;
            self.refilter();
        }
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(session) = &self.session {
            self.visible_indices = filtered_indices(&session.report.table, &self.filter);
        }
    }

    /// Rates of the visible records.
    pub fn visible_rates(&self) -> Vec<f64> {
        match &self.session {
            Some(session) => session
                .records(&self.visible_indices)
                .map(|r| r.rate)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Summary metrics of the visible records; `None` when nothing is visible.
    pub fn summary(&self) -> Option<Summary> {
        stats::summarize(self.visible_rates())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::loader::{RequiredColumns, read_table};

    fn report() -> LoadReport {
        read_table(
            "Date,Region,Estimated Unemployment Rate (%)\n\
             31-01-2020,North,3.0\n\
             31-01-2020,South,4.0\n\
             29-02-2020,North,7.0\n\
             bad,North,9.0\n"
                .as_bytes(),
            &RequiredColumns::default(),
        )
        .unwrap()
    }

    #[test]
    fn filter_changes_visible_rows_and_summary() {
        let mut state = AppState::new(DatasetSource::default());
        state.set_report(report());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);

        state.set_filter(RegionFilter::Only("North".into()));
        assert_eq!(state.visible_indices, vec![0, 2]);
        let s = state.summary().unwrap();
        assert_eq!(s.mean_label(), "5.00%");

        state.set_filter(RegionFilter::Only("West".into()));
        assert!(state.visible_indices.is_empty());
        assert!(state.summary().is_none());

        state.set_filter(RegionFilter::All);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn load_error_clears_session() {
        let mut state = AppState::new(DatasetSource::default());
        state.set_report(report());

        state.apply_load_result(Err(LoadError::ArchiveNotFound {
            path: PathBuf::from("missing.zip"),
        }));
        assert!(state.session.is_none());
        assert!(state.visible_indices.is_empty());
        assert!(state.summary().is_none());
        assert!(state.status_message.unwrap().contains("missing.zip"));
    }

    #[test]
    fn new_report_resets_filter() {
        let mut state = AppState::new(DatasetSource::default());
        state.set_report(report());
        state.set_filter(RegionFilter::Only("South".into()));

        state.set_report(report());
        assert_eq!(state.filter, RegionFilter::All);
        assert_eq!(state.session.as_ref().unwrap().report.dropped.len(), 1);
    }
}
