use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::color::ColorMap;
use crate::data::aggregate::{year_options, YearBound};
use crate::data::filter::{filter, FilterCriteria, FilteredView};
use crate::data::loader::{load_file, LoadError};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Data source tracking (reload)
// ---------------------------------------------------------------------------

/// The file the current dataset came from.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub path: PathBuf,
    modified: Option<SystemTime>,
}

impl DataSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            modified: modified_time(path),
        }
    }

    /// Whether the file's modification time moved since the last call.
    fn poll_changed(&mut self) -> bool {
        let modified = modified_time(&self.path);
        if modified.is_some() && modified != self.modified {
            self.modified = modified;
            true
        } else {
            false
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The categorical filters offered as multi-selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Genre,
    Rating,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Immutable once loaded; replaced wholesale on reload.
    pub dataset: Arc<Dataset>,

    /// Where `dataset` was loaded from, if it came from a file.
    pub source: Option<DataSource>,

    /// Current selection.
    pub criteria: FilterCriteria,

    /// Records passing the current criteria (cached).
    pub view: FilteredView,

    /// Choices for the "Years since" picker (before `till_year`).
    pub start_year_options: Vec<i32>,

    /// Choices for the "Years until" picker (after `from_year`).
    pub end_year_options: Vec<i32>,

    pub platform_colors: ColorMap,
    pub genre_colors: ColorMap,

    /// Whether the records table is visible.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Dataset, source: Option<DataSource>) -> Self {
        let dataset = Arc::new(dataset);
        let criteria = FilterCriteria::initial(dataset.domains());
        let view = filter(&dataset, &criteria);
        let domains = dataset.domains();
        let start_year_options = year_options(criteria.till_year, &domains.years, YearBound::LessThan);
        let end_year_options =
            year_options(criteria.from_year, &domains.years, YearBound::GreaterThan);
        let platform_colors = ColorMap::new(&domains.platforms);
        let genre_colors = ColorMap::new(&domains.genres);
        Self {
            dataset,
            source,
            criteria,
            view,
            start_year_options,
            end_year_options,
            platform_colors,
            genre_colors,
            show_table: false,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset criteria and colours.
    pub fn set_dataset(&mut self, dataset: Dataset, source: Option<DataSource>) {
        *self = Self {
            show_table: self.show_table,
            ..Self::new(dataset, source)
        };
    }

    /// Recompute the view and both year pickers after a criteria change.
    pub fn refilter(&mut self) {
        self.view = filter(&self.dataset, &self.criteria);
        let years = &self.dataset.domains().years;
        self.start_year_options = year_options(self.criteria.till_year, years, YearBound::LessThan);
        self.end_year_options =
            year_options(self.criteria.from_year, years, YearBound::GreaterThan);
        log::debug!(
            "{} of {} games match {:?}",
            self.view.len(),
            self.dataset.len(),
            self.criteria
        );
    }

    pub fn set_from_year(&mut self, year: i32) {
        self.criteria.from_year = year;
        self.refilter();
    }

    pub fn set_till_year(&mut self, year: i32) {
        self.criteria.till_year = year;
        self.refilter();
    }

    /// All values of a facet, in the order the controls list them.
    pub fn facet_values(&self, facet: Facet) -> &[String] {
        let domains = self.dataset.domains();
        match facet {
            Facet::Genre => &domains.genres,
            Facet::Rating => &domains.ratings,
        }
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        match facet {
            Facet::Genre => self.criteria.genres.contains(value),
            Facet::Rating => self.criteria.ratings.contains(value),
        }
    }

    fn selection_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::Genre => &mut self.criteria.genres,
            Facet::Rating => &mut self.criteria.ratings,
        }
    }

    /// Toggle a single value in a facet's selection.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let selected = self.selection_mut(facet);
        if !selected.remove(value) {
            selected.insert(value.to_owned());
        }
        self.refilter();
    }

    /// Select every value of a facet.
    pub fn select_all(&mut self, facet: Facet) {
        let all: BTreeSet<String> = self.facet_values(facet).iter().cloned().collect();
        *self.selection_mut(facet) = all;
        self.refilter();
    }

    /// Deselect every value of a facet.
    pub fn select_none(&mut self, facet: Facet) {
        self.selection_mut(facet).clear();
        self.refilter();
    }

    /// Load `path` and make it the current dataset.
    ///
    /// On failure the previous dataset stays active and the error is shown.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                let source = DataSource::new(path);
                self.set_dataset(dataset, Some(source));
            }
            Err(err) => self.report_load_error(path, &err),
        }
    }

    /// Reload the current source file, if any.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.as_ref().map(|s| s.path.clone()) {
            log::info!("Reloading {}", path.display());
            self.open(&path);
        }
    }

    /// Reload when the source file changed on disk.  Returns whether a
    /// reload was attempted.
    pub fn poll_reload(&mut self) -> bool {
        let changed = self.source.as_mut().is_some_and(DataSource::poll_changed);
        if changed {
            self.reload();
        }
        changed
    }

    fn report_load_error(&mut self, path: &Path, err: &LoadError) {
        log::error!("Failed to load {}: {err}", path.display());
        self.status_message = Some(format!("Error: {err}"));
    }
}
