use std::path::Path;

use isotope_dashboard::config::DashboardConfig;
use isotope_dashboard::data::{
    self, apply_filter, slider_max, ChoroplethRow, CountryShare, Dataset, FilterSpec,
    IsotopeCount, IsotopeCountryEntry, MapPoint, MapViewport, Record, ReferenceTables,
};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Derived tables for the current filter
// ---------------------------------------------------------------------------

/// Everything the panels draw, recomputed from scratch on every change.
#[derive(Debug, Clone, Default)]
pub struct DerivedViews {
    pub filtered: Vec<Record>,
    pub map_points: Vec<MapPoint>,
    pub viewport: MapViewport,
    pub choropleth: Vec<ChoroplethRow>,
    pub top_countries: Vec<Record>,
    pub shares: Vec<CountryShare>,
    pub detail: Vec<Record>,
    /// Counted over the whole dataset, not the filtered view.
    pub isotope_counts: Vec<IsotopeCount>,
    pub matrix: Vec<IsotopeCountryEntry>,
}

impl DerivedViews {
    pub fn compute(dataset: &Dataset, filter: &FilterSpec, config: &DashboardConfig) -> Self {
        let filtered = apply_filter(&dataset.records, filter);
        let mut isotope_counts = data::isotope_frequency(&dataset.records);
        isotope_counts.truncate(config.top_isotopes);

        Self {
            map_points: data::map_points(&filtered, config.bubble_scale),
            viewport: data::map_viewport(&filtered),
            choropleth: data::choropleth_rows(&filtered),
            top_countries: data::top_n(&filtered, config.top_countries),
            shares: data::distribution_shares(&filtered),
            detail: data::detail_table(&filtered),
            isotope_counts,
            matrix: data::isotope_country_matrix(&filtered),
            filtered,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    Comparison,
    Isotopes,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Country placement used when normalising loaded files.
    pub tables: ReferenceTables,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Active filter parameters.
    pub filter: FilterSpec,

    /// Upper bound of the minimum-production slider.
    pub slider_max: f64,

    /// Derived tables for the current filter (cached).
    pub views: DerivedViews,

    /// Per-country colours.
    pub color_map: Option<ColorMap>,

    pub active_tab: Tab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            tables: ReferenceTables::builtin(),
            dataset: None,
            filter: FilterSpec::default(),
            slider_max: 0.0,
            views: DerivedViews::default(),
            color_map: None,
            active_tab: Tab::default(),
            status_message: None,
        }
    }

    /// Load a file, reporting failures in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match data::loader::load_dataset(path, &self.tables) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records from {} ({} countries)",
                    dataset.len(),
                    path.display(),
                    dataset.countries.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filter = FilterSpec::initial(&dataset, &self.config);
        self.slider_max = slider_max(&dataset, &self.config);
        self.color_map = Some(ColorMap::new(&dataset.countries));

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute every derived table after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.views = DerivedViews::compute(ds, &self.filter, &self.config);
            log::debug!(
                "Filter min={} countries={} → {} of {} records",
                self.filter.min_production,
                self.filter.selected_countries.len(),
                self.views.filtered.len(),
                ds.len()
            );
        }
    }

    pub fn set_min_production(&mut self, value: f64) {
        self.filter.min_production = value;
        self.refilter();
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        self.filter.toggle_country(country);
        self.refilter();
    }

    /// Select every country in the catalogue.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filter.select_all(ds);
            self.refilter();
        }
    }

    /// Deselect every country.
    pub fn select_none(&mut self) {
        self.filter.select_none();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isotope_dashboard::data::{build_dataset, RawRecord, RawValue};

    fn dataset() -> Dataset {
        let raws = vec![
            RawRecord::new("Belgium", "Mo-99, I-131", "2000"),
            RawRecord::new("Japan", "Ir-192", "50"),
            RawRecord::new("Chile", "Tc-99m, I-131", "700"),
            RawRecord::new("Iran", RawValue::Null, "NR"),
            RawRecord::new("USA", "Ir-192, Mo-99", "3000"),
            RawRecord::new("Korea", "I-131", "400"),
        ];
        build_dataset(raws, &ReferenceTables::builtin()).unwrap()
    }

    #[test]
    fn new_dataset_starts_with_first_five_countries() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.filter.selected_countries.len(), 5);
        assert!(!state.filter.is_selected("Korea"));
        assert_eq!(state.slider_max, 4000.0);
        // Japan (50) and Iran (0) fall under the default 100 TBq minimum.
        let countries: Vec<_> = state.views.filtered.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Belgium", "Chile", "USA"]);
        assert_eq!(state.views.top_countries[0].country, "USA");
    }

    #[test]
    fn isotope_counts_ignore_the_filter() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        let before = state.views.isotope_counts.clone();

        state.select_none();
        assert!(state.views.filtered.is_empty());
        assert!(state.views.matrix.is_empty());
        assert_eq!(state.views.isotope_counts, before);
        assert_eq!(before[0].isotope, "I-131");
        assert_eq!(before[0].count, 3);
    }

    #[test]
    fn filter_changes_recompute_views() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.select_all();
        state.set_min_production(0.0);
        assert_eq!(state.views.filtered.len(), 6);
        assert_eq!(state.views.matrix.len(), 8);

        state.toggle_country("USA");
        assert_eq!(state.views.filtered.len(), 5);
        let total: f64 = state.views.shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn viewport_follows_the_view_and_resets_when_empty() {
        let mut state = AppState::default();
        assert_eq!(state.views.viewport, MapViewport::default());

        state.set_dataset(dataset());
        assert_ne!(state.views.viewport, MapViewport::default());

        state.select_none();
        assert_eq!(
            state.views.viewport,
            MapViewport { latitude: 0.0, longitude: 0.0 }
        );
    }

    #[test]
    fn failed_load_keeps_previous_dataset_and_reports() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.load_path(Path::new("isotopes.xlsx"));
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(6));
        let message = state.status_message.as_deref().unwrap_or_default();
        assert!(message.contains("Unsupported file extension"), "{message}");
    }
}
