use std::collections::BTreeSet;

use super::model::{Dataset, Record};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Filter predicate: minimum production and selected countries
// ---------------------------------------------------------------------------

/// Active filter parameters. A record passes when its production is at least
/// `min_production` and its country is selected. An empty selection hides
/// everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub min_production: f64,
    pub selected_countries: BTreeSet<String>,
}

impl FilterSpec {
    pub fn new<I, S>(min_production: f64, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min_production,
            selected_countries: countries.into_iter().map(Into::into).collect(),
        }
    }

    /// Start-up filter: the configured minimum and the first few countries
    /// of the catalogue.
    pub fn initial(dataset: &Dataset, config: &DashboardConfig) -> Self {
        Self::new(
            config.default_min_production,
            dataset
                .countries
                .iter()
                .take(config.default_country_count)
                .cloned(),
        )
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.production_tbq >= self.min_production
            && self.selected_countries.contains(&record.country)
    }

    pub fn is_selected(&self, country: &str) -> bool {
        self.selected_countries.contains(country)
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selected_countries.remove(country) {
            self.selected_countries.insert(country.to_string());
        }
    }

    pub fn select_all(&mut self, dataset: &Dataset) {
        self.selected_countries = dataset.countries.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected_countries.clear();
    }
}

/// Records passing `spec`, in their original order.
pub fn apply_filter(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    records
        .iter()
        .filter(|rec| spec.matches(rec))
        .cloned()
        .collect()
}

/// Upper bound of the minimum-production slider: the largest production
/// rounded down to a whole TBq, plus the configured headroom.
pub fn slider_max(dataset: &Dataset, config: &DashboardConfig) -> f64 {
    dataset.max_production().floor() + config.slider_headroom
}
