//! Derived tables drawn by the dashboard.
//!
//! Every function here is pure and takes the records it works on by slice,
//! so they can be called in any order on the same view. All of them accept
//! an empty view.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::model::Record;

// ---------------------------------------------------------------------------
// Output rows
// ---------------------------------------------------------------------------

/// One slice of the production distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShare {
    pub country: String,
    pub production_tbq: f64,
    /// Fraction of the view total in `[0, 1]` for non-negative data.
    pub share: f64,
}

/// How many times an isotope is listed across the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsotopeCount {
    pub isotope: String,
    pub count: usize,
}

/// One (isotope, country) cell of the production matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeCountryEntry {
    pub isotope: String,
    pub country: String,
    /// The whole production of the source record, not a per-isotope split.
    pub production: f64,
}

/// A bubble on the production map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub production_tbq: f64,
    pub isotopes: String,
}

/// Initial centre of the map. Defaults to `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MapViewport {
    pub latitude: f64,
    pub longitude: f64,
}

/// A row ready for an ISO3-keyed choropleth.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethRow {
    pub iso_code: String,
    pub country: String,
    pub production_tbq: f64,
    pub isotopes: String,
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Records ordered by production, highest first. Equal values keep their
/// input order, `-0.0` and `0.0` included.
pub fn detail_table(view: &[Record]) -> Vec<Record> {
    let mut ranked = view.to_vec();
    ranked.sort_by(|a, b| {
        b.production_tbq
            .partial_cmp(&a.production_tbq)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// The `n` largest producers, ordered as in [`detail_table`].
pub fn top_n(view: &[Record], n: usize) -> Vec<Record> {
    let mut ranked = detail_table(view);
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Each country's share of total production in the view. Rows for the same
/// country are summed; countries keep first-appearance order. A zero total
/// gives every country a zero share.
pub fn distribution_shares(view: &[Record]) -> Vec<CountryShare> {
    let mut shares: Vec<CountryShare> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in view {
        match index.get(rec.country.as_str()) {
            Some(&i) => shares[i].production_tbq += rec.production_tbq,
            None => {
                index.insert(&rec.country, shares.len());
                shares.push(CountryShare {
                    country: rec.country.clone(),
                    production_tbq: rec.production_tbq,
                    share: 0.0,
                });
            }
        }
    }

    let total: f64 = view.iter().map(|r| r.production_tbq).sum();
    if total != 0.0 {
        for s in &mut shares {
            s.share = s.production_tbq / total;
        }
    }
    shares
}

// ---------------------------------------------------------------------------
// Isotopes
// ---------------------------------------------------------------------------

/// Count isotope listings across `records`, most common first; ties keep
/// the order in which isotopes were first seen. An isotope listed twice in
/// one record counts twice.
///
/// The dashboard calls this on the whole dataset, not the filtered view.
pub fn isotope_frequency(records: &[Record]) -> Vec<IsotopeCount> {
    let mut counts: Vec<IsotopeCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for iso in records.iter().flat_map(|r| r.isotopes.iter()) {
        match index.get(iso.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(iso, counts.len());
                counts.push(IsotopeCount {
                    isotope: iso.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// One entry per (record, isotope) pair. Each entry carries the record's
/// full production, so a record with three isotopes contributes its total
/// three times.
pub fn isotope_country_matrix(view: &[Record]) -> Vec<IsotopeCountryEntry> {
    view.iter()
        .flat_map(|rec| {
            rec.isotopes.iter().map(move |iso| IsotopeCountryEntry {
                isotope: iso.clone(),
                country: rec.country.clone(),
                production: rec.production_tbq,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Bubbles for the scatter map, radius = production / `bubble_scale`.
pub fn map_points(view: &[Record], bubble_scale: f64) -> Vec<MapPoint> {
    view.iter()
        .map(|rec| MapPoint {
            country: rec.country.clone(),
            latitude: rec.latitude,
            longitude: rec.longitude,
            radius: rec.production_tbq / bubble_scale,
            production_tbq: rec.production_tbq,
            isotopes: rec.isotopes_label(),
        })
        .collect()
}

/// Mean position of the view, or `(0, 0)` when there is nothing to show.
/// Unplaced countries count at `(0, 0)`.
pub fn map_viewport(view: &[Record]) -> MapViewport {
    if view.is_empty() {
        return MapViewport::default();
    }
    let n = view.len() as f64;
    MapViewport {
        latitude: view.iter().map(|r| r.latitude).sum::<f64>() / n,
        longitude: view.iter().map(|r| r.longitude).sum::<f64>() / n,
    }
}

pub fn choropleth_rows(view: &[Record]) -> Vec<ChoroplethRow> {
    view.iter()
        .map(|rec| ChoroplethRow {
            iso_code: rec.iso_code.clone(),
            country: rec.country.clone(),
            production_tbq: rec.production_tbq,
            isotopes: rec.isotopes_label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, production: f64, isotopes: &[&str]) -> Record {
        Record {
            country: country.to_string(),
            production_tbq: production,
            isotopes: isotopes.iter().map(|s| s.to_string()).collect(),
            latitude: 0.0,
            longitude: 0.0,
            iso_code: String::new(),
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            record("Belgium", 2000.0, &["Mo-99", "I-131"]),
            record("Japan", 500.0, &["Ir-192"]),
            record("Chile", 500.0, &["Tc-99m", "I-131"]),
            record("Iran", 0.0, &[]),
            record("USA", 3000.0, &["Ir-192", "Mo-99", "I-131"]),
        ]
    }

    fn countries(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.country.as_str()).collect()
    }

    #[test]
    fn top_n_is_descending_and_stable() {
        let view = sample();
        let top = top_n(&view, 4);
        assert_eq!(countries(&top), vec!["USA", "Belgium", "Japan", "Chile"]);
        assert!(top.windows(2).all(|w| w[0].production_tbq >= w[1].production_tbq));
        // input untouched
        assert_eq!(countries(&view), vec!["Belgium", "Japan", "Chile", "Iran", "USA"]);
    }

    #[test]
    fn top_n_treats_signed_zeros_as_a_tie() {
        let view = vec![
            record("A", -0.0, &["Mo-99"]),
            record("B", 0.0, &["Mo-99"]),
            record("C", 5.0, &[]),
        ];
        assert_eq!(countries(&top_n(&view, 3)), vec!["C", "A", "B"]);
        assert_eq!(countries(&detail_table(&view[..2])), vec!["A", "B"]);
    }

    #[test]
    fn top_n_larger_than_view() {
        assert_eq!(top_n(&sample(), 10).len(), 5);
        assert!(top_n(&[], 10).is_empty());
        assert!(top_n(&sample(), 0).is_empty());
    }

    #[test]
    fn detail_table_keeps_every_row() {
        let table = detail_table(&sample());
        assert_eq!(countries(&table), vec!["USA", "Belgium", "Japan", "Chile", "Iran"]);
    }

    #[test]
    fn shares_sum_to_one() {
        let shares = distribution_shares(&sample());
        let total: f64 = shares.iter().map(|s| s.share).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(shares[0].country, "Belgium");
        assert!((shares[0].share - 2000.0 / 6000.0).abs() < 1e-12);
    }

    #[test]
    fn shares_merge_repeated_countries() {
        let view = vec![
            record("Belgium", 100.0, &[]),
            record("Japan", 200.0, &[]),
            record("Belgium", 100.0, &[]),
        ];
        let shares = distribution_shares(&view);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].country, "Belgium");
        assert_eq!(shares[0].production_tbq, 200.0);
        assert!((shares[0].share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_total_gives_zero_shares() {
        let view = vec![record("Iran", 0.0, &[]), record("Syria", 0.0, &[])];
        let shares = distribution_shares(&view);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.share == 0.0));
        assert!(distribution_shares(&[]).is_empty());
    }

    #[test]
    fn frequency_counts_every_listing() {
        let records = vec![
            record("Belgium", 1.0, &["I-131", "I-131", "Mo-99"]),
            record("Japan", 1.0, &["Mo-99", "Ir-192"]),
            record("Chile", 1.0, &["I-131"]),
        ];
        let counts = isotope_frequency(&records);
        assert_eq!(
            counts,
            vec![
                IsotopeCount { isotope: "I-131".into(), count: 3 },
                IsotopeCount { isotope: "Mo-99".into(), count: 2 },
                IsotopeCount { isotope: "Ir-192".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn frequency_ties_keep_first_seen_order() {
        let records = vec![
            record("A", 1.0, &["F-18", "Co-60"]),
            record("B", 1.0, &["Tc-99m"]),
        ];
        let names: Vec<_> = isotope_frequency(&records)
            .into_iter()
            .map(|c| c.isotope)
            .collect();
        assert_eq!(names, vec!["F-18", "Co-60", "Tc-99m"]);
        assert!(isotope_frequency(&[]).is_empty());
    }

    #[test]
    fn matrix_attributes_full_production_to_each_isotope() {
        let view = vec![record("Belgium", 2000.0, &["Mo-99", "I-131"])];
        let matrix = isotope_country_matrix(&view);
        assert_eq!(
            matrix,
            vec![
                IsotopeCountryEntry {
                    isotope: "Mo-99".into(),
                    country: "Belgium".into(),
                    production: 2000.0,
                },
                IsotopeCountryEntry {
                    isotope: "I-131".into(),
                    country: "Belgium".into(),
                    production: 2000.0,
                },
            ]
        );
    }

    #[test]
    fn matrix_size_is_total_isotope_listings() {
        let view = sample();
        let expected: usize = view.iter().map(|r| r.isotopes.len()).sum();
        assert_eq!(isotope_country_matrix(&view).len(), expected);
        assert!(isotope_country_matrix(&[]).is_empty());
    }

    #[test]
    fn map_points_scale_radius() {
        let mut rec = record("Belgium", 2000.0, &["Mo-99", "I-131"]);
        rec.latitude = 50.5;
        rec.longitude = 4.47;
        let points = map_points(&[rec], 20.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].radius, 100.0);
        assert_eq!(points[0].isotopes, "Mo-99, I-131");
        assert_eq!((points[0].latitude, points[0].longitude), (50.5, 4.47));
    }

    #[test]
    fn viewport_is_mean_position() {
        let mut a = record("A", 1.0, &[]);
        a.latitude = 10.0;
        a.longitude = -20.0;
        let mut b = record("B", 1.0, &[]);
        b.latitude = 30.0;
        b.longitude = 40.0;
        assert_eq!(
            map_viewport(&[a, b]),
            MapViewport { latitude: 20.0, longitude: 10.0 }
        );
        assert_eq!(
            map_viewport(&[]),
            MapViewport { latitude: 0.0, longitude: 0.0 }
        );
    }

    #[test]
    fn choropleth_rows_carry_iso_code() {
        let mut rec = record("Belgium", 2000.0, &["Mo-99"]);
        rec.iso_code = "BEL".to_string();
        let rows = choropleth_rows(&[rec, record("Atlantis", 5.0, &[])]);
        assert_eq!(rows[0].iso_code, "BEL");
        assert_eq!(rows[1].iso_code, "");
        assert_eq!(rows[1].isotopes, "");
    }
}
