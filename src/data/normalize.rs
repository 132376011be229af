use super::error::DatasetError;
use super::model::{Dataset, RawRecord, RawValue, Record};
use super::reference::ReferenceTables;

// ---------------------------------------------------------------------------
// Per-field default policy
// ---------------------------------------------------------------------------

/// Production in TBq. Unparseable values (`NR`, blanks, NaN) become `0.0`;
/// any parsed number is kept as it is, negatives and infinities included.
pub fn parse_production(value: &RawValue) -> f64 {
    match value.as_f64() {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Comma-separated isotope list, trimmed, empty pieces dropped.
/// Anything that is not a string cell yields no isotopes.
pub fn split_isotopes(value: &RawValue) -> Vec<String> {
    match value.as_str() {
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|iso| !iso.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Row normaliser
// ---------------------------------------------------------------------------

/// Clean one raw row. Never fails: malformed cells degrade to defaults.
pub fn normalize_record(raw: &RawRecord, tables: &ReferenceTables) -> Record {
    let production_tbq = parse_production(&raw.total_production_tbq);
    if raw.total_production_tbq.as_f64().map_or(true, f64::is_nan) {
        log::debug!(
            "{}: production '{}' not reported, using 0",
            raw.country,
            raw.total_production_tbq
        );
    }

    let (latitude, longitude) = tables.coordinates_of(&raw.country);
    let iso_code = tables.iso_code_of(&raw.country).to_string();
    if iso_code.is_empty() {
        log::debug!("{}: no reference entry, placing at (0, 0)", raw.country);
    }

    Record {
        country: raw.country.clone(),
        production_tbq,
        isotopes: split_isotopes(&raw.major_isotopes),
        latitude,
        longitude,
        iso_code,
    }
}

// ---------------------------------------------------------------------------
// Dataset builder
// ---------------------------------------------------------------------------

/// Normalise every row in order. The only failure is a row without a
/// country, since nothing downstream can key on it.
pub fn build_dataset(
    raw_records: Vec<RawRecord>,
    tables: &ReferenceTables,
) -> Result<Dataset, DatasetError> {
    let records = raw_records
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            if raw.country.trim().is_empty() {
                return Err(DatasetError::MissingCountry { row });
            }
            Ok(normalize_record(raw, tables))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::builtin()
    }

    #[test]
    fn not_reported_row_normalises_to_defaults() {
        let raw = RawRecord::new("X", RawValue::Null, "NR");
        let rec = normalize_record(&raw, &tables());
        assert_eq!(
            rec,
            Record {
                country: "X".to_string(),
                production_tbq: 0.0,
                isotopes: Vec::new(),
                latitude: 0.0,
                longitude: 0.0,
                iso_code: String::new(),
            }
        );
    }

    #[test]
    fn unparseable_production_is_exactly_zero() {
        for value in [
            RawValue::from("NR"),
            RawValue::from(""),
            RawValue::from("n/a"),
            RawValue::from("1,200"),
            RawValue::from("NaN"),
            RawValue::Float(f64::NAN),
            RawValue::Bool(false),
            RawValue::Null,
        ] {
            assert_eq!(parse_production(&value), 0.0, "value {value:?}");
        }
    }

    #[test]
    fn numeric_production_passes_through() {
        assert_eq!(parse_production(&RawValue::from("2000")), 2000.0);
        assert_eq!(parse_production(&RawValue::from(" 12.5 ")), 12.5);
        assert_eq!(parse_production(&RawValue::Integer(300)), 300.0);
        assert_eq!(parse_production(&RawValue::from("-4")), -4.0);
    }

    #[test]
    fn infinite_production_is_kept() {
        assert_eq!(parse_production(&RawValue::from("inf")), f64::INFINITY);
        assert_eq!(parse_production(&RawValue::from("-inf")), f64::NEG_INFINITY);
        assert_eq!(parse_production(&RawValue::Float(f64::INFINITY)), f64::INFINITY);
    }

    #[test]
    fn isotopes_are_trimmed_and_ordered() {
        let isotopes = split_isotopes(&RawValue::from(" Mo-99 ,I-131,  Ir-192"));
        assert_eq!(isotopes, vec!["Mo-99", "I-131", "Ir-192"]);
    }

    #[test]
    fn empty_isotope_segments_are_dropped() {
        assert_eq!(split_isotopes(&RawValue::from("Mo-99,, ,I-131,")), vec!["Mo-99", "I-131"]);
        assert!(split_isotopes(&RawValue::from("")).is_empty());
        assert!(split_isotopes(&RawValue::from(" , ")).is_empty());
    }

    #[test]
    fn non_string_isotope_field_yields_nothing() {
        assert!(split_isotopes(&RawValue::Null).is_empty());
        assert!(split_isotopes(&RawValue::Float(99.0)).is_empty());
        assert!(split_isotopes(&RawValue::Integer(1)).is_empty());
    }

    #[test]
    fn repeated_isotopes_are_kept() {
        assert_eq!(split_isotopes(&RawValue::from("I-131, I-131")), vec!["I-131", "I-131"]);
    }

    #[test]
    fn known_country_is_located() {
        let raw = RawRecord::new("Belgium", "Mo-99, I-131", "2000");
        let rec = normalize_record(&raw, &tables());
        assert_eq!(rec.production_tbq, 2000.0);
        assert_eq!(rec.isotopes, vec!["Mo-99", "I-131"]);
        assert_eq!((rec.latitude, rec.longitude), (50.50, 4.47));
        assert_eq!(rec.iso_code, "BEL");
    }

    #[test]
    fn country_names_are_not_corrected() {
        let raw = RawRecord::new("belgium", "Mo-99", "10");
        let rec = normalize_record(&raw, &tables());
        assert_eq!(rec.country, "belgium");
        assert_eq!(rec.iso_code, "");
        assert_eq!((rec.latitude, rec.longitude), (0.0, 0.0));
    }

    #[test]
    fn builder_preserves_order_and_cardinality() {
        let raws = vec![
            RawRecord::new("Japan", "Ir-192", "500"),
            RawRecord::new("Belgium", "Mo-99", "NR"),
            RawRecord::new("Japan", RawValue::Null, "20"),
        ];
        let ds = build_dataset(raws, &tables()).unwrap();
        assert_eq!(ds.len(), 3);
        let countries: Vec<_> = ds.records.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(countries, vec!["Japan", "Belgium", "Japan"]);
        assert_eq!(ds.records[1].production_tbq, 0.0);
        assert_eq!(ds.countries, vec!["Japan", "Belgium"]);
    }

    #[test]
    fn builder_rejects_row_without_country() {
        let raws = vec![
            RawRecord::new("Japan", "Ir-192", "500"),
            RawRecord::new("  ", "Mo-99", "10"),
        ];
        let err = build_dataset(raws, &tables()).unwrap_err();
        assert_eq!(err, DatasetError::MissingCountry { row: 1 });
        assert_eq!(err.to_string(), "row 1: 'Country' is empty");
    }

    #[test]
    fn builder_accepts_empty_input() {
        let ds = build_dataset(Vec::new(), &tables()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.countries.is_empty());
    }
}
