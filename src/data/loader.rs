use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, RawRecord, RawValue};
use super::normalize::build_dataset;
use super::reference::ReferenceTables;

/// Column names the source file must provide. Matched exactly.
pub const COUNTRY_COLUMN: &str = "Country";
pub const ISOTOPES_COLUMN: &str = "Major_Isotopes";
pub const PRODUCTION_COLUMN: &str = "Total_Production_TBq";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalise a production table in one go.
pub fn load_dataset(path: &Path, tables: &ReferenceTables) -> Result<Dataset> {
    let raw = load_file(path)?;
    let dataset = build_dataset(raw, tables)
        .with_context(|| format!("building dataset from {}", path.display()))?;
    Ok(dataset)
}

/// Read raw rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Country`, `Major_Isotopes`, `Total_Production_TBq`
/// * `.json`    – `[{ "Country": ..., "Major_Isotopes": ..., "Total_Production_TBq": ... }, ...]`
/// * `.parquet` – the same three columns, string or numeric
pub fn load_file(path: &Path) -> Result<Vec<RawRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every cell is kept as text; empty cells become [`RawValue::Null`] the way
/// a missing value would.
fn load_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let country_idx = column(COUNTRY_COLUMN)?;
    let isotopes_idx = column(ISOTOPES_COLUMN)?;
    let production_idx = column(PRODUCTION_COLUMN)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| csv_cell(record.get(idx).unwrap_or(""));

        rows.push(RawRecord {
            country: record.get(country_idx).unwrap_or("").to_string(),
            major_isotopes: cell(isotopes_idx),
            total_production_tbq: cell(production_idx),
        });
    }
    Ok(rows)
}

fn csv_cell(s: &str) -> RawValue {
    if s.is_empty() {
        RawValue::Null
    } else {
        RawValue::String(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Country": "Belgium", "Major_Isotopes": "Mo-99, I-131", "Total_Production_TBq": 2000 },
///   { "Country": "Iran", "Major_Isotopes": null, "Total_Production_TBq": "NR" }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<RawRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRecord> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;

            let country = obj
                .get(COUNTRY_COLUMN)
                .and_then(JsonValue::as_str)
                .with_context(|| format!("Row {i}: missing or non-string '{COUNTRY_COLUMN}'"))?;

            Ok(RawRecord {
                country: country.to_string(),
                major_isotopes: json_to_raw(obj.get(ISOTOPES_COLUMN)),
                total_production_tbq: json_to_raw(obj.get(PRODUCTION_COLUMN)),
            })
        })
        .collect()
}

fn json_to_raw(val: Option<&JsonValue>) -> RawValue {
    match val {
        Some(JsonValue::String(s)) => RawValue::String(s.clone()),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        Some(JsonValue::Bool(b)) => RawValue::Bool(*b),
        Some(JsonValue::Null) | None => RawValue::Null,
        // Arrays and objects are not meaningful cells.
        Some(_) => RawValue::Null,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the three source columns.
///
/// `Country` must be a string column; the other two may be strings or
/// numbers. Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let country_col = batch.column(column(COUNTRY_COLUMN)?);
        let isotopes_col = batch.column(column(ISOTOPES_COLUMN)?);
        let production_col = batch.column(column(PRODUCTION_COLUMN)?);

        for row in 0..batch.num_rows() {
            let country = match extract_raw_value(country_col, row) {
                RawValue::String(s) => s,
                other => bail!("Row {row}: '{COUNTRY_COLUMN}' is {other}, expected a string"),
            };
            rows.push(RawRecord {
                country,
                major_isotopes: extract_raw_value(isotopes_col, row),
                total_production_tbq: extract_raw_value(production_col, row),
            });
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row. Column types
/// with no sensible cell meaning come back as `Null`.
fn extract_raw_value(col: &Arc<dyn Array>, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(RawValue::Null, |a| RawValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .map_or(RawValue::Null, |a| RawValue::String(a.value(row).to_string())),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row) as i64)),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(RawValue::Null, |a| RawValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row) as f64)),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(RawValue::Null, |a| RawValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(RawValue::Null, |a| RawValue::Bool(a.value(row))),
        _ => RawValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_rows(text: &str) -> Result<Vec<RawRecord>> {
        read_csv(csv::Reader::from_reader(text.as_bytes()))
    }

    #[test]
    fn csv_cells_are_text_and_blanks_are_null() {
        let rows = csv_rows(
            "Country,Major_Isotopes,Total_Production_TBq\n\
             Belgium,\"Mo-99, I-131\",2000\n\
             Iran,,NR\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawRecord::new("Belgium", "Mo-99, I-131", "2000"));
        assert_eq!(rows[1], RawRecord::new("Iran", RawValue::Null, "NR"));
    }

    #[test]
    fn csv_columns_can_be_reordered_or_extra() {
        let rows = csv_rows(
            "Year,Total_Production_TBq,Country,Major_Isotopes\n\
             2002,15,Japan,Ir-192\n",
        )
        .unwrap();
        assert_eq!(rows[0], RawRecord::new("Japan", "Ir-192", "15"));
    }

    #[test]
    fn csv_header_names_are_case_sensitive() {
        let err = csv_rows("country,Major_Isotopes,Total_Production_TBq\nJapan,Ir-192,15\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("CSV missing 'Country' column"));
    }

    #[test]
    fn csv_ragged_row_is_structural_error() {
        let err = csv_rows("Country,Major_Isotopes,Total_Production_TBq\nJapan,Ir-192\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 0"));
    }

    #[test]
    fn json_keeps_native_types() {
        let rows = parse_json(
            r#"[
                {"Country": "Belgium", "Major_Isotopes": "Mo-99, I-131", "Total_Production_TBq": 2000},
                {"Country": "X", "Major_Isotopes": null, "Total_Production_TBq": "NR"},
                {"Country": "Y", "Total_Production_TBq": 12.5}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].total_production_tbq, RawValue::Integer(2000));
        assert_eq!(rows[1], RawRecord::new("X", RawValue::Null, "NR"));
        assert_eq!(rows[2].major_isotopes, RawValue::Null);
        assert_eq!(rows[2].total_production_tbq, RawValue::Float(12.5));
    }

    #[test]
    fn json_structural_errors() {
        assert!(parse_json(r#"{"Country": "X"}"#).is_err());
        let err = parse_json(r#"[1]"#).unwrap_err();
        assert!(err.to_string().contains("Row 0 is not a JSON object"));
        let err = parse_json(r#"[{"Major_Isotopes": "Mo-99"}]"#).unwrap_err();
        assert!(err.to_string().contains("'Country'"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("isotopes.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }
}
