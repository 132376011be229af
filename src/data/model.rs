use std::fmt;

// ---------------------------------------------------------------------------
// RawValue – a single cell as it came out of the source file
// ---------------------------------------------------------------------------

/// A loosely-typed source cell. CSV cells arrive as text, JSON and Parquet
/// cells keep their native type; missing or empty cells are `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(s) => write!(f, "{s}"),
            RawValue::Integer(i) => write!(f, "{i}"),
            RawValue::Float(v) => write!(f, "{v}"),
            RawValue::Bool(b) => write!(f, "{b}"),
            RawValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl RawValue {
    /// Text content, only for string cells.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric interpretation: native numbers as-is, strings parsed after
    /// trimming. Anything else (including `NR`) is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Float(v) => Some(*v),
            RawValue::Integer(i) => Some(*i as f64),
            RawValue::String(s) => s.trim().parse::<f64>().ok(),
            RawValue::Bool(_) | RawValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row of the source table
// ---------------------------------------------------------------------------

/// One row of the source table. Field names in the file are
/// `Country`, `Major_Isotopes` and `Total_Production_TBq`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub country: String,
    pub major_isotopes: RawValue,
    pub total_production_tbq: RawValue,
}

impl RawRecord {
    pub fn new(
        country: impl Into<String>,
        major_isotopes: impl Into<RawValue>,
        total_production_tbq: impl Into<RawValue>,
    ) -> Self {
        Self {
            country: country.into(),
            major_isotopes: major_isotopes.into(),
            total_production_tbq: total_production_tbq.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one normalised row
// ---------------------------------------------------------------------------

/// A cleaned row: production is always a number, isotopes are split, and
/// the country has been placed via the reference tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: String,
    pub production_tbq: f64,
    pub isotopes: Vec<String>,
    /// `0.0` when the country has no reference entry.
    pub latitude: f64,
    /// `0.0` when the country has no reference entry.
    pub longitude: f64,
    /// Empty when the country has no reference entry.
    pub iso_code: String,
}

impl Record {
    /// Isotopes joined back into a display label, e.g. `"Mo-99, I-131"`.
    pub fn isotopes_label(&self) -> String {
        self.isotopes.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Dataset – the canonical, unfiltered table
// ---------------------------------------------------------------------------

/// All normalised records plus the country catalogue used by the filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Records in source order.
    pub records: Vec<Record>,
    /// Distinct countries in order of first appearance.
    pub countries: Vec<String>,
}

impl Dataset {
    /// Build the country catalogue from the records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut countries: Vec<String> = Vec::new();
        for rec in &records {
            if !countries.contains(&rec.country) {
                countries.push(rec.country.clone());
            }
        }
        Dataset { records, countries }
    }

    /// Largest finite production value, `0.0` for an empty dataset.
    /// Infinite cells are skipped so the slider keeps a usable range.
    pub fn max_production(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.production_tbq)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
