/// Data layer: reference tables, loading, normalisation, filtering and
/// the derived tables the dashboard draws.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRecord>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐     ┌───────────┐
///   │ normalize  │◀────│ reference  │  country → lat/lon, ISO3
///   └───────────┘     └───────────┘
///        │
///        ▼
///   ┌─────────┐
///   │ Dataset  │  Vec<Record>, country catalogue
///   └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  min production + selected countries → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  ranking, shares, isotope counts, matrix, map rows
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod reference;

pub use aggregate::{
    choropleth_rows, detail_table, distribution_shares, isotope_country_matrix,
    isotope_frequency, map_points, map_viewport, top_n, ChoroplethRow, CountryShare,
    IsotopeCount, IsotopeCountryEntry, MapPoint, MapViewport,
};
pub use error::DatasetError;
pub use filter::{apply_filter, slider_max, FilterSpec};
pub use model::{Dataset, RawRecord, RawValue, Record};
pub use normalize::{build_dataset, normalize_record};
pub use reference::{Location, ReferenceTables};
