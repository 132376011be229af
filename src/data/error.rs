use thiserror::Error;

/// Structural problems with the raw table. Data-quality problems never end up
/// here; they are resolved to defaults by the normaliser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetError {
    #[error("row {row}: 'Country' is empty")]
    MissingCountry { row: usize },
}
