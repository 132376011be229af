//! Data pipeline behind the global isotope production dashboard.
//!
//! [`data`] turns a raw per-country production table into the tables a
//! presentation layer draws: map points, choropleth rows, rankings,
//! production shares, isotope counts and the isotope×country matrix.
//! [`config`] holds the dashboard's tunable defaults.

pub mod config;
pub mod data;
