//! SolarMon reporting library.
//!
//! Reading aggregation ([`analysis::aggregate`]), delimited-text export
//! ([`export::to_delimited_text`]) and paginated PDF export
//! ([`export::to_tabular_document`]) over the dashboard's record tables.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod export;
pub mod mock;
pub mod models;
pub mod report;
