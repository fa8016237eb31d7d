//! Temperature series analysis: unit conversion, descriptive statistics,
//! extremum lookup, and measurement-file ingestion.

pub mod convert;
pub mod error;
pub mod extrema;
pub mod generate;
pub mod ingest;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod series;
pub mod statistics;
pub mod table;

pub use convert::{
    celsius_to_fahrenheit, celsius_to_kelvin, convert, fahrenheit_to_celsius, kelvin_to_celsius,
    Unit,
};
pub use error::{AnalysisError, IngestError};
pub use extrema::{locate_extrema, Extremum, ExtremumResult};
pub use pipeline::{analyze, analyze_all, AnalysisReport};
pub use series::{Sample, TemperatureSeries};
pub use statistics::{compute_statistics, StatisticsSummary};
