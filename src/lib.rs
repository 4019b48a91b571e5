pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use config::{CleanerConfig, EmptyColumnPolicy};
pub use error::{CleaningError, Result};
pub use models::{CleanedSheet, RawSheet, RawValue, StationRange};
pub use processors::{BatchCleaner, CleaningReport, TableCleaner};
