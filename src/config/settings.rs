use crate::error::Result;
use crate::models::{default_ranges, RangeTable, StationRange};
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_COLUMN_SPARSITY_THRESHOLD, DEFAULT_NULL_MARKER,
    DEFAULT_ROW_SPARSITY_FRACTION, DEFAULT_STATIONS, DEFAULT_TIMESTAMP_COLUMN,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// What to do with a column that survives pruning but has no valid value left
/// to interpolate from or take a median of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyColumnPolicy {
    /// Remove the column from the cleaned sheet
    #[default]
    Drop,
    /// Fill every cell with 0.0
    ZeroFill,
    /// Leave the cells absent; writers emit blank cells
    KeepAbsent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CleanerConfig {
    #[validate(nested)]
    pub ranges: Vec<StationRange>,

    #[validate(range(min = 0.0, max = 1.0))]
    pub column_sparsity_threshold: f64,

    #[validate(range(min = 0.0, max = 1.0))]
    pub row_sparsity_fraction: f64,

    pub stations: Vec<String>,

    #[validate(length(min = 1))]
    pub timestamp_column: String,

    pub null_markers: Vec<String>,

    pub empty_column_policy: EmptyColumnPolicy,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            ranges: default_ranges(),
            column_sparsity_threshold: DEFAULT_COLUMN_SPARSITY_THRESHOLD,
            row_sparsity_fraction: DEFAULT_ROW_SPARSITY_FRACTION,
            stations: DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            null_markers: vec![DEFAULT_NULL_MARKER.to_string()],
            empty_column_policy: EmptyColumnPolicy::default(),
        }
    }
}

impl CleanerConfig {
    /// Load configuration from an optional file (TOML, YAML or JSON by
    /// extension) layered under `STATION_CLEANER_*` environment variables.
    /// Missing keys keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("stations")
                .with_list_parse_key("null_markers"),
        );

        let config: CleanerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn range_table(&self) -> RangeTable {
        RangeTable::from_ranges(&self.ranges)
    }

    /// Minimum non-absent cells a row needs to survive, for a given number of
    /// surviving columns
    pub fn min_valid_per_row(&self, column_count: usize) -> usize {
        (column_count as f64 * self.row_sparsity_fraction).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = CleanerConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.ranges.len(), 15);
        assert_eq!(config.stations.len(), 15);
        assert_eq!(config.stations[0], "SE");
        assert_eq!(config.stations[14], "NE3");
        assert_eq!(config.timestamp_column, "date");
        assert_eq!(config.null_markers, vec!["NULL".to_string()]);
        assert_eq!(config.empty_column_policy, EmptyColumnPolicy::Drop);
    }

    #[test]
    fn test_min_valid_per_row() {
        let config = CleanerConfig::default();

        assert_eq!(config.min_valid_per_row(0), 0);
        assert_eq!(config.min_valid_per_row(1), 0);
        assert_eq!(config.min_valid_per_row(5), 2);
        assert_eq!(config.min_valid_per_row(6), 3);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let config = CleanerConfig {
            column_sparsity_threshold: 1.5,
            ..CleanerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = CleanerConfig {
            ranges: vec![StationRange::new("BP", 1050.0, 850.0)],
            ..CleanerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(
            file,
            r#"
column_sparsity_threshold = 0.25
stations = ["SE", "CE"]
empty_column_policy = "zero-fill"

[[ranges]]
channel = "PM2.5"
min = 0
max = 300
"#
        )?;

        let config = CleanerConfig::load(Some(file.path()))?;

        assert_eq!(config.column_sparsity_threshold, 0.25);
        assert_eq!(config.row_sparsity_fraction, 0.5);
        assert_eq!(config.stations, vec!["SE".to_string(), "CE".to_string()]);
        assert_eq!(config.empty_column_policy, EmptyColumnPolicy::ZeroFill);
        assert_eq!(config.ranges, vec![StationRange::new("PM2.5", 0.0, 300.0)]);

        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_file() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "row_sparsity_fraction = 2.0")?;

        assert!(CleanerConfig::load(Some(file.path())).is_err());
        Ok(())
    }
}
