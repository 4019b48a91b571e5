use crate::config::{CleanerConfig, EmptyColumnPolicy};
use crate::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use validator::Validate;

#[derive(Parser)]
#[command(name = "station-cleaner")]
#[command(about = "Clean multi-station air-quality and meteorological workbooks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean every station sheet and write the cleaned dataset
    Clean {
        #[arg(
            short,
            long,
            help = "Input workbook, or a directory of {station}.csv files"
        )]
        input: PathBuf,

        #[arg(
            short,
            long,
            help = "Output .xlsx workbook, or a directory for CSV output [default: {input}_clean.xlsx]"
        )]
        output: Option<PathBuf>,

        #[arg(long, help = "Write the cleaning report as JSON")]
        report: Option<PathBuf>,

        #[arg(short, long, help = "Suppress progress and summary output")]
        quiet: bool,

        #[command(flatten)]
        options: CleaningOptions,
    },

    /// Run the cleaning pipeline and print the report without writing output
    Validate {
        #[arg(
            short,
            long,
            help = "Input workbook, or a directory of {station}.csv files"
        )]
        input: PathBuf,

        #[arg(long, help = "Write the cleaning report as JSON")]
        report: Option<PathBuf>,

        #[command(flatten)]
        options: CleaningOptions,
    },

    /// Print the effective physical range table
    Ranges {
        #[arg(short, long, help = "Configuration file (TOML, YAML or JSON)")]
        config: Option<PathBuf>,
    },
}

/// Pipeline settings shared by `clean` and `validate`; flags override the
/// configuration file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct CleaningOptions {
    #[arg(short, long, help = "Configuration file (TOML, YAML or JSON)")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Comma-separated station sheets to process"
    )]
    pub stations: Option<Vec<String>>,

    #[arg(long, conflicts_with = "stations", help = "Process every sheet in the input")]
    pub all_sheets: bool,

    #[arg(long, help = "Minimum fraction of valid values a column needs [default: 0.10]")]
    pub column_threshold: Option<f64>,

    #[arg(
        long,
        help = "Fraction of columns a row needs valid, rounded down [default: 0.5]"
    )]
    pub row_fraction: Option<f64>,

    #[arg(long, value_enum, help = "Handling of columns with no valid value left [default: drop]")]
    pub empty_column_policy: Option<EmptyColumnPolicy>,

    #[arg(long, help = "Name of the timestamp column [default: date]")]
    pub timestamp_column: Option<String>,

    #[arg(long, default_value = "1", help = "Cleaning threads (0 = one per CPU)")]
    pub max_workers: usize,
}

impl CleaningOptions {
    /// Load the configuration and apply flag overrides on top
    pub fn resolve_config(&self) -> Result<CleanerConfig> {
        self.apply_overrides(CleanerConfig::load(self.config.as_deref())?)
    }

    fn apply_overrides(&self, mut config: CleanerConfig) -> Result<CleanerConfig> {
        if let Some(stations) = &self.stations {
            config.stations = stations.clone();
        }
        if let Some(threshold) = self.column_threshold {
            config.column_sparsity_threshold = threshold;
        }
        if let Some(fraction) = self.row_fraction {
            config.row_sparsity_fraction = fraction;
        }
        if let Some(policy) = self.empty_column_policy {
            config.empty_column_policy = policy;
        }
        if let Some(column) = &self.timestamp_column {
            config.timestamp_column = column.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_command() {
        let cli = Cli::try_parse_from([
            "station-cleaner",
            "clean",
            "-i",
            "stations.xlsx",
            "--stations",
            "SE,CE",
            "--column-threshold",
            "0.2",
            "--empty-column-policy",
            "zero-fill",
        ])
        .unwrap();

        match cli.command {
            Commands::Clean { input, options, .. } => {
                assert_eq!(input, PathBuf::from("stations.xlsx"));
                assert_eq!(
                    options.stations,
                    Some(vec!["SE".to_string(), "CE".to_string()])
                );

                let config = options.apply_overrides(CleanerConfig::default()).unwrap();
                assert_eq!(config.stations, vec!["SE".to_string(), "CE".to_string()]);
                assert_eq!(config.column_sparsity_threshold, 0.2);
                assert_eq!(config.empty_column_policy, EmptyColumnPolicy::ZeroFill);
            }
            _ => panic!("expected clean command"),
        }
    }

    #[test]
    fn test_invalid_override_rejected() {
        let options = CleaningOptions {
            row_fraction: Some(1.5),
            ..CleaningOptions::default()
        };
        assert!(options
            .apply_overrides(CleanerConfig::default())
            .is_err());
    }
}
