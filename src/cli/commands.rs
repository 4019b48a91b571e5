use crate::cli::args::{Cli, Commands};
use crate::config::CleanerConfig;
use crate::error::Result;
use crate::processors::BatchCleaner;
use crate::readers::open_source;
use crate::utils::filename::default_output_path;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::create_sink;
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Clean {
            input,
            output,
            report,
            quiet,
            options,
        } => {
            let config = options.resolve_config()?;
            let output = output.unwrap_or_else(|| default_output_path(&input));

            if !quiet {
                println!("Cleaning station data...");
                println!("Input: {}", input.display());
                println!("Output: {}", output.display());
            }
            info!(
                "Thresholds: column >= {}, row fraction {}, empty columns {:?}",
                config.column_sparsity_threshold,
                config.row_sparsity_fraction,
                config.empty_column_policy
            );

            let mut source = open_source(&input)?;
            let mut sink = create_sink(&output);

            let progress = ProgressReporter::new(0, "Cleaning station sheets...", quiet);
            let batch = BatchCleaner::new(config)
                .with_max_workers(options.max_workers)
                .with_all_sheets(options.all_sheets);

            let cleaning_report = batch.run(source.as_mut(), Some(sink.as_mut()), Some(&progress))?;
            progress.finish_with_message(&format!(
                "Cleaned {} stations",
                cleaning_report.stations.len()
            ));

            if !quiet {
                println!("\n{}", cleaning_report.generate_summary());
            }

            if let Some(path) = report {
                cleaning_report.write_json(&path)?;
                if !quiet {
                    println!("Report written to: {}", path.display());
                }
            }

            println!("Cleaning complete, output written to: {}", output.display());
        }

        Commands::Validate {
            input,
            report,
            options,
        } => {
            let config = options.resolve_config()?;
            println!("Validating station data...");
            println!("Input: {}", input.display());

            let mut source = open_source(&input)?;
            let progress = ProgressReporter::new(0, "Validating station sheets...", false);
            let batch = BatchCleaner::new(config)
                .with_max_workers(options.max_workers)
                .with_all_sheets(options.all_sheets);

            let cleaning_report = batch.run(source.as_mut(), None, Some(&progress))?;
            progress.finish_with_message("Validation complete");

            println!("\n{}", cleaning_report.generate_summary());

            if let Some(path) = report {
                cleaning_report.write_json(&path)?;
                println!("Report written to: {}", path.display());
            }

            println!("Validation complete - no output file written");
        }

        Commands::Ranges { config } => {
            let config = CleanerConfig::load(config.as_deref())?;

            println!("{:<10} {:>10} {:>10}", "Channel", "Min", "Max");
            for range in &config.ranges {
                println!("{:<10} {:>10} {:>10}", range.channel, range.min, range.max);
            }
        }
    }

    Ok(())
}
