use crate::config::CleanerConfig;
use crate::error::Result;
use crate::models::RawSheet;
use crate::processors::{CleaningOutcome, CleaningReport, TableCleaner};
use crate::readers::SheetSource;
use crate::utils::progress::ProgressReporter;
use crate::writers::SheetSink;
use rayon::prelude::*;
use tracing::info;

/// Cleans every station sheet of a source and writes the results to a sink.
///
/// All sheets are read before anything is written, so one unreadable station
/// aborts the run without producing partial output.
pub struct BatchCleaner {
    cleaner: TableCleaner,
    max_workers: usize,
    all_sheets: bool,
}

impl BatchCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self {
            cleaner: TableCleaner::new(config),
            max_workers: 1,
            all_sheets: false,
        }
    }

    /// Number of cleaning threads; 1 runs sequentially, 0 uses every CPU
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = if max_workers == 0 {
            num_cpus::get()
        } else {
            max_workers
        };
        self
    }

    /// Process every sheet in the source instead of the configured stations
    pub fn with_all_sheets(mut self, all_sheets: bool) -> Self {
        self.all_sheets = all_sheets;
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Stations to process, in output order
    pub fn station_list(&self, source: &dyn SheetSource) -> Result<Vec<String>> {
        if self.all_sheets {
            source.sheet_names()
        } else {
            Ok(self.cleaner.config().stations.clone())
        }
    }

    /// Read, clean and (when a sink is given) write every station
    pub fn run(
        &self,
        source: &mut dyn SheetSource,
        sink: Option<&mut dyn SheetSink>,
        progress: Option<&ProgressReporter>,
    ) -> Result<CleaningReport> {
        let stations = self.station_list(source)?;
        info!(
            "Cleaning {} stations from {}",
            stations.len(),
            source.location().display()
        );

        if let Some(p) = progress {
            p.set_length(stations.len() as u64);
            p.set_message("Reading station sheets...");
        }

        let sheets = stations
            .iter()
            .map(|station| source.read_sheet(station))
            .collect::<Result<Vec<RawSheet>>>()?;

        if let Some(p) = progress {
            p.set_message("Cleaning station sheets...");
        }

        let outcomes = self.clean_sheets(sheets, progress)?;

        let mut report = CleaningReport::new();
        if let Some(sink) = sink {
            if let Some(p) = progress {
                p.set_message(&format!("Writing {}...", sink.destination().display()));
            }
            for outcome in &outcomes {
                sink.write_sheet(&outcome.sheet)?;
            }
            sink.finish()?;
        }

        for outcome in outcomes {
            info!(
                "{}: {}/{} rows kept, {} columns, {} outliers replaced",
                outcome.summary.station,
                outcome.summary.rows_kept,
                outcome.summary.data_rows,
                outcome.summary.columns_kept,
                outcome.summary.total_outliers()
            );
            report.push(outcome.summary);
        }

        Ok(report)
    }

    /// Clean sheets, preserving their order. Sheets are independent, so with
    /// more than one worker they are spread over a rayon pool.
    pub fn clean_sheets(
        &self,
        sheets: Vec<RawSheet>,
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<CleaningOutcome>> {
        let clean_one = |sheet: RawSheet| {
            let outcome = self.cleaner.clean(sheet);
            if let Some(p) = progress {
                p.increment(1);
            }
            outcome
        };

        if self.max_workers <= 1 {
            return Ok(sheets.into_iter().map(clean_one).collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()?;

        Ok(pool.install(|| sheets.into_par_iter().map(clean_one).collect()))
    }
}

impl Default for BatchCleaner {
    fn default() -> Self {
        Self::new(CleanerConfig::default())
    }
}
