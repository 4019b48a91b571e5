pub mod batch_cleaner;
pub mod cleaning_report;
pub mod coercion;
pub mod imputation;
pub mod outlier_corrector;
pub mod pruning;
pub mod table_cleaner;

pub use batch_cleaner::BatchCleaner;
pub use cleaning_report::{CleaningReport, StationSummary};
pub use table_cleaner::{CleaningOutcome, TableCleaner};
