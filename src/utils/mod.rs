pub mod constants;
pub mod excel_dates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use excel_dates::{datetime_to_excel_serial, excel_serial_to_datetime};
pub use filename::default_output_path;
pub use logging::init_logging;
pub use progress::ProgressReporter;
