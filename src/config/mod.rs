pub mod settings;

pub use settings::{CleanerConfig, EmptyColumnPolicy};
