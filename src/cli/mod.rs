pub mod args;
pub mod commands;

pub use args::{CleaningOptions, Cli, Commands};
pub use commands::run;
