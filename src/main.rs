use clap::Parser;
use station_cleaner::cli::{run, Cli};
use station_cleaner::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
