use std::process::ExitCode;

use clap::Parser;
use compressor_app::{run_app, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_app(cli) {
        Ok(summary) if summary.failures == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
