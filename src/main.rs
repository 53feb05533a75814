// LedCom - Bluetooth SPP LED Strip Controller Tool
mod cli;
mod core;
mod domain;
mod infrastructure;

use clap::Parser;
use cli::args::Args;
use cli::commands::execute_command;
use domain::error::LedComError;
use infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), LedComError> {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    match execute_command(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
