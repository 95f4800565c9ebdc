use clap::Parser;
use colored::*;
use std::process;

use rally_smoke::cli::Args;
use rally_smoke::config::Config;
use rally_smoke::suite::{print_troubleshooting, run_suite};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Load configuration
    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let settings = config.server_settings();

    if let Err(e) = run_suite(&settings).await {
        eprintln!("{} {}", "Error during smoke checks:".red(), e);
        print_troubleshooting();
        process::exit(1);
    }
}
