use colored::Colorize;
use serde_json::Map;

use crate::error::Result;
use crate::harness::{invoke_tool, ServerSettings};
use crate::protocol::content_ok;

/// The fixed checks, in the order they run. Every check sends an empty
/// parameter map; the first hard failure aborts the run.
const CHECKS: [&str; 3] = ["getProjects", "getTypeDefinition", "getIterations"];

pub async fn run_suite(settings: &ServerSettings) -> Result<()> {
    println!(
        "{}",
        "Running Rally MCP server smoke checks...".cyan().bold()
    );
    println!();

    for (step, name) in CHECKS.iter().enumerate() {
        println!("{}", format!("{}. Checking {}...", step + 1, name).cyan());

        let response = invoke_tool(name, Map::new(), settings).await?;

        println!("{}", format!("   {} responded", name).green());
        let annotation = if content_ok(&response) {
            "OK".green()
        } else {
            "Error".yellow()
        };
        println!("   Response: {}", annotation);
        println!();
    }

    println!("{}", "All smoke checks completed.".green().bold());
    println!();
    println!("Summary:");
    println!("   - MCP server started and exited cleanly for every call");
    println!("   - All basic tools answered on stdout");
    println!();
    println!("{}", "The server is ready to use.".green());

    Ok(())
}

/// Printed after a hard failure, before exiting with status 1. The
/// variables belong to the server under test; the harness never reads
/// or validates them itself.
pub fn print_troubleshooting() {
    println!();
    println!("Possible fixes:");
    println!("   1. Check that the environment variables are set:");
    println!("      - RALLY_INSTANCE");
    println!("      - RALLY_APIKEY");
    println!("      - RALLY_PROJECT_NAME");
    println!("   2. Check that the Rally instance is reachable");
    println!("   3. Check that the API key is valid");
}
