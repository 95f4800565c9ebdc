use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rally-smoke")]
#[command(about = "Smoke-test harness for the Rally MCP server", long_about = None)]
pub struct Args {
    #[arg(
        short = 's',
        long = "server",
        help = "Command line used to launch the server (default: node index.js)"
    )]
    pub server: Option<String>,

    #[arg(
        short = 't',
        long = "timeout",
        help = "Per-check timeout in seconds, 0 waits forever"
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Print harness diagnostics to stderr"
    )]
    pub verbose: bool,
}
