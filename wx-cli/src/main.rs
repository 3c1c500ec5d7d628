//! WX CLI - Command line tool for temperature anomaly summaries and charts.

use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(
    name = "wx-cli",
    version,
    about = "Daily temperature anomaly toolkit"
)]
struct Cli {
    /// Log at info level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: wx_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
    wx_cmd::run(cli.command).await
}
