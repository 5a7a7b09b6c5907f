//! AQD CLI - Command line tool for OpenAQ project coverage.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "aqd-cli",
    version,
    about = "Air-quality dashboard data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: aqd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Starting aqd-cli");
    aqd_cmd::run(cli.command).await
}
