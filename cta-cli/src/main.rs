//! CTA CLI - Command line tool for analyzing city temperature data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cta-cli",
    version,
    about = "City temperature analysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: cta_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cta_cmd::run(cli.command).await
}
