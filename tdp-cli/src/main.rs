//! TDP CLI - size a server's power budget from the component catalog.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tdp-cli",
    version,
    about = "Server power budget and energy cost calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: tdp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    tdp_cmd::run(cli.command).await
}
