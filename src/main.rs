use clap::Parser;
use user_service::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => user_service::cli::serve::run().await,
    }
}
