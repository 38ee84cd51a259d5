mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => commands::convert(args).await?,
        Commands::Status(args) => commands::status(args).await?,
        Commands::Preview(args) => commands::preview(args).await?,
    }

    Ok(())
}
