pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "customer-api")]
#[command(about = "Customer contact API with bearer-token authentication")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply pending migrations and run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Apply pending migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    tracing::info!("Loaded configuration for {:?} mode", config.environment);

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Migrate) => commands::migrate::handle(config).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
    }
}
