use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sitesmith-cli")]
#[command(about = "Build brand profiles and generate websites for small businesses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect signals and print the fused brand profile as JSON
    Profile {
        /// YAML request file describing the business
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Run the full pipeline and save the generated site
    Generate {
        /// YAML request file describing the business
        #[arg(long, short)]
        input: PathBuf,
        /// Output directory; overrides SITESMITH_OUTPUT_DIR
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = sitesmith_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Profile { input } => commands::run_profile(&config, &input).await,
        Commands::Generate { input, out_dir } => {
            commands::run_generate(&config, &input, out_dir).await
        }
    }
}

#[cfg(test)]
mod tests;
