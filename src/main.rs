use clap::Parser;
use hotel_hub::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(command = ?cli.command, "Configuration loaded");
    execute_command(&cli, settings).await
}
