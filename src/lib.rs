pub mod cli;
pub mod core;
pub mod error;
pub mod fetcher;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

pub use error::FetchError;
pub use fetcher::RateFetcher;

pub enum AppCommand {
    Rates { json: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("CBR rates starting...");

    let config = match config_path {
        Some(path) => crate::core::config::AppConfig::load_from_path(path)?,
        None => crate::core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = providers::CbrProvider::new(&config.providers.cbr)?;
    let fetcher = RateFetcher::new(provider);

    match command {
        AppCommand::Rates { json } => cli::rates::run(&fetcher, json).await,
    }
}
