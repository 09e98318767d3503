pub mod cli;
pub mod converter;
pub mod core;
pub mod providers;
pub mod store;

use crate::converter::Converter;
use crate::core::config::AppConfig;
use crate::core::currency::CurrencyCode;
use crate::core::repository::CurrencyStore;
use crate::providers::{ApiDataMapper, CurrencyApiClient, RemoteCurrencyRepository};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Commands that need a loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Status,
    Refresh {
        force: bool,
    },
    Rates,
    Convert {
        amount: f64,
        from: Option<CurrencyCode>,
        to: Option<CurrencyCode>,
    },
    Switch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("currex starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        base_url = %config.provider.base_url,
        data_path = ?config.data_path,
        source = %config.source_currency,
        target = %config.target_currency,
        "Loaded config"
    );

    let store = store::open_store(&config.default_data_path()?);

    match command {
        AppCommand::Status => cli::status::run(store).await,
        AppCommand::Refresh { force } => {
            let mut converter = build_converter(&config, store)?;
            cli::refresh::run(&mut converter, force).await
        }
        AppCommand::Rates => {
            let mut converter = build_converter(&config, store)?;
            cli::rates::run(&mut converter).await
        }
        AppCommand::Convert { amount, from, to } => {
            let mut converter = build_converter(&config, store)?;
            cli::convert::run(&mut converter, amount, from, to).await
        }
        AppCommand::Switch => {
            let mut converter = build_converter(&config, store)?;
            cli::switch::run(&mut converter).await
        }
    }
}

fn build_converter(config: &AppConfig, store: Arc<dyn CurrencyStore>) -> Result<Converter> {
    let api_key = config.provider.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No API key configured; set provider.api_key or {}",
            crate::core::config::API_KEY_ENV
        );
    }
    let client = CurrencyApiClient::new(&config.provider.base_url, api_key)?;
    let api = Arc::new(RemoteCurrencyRepository::new(client, ApiDataMapper));
    Ok(Converter::new(
        api,
        store,
        config.source_currency,
        config.target_currency,
    ))
}
