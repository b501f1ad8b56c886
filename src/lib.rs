pub mod cli;
pub mod core;
pub mod dashboard;
pub mod providers;
pub mod server;

use crate::core::CurrencyCatalog;
use crate::core::config::AppConfig;
use crate::dashboard::{Dashboard, Selection};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve,
    Show(Selection),
    Currencies,
}

pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Wires the built-in catalog to the Yahoo provider configured in `config`.
pub fn build_dashboard(config: &AppConfig) -> Dashboard {
    let provider = providers::yahoo_finance::YahooFinanceProvider::new(
        &config.providers.yahoo.base_url,
    )
    .with_lookback_years(config.lookback_years);

    Dashboard::new(CurrencyCatalog::default(), Arc::new(provider))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxdash starting...");

    let config = load_config(config_path)?;
    let dashboard = build_dashboard(&config);

    match command {
        AppCommand::Serve => {
            let listener = server::bind(&config.server.address()).await?;
            let state = server::AppState::initialize(dashboard).await?;
            server::serve(listener, state).await
        }
        AppCommand::Show(selection) => cli::show::run(&dashboard, &selection).await,
        AppCommand::Currencies => {
            cli::show::list_currencies(dashboard.catalog());
            Ok(())
        }
    }
}
