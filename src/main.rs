//! Sales Desk - desktop client for browsing and registering sales.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use sales_desk as app;

use app::client::{ApiClient, SalesApi};
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop client for browsing and registering sales.
#[derive(Parser)]
#[command(name = "sales-desk")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Backend base URL, overrides the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    let loaded = AppConfig::try_load(&config_path);
    let mut config = match &loaded {
        ConfigLoadResult::Loaded(config) => config.clone(),
        ConfigLoadResult::Missing | ConfigLoadResult::Invalid(_) => AppConfig::default(),
    };
    if let Some(url) = &cli.api_url {
        config.override_base_url(url).context("Invalid --api-url")?;
    }

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = app::logging::init(&config.logging);

    tracing::info!("Sales Desk starting...");
    tracing::info!("Config path: {:?}", config_path);
    match loaded {
        ConfigLoadResult::Loaded(_) => tracing::info!("Config loaded successfully"),
        ConfigLoadResult::Missing => tracing::info!("Config missing, using defaults"),
        ConfigLoadResult::Invalid(e) => tracing::warn!("Config invalid, using defaults: {}", e),
    }
    tracing::info!("API base URL: {}", config.api.base_url);

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let api: Arc<dyn SalesApi> = Arc::new(ApiClient::new(&config.api.base_url)?);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sales Desk")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sales Desk",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc, config, rt, api)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
