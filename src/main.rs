use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod utils;

use api::alltick::AlltickClient;
use config::WidgetConfig;
use models::Widget;
use services::widget_service;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("gold_widget=debug".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🪙 Refreshing gold widget...");

    let config = WidgetConfig::from_env(std::env::args().nth(1));
    debug!("Loaded config: {:?}", config);

    let client = match &config.api_url {
        Some(url) => AlltickClient::with_base_url(url.clone(), config.code.clone()),
        None => AlltickClient::new(config.code.clone()),
    };
    let widget = widget_service::refresh(&client, &config, Utc::now()).await;

    match write_widget(&widget, Path::new(&config.output_dir)).await {
        Ok(()) => info!("Widget written to {}", config.output_dir),
        Err(e) => error!("Failed to write widget: {}", e),
    }
}

/// Write `widget.json` plus the chart image (if any) next to it
async fn write_widget(widget: &Widget, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(dir).await?;

    let json = serde_json::to_string_pretty(widget)?;
    tokio::fs::write(dir.join("widget.json"), json).await?;

    for image in widget.images() {
        let file_name = match image.mime.as_str() {
            "image/svg+xml" => "chart.svg",
            _ => "chart.png",
        };
        let bytes = BASE64.decode(&image.data)?;
        tokio::fs::write(dir.join(file_name), bytes).await?;
        debug!("Wrote {} ({} bytes)", file_name, image.data.len());
    }

    Ok(())
}
