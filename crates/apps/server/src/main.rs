use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod pages;
mod pins;
mod routes;

use config::ServerConfig;
use pages::BootstrapStyle;
use routes::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = ServerConfig::parse();

    let pins = match &cfg.pins {
        Some(path) => pins::load_pins(path).await?,
        None => {
            warn!("no pins file given, serving an empty map");
            Vec::new()
        }
    };
    info!("loaded {} pins", pins.len());

    if tokio::fs::metadata(&cfg.pkg_dir).await.is_err() {
        warn!("front end bundle missing: {:?}", cfg.pkg_dir);
    }

    let state = AppState {
        pins: Arc::new(pins),
        viewport: cfg.viewport(),
        map: cfg.map_options(),
        style: if cfg.legacy_globals {
            BootstrapStyle::LegacyGlobals
        } else {
            BootstrapStyle::ConfigObject
        },
    };
    let app = router(state, &cfg.pkg_dir);

    let listener = tokio::net::TcpListener::bind(cfg.addr)
        .await
        .with_context(|| format!("binding {}", cfg.addr))?;
    info!("map server listening on http://{}", cfg.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
