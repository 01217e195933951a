mod browser_api;
mod catalog_client;
mod config;
mod domain;
mod export;
mod render;
mod session;
mod web;

use std::{path::Path, sync::Arc};

use anyhow::Context;
use catalog_client::CatalogClient;
use config::Config;
use poem::{Server, listener::TcpListener};
use session::{SessionEvent, SessionState, engine::BrowserEngine};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder, prelude::*};

type BookBrowserResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> BookBrowserResult<()> {
    // Respect RUST_LOG if set, default to info for our crate and warn for deps.
    let default_filter = format!(
        "{}=info,poem=info,reqwest=warn,h2=warn",
        env!("CARGO_PKG_NAME")
    );
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_level(true)
        .pretty()
        .finish()
        .with(ErrorLayer::default())
        .init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting Book Browser");

    if Path::new(".env.local").exists() {
        dotenvy::from_filename(".env.local")?;
    } else if Path::new(".env").exists() {
        dotenvy::from_filename(".env")?;
    };
    let config = Config::load()?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    let client = CatalogClient::new(&config.catalog_base_url)
        .with_context(|| "Failed to build catalog client")?
        .with_books_path(&config.books_path);
    tracing::info!(catalog_base = %client.base_url(), books_path = %config.books_path, "configured catalog client");

    let engine = Arc::new(BrowserEngine::new(
        Arc::new(client),
        SessionState::new(config.initial_settings()),
    ));
    // first page for the initial settings, like opening the page
    engine.dispatch(SessionEvent::Reload).await;

    run_poem(engine, Arc::new(config)).await
}

pub async fn run_poem(engine: Arc<BrowserEngine>, config: Arc<Config>) -> BookBrowserResult<()> {
    let bind_addr = config.bind_addr.clone();
    let app = browser_api::app(engine, config);
    tracing::info!(%bind_addr, "starting HTTP server");
    Server::new(TcpListener::bind(bind_addr.clone()))
        .run(app)
        .await
        .with_context(|| format!("HTTP server on {} failed", bind_addr))?;
    Ok(())
}
