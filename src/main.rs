mod api;
mod books;
mod config;
mod db;
mod enrichment;
mod entities;
mod error;
mod importer;
mod metadata;
mod models;
mod omdb;
mod routes;
mod store;
mod templates;
#[cfg(test)]
mod testing;
mod tmdb;
mod view;

use std::sync::Arc;

use crate::{config::Config, metadata::MetadataClient, store::MovieStore};

pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub metadata: Arc<MetadataClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmhub=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("filmhub/0.1")
        .timeout(config.http_timeout)
        .build()?;

    let db = db::connect_and_init(&config.database_url).await?;
    let store = MovieStore::new(db);
    let metadata = MetadataClient::from_config(http, &config);

    let state = Arc::new(AppState { config: config.clone(), store, metadata: Arc::new(metadata) });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
