//! Fake metadata providers for tests.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query},
    routing::get,
};
use serde_json::{Value, json};

use crate::{AppState, config::Config, db, metadata::MetadataClient, store::MovieStore};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a server that answers every provider route with 404.
pub async fn spawn_dead_provider() -> String {
    spawn_provider(Router::new()).await
}

pub fn metadata_client(provider_url: &str) -> MetadataClient {
    let config = Config::for_tests(provider_url);
    MetadataClient::from_config(reqwest::Client::new(), &config)
}

pub async fn app_state(provider_url: &str) -> Arc<AppState> {
    let config = Config::for_tests(provider_url);
    let db = db::connect_and_init(&config.database_url).await.unwrap();
    let metadata = MetadataClient::from_config(reqwest::Client::new(), &config);
    Arc::new(AppState {
        config: Arc::new(config),
        store: MovieStore::new(db),
        metadata: Arc::new(metadata),
    })
}

/// TMDB routes knowing `Inception` (full data) and `Heat` (no poster, no credits).
pub fn tmdb_routes() -> Router {
    Router::new()
        .route("/tmdb/search/movie", get(tmdb_search))
        .route("/tmdb/movie/{id}", get(tmdb_details))
}

async fn tmdb_search(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let results = match q.get("query").map(String::as_str).unwrap_or("") {
        "Inception" => json!([{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "poster_path": "/inception.jpg",
            "overview": "A thief who steals corporate secrets through dream-sharing."
        }]),
        "Heat" => json!([{
            "id": 949,
            "title": "Heat",
            "release_date": "1995-12-15",
            "poster_path": null,
            "overview": ""
        }]),
        _ => json!([]),
    };
    Json(json!({ "page": 1, "results": results }))
}

async fn tmdb_details(Path(id): Path<i32>) -> Json<Value> {
    match id {
        27205 => Json(json!({
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }],
            "credits": {
                "cast": [
                    { "name": "Leonardo DiCaprio" },
                    { "name": "Joseph Gordon-Levitt" },
                    { "name": "Elliot Page" }
                ],
                "crew": [{ "name": "Christopher Nolan", "job": "Director" }]
            }
        })),
        _ => Json(json!({ "id": id, "title": "Heat", "release_date": "1995-12-15", "genres": [] })),
    }
}

pub fn omdb_routes(body: Value) -> Router {
    Router::new().route("/omdb/", get(move || async move { Json(body) }))
}

pub fn books_routes(body: Value) -> Router {
    Router::new().route("/books/volumes", get(move || async move { Json(body) }))
}
