use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{CatalogError, CatalogResult},
    importer,
    models::{ImportByTitleRequest, ImportSummary, Movie, NewMovie},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .route("/import-by-title", post(import_by_title))
        .route("/import-top-rated", post(import_top_rated))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_movies(State(state): State<Arc<AppState>>) -> CatalogResult<Json<Vec<Movie>>> {
    Ok(Json(state.store.list_all().await?))
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> CatalogResult<Json<Movie>> {
    let Path(id) = path?;
    state.store.get_by_id(id).await?.map(Json).ok_or_else(|| not_found(id))
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Movie>)> {
    let Json(body) = body?;
    let movie = state.store.insert(&body).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> CatalogResult<Json<Movie>> {
    let (Path(id), Json(body)) = (path?, body?);
    state.store.update(id, &body).await?.map(Json).ok_or_else(|| not_found(id))
}

async fn delete_movie(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> CatalogResult<Json<Value>> {
    let Path(id) = path?;
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    Ok(Json(json!({ "message": format!("movie {id} deleted") })))
}

async fn import_by_title(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ImportByTitleRequest>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<Movie>)> {
    let Json(body) = body?;
    let title = body.title.unwrap_or_default();
    let movie = importer::import_by_title(&state.store, state.metadata.tmdb(), &title).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn import_top_rated(State(state): State<Arc<AppState>>) -> CatalogResult<Json<ImportSummary>> {
    let summary = importer::import_top_rated(&state.store, state.metadata.tmdb()).await?;
    Ok(Json(summary))
}

fn not_found(id: i32) -> CatalogError {
    CatalogError::NotFound(format!("movie {id} not found"))
}
