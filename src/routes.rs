use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Form, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::HeaderValue,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState, api, enrichment,
    error::AppResult,
    importer,
    models::AddForm,
    templates,
    view::{CatalogView, Filter},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/catalog", get(catalog))
        .route("/add", post(add))
        .route("/import", get(importing))
        .route("/import/run", post(run_import))
        .nest("/api", api::router())
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    genre: String,
    detail: Option<i32>,
    msg: Option<String>,
}

impl CatalogQuery {
    fn filter(&self) -> Filter {
        Filter { q: self.q.clone(), genre: self.genre.clone() }
    }
}

pub async fn index(query: Result<Query<CatalogQuery>, QueryRejection>) -> AppResult<Html<String>> {
    let Query(q) = query?;
    Ok(Html(templates::index_page(&q.filter(), q.detail, q.msg.as_deref())))
}

pub async fn catalog(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Response {
    let q = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            return fragment_response(templates::error_fragment(rejection.body_text()));
        },
    };

    let movies = match state.store.list_all().await {
        Ok(movies) => movies,
        Err(err) => {
            tracing::error!(error = %err, "failed to load catalog");
            return fragment_response(templates::error_fragment(err.public_message()));
        },
    };

    let metadata = enrichment::enrich_all(
        &state.metadata,
        &movies,
        state.config.enrich_concurrency,
        state.config.enrich_timeout,
    )
    .await;

    let mut view = CatalogView::new(state.config.placeholder_poster_url.clone());
    view.loaded(movies, metadata);
    view.apply_filter(q.filter());
    if let Some(id) = q.detail {
        view.open_detail(id);
    }
    tracing::debug!(state = ?view.state(), total = view.total(), "rendering catalog");

    fragment_response(templates::catalog_fragment(&view))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AddForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Form(form) = form?;
    let message =
        match importer::import_by_title(&state.store, state.metadata.tmdb(), &form.title).await {
            Ok(movie) => format!("Added \"{}\".", movie.title),
            Err(err) => {
                tracing::warn!(title = %form.title, error = %err, "add by title failed");
                format!("Could not add \"{}\": {}", form.title.trim(), err.public_message())
            },
        };
    Ok(Redirect::to(&format!("/?msg={}", urlencoding::encode(&message))))
}

pub async fn importing() -> Html<String> {
    Html(templates::importing_page())
}

pub async fn run_import(State(state): State<Arc<AppState>>) -> Response {
    let body = match importer::import_top_rated(&state.store, state.metadata.tmdb()).await {
        Ok(summary) => templates::import_result_fragment(&summary),
        Err(err) => {
            tracing::error!(error = %err, "top rated import failed");
            templates::error_fragment(format!("Import from TMDB failed: {}", err.public_message()))
        },
    };
    fragment_response(body)
}

fn fragment_response(body: String) -> Response {
    let mut resp = Html(body).into_response();
    resp.headers_mut().insert("datastar-selector", HeaderValue::from_static("#content"));
    resp.headers_mut().insert("datastar-mode", HeaderValue::from_static("outer"));
    resp
}
