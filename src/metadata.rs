use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    books::BooksClient, config::Config, models::EnrichedMetadata, omdb::OmdbClient,
    tmdb::TmdbClient,
};

const MAX_CAST: usize = 8;

/// Resolves poster, synopsis, genres and cast by walking TMDB, then OMDb, then
/// Google Books. Each field is taken from the first provider that has it.
pub struct MetadataClient {
    tmdb: Arc<TmdbClient>,
    omdb: OmdbClient,
    books: BooksClient,
    placeholder_poster: String,
}

#[derive(Debug, Default)]
struct Partial {
    poster: Option<String>,
    synopsis: Option<String>,
    genres: Vec<String>,
    cast: Vec<String>,
}

impl Partial {
    fn is_complete(&self) -> bool {
        self.poster.is_some()
            && self.synopsis.is_some()
            && !self.genres.is_empty()
            && !self.cast.is_empty()
    }
}

impl MetadataClient {
    pub fn new(
        tmdb: Arc<TmdbClient>,
        omdb: OmdbClient,
        books: BooksClient,
        placeholder_poster: String,
    ) -> Self {
        Self { tmdb, omdb, books, placeholder_poster }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        let tmdb = TmdbClient::new(
            http.clone(),
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.tmdb_language.clone(),
        );
        let omdb =
            OmdbClient::new(http.clone(), config.omdb_api_key.clone(), config.omdb_base_url.clone());
        let books = BooksClient::new(http, config.books_base_url.clone());
        Self::new(Arc::new(tmdb), omdb, books, config.placeholder_poster_url.clone())
    }

    pub fn tmdb(&self) -> &TmdbClient {
        &self.tmdb
    }

    pub fn placeholder(&self) -> EnrichedMetadata {
        EnrichedMetadata::placeholder(&self.placeholder_poster)
    }

    /// Never fails: a provider that errors simply contributes nothing.
    pub async fn enrich(&self, title: &str) -> EnrichedMetadata {
        let mut found = Partial::default();

        self.fill_from_tmdb(title, &mut found).await;

        if !found.is_complete() {
            debug!(title = %title, "falling back to OMDb");
            self.fill_from_omdb(title, &mut found).await;
        }

        if found.poster.is_none() {
            debug!(title = %title, "falling back to Google Books for poster");
            match self.books.first_thumbnail(title).await {
                Ok(thumbnail) => found.poster = thumbnail,
                Err(err) => warn!(title = %title, error = %err, "Google Books lookup failed"),
            }
        }

        EnrichedMetadata {
            poster: found.poster.unwrap_or_else(|| self.placeholder_poster.clone()),
            synopsis: found.synopsis.unwrap_or_default(),
            genres: found.genres,
            cast: found.cast,
        }
    }

    async fn fill_from_tmdb(&self, title: &str, found: &mut Partial) {
        let hit = match self.tmdb.search_movie(title).await {
            Ok(Some(hit)) => hit,
            Ok(None) => {
                debug!(title = %title, "no TMDB match");
                return;
            },
            Err(err) => {
                warn!(title = %title, error = %err, "TMDB search failed");
                return;
            },
        };

        found.poster = hit
            .poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| self.tmdb.poster_url(p));
        found.synopsis = hit.overview.filter(|o| !o.trim().is_empty());

        match self.tmdb.movie_details(hit.id, true).await {
            Ok(details) => {
                found.genres = details.genre_names();
                found.cast = details.cast_names(MAX_CAST);
            },
            Err(err) => warn!(title = %title, tmdb_id = hit.id, error = %err, "TMDB details failed"),
        }
    }

    async fn fill_from_omdb(&self, title: &str, found: &mut Partial) {
        let movie = match self.omdb.lookup(title).await {
            Ok(movie) => movie,
            Err(err) => {
                warn!(title = %title, error = %err, "OMDb lookup failed");
                return;
            },
        };

        if found.poster.is_none() {
            found.poster = movie.poster().map(str::to_string);
        }
        if found.synopsis.is_none() {
            found.synopsis = movie.plot().map(str::to_string);
        }
        if found.genres.is_empty() {
            found.genres = movie.genres();
        }
        if found.cast.is_empty() {
            found.cast = movie.actors().into_iter().take(MAX_CAST).collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::MAX_CAST;
    use crate::testing::{
        books_routes, metadata_client, omdb_routes, spawn_dead_provider, spawn_provider,
        tmdb_routes,
    };

    #[tokio::test]
    async fn tmdb_supplies_everything() {
        let url = spawn_provider(
            tmdb_routes()
                .merge(omdb_routes(json!({ "Poster": "https://omdb.test/wrong.jpg" }))),
        )
        .await;
        let meta = metadata_client(&url).enrich("Inception").await;

        assert_eq!(meta.poster, "https://img.test/w300/inception.jpg");
        assert!(meta.synopsis.starts_with("A thief"));
        assert_eq!(meta.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(meta.cast[0], "Leonardo DiCaprio");
    }

    #[tokio::test]
    async fn omdb_poster_beats_placeholder() {
        let url = spawn_provider(tmdb_routes().merge(omdb_routes(json!({
            "Poster": "https://omdb.test/heat.jpg",
            "Plot": "A group of high-end professional thieves.",
            "Genre": "Action, Crime, Drama",
            "Actors": "Al Pacino, Robert De Niro, Val Kilmer"
        }))))
        .await;
        let meta = metadata_client(&url).enrich("Heat").await;

        assert_eq!(meta.poster, "https://omdb.test/heat.jpg");
        assert_eq!(meta.synopsis, "A group of high-end professional thieves.");
        assert_eq!(meta.genres, vec!["Action", "Crime", "Drama"]);
        assert_eq!(meta.cast, vec!["Al Pacino", "Robert De Niro", "Val Kilmer"]);
    }

    #[tokio::test]
    async fn omdb_only_fills_missing_fields() {
        let url = spawn_provider(tmdb_routes().merge(omdb_routes(json!({
            "Poster": "N/A",
            "Plot": "Ignored because TMDB had one.",
            "Genre": "Thriller",
            "Actors": "Someone Else"
        }))))
        .await;
        let meta = metadata_client(&url).enrich("Inception").await;

        assert_eq!(meta.poster, "https://img.test/w300/inception.jpg");
        assert!(meta.synopsis.starts_with("A thief"));
        assert_eq!(meta.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(meta.cast.len(), 3);
    }

    #[tokio::test]
    async fn omdb_cast_is_capped() {
        let actors = (1..=12).map(|n| format!("Actor {n}")).collect::<Vec<_>>();
        let url = spawn_provider(
            tmdb_routes().merge(omdb_routes(json!({ "Actors": actors.join(", ") }))),
        )
        .await;
        let meta = metadata_client(&url).enrich("Heat").await;

        assert_eq!(meta.cast.len(), MAX_CAST);
        assert_eq!(meta.cast, actors[..MAX_CAST]);
    }

    #[tokio::test]
    async fn books_thumbnail_is_last_resort_poster() {
        let url = spawn_provider(
            tmdb_routes()
                .merge(omdb_routes(json!({ "Poster": "N/A", "Plot": "N/A" })))
                .merge(books_routes(json!({
                    "items": [{
                        "volumeInfo": {
                            "description": "ignored",
                            "imageLinks": { "thumbnail": "http://books.test/heat.jpg" }
                        }
                    }]
                }))),
        )
        .await;
        let meta = metadata_client(&url).enrich("Heat").await;

        assert_eq!(meta.poster, "http://books.test/heat.jpg");
        assert_eq!(meta.synopsis, "");
        assert!(meta.genres.is_empty());
        assert!(meta.cast.is_empty());
    }

    #[tokio::test]
    async fn nothing_anywhere_yields_placeholder() {
        let url = spawn_dead_provider().await;
        let meta = metadata_client(&url).enrich("Unknown Film").await;

        assert_eq!(meta.poster, "https://img.test/placeholder.png");
        assert_eq!(meta.synopsis, "");
        assert!(meta.genres.is_empty());
        assert!(meta.cast.is_empty());
    }

    #[tokio::test]
    async fn malformed_responses_are_swallowed() {
        let url = spawn_provider(
            axum::Router::new()
                .route("/tmdb/search/movie", axum::routing::get(|| async { "not json" }))
                .route("/omdb/", axum::routing::get(|| async { "<html>" })),
        )
        .await;
        let client = metadata_client(&url);
        let meta = client.enrich("Inception").await;
        assert_eq!(meta, client.placeholder());
    }
}
