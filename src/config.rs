use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_language: String,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    pub books_base_url: String,
    pub placeholder_poster_url: String,
    pub enrich_concurrency: usize,
    pub enrich_timeout: Duration,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://filmhub.db?mode=rwc".to_string());

        let tmdb_api_key = std::env::var("TMDB_API_KEY").unwrap_or_default();
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = std::env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/w300".to_string());
        let tmdb_language =
            std::env::var("TMDB_LANGUAGE").unwrap_or_else(|_| "cs-CZ".to_string());

        let omdb_api_key = std::env::var("OMDB_API_KEY").unwrap_or_default();
        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com".to_string());

        let books_base_url = std::env::var("BOOKS_BASE_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/books/v1".to_string());

        let placeholder_poster_url = std::env::var("PLACEHOLDER_POSTER_URL").unwrap_or_else(|_| {
            "https://via.placeholder.com/300x450/222/888?text=No+Poster".to_string()
        });

        let enrich_concurrency: usize =
            std::env::var("ENRICH_CONCURRENCY").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        let enrich_timeout_secs: u64 =
            std::env::var("ENRICH_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_language,
            omdb_api_key,
            omdb_base_url,
            books_base_url,
            placeholder_poster_url,
            enrich_concurrency,
            enrich_timeout: Duration::from_secs(enrich_timeout_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing every provider at `provider_url`, backed by an in-memory database.
    pub fn for_tests(provider_url: &str) -> Self {
        Self {
            addr: "127.0.0.1:0".parse().expect("static addr"),
            database_url: "sqlite::memory:".to_string(),
            tmdb_api_key: "test-key".to_string(),
            tmdb_base_url: format!("{provider_url}/tmdb"),
            tmdb_image_base_url: "https://img.test/w300".to_string(),
            tmdb_language: "en-US".to_string(),
            omdb_api_key: "test-key".to_string(),
            omdb_base_url: format!("{provider_url}/omdb"),
            books_base_url: format!("{provider_url}/books"),
            placeholder_poster_url: "https://img.test/placeholder.png".to_string(),
            enrich_concurrency: 4,
            enrich_timeout: Duration::from_secs(5),
            http_timeout: Duration::from_secs(5),
        }
    }
}
