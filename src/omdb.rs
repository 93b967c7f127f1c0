use serde::Deserialize;

use crate::error::CatalogResult;

/// OMDb marks missing values with this literal.
const NOT_AVAILABLE: &str = "N/A";

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self { client, api_key, base_url }
    }

    /// Exact-title lookup (`?t=`).
    pub async fn lookup(&self, title: &str) -> CatalogResult<OmdbMovie> {
        let url = format!("{}/", self.base_url.trim_end_matches('/'));
        let movie = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(movie)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    pub poster: Option<String>,
    pub plot: Option<String>,
    pub genre: Option<String>,
    pub actors: Option<String>,
}

impl OmdbMovie {
    pub fn poster(&self) -> Option<&str> {
        present(self.poster.as_deref())
    }

    pub fn plot(&self) -> Option<&str> {
        present(self.plot.as_deref())
    }

    pub fn genres(&self) -> Vec<String> {
        split_list(present(self.genre.as_deref()))
    }

    pub fn actors(&self) -> Vec<String> {
        split_list(present(self.actors.as_deref()))
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
        })
        .unwrap_or_default()
}
