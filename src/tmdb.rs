use serde::Deserialize;

use crate::error::CatalogResult;

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
        language: String,
    ) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, TMDB lookups will fail");
        }
        Self { client, api_key, base_url, image_base_url, language }
    }

    /// First search hit for `title`, if any.
    pub async fn search_movie(&self, title: &str) -> CatalogResult<Option<TmdbMovie>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.results.into_iter().next())
    }

    pub async fn movie_details(
        &self,
        tmdb_id: i32,
        with_credits: bool,
    ) -> CatalogResult<TmdbMovieDetails> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let mut req = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())]);
        if with_credits {
            req = req.query(&[("append_to_response", "credits")]);
        }

        let details = req.send().await?.error_for_status()?.json().await?;
        Ok(details)
    }

    /// One page of the top-rated listing. `None` when the response carries no `results`.
    pub async fn top_rated(&self, page: u32) -> CatalogResult<Option<Vec<TmdbMovie>>> {
        let url = format!("{}/movie/top_rated", self.base_url.trim_end_matches('/'));
        let resp: ListingResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(&[("page", page)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(resp.results)
    }

    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url.trim_end_matches('/'), poster_path)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    results: Option<Vec<TmdbMovie>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TmdbMovie {
    pub id: i32,
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub title: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub credits: Option<Credits>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

impl TmdbMovieDetails {
    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.name.clone()).collect()
    }

    pub fn director(&self) -> Option<String> {
        self.credits
            .as_ref()?
            .crew
            .iter()
            .find(|c| c.job == "Director")
            .map(|c| c.name.clone())
    }

    pub fn cast_names(&self, limit: usize) -> Vec<String> {
        self.credits
            .as_ref()
            .map(|c| c.cast.iter().take(limit).map(|a| a.name.clone()).collect())
            .unwrap_or_default()
    }
}

/// Year of a TMDB `release_date` (`YYYY-MM-DD`).
pub fn release_year(release_date: Option<&str>) -> Option<i32> {
    let s = release_date?.trim();
    if let Ok(date) = s.parse::<jiff::civil::Date>() {
        return Some(i32::from(date.year()));
    }
    s.split('-').next().and_then(|y| y.parse().ok())
}
