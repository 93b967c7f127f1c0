use serde::{Deserialize, Serialize};

use crate::entities::movie;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genre: Option<String>,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self { id: m.id, title: m.title, year: m.year, director: m.director, genre: m.genre }
    }
}

/// Field set accepted on create and update.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genre: Option<String>,
}

#[cfg(test)]
impl NewMovie {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }
}

/// Provider-sourced details for one movie. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnrichedMetadata {
    pub poster: String,
    pub synopsis: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
}

impl EnrichedMetadata {
    pub fn placeholder(poster: &str) -> Self {
        Self { poster: poster.to_string(), ..Self::default() }
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportByTitleRequest {
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported_count: usize,
    pub failed_titles: Vec<String>,
    /// Listing items looked at before the loop stopped.
    #[serde(skip)]
    pub considered: usize,
}

#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub title: String,
}

/// Joins genre names the way they are stored in the `genre` column.
pub fn join_genres<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let joined = names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}
