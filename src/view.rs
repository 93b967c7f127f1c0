use std::collections::{BTreeSet, HashMap};

use crate::models::{EnrichedMetadata, Movie};

/// Search text and genre selection. Empty strings mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub q: String,
    pub genre: String,
}

impl Filter {
    pub fn is_active(&self) -> bool {
        !self.q.is_empty() || !self.genre.is_empty()
    }

    fn matches(&self, movie: &Movie, metadata: Option<&EnrichedMetadata>) -> bool {
        let title_ok = movie.title.to_lowercase().contains(&self.q.to_lowercase());
        let genre_ok = self.genre.is_empty()
            || metadata.is_some_and(|m| m.genres.iter().any(|g| *g == self.genre));
        title_ok && genre_ok
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded,
    Filtered,
    DetailOpen(i32),
}

#[derive(Debug)]
pub struct Detail<'a> {
    pub movie: &'a Movie,
    pub metadata: Option<&'a EnrichedMetadata>,
    pub poster: &'a str,
}

/// Everything the catalog page shows, with explicit transitions
/// `Loading -> Loaded <-> Filtered -> DetailOpen`. Closing the overlay is a
/// fresh render of the same filter without a detail id.
#[derive(Debug)]
pub struct CatalogView {
    state: ViewState,
    movies: Vec<Movie>,
    metadata: HashMap<i32, EnrichedMetadata>,
    filter: Filter,
    placeholder_poster: String,
}

impl CatalogView {
    pub fn new(placeholder_poster: impl Into<String>) -> Self {
        Self {
            state: ViewState::Loading,
            movies: Vec::new(),
            metadata: HashMap::new(),
            filter: Filter::default(),
            placeholder_poster: placeholder_poster.into(),
        }
    }

    pub fn loaded(&mut self, movies: Vec<Movie>, metadata: HashMap<i32, EnrichedMetadata>) {
        self.movies = movies;
        self.metadata = metadata;
        self.state = self.list_state();
    }

    pub fn apply_filter(&mut self, filter: Filter) {
        self.filter = filter;
        if matches!(self.state, ViewState::Loaded | ViewState::Filtered) {
            self.state = self.list_state();
        }
    }

    /// Opens the overlay for `id`. Returns `false` (state unchanged) when the
    /// catalog is still loading or holds no such movie.
    pub fn open_detail(&mut self, id: i32) -> bool {
        if self.state == ViewState::Loading || !self.movies.iter().any(|m| m.id == id) {
            return false;
        }
        self.state = ViewState::DetailOpen(id);
        true
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn total(&self) -> usize {
        self.movies.len()
    }

    /// Distinct genre names across all fetched metadata, sorted.
    pub fn genre_options(&self) -> Vec<String> {
        self.metadata
            .values()
            .flat_map(|m| m.genres.iter())
            .filter(|g| !g.trim().is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn visible(&self) -> Vec<&Movie> {
        self.movies.iter().filter(|m| self.filter.matches(m, self.metadata.get(&m.id))).collect()
    }

    pub fn metadata(&self, id: i32) -> Option<&EnrichedMetadata> {
        self.metadata.get(&id)
    }

    pub fn poster(&self, id: i32) -> &str {
        self.metadata.get(&id).map_or(self.placeholder_poster.as_str(), |m| m.poster.as_str())
    }

    pub fn detail(&self) -> Option<Detail<'_>> {
        let ViewState::DetailOpen(id) = self.state else {
            return None;
        };
        let movie = self.movies.iter().find(|m| m.id == id)?;
        Some(Detail { movie, metadata: self.metadata.get(&id), poster: self.poster(id) })
    }

    fn list_state(&self) -> ViewState {
        if self.filter.is_active() { ViewState::Filtered } else { ViewState::Loaded }
    }
}
