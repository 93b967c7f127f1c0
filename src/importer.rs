use tracing::{debug, info, warn};

use crate::{
    error::{CatalogError, CatalogResult},
    models::{ImportSummary, Movie, NewMovie, join_genres},
    store::MovieStore,
    tmdb::{TmdbClient, release_year},
};

const TOP_RATED_PAGES: u32 = 3;
const TOP_RATED_LIMIT: usize = 50;

/// Inserts the first TMDB match for `title`, with genres and director from its details.
pub async fn import_by_title(
    store: &MovieStore,
    tmdb: &TmdbClient,
    title: &str,
) -> CatalogResult<Movie> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CatalogError::Validation("title is required".to_string()));
    }

    let Some(hit) = tmdb.search_movie(title).await? else {
        return Err(CatalogError::NotFound(format!("no TMDB match for \"{title}\"")));
    };
    debug!(query = %title, tmdb_id = hit.id, "found TMDB match");

    let details = tmdb.movie_details(hit.id, true).await?;

    let resolved_title = if details.title.trim().is_empty() { hit.title } else { details.title.clone() };
    if resolved_title.trim().is_empty() {
        return Err(CatalogError::UpstreamMessage(format!("TMDB movie {} has no title", hit.id)));
    }

    let new = NewMovie {
        title: Some(resolved_title),
        year: release_year(details.release_date.as_deref().or(hit.release_date.as_deref())),
        director: details.director(),
        genre: join_genres(&details.genre_names()),
    };
    let movie = store.insert(&new).await?;
    info!(id = movie.id, title = %movie.title, "imported movie");
    Ok(movie)
}

/// Walks TMDB's top-rated listing and inserts entries until 50 inserts succeed
/// or the pages run out. Stops mid-page once the limit is hit.
pub async fn import_top_rated(store: &MovieStore, tmdb: &TmdbClient) -> CatalogResult<ImportSummary> {
    let mut summary = ImportSummary::default();

    'pages: for page in 1..=TOP_RATED_PAGES {
        let Some(films) = tmdb.top_rated(page).await? else {
            debug!(page, "top rated page has no results, stopping");
            break;
        };
        debug!(page, films = films.len(), "fetched top rated page");

        for film in films {
            summary.considered += 1;

            let genre = match tmdb.movie_details(film.id, false).await {
                Ok(details) => join_genres(&details.genre_names()),
                Err(err) => {
                    warn!(tmdb_id = film.id, error = %err, "failed to fetch genres, importing without");
                    None
                },
            };

            let new = NewMovie {
                title: Some(film.title.clone()),
                year: release_year(film.release_date.as_deref()),
                director: None,
                genre,
            };

            match store.insert(&new).await {
                Ok(_) => summary.imported_count += 1,
                Err(err) => {
                    warn!(title = %film.title, error = %err, "failed to import movie");
                    summary.failed_titles.push(film.title);
                },
            }

            if summary.imported_count >= TOP_RATED_LIMIT {
                break 'pages;
            }
        }
    }

    info!(
        imported = summary.imported_count,
        failed = summary.failed_titles.len(),
        considered = summary.considered,
        "top rated import finished"
    );
    Ok(summary)
}
