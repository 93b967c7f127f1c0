use std::{collections::HashMap, time::Duration};

use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::{
    metadata::MetadataClient,
    models::{EnrichedMetadata, Movie},
};

/// Enriches every titled movie with at most `max_concurrent` lookups in flight.
/// A lookup that outlives `per_item` yields placeholder metadata.
pub async fn enrich_all(
    metadata: &MetadataClient,
    movies: &[Movie],
    max_concurrent: usize,
    per_item: Duration,
) -> HashMap<i32, EnrichedMetadata> {
    debug!(total_movies = movies.len(), max_concurrent, "enriching catalog");

    let titled: Vec<(i32, String)> = movies
        .iter()
        .filter(|m| !m.title.trim().is_empty())
        .map(|m| (m.id, m.title.clone()))
        .collect();

    let results: HashMap<i32, EnrichedMetadata> = stream::iter(titled)
        .map(|(id, title)| async move {
            let meta = match tokio::time::timeout(per_item, metadata.enrich(&title)).await {
                Ok(meta) => meta,
                Err(_) => {
                    warn!(id, title = %title, "enrichment timed out");
                    metadata.placeholder()
                },
            };
            (id, meta)
        })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    debug!(enriched = results.len(), "completed enrichment");
    results
}
