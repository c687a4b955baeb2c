//! Display projection: filter and sort, no storage involved.
//!
//! # Design
//! The free-text query and the watched filter are applied in sequence,
//! then a stable comparator orders what is left. The projection is
//! recomputed in full from the source collection on every change; with a
//! personal list the cost is irrelevant and the absence of incremental
//! state keeps the view logic correct by construction. Nothing here is
//! ever persisted.

use crate::types::Movie;

/// Watched-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchedFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

/// Sort key for the display projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Title, ascending, case-folded.
    Title,
    /// Release year, newest first.
    Year,
    /// Rating, highest first.
    Rating,
    /// Time added, newest first. The default view.
    #[default]
    Added,
}

/// The three display criteria. The default shows everything, newest first.
#[derive(Debug, Clone, Default)]
pub struct MovieQuery {
    /// Case-insensitive substring matched against title, genre, and notes.
    /// Empty keeps every record.
    pub search: String,
    pub watched: WatchedFilter,
    pub sort: SortKey,
}

impl MovieQuery {
    /// Compute the display projection of `movies`.
    pub fn apply(&self, movies: &[Movie]) -> Vec<Movie> {
        let query = self.search.to_lowercase();
        let mut shown: Vec<Movie> = movies
            .iter()
            .filter(|m| query.is_empty() || matches_text(m, &query))
            .filter(|m| match self.watched {
                WatchedFilter::All => true,
                WatchedFilter::Watched => m.watched,
                WatchedFilter::Unwatched => !m.watched,
            })
            .cloned()
            .collect();

        // `sort_by` is stable: records that compare equal keep storage order.
        match self.sort {
            SortKey::Title => {
                shown.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
            }
            SortKey::Year => shown.sort_by(|a, b| b.year.cmp(&a.year)),
            SortKey::Rating => shown.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortKey::Added => shown.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        }
        shown
    }
}

/// Substring match against title, genre, and notes. `query` must already be
/// lowercased.
fn matches_text(movie: &Movie, query: &str) -> bool {
    movie.title.to_lowercase().contains(query)
        || movie.genre.to_lowercase().contains(query)
        || movie.notes.to_lowercase().contains(query)
}

/// Collection totals for the summary header. Always computed over the full
/// collection, never the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchStats {
    pub total: usize,
    pub watched: usize,
    pub unwatched: usize,
}

/// Count how many records are watched and how many are still to watch.
pub fn stats(movies: &[Movie]) -> WatchStats {
    let watched = movies.iter().filter(|m| m.watched).count();
    WatchStats {
        total: movies.len(),
        watched,
        unwatched: movies.len() - watched,
    }
}
