//! Plain-text rendering of movies, totals and empty states.
//!
//! Everything here is pure string building so the exact shape of each
//! report can be asserted in tests. Column widths in the list table adapt
//! to the longest cell, so short collections stay narrow.

use watchlist_core::{Movie, MovieQuery, WatchStats, WatchedFilter};

const COLUMNS: usize = 7;
const HEADERS: [&str; COLUMNS] = ["TITLE", "YEAR", "GENRE", "RATING", "WATCHED", "ADDED", "ID"];

/// One aligned row per movie, with a header row on top.
pub fn render_table(movies: &[Movie]) -> String {
    let rows: Vec<[String; COLUMNS]> = movies
        .iter()
        .map(|movie| {
            [
                movie.title.clone(),
                movie.year.to_string(),
                placeholder_if_empty(&movie.genre),
                render_rating(movie.rating),
                render_watched(movie.watched),
                movie.added_at.format("%Y-%m-%d").to_string(),
                movie.id.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(&HEADERS.map(String::from), &widths));
    for row in &rows {
        lines.push(render_row(row, &widths));
    }
    lines.join("\n")
}

fn render_row(cells: &[String; COLUMNS], widths: &[usize; COLUMNS]) -> String {
    let mut parts = Vec::with_capacity(COLUMNS);
    for (cell, width) in cells.iter().zip(widths) {
        let width = *width;
        parts.push(format!("{cell:<width$}"));
    }
    parts.join("  ").trim_end().to_string()
}

/// Every field of one movie. Poster and notes lines only appear when the
/// movie actually carries them.
pub fn render_detail(movie: &Movie) -> String {
    let mut lines = vec![
        format!("{} ({})", movie.title, movie.year),
        format!("  id       {}", movie.id),
        format!("  genre    {}", placeholder_if_empty(&movie.genre)),
        format!("  rating   {}", render_rating(movie.rating)),
        format!("  watched  {}", render_watched(movie.watched)),
        format!("  added    {}", movie.added_at.format("%Y-%m-%d %H:%M UTC")),
    ];
    if let Some(url) = &movie.poster_url {
        lines.push(format!("  poster   {url}"));
    }
    if !movie.notes.is_empty() {
        lines.push(format!("  notes    {}", movie.notes));
    }
    lines.join("\n")
}

pub fn render_stats(stats: &WatchStats) -> String {
    format!(
        "Total: {} | Watched: {} | To watch: {}",
        stats.total, stats.watched, stats.unwatched
    )
}

/// A fresh collection invites a first `add`; a filtered-out one points at
/// the criteria instead.
pub fn render_empty_state(query: &MovieQuery) -> String {
    if query.search.is_empty() && query.watched == WatchedFilter::All {
        "No movies yet. Start building your watchlist with `watchlist add`.".to_string()
    } else {
        "No movies found. Try adjusting your search or filter.".to_string()
    }
}

fn placeholder_if_empty(text: &str) -> String {
    if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

/// A rating of 0 means "not rated yet" and renders as a placeholder.
fn render_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("{rating:.1}")
    } else {
        "-".to_string()
    }
}

fn render_watched(watched: bool) -> String {
    if watched { "yes" } else { "no" }.to_string()
}
