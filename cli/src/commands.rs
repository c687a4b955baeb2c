//! One handler per subcommand.
//!
//! Handlers are generic over the storage backend so tests can drive them
//! against [`MemoryStorage`](watchlist_core::MemoryStorage) without touching
//! the filesystem. Each returns the rendered report as a string; printing is
//! left to `main`. Mutating handlers render from a fresh read of the slot
//! after the store call, never from a locally patched record.

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Utc};
use tracing::info;
use watchlist_core::{
    stats as collection_stats, Movie, MovieQuery, MovieStore, MovieUpdate, NewMovie, Storage,
};

use crate::output;

/// Fields collected by `add`. Mirrors the add form of the original app:
/// a missing year means the current year, everything else starts from the
/// form's initial values.
pub struct AddArgs {
    pub title: String,
    pub year: Option<i32>,
    pub genre: String,
    pub rating: f64,
    pub watched: bool,
    pub notes: String,
    pub poster_url: Option<String>,
}

pub fn add<S: Storage>(store: &MovieStore<S>, args: AddArgs) -> Result<String> {
    let movie = store
        .create(NewMovie {
            title: args.title,
            year: args.year.unwrap_or_else(|| Utc::now().year()),
            genre: args.genre,
            rating: args.rating,
            watched: args.watched,
            notes: args.notes,
            poster_url: args.poster_url,
        })
        .context("could not save the new movie")?;
    info!(id = %movie.id, title = %movie.title, "added movie");

    let all = store.get_all()?;
    Ok(format!(
        "Added \"{}\" ({}).\n{}",
        movie.title,
        movie.id,
        output::render_stats(&collection_stats(&all))
    ))
}

pub fn list<S: Storage>(store: &MovieStore<S>, query: MovieQuery) -> Result<String> {
    let all = store.get_all()?;
    let shown = query.apply(&all);
    if shown.is_empty() {
        return Ok(output::render_empty_state(&query));
    }
    Ok(output::render_table(&shown))
}

pub fn show<S: Storage>(store: &MovieStore<S>, id: &str) -> Result<String> {
    match store.get_by_id(id)? {
        Some(movie) => Ok(output::render_detail(&movie)),
        None => bail!("no movie with id {id}"),
    }
}

pub fn edit<S: Storage>(store: &MovieStore<S>, id: &str, update: MovieUpdate) -> Result<String> {
    if update.is_empty() {
        bail!("nothing to change, pass at least one field option");
    }
    if store
        .update(id, update)
        .context("could not save the changes")?
        .is_none()
    {
        bail!("no movie with id {id}");
    }
    // Report from a fresh read of the slot, like every other mutation.
    let Some(movie) = store.get_by_id(id)? else {
        bail!("no movie with id {id}");
    };
    info!(id = %movie.id, "updated movie");
    Ok(format!("Updated \"{}\" ({}).", movie.title, movie.id))
}

pub fn toggle<S: Storage>(store: &MovieStore<S>, id: &str) -> Result<String> {
    let Some(movie) = store.get_by_id(id)? else {
        bail!("no movie with id {id}");
    };
    let update = MovieUpdate {
        watched: Some(!movie.watched),
        ..MovieUpdate::default()
    };
    if store
        .update(id, update)
        .context("could not save the changes")?
        .is_none()
    {
        bail!("no movie with id {id}");
    }
    // Report from a fresh read of the slot, like every other mutation.
    let Some(updated) = store.get_by_id(id)? else {
        bail!("no movie with id {id}");
    };
    info!(id = %updated.id, watched = updated.watched, "toggled watched flag");
    if updated.watched {
        Ok(format!("Marked \"{}\" watched.", updated.title))
    } else {
        Ok(format!("Marked \"{}\" unwatched.", updated.title))
    }
}

/// Deletes after confirmation. `yes` skips the prompt; otherwise `confirm`
/// is shown the movie about to disappear and a `false` answer aborts.
pub fn delete<S: Storage>(
    store: &MovieStore<S>,
    id: &str,
    yes: bool,
    confirm: impl FnOnce(&Movie) -> bool,
) -> Result<String> {
    let Some(movie) = store.get_by_id(id)? else {
        bail!("no movie with id {id}");
    };
    if !yes && !confirm(&movie) {
        return Ok("Aborted, nothing was deleted.".to_string());
    }
    store.delete(id).context("could not delete the movie")?;
    info!(id = %movie.id, title = %movie.title, "deleted movie");

    let all = store.get_all()?;
    Ok(format!(
        "Deleted \"{}\".\n{}",
        movie.title,
        output::render_stats(&collection_stats(&all))
    ))
}

pub fn stats<S: Storage>(store: &MovieStore<S>) -> Result<String> {
    let all = store.get_all()?;
    Ok(output::render_stats(&collection_stats(&all)))
}
