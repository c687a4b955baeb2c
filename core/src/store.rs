//! The record store: CRUD over one persisted collection of movies.
//!
//! # Design
//! Whole-collection semantics, kept from the original app: every operation
//! loads the full array from the slot, and every mutation writes it back in
//! full. The write amplification is O(collection size), which is fine for a
//! personal watchlist.
//!
//! Not-found is a sentinel (`Ok(None)` / `Ok(false)`), never an error. A
//! slot that was never written — or whose blob no longer parses — reads as
//! the empty collection. The store never writes a blob it could not read
//! back: a record with a non-finite rating is refused at persistence time.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::StoreError;
use crate::storage::Storage;
use crate::types::{Movie, MovieUpdate, NewMovie};

/// Persistence façade over a single serialized collection of `Movie`
/// records. The store is the only writer of the slot and the sole authority
/// for `id` and `added_at` assignment.
#[derive(Debug)]
pub struct MovieStore<S> {
    storage: S,
}

impl<S: Storage> MovieStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Every record, in storage order. Never fails on missing or malformed
    /// data — both read as the empty collection.
    pub fn get_all(&self) -> Result<Vec<Movie>, StoreError> {
        self.load()
    }

    /// Linear scan by id. `Ok(None)` when no record matches.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Movie>, StoreError> {
        Ok(self.load()?.into_iter().find(|m| m.id == id))
    }

    /// Append a new record with a freshly assigned id and creation time,
    /// persist the full collection, and return the stored record.
    pub fn create(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let mut movies = self.load()?;
        let movie = Movie {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            year: new.year,
            genre: new.genre,
            rating: new.rating,
            watched: new.watched,
            notes: new.notes,
            poster_url: new.poster_url,
            added_at: Utc::now(),
        };
        movies.push(movie.clone());
        self.persist(&movies)?;
        Ok(movie)
    }

    /// Merge `update` over the record with `id` and persist. `Ok(None)` and
    /// no write at all when the id is unknown.
    pub fn update(&self, id: &str, update: MovieUpdate) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.load()?;
        let Some(movie) = movies.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        update.apply(movie);
        let updated = movie.clone();
        self.persist(&movies)?;
        Ok(Some(updated))
    }

    /// Remove the record with `id`. Persists only when something was
    /// actually removed; returns whether a removal occurred.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut movies = self.load()?;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == before {
            return Ok(false);
        }
        self.persist(&movies)?;
        Ok(true)
    }

    fn load(&self) -> Result<Vec<Movie>, StoreError> {
        let Some(payload) = self.storage.read()? else {
            debug!("slot never written; starting from empty collection");
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Movie>>(&payload) {
            Ok(movies) => {
                debug!(count = movies.len(), "loaded collection");
                Ok(movies)
            }
            Err(err) => {
                warn!(error = %err, "persisted collection is malformed; treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, movies: &[Movie]) -> Result<(), StoreError> {
        // serde_json renders a non-finite f64 as `null`, which the next
        // load cannot parse back into `rating`; the whole blob would then
        // read as empty. Such a collection is never written.
        if let Some(movie) = movies.iter().find(|m| !m.rating.is_finite()) {
            return Err(StoreError::NonFiniteRating {
                id: movie.id.clone(),
            });
        }
        let payload = serde_json::to_string(movies).map_err(StoreError::Serialize)?;
        self.storage.write(&payload)?;
        debug!(count = movies.len(), "persisted collection");
        Ok(())
    }
}
