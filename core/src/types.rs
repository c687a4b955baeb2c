//! Domain records for the watchlist.
//!
//! # Design
//! `Movie` matches the persisted JSON layout field-for-field: camelCase
//! keys, `posterUrl` omitted when unset. Collections written by earlier
//! versions of the app therefore load unchanged. `NewMovie` and
//! `MovieUpdate` deliberately have no `id` or `added_at` field — the store
//! is the sole authority for both, so immutability is enforced by the types
//! rather than by runtime checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single movie record in the collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Opaque unique identifier, assigned by the store at creation.
    pub id: String,
    pub title: String,
    pub year: i32,
    /// Empty string means "no genre".
    pub genre: String,
    /// 0.0–10.0 by convention; 0.0 renders as "unrated".
    pub rating: f64,
    pub watched: bool,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// Creation time, assigned by the store. ISO-8601 on the wire.
    pub added_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a record.
///
/// Everything except `title` and `year` carries a `#[serde(default)]`,
/// mirroring the add form's initial values (empty genre and notes, rating
/// 0, unwatched, no poster).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// Partial update for an existing record. `None` leaves a field unchanged —
/// shallow field replacement, never a deep merge.
///
/// `poster_url` nests a second `Option` so "clear the poster"
/// (`Some(None)`) stays distinguishable from "leave it alone" (`None`).
/// This type never crosses the storage boundary, so it carries no serde
/// derives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub rating: Option<f64>,
    pub watched: Option<bool>,
    pub notes: Option<String>,
    pub poster_url: Option<Option<String>>,
}

impl MovieUpdate {
    /// Merge the supplied fields over `movie`, leaving the rest untouched.
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if let Some(rating) = self.rating {
            movie.rating = rating;
        }
        if let Some(watched) = self.watched {
            movie.watched = watched;
        }
        if let Some(notes) = self.notes {
            movie.notes = notes;
        }
        if let Some(poster_url) = self.poster_url {
            movie.poster_url = poster_url;
        }
    }

    /// True when no field is set, i.e. applying this update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: "8d9f1c3a-1b6e-4a4b-9f1d-2f3a4b5c6d7e".to_string(),
            title: "Dune".to_string(),
            year: 2021,
            genre: "Sci-Fi".to_string(),
            rating: 8.3,
            watched: false,
            notes: "Rewatch in IMAX".to_string(),
            poster_url: None,
            added_at: "2024-03-01T18:20:05.125Z".parse().unwrap(),
        }
    }

    #[test]
    fn movie_serializes_to_stored_layout() {
        let json = serde_json::to_value(sample_movie()).unwrap();
        assert_eq!(json["id"], "8d9f1c3a-1b6e-4a4b-9f1d-2f3a4b5c6d7e");
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["year"], 2021);
        assert_eq!(json["genre"], "Sci-Fi");
        assert_eq!(json["rating"], 8.3);
        assert_eq!(json["watched"], false);
        assert_eq!(json["notes"], "Rewatch in IMAX");
        assert_eq!(json["addedAt"], "2024-03-01T18:20:05.125Z");
    }

    #[test]
    fn unset_poster_url_is_omitted_entirely() {
        let json = serde_json::to_value(sample_movie()).unwrap();
        assert!(json.get("posterUrl").is_none());
        assert!(json.get("poster_url").is_none());
    }

    #[test]
    fn set_poster_url_uses_camel_case_key() {
        let mut movie = sample_movie();
        movie.poster_url = Some("https://example.com/dune.jpg".to_string());
        let json = serde_json::to_value(movie).unwrap();
        assert_eq!(json["posterUrl"], "https://example.com/dune.jpg");
    }

    #[test]
    fn movie_roundtrips_through_json() {
        let movie = sample_movie();
        let encoded = serde_json::to_string(&movie).unwrap();
        let decoded: Movie = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, movie);
    }

    #[test]
    fn new_movie_accepts_sparse_json() {
        let new: NewMovie = serde_json::from_str(r#"{"title":"Her","year":2013}"#).unwrap();
        assert_eq!(new.title, "Her");
        assert_eq!(new.year, 2013);
        assert_eq!(new.genre, "");
        assert_eq!(new.rating, 0.0);
        assert!(!new.watched);
        assert_eq!(new.notes, "");
        assert!(new.poster_url.is_none());
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut movie = sample_movie();
        let update = MovieUpdate {
            rating: Some(9.1),
            watched: Some(true),
            ..MovieUpdate::default()
        };
        update.apply(&mut movie);

        assert_eq!(movie.rating, 9.1);
        assert!(movie.watched);
        // Everything else is untouched.
        let original = sample_movie();
        assert_eq!(movie.id, original.id);
        assert_eq!(movie.title, original.title);
        assert_eq!(movie.year, original.year);
        assert_eq!(movie.genre, original.genre);
        assert_eq!(movie.notes, original.notes);
        assert_eq!(movie.added_at, original.added_at);
    }

    #[test]
    fn update_can_clear_poster() {
        let mut movie = sample_movie();
        movie.poster_url = Some("https://example.com/dune.jpg".to_string());
        let update = MovieUpdate {
            poster_url: Some(None),
            ..MovieUpdate::default()
        };
        update.apply(&mut movie);
        assert!(movie.poster_url.is_none());
    }

    #[test]
    fn empty_update_is_a_noop() {
        let mut movie = sample_movie();
        let before = movie.clone();
        assert!(MovieUpdate::default().is_empty());
        MovieUpdate::default().apply(&mut movie);
        assert_eq!(movie, before);
    }
}
