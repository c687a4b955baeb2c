//! Record store and query engine for a local movie watchlist.
//!
//! # Overview
//! One collection of movie records, persisted as a single JSON array in one
//! storage slot and rewritten whole on every mutation — the same model the
//! original browser app used with its one localStorage key. The store owns
//! CRUD and id/timestamp assignment; the query module derives the filtered,
//! sorted display projection.
//!
//! # Design
//! - `Storage` is the injectable seam: one trait over read/write of a
//!   serialized blob, with a file-backed slot for production and an
//!   in-memory fake for tests.
//! - Not-found is a sentinel (`Option` / `bool`), never an error; missing
//!   or malformed persisted data reads as the empty collection.
//! - `NewMovie` / `MovieUpdate` cannot carry `id` or `added_at`, so those
//!   stay store-assigned and immutable by construction.
//! - All operations are synchronous; the model is single-user, single
//!   process, one slot.

pub mod error;
pub mod query;
pub mod storage;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use query::{stats, MovieQuery, SortKey, WatchStats, WatchedFilter};
pub use storage::{FileStorage, MemoryStorage, Storage, DEFAULT_FILE_NAME};
pub use store::MovieStore;
pub use types::{Movie, MovieUpdate, NewMovie};
