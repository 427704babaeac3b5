//! Catalog fetch collaborators.

pub mod tmdb;

pub use tmdb::{FetchError, TmdbFetcher};
