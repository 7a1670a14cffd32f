//! Data model for anime search results.

pub mod types;

pub use types::{AnimeCategory, AnimeRecord, SearchPage};
