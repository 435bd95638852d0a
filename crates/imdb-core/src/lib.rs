//! IMDb Scraper Core Library
//!
//! This crate provides typed search over imdb.com's `/find` pages and a
//! thin client for the OMDb JSON movie database API.
//!
//! # Features
//! - Search by company, keyword, name or title, with title subtype filters
//!   (movie/series/episode/game)
//! - Classification of raw results into a type/subtype taxonomy with year
//!   extraction
//! - Pluggable HTTP transport, decorable with an on-disk response cache and
//!   request/response logging
//! - OMDb movie detail lookups with explicit API key injection

pub mod client;
pub mod error;
pub mod omdb;
pub mod parser;
pub mod scraper;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use self::client::{ClientConfig, ImdbClient};
pub use self::error::{ImdbError, Result};
pub use self::omdb::{OmdbClient, OmdbMovie, OmdbSearchResponse, OmdbSearchResult};
pub use self::scraper::ImdbScraper;
pub use self::transport::{CacheTransport, HttpTransport, LogTransport, Response, Transport};
pub use self::types::{SearchResult, Subtype, Type};
