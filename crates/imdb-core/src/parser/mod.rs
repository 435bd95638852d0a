//! HTML parsers for imdb.com pages
//!
//! - `find`: parse `/find` search result pages and classify each hit

pub mod find;

pub use find::{classify, extract_year, parse_find_results};
