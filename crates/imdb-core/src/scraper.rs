//! Main IMDb search API
//!
//! This module provides the high-level typed search surface. Each method
//! pre-fills the `s`/`ttype` query parameters and forwards to the common
//! find pipeline; failures propagate unchanged.

use crate::client::{ClientConfig, ImdbClient};
use crate::error::Result;
use crate::parser::parse_find_results;
use crate::types::{SearchResult, Subtype, Type};

/// Typed search API over imdb.com's `/find` endpoint.
///
/// Every method takes the query string plus an optional flat list of extra
/// key/value query parameters, and returns results in document order. All
/// operations are asynchronous and cancellable by dropping the future.
///
/// # Example
/// ```no_run
/// use imdb_core::ImdbScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = ImdbScraper::new();
///     let results = scraper.find_title("luca", &[]).await?;
///     for result in &results {
///         println!("{}", result);
///     }
///     Ok(())
/// }
/// ```
pub struct ImdbScraper {
    client: ImdbClient,
}

impl ImdbScraper {
    /// Create a scraper with default configuration.
    pub fn new() -> Self {
        Self {
            client: ImdbClient::new(),
        }
    }

    /// Create a scraper with custom client configuration.
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            client: ImdbClient::with_config(config),
        }
    }

    /// Create a scraper over a pre-configured client.
    pub fn with_client(client: ImdbClient) -> Self {
        Self { client }
    }

    /// Search across all result categories.
    ///
    /// `params` is a flat alternating key/value list merged into the query
    /// string; an odd-length list fails with `ImdbError::InvalidParams`
    /// before any network exchange. An empty result list is success.
    pub async fn find(&self, query: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        let mut params = params.to_vec();
        params.extend(["q", query]);
        let html = self.client.get("/find", &params).await?;
        parse_find_results(&html, &self.client.config().base_url)
    }

    /// Search restricted to one coarse result type.
    pub async fn find_type(
        &self,
        typ: Type,
        query: &str,
        params: &[&str],
    ) -> Result<Vec<SearchResult>> {
        let mut params = params.to_vec();
        params.extend(["s", typ.as_code()]);
        self.find(query, &params).await
    }

    /// Search for a company.
    pub async fn find_company(&self, company: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_type(Type::Company, company, params).await
    }

    /// Search for a keyword.
    pub async fn find_keyword(&self, keyword: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_type(Type::Keyword, keyword, params).await
    }

    /// Search for a person.
    pub async fn find_name(&self, name: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_type(Type::Name, name, params).await
    }

    /// Search for a title of any subtype.
    pub async fn find_title(&self, title: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_type(Type::Title, title, params).await
    }

    /// Search for a title restricted to one subtype.
    pub async fn find_title_subtype(
        &self,
        subtype: Subtype,
        title: &str,
        params: &[&str],
    ) -> Result<Vec<SearchResult>> {
        let mut params = params.to_vec();
        params.extend(["ttype", subtype.as_code()]);
        self.find_title(title, &params).await
    }

    /// Search for a movie.
    pub async fn find_movie(&self, movie: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_title_subtype(Subtype::Movie, movie, params).await
    }

    /// Search for a TV series.
    pub async fn find_series(&self, series: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_title_subtype(Subtype::Series, series, params)
            .await
    }

    /// Search for a TV episode.
    pub async fn find_episode(&self, episode: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_title_subtype(Subtype::Episode, episode, params)
            .await
    }

    /// Search for a video game.
    pub async fn find_game(&self, game: &str, params: &[&str]) -> Result<Vec<SearchResult>> {
        self.find_title_subtype(Subtype::Game, game, params).await
    }
}

impl Default for ImdbScraper {
    fn default() -> Self {
        Self::new()
    }
}
