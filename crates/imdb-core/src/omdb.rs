//! Thin client for the OMDb JSON API (omdbapi.com)
//!
//! Companion to the HTML search scraper for fetching structured movie
//! details. The API key is injected explicitly at construction; there is no
//! process-global default client and no environment lookup.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ImdbError, Result};

/// Base URL for the OMDb API
const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client.
///
/// # Example
/// ```no_run
/// use imdb_core::OmdbClient;
///
/// # async fn example() -> Result<(), imdb_core::ImdbError> {
/// let client = OmdbClient::new("my-api-key")?;
/// let movie = client.movie_by_imdb_id("tt0137523").await?;
/// println!("{}", movie.title);
/// # Ok(())
/// # }
/// ```
pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Create a client with the given API key.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, OMDB_BASE_URL)
    }

    /// Create a client against a non-default endpoint (used in tests).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Issue a GET with the API key plus `params` and decode the JSON body.
    async fn request<T>(&self, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ImdbError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Search for movies by title and optional year.
    pub async fn search(&self, title: &str, year: Option<&str>) -> Result<OmdbSearchResponse> {
        let mut params = vec![("s", title)];
        if let Some(year) = year {
            params.push(("y", year));
        }
        let response: OmdbSearchResponse = self.request(&params).await?;
        check_response(&response.response, &response.error)?;
        Ok(response)
    }

    /// Fetch full movie details by title and optional year.
    pub async fn movie_by_title(&self, title: &str, year: Option<&str>) -> Result<OmdbMovie> {
        let mut params = vec![("t", title), ("plot", "full")];
        if let Some(year) = year {
            params.push(("y", year));
        }
        let movie: OmdbMovie = self.request(&params).await?;
        check_response(&movie.response, &movie.error)?;
        Ok(movie)
    }

    /// Fetch full movie details by IMDb identifier (e.g. `tt0137523`).
    pub async fn movie_by_imdb_id(&self, id: &str) -> Result<OmdbMovie> {
        let movie: OmdbMovie = self.request(&[("i", id), ("plot", "full")]).await?;
        check_response(&movie.response, &movie.error)?;
        Ok(movie)
    }
}

/// OMDb signals application-level failure with `"Response": "False"` and an
/// `"Error"` message, independent of the HTTP status.
fn check_response(response: &str, error: &Option<String>) -> Result<()> {
    if response == "False" {
        return Err(ImdbError::Omdb(
            error.clone().unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    Ok(())
}

/// One hit from an OMDb search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub poster: String,
}

impl fmt::Display for OmdbSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {} ({}) Type: {}",
            self.imdb_id, self.title, self.year, self.kind
        )
    }
}

/// Container for OMDb search hits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResponse {
    #[serde(default)]
    pub search: Vec<OmdbSearchResult>,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Full movie details from OMDb.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub metascore: String,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(default, rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(default, rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, rename = "Type")]
    pub kind: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl fmt::Display for OmdbMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {} ({})", self.imdb_id, self.title, self.year)
    }
}
