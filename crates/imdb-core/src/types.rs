//! Data types for the IMDb scraper
//!
//! Coarse result types, title subtypes, and the parsed search result record.
//! All types implement Serialize and Deserialize for JSON compatibility.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse category of a search result, derived from the 2-character
/// prefix of the IMDb identifier (e.g. `tt1561755` is a title).
///
/// Unrecognized prefixes are preserved in [`Type::Unknown`] so that new
/// IMDb entity kinds degrade gracefully instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// Unrestricted search across all categories
    All,
    /// Production/distribution company (`co` prefix)
    Company,
    /// Keyword (`kw` prefix)
    Keyword,
    /// Person (`nm` prefix)
    Name,
    /// Title: movie, series, episode or game (`tt` prefix)
    Title,
    /// Unrecognized identifier prefix, kept verbatim
    Unknown(String),
}

impl Type {
    /// Derive the coarse type from an IMDb identifier.
    ///
    /// # Examples
    /// ```
    /// use imdb_core::Type;
    ///
    /// assert_eq!(Type::from_id("tt1561755"), Type::Title);
    /// assert_eq!(Type::from_id("nm0000093"), Type::Name);
    /// assert_eq!(Type::from_id("zz123"), Type::Unknown("zz".to_string()));
    /// ```
    pub fn from_id(id: &str) -> Type {
        match id.get(..2) {
            Some("al") => Type::All,
            Some("co") => Type::Company,
            Some("kw") => Type::Keyword,
            Some("nm") => Type::Name,
            Some("tt") => Type::Title,
            Some(other) => Type::Unknown(other.to_string()),
            None => Type::Unknown(id.to_string()),
        }
    }

    /// The 2-character wire code used for the `s` query parameter.
    pub fn as_code(&self) -> &str {
        match self {
            Type::All => "al",
            Type::Company => "co",
            Type::Keyword => "kw",
            Type::Name => "nm",
            Type::Title => "tt",
            Type::Unknown(code) => code,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::All => write!(f, "all"),
            Type::Company => write!(f, "company"),
            Type::Keyword => write!(f, "keyword"),
            Type::Name => write!(f, "name"),
            Type::Title => write!(f, "title"),
            Type::Unknown(code) => write!(f, "Type({})", code),
        }
    }
}

/// Fine-grained category of a title result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subtype {
    /// Feature film (default when no marker is present)
    Movie,
    /// TV series, mini series or TV short
    Series,
    /// Single TV episode
    Episode,
    /// Video game
    Game,
}

impl Subtype {
    /// The 2-character wire code used for the `ttype` query parameter.
    pub fn as_code(&self) -> &str {
        match self {
            Subtype::Movie => "ft",
            Subtype::Series => "tv",
            Subtype::Episode => "ep",
            Subtype::Game => "vg",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subtype::Movie => write!(f, "movie"),
            Subtype::Series => write!(f, "series"),
            Subtype::Episode => write!(f, "episode"),
            Subtype::Game => write!(f, "game"),
        }
    }
}

/// One parsed hit from an IMDb `/find` results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Absolute URL of the detail page, query string stripped
    pub url: String,
    /// IMDb identifier (final path segment of `url`)
    pub id: String,
    /// Display text of the result's primary link
    pub title: String,
    /// Coarse category, derived from the id prefix
    #[serde(rename = "type")]
    pub result_type: Type,
    /// Fine category; only present for title results
    pub subtype: Option<Subtype>,
    /// 4-digit release year; only present for title results
    pub year: Option<String>,
}

impl fmt::Display for SearchResult {
    /// Renders `<id>: "<title>" (<subtype>[, <year>]) <url>`, showing the
    /// coarse type in place of the subtype for non-title results.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?} (", self.id, self.title)?;
        match self.subtype {
            Some(subtype) => write!(f, "{}", subtype)?,
            None => write!(f, "{}", self.result_type)?,
        }
        if let Some(year) = &self.year {
            write!(f, ", {}", year)?;
        }
        write!(f, ") {}", self.url)
    }
}
