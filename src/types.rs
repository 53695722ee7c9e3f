//! Type definitions for poster-watchlist.
//!
//! This module contains the poster record shown in every row of the list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle naming a bundled poster asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Create a handle for the named asset.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0)
    }
}

/// One entry of the poster catalog.
///
/// Records are created once at startup and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosterRecord {
    /// Bundled poster image.
    pub image: ImageRef,

    /// Movie title.
    pub title: String,

    /// Free-form rating text (e.g. "4.8"). Not validated as a number.
    pub rating: String,

    /// Author or studio.
    pub author: String,

    /// Short description.
    pub description: String,
}

impl PosterRecord {
    /// Create a record from its parts.
    pub fn new(
        image: &str,
        title: &str,
        rating: &str,
        author: &str,
        description: &str,
    ) -> Self {
        Self {
            image: ImageRef::new(image),
            title: title.to_string(),
            rating: rating.to_string(),
            author: author.to_string(),
            description: description.to_string(),
        }
    }

    /// Format the record as a single line.
    ///
    /// # Examples
    ///
    /// ```
    /// use poster_watchlist::types::PosterRecord;
    ///
    /// let poster = PosterRecord::new("dune", "Dune", "4.2", "Denis Villeneuve", "Epic sci-fi saga");
    /// assert_eq!(poster.to_display(), "Dune (4.2) - Denis Villeneuve");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} ({}) - {}", self.title, self.rating, self.author)
    }
}
