//! The poster catalog.
//!
//! The catalog is the fixed, ordered sequence of posters shown by the list.
//! It is produced once at startup, either from the built-in list or from a
//! TOML catalog file, and shared read-only afterwards.

use crate::error::{AppError, Result};
use crate::types::PosterRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::rc::Rc;

/// On-disk catalog layout: a list of `[[posters]]` tables.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    posters: Vec<PosterRecord>,
}

/// Immutable, cheaply clonable sequence of posters.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    posters: Rc<[PosterRecord]>,
}

impl Catalog {
    /// Wrap an ordered list of posters.
    pub fn new(posters: Vec<PosterRecord>) -> Self {
        Self {
            posters: posters.into(),
        }
    }

    /// The ten posters bundled with the application.
    pub fn builtin() -> Self {
        Self::new(vec![
            PosterRecord::new(
                "avengers",
                "Avengers",
                "4.8",
                "Marvel Studios",
                "Superhero action movie",
            ),
            PosterRecord::new("batman", "Batman", "4.7", "DC Comics", "Dark Knight's saga"),
            PosterRecord::new(
                "bullet",
                "Bullet Train",
                "4.3",
                "Action Studio",
                "High-octane action",
            ),
            PosterRecord::new(
                "deadpool",
                "Deadpool",
                "4.6",
                "Marvel Studios",
                "Merc with a mouth",
            ),
            PosterRecord::new("dune", "Dune", "4.2", "Denis Villeneuve", "Epic sci-fi saga"),
            PosterRecord::new(
                "harry_potter",
                "Harry Potter",
                "4.8",
                "J.K. Rowling",
                "Wizarding world adventure",
            ),
            PosterRecord::new(
                "hobbit",
                "The Hobbit",
                "4.4",
                "Peter Jackson",
                "Middle-earth journey",
            ),
            PosterRecord::new("joker", "Joker", "4.9", "Todd Phillips", "Origin of Joker"),
            PosterRecord::new("nacho", "Nacho Libre", "4.1", "Jared Hess", "Comedy wrestling"),
            PosterRecord::new(
                "spiderman",
                "Spiderman",
                "4.0",
                "Marvel Studios",
                "Web-slinging hero",
            ),
        ])
    }

    /// Parse a catalog from TOML text.
    ///
    /// Every poster must have a non-empty title.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;

        if let Some(pos) = file.posters.iter().position(|p| p.title.trim().is_empty()) {
            return Err(AppError::Catalog(format!("poster #{} has an empty title", pos + 1)));
        }

        Ok(Self::new(file.posters))
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        debug!("Loaded {} posters from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serialize the catalog in the same layout `from_toml_str` reads.
    ///
    /// `--print-catalog` uses this to give a starting point for a custom
    /// catalog file.
    pub fn to_toml_string(&self) -> Result<String> {
        let file = CatalogFile {
            posters: self.posters.to_vec(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Shared handle to the underlying records.
    pub fn records(&self) -> Rc<[PosterRecord]> {
        Rc::clone(&self.posters)
    }

    /// Titles of the selected rows, in catalog order.
    ///
    /// Indices outside the catalog are ignored.
    pub fn selected_titles(&self, selected: &HashSet<usize>) -> Vec<&str> {
        self.posters
            .iter()
            .enumerate()
            .filter(|(i, _)| selected.contains(i))
            .map(|(_, p)| p.title.as_str())
            .collect()
    }

    /// Text of the watchlist notification for the given selection.
    pub fn watchlist_message(&self, selected: &HashSet<usize>) -> String {
        format!("Watchlist: {}", self.selected_titles(selected).join(", "))
    }
}

impl Deref for Catalog {
    type Target = [PosterRecord];

    fn deref(&self) -> &Self::Target {
        &self.posters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_ten_posters() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0].title, "Avengers");
        assert_eq!(catalog[9].title, "Spiderman");
    }

    #[test]
    fn test_selected_titles_follow_catalog_order() {
        let catalog = Catalog::builtin();
        let selected: HashSet<usize> = [7, 2, 5].into_iter().collect();
        assert_eq!(
            catalog.selected_titles(&selected),
            vec!["Bullet Train", "Harry Potter", "Joker"]
        );
    }

    #[test]
    fn test_selected_titles_ignore_unknown_indices() {
        let catalog = Catalog::builtin();
        let selected: HashSet<usize> = [0, 42].into_iter().collect();
        assert_eq!(catalog.selected_titles(&selected), vec!["Avengers"]);
    }

    #[test]
    fn test_watchlist_message() {
        let catalog = Catalog::builtin();
        let selected: HashSet<usize> = [9, 0].into_iter().collect();
        assert_eq!(
            catalog.watchlist_message(&selected),
            "Watchlist: Avengers, Spiderman"
        );
    }

    #[test]
    fn test_from_toml_str() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[posters]]
            image = "alien"
            title = "Alien"
            rating = "4.5"
            author = "Ridley Scott"
            description = "In space no one can hear you scream"

            [[posters]]
            image = "up"
            title = "Up"
            rating = "great"
            author = "Pixar"
            description = "Balloons"
            "#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].rating, "great");
    }

    #[test]
    fn test_from_toml_str_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_toml_str_rejects_empty_title() {
        let err = Catalog::from_toml_str(
            r#"
            [[posters]]
            image = "blank"
            title = "  "
            rating = "1.0"
            author = "Nobody"
            description = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn test_from_toml_str_rejects_missing_field() {
        let err = Catalog::from_toml_str(
            r#"
            [[posters]]
            title = "No Image"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_toml_string_reads_back() {
        let catalog = Catalog::builtin();
        let text = catalog.to_toml_string().unwrap();
        assert_eq!(Catalog::from_toml_str(&text).unwrap(), catalog);
    }

    #[test]
    fn test_records_are_shared() {
        let catalog = Catalog::builtin();
        let records = catalog.records();
        assert!(std::ptr::eq(records.as_ptr(), catalog.as_ptr()));
    }
}
