use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

use crate::{
    error::{AppError, AppResult},
    models::{Item, MovieId},
};

/// One entry of the catalog artifact. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    id: MovieId,
    title: String,
}

/// Ordered, immutable collection of recommendable movies
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    /// Title -> position of its first occurrence
    by_title: HashMap<String, usize>,
    /// Id -> position of its first occurrence
    by_id: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Builds a catalog from `(id, title)` pairs, assigning positions in order.
    ///
    /// Duplicate titles are tolerated here and resolve to their first occurrence.
    /// Use [`Catalog::validate_unique_titles`] to reject them.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (MovieId, S)>,
        S: Into<String>,
    {
        let mut catalog = Catalog::default();
        for (position, (id, title)) in entries.into_iter().enumerate() {
            let title = title.into();
            catalog.by_title.entry(title.clone()).or_insert(position);
            catalog.by_id.entry(id).or_insert(position);
            catalog.items.push(Item {
                id,
                title,
                position,
            });
        }
        catalog
    }

    /// Parses the JSON catalog artifact and rejects duplicate titles.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let records: Vec<CatalogRecord> = serde_json::from_reader(reader)?;
        let catalog = Self::from_entries(records.into_iter().map(|r| (r.id, r.title)));
        catalog.validate_unique_titles()?;
        Ok(catalog)
    }

    pub fn validate_unique_titles(&self) -> AppResult<()> {
        if self.by_title.len() == self.items.len() {
            return Ok(());
        }
        let duplicate = self
            .items
            .iter()
            .find(|item| self.by_title.get(&item.title) != Some(&item.position))
            .map(|item| item.title.clone())
            .unwrap_or_default();
        Err(AppError::DuplicateTitle(duplicate))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Exact-match title lookup; the first occurrence wins.
    pub fn find_by_title(&self, title: &str) -> AppResult<&Item> {
        self.by_title
            .get(title)
            .map(|&position| &self.items[position])
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))
    }

    pub fn find_by_id(&self, id: MovieId) -> AppResult<&Item> {
        self.by_id
            .get(&id)
            .map(|&position| &self.items[position])
            .ok_or_else(|| AppError::NotFound(format!("Movie {} is not in the catalog", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_follow_artifact_order() {
        let json = r#"[
            {"id": 19995, "title": "Avatar", "tags": "space marine"},
            {"id": 285, "title": "Pirates of the Caribbean: At World's End"},
            {"id": 206647, "title": "Spectre"}
        ]"#;

        let catalog = Catalog::from_reader(json.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2).unwrap().title, "Spectre");
        assert_eq!(catalog.find_by_title("Avatar").unwrap().position, 0);
        assert_eq!(catalog.find_by_id(285).unwrap().position, 1);
    }

    #[test]
    fn test_duplicate_title_rejected_at_load() {
        let json = r#"[
            {"id": 1, "title": "Heat"},
            {"id": 2, "title": "Alien"},
            {"id": 3, "title": "Heat"}
        ]"#;

        let err = Catalog::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::DuplicateTitle(ref t) if t == "Heat"));
    }

    #[test]
    fn test_in_memory_duplicates_resolve_to_first() {
        let catalog = Catalog::from_entries(vec![(1, "Heat"), (2, "Alien"), (3, "Heat")]);
        assert_eq!(catalog.find_by_title("Heat").unwrap().id, 1);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let catalog = Catalog::from_entries(vec![(1, "Heat")]);
        let err = catalog.find_by_title("heat").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_malformed_artifact() {
        let err = Catalog::from_reader(r#"[{"id": "abc"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
