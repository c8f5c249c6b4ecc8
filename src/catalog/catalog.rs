use std::collections::HashSet;
use std::sync::Arc;

use super::{Category, RawEntry, TrackedObject};

/// Default number of objects accepted from one source.
pub const DEFAULT_CATALOG_LIMIT: usize = 2000;

/// The set of tracked objects. Display names are unique; the first
/// occurrence of a name wins. Replaced wholesale on reload, never edited.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    objects: Vec<Arc<TrackedObject>>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog, dropping malformed entries and duplicate names.
    /// Stops once `limit` objects have been accepted.
    pub fn from_entries<I>(entries: I, limit: Option<usize>) -> Self
    where
        I: IntoIterator<Item = RawEntry>,
    {
        let limit = limit.filter(|l| *l > 0);
        let mut names = HashSet::new();
        let mut objects = Vec::new();
        let mut dropped = 0usize;

        for entry in entries {
            if limit.is_some_and(|l| objects.len() >= l) {
                break;
            }
            if names.contains(entry.name.trim()) {
                log::debug!("Dropping duplicate catalog entry {}", entry.name.trim());
                dropped += 1;
                continue;
            }
            match TrackedObject::from_entry(&entry) {
                Ok(object) => {
                    names.insert(object.name().to_string());
                    objects.push(Arc::new(object));
                }
                Err(e) => {
                    log::warn!("Dropping catalog entry: {}", e);
                    dropped += 1;
                }
            }
        }

        log::info!(
            "Catalog loaded: {} objects, {} entries dropped",
            objects.len(),
            dropped
        );
        Self { objects }
    }

    pub fn objects(&self) -> &[Arc<TrackedObject>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TrackedObject>> {
        self.objects.iter().find(|o| o.name() == name)
    }

    /// Case-insensitive name search within a category, in catalog order.
    pub fn search(&self, term: &str, category: Category, limit: usize) -> Vec<Arc<TrackedObject>> {
        let term = term.to_lowercase();
        self.objects
            .iter()
            .filter(|o| category.matches(o.name()))
            .filter(|o| o.name().to_lowercase().contains(&term))
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn first_in_category(&self, category: Category) -> Option<&Arc<TrackedObject>> {
        self.objects.iter().find(|o| category.matches(o.name()))
    }
}
