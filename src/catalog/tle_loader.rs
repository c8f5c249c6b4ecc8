use std::fs;
use std::path::{Path, PathBuf};

use super::parsing::parse_tle_text;
use super::{Catalog, CatalogError, RawEntry};

/// Supplies raw (name, line1, line2) triples. Network feeds live outside this
/// crate and plug in through this trait.
pub trait CatalogSource {
    fn load(&self) -> Result<Vec<RawEntry>, CatalogError>;

    fn describe(&self) -> String;
}

/// Every `*.tle` / `*.txt` file in a directory.
pub struct TleDirectory {
    tle_dir: PathBuf,
}

impl TleDirectory {
    pub fn new(tle_dir: PathBuf) -> Self {
        Self { tle_dir }
    }

    fn parse_tle_file(&self, path: &Path) -> Result<Vec<RawEntry>, CatalogError> {
        let content = fs::read_to_string(path)?;
        Ok(parse_tle_text(&content))
    }
}

impl CatalogSource for TleDirectory {
    fn load(&self) -> Result<Vec<RawEntry>, CatalogError> {
        if !self.tle_dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound(
                self.tle_dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.tle_dir)? {
            let path = entry?.path();
            let is_tle = path
                .extension()
                .is_some_and(|ext| ext == "tle" || ext == "txt");
            if path.is_file() && is_tle {
                paths.push(path);
            }
        }
        paths.sort();

        let mut entries = Vec::new();
        for path in paths {
            match self.parse_tle_file(&path) {
                Ok(parsed) => {
                    log::debug!("{}: {} entries", path.display(), parsed.len());
                    entries.extend(parsed);
                }
                Err(e) => {
                    // Continue with other files
                    log::warn!("Failed to parse TLE file {}: {}", path.display(), e);
                }
            }
        }

        if entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(entries)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.tle_dir.display())
    }
}

/// An in-memory snapshot, e.g. a bundled fallback set.
pub struct StaticEntries {
    entries: Vec<RawEntry>,
}

impl StaticEntries {
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self { entries }
    }

    pub fn from_text(content: &str) -> Self {
        Self::new(parse_tle_text(content))
    }
}

impl CatalogSource for StaticEntries {
    fn load(&self) -> Result<Vec<RawEntry>, CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(self.entries.clone())
    }

    fn describe(&self) -> String {
        format!("snapshot of {} entries", self.entries.len())
    }
}

/// Build from `primary` if it yields at least `min_objects` trackable objects,
/// otherwise from `fallback`.
pub fn load_with_fallback(
    primary: &dyn CatalogSource,
    fallback: &dyn CatalogSource,
    min_objects: usize,
    limit: Option<usize>,
) -> Result<Catalog, CatalogError> {
    match primary.load() {
        Ok(entries) => {
            let catalog = Catalog::from_entries(entries, limit);
            if catalog.len() >= min_objects.max(1) {
                log::info!("Using {} ({} objects)", primary.describe(), catalog.len());
                return Ok(catalog);
            }
            log::warn!(
                "{} gave only {} objects, falling back to {}",
                primary.describe(),
                catalog.len(),
                fallback.describe()
            );
        }
        Err(e) => {
            log::warn!(
                "{} failed ({}), falling back to {}",
                primary.describe(),
                e,
                fallback.describe()
            );
        }
    }

    let catalog = Catalog::from_entries(fallback.load()?, limit);
    if catalog.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use tempfile::TempDir;

    fn three_line(e: &RawEntry) -> String {
        format!("{}\n{}\n{}\n", e.name, e.line1, e.line2)
    }

    #[test]
    fn loads_tle_and_txt_files_only() {
        let dir = TempDir::new().unwrap();
        let entries = valid_entries();
        fs::write(dir.path().join("a.tle"), three_line(&entries[0])).unwrap();
        fs::write(
            dir.path().join("b.txt"),
            format!("{}{}", three_line(&entries[1]), three_line(&entries[2])),
        )
        .unwrap();
        fs::write(dir.path().join("c.json"), three_line(&entries[3])).unwrap();

        let loaded = TleDirectory::new(dir.path().to_path_buf()).load().unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].name, ISS_NAME);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let source = TleDirectory::new(dir.path().join("nope"));
        assert!(matches!(
            source.load(),
            Err(CatalogError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn empty_directory_is_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let source = TleDirectory::new(dir.path().to_path_buf());
        assert!(matches!(source.load(), Err(CatalogError::EmptyCatalog)));
    }

    #[test]
    fn falls_back_when_primary_is_too_small() {
        let primary = StaticEntries::new(vec![entry(ISS_NAME, ISS_LINE1, ISS_LINE2)]);
        let fallback = StaticEntries::new(valid_entries());

        let catalog = load_with_fallback(&primary, &fallback, 2, None).unwrap();
        assert_eq!(catalog.len(), valid_entries().len());

        let catalog = load_with_fallback(&primary, &fallback, 1, None).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn falls_back_when_primary_fails() {
        let dir = TempDir::new().unwrap();
        let primary = TleDirectory::new(dir.path().join("missing"));
        let text: String = valid_entries().iter().map(three_line).collect();
        let fallback = StaticEntries::from_text(&text);

        let catalog = load_with_fallback(&primary, &fallback, 50, Some(3)).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn both_sources_empty_is_an_error() {
        let primary = StaticEntries::new(Vec::new());
        let fallback = StaticEntries::new(Vec::new());
        assert!(matches!(
            load_with_fallback(&primary, &fallback, 1, None),
            Err(CatalogError::EmptyCatalog)
        ));
    }
}
