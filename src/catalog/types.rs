use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};
use sgp4::{Constants, Elements};

use super::parsing::extract_catalog_number;
use super::CatalogError;

const MINUTES_PER_DAY: f64 = 1440.0;

/// One (name, line1, line2) triple as supplied by a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// A parsed, propagatable catalog member. Immutable once built.
#[derive(Serialize)]
pub struct TrackedObject {
    name: String,
    catalog_number: Option<u32>,
    line1: String,
    line2: String,
    #[serde(skip)]
    elements: Elements,
    #[serde(skip)]
    constants: Constants,
}

impl TrackedObject {
    pub fn from_entry(entry: &RawEntry) -> Result<Self, CatalogError> {
        let name = entry.name.trim();
        let line1 = entry.line1.trim();
        let line2 = entry.line2.trim();

        let malformed = |reason: &str| CatalogError::MalformedElementSet {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if name.is_empty() {
            return Err(malformed("empty name"));
        }
        if !line1.starts_with("1 ") {
            return Err(malformed("line 1 must start with \"1 \""));
        }
        if !line2.starts_with("2 ") {
            return Err(malformed("line 2 must start with \"2 \""));
        }

        let elements =
            Elements::from_tle(Some(name.to_string()), line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;

        // Alpha-5 and other non-numeric encodings fall back to the parsed id.
        let catalog_number = extract_catalog_number(line1)
            .or_else(|| u32::try_from(elements.norad_id).ok());

        Ok(Self {
            name: name.to_string(),
            catalog_number,
            line1: line1.to_string(),
            line2: line2.to_string(),
            elements,
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog_number(&self) -> Option<u32> {
        self.catalog_number
    }

    pub fn lines(&self) -> (&str, &str) {
        (&self.line1, &self.line2)
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    /// Mean motion in radians per minute.
    pub fn mean_motion_rad_per_min(&self) -> f64 {
        self.elements.mean_motion * TAU / MINUTES_PER_DAY
    }

    pub fn period_minutes(&self) -> f64 {
        TAU / self.mean_motion_rad_per_min()
    }
}

impl fmt::Debug for TrackedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedObject")
            .field("name", &self.name)
            .field("catalog_number", &self.catalog_number)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn builds_from_valid_entry() {
        let obj = TrackedObject::from_entry(&entry(ISS_NAME, ISS_LINE1, ISS_LINE2)).unwrap();
        assert_eq!(obj.name(), ISS_NAME);
        assert_eq!(obj.catalog_number(), Some(25544));
        assert_eq!(obj.lines(), (ISS_LINE1, ISS_LINE2));
        // 1440 / 15.72125391
        assert!((obj.period_minutes() - 91.5958).abs() < 1e-3);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let raw = entry("  ISS (ZARYA)\r", &format!(" {ISS_LINE1} "), &format!("{ISS_LINE2}\n"));
        let obj = TrackedObject::from_entry(&raw).unwrap();
        assert_eq!(obj.name(), ISS_NAME);
        assert_eq!(obj.lines().0, ISS_LINE1);
    }

    #[test]
    fn rejects_structural_problems() {
        let swapped = entry(ISS_NAME, ISS_LINE2, ISS_LINE1);
        assert!(matches!(
            TrackedObject::from_entry(&swapped),
            Err(CatalogError::MalformedElementSet { .. })
        ));

        let unnamed = entry("  ", ISS_LINE1, ISS_LINE2);
        assert!(matches!(
            TrackedObject::from_entry(&unnamed),
            Err(CatalogError::MalformedElementSet { .. })
        ));
    }

    #[test]
    fn rejects_garbage_with_valid_prefixes() {
        let raw = entry("JUNK", "1 this is not an element set", "2 neither is this");
        assert!(TrackedObject::from_entry(&raw).is_err());
    }

    #[test]
    fn serializes_identity_only() {
        let obj = TrackedObject::from_entry(&entry(ISS_NAME, ISS_LINE1, ISS_LINE2)).unwrap();
        let json = serde_json::to_value(&obj).unwrap();
        assert_eq!(json["name"], ISS_NAME);
        assert_eq!(json["catalog_number"], 25544);
        assert!(json.get("elements").is_none());
    }
}
