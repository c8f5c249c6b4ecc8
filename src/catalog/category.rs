use strum_macros::{Display, EnumIter, EnumString};

/// Name-based object families used for filtering and quick jumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    #[default]
    All,
    Starlink,
    Iss,
    Gps,
    Weather,
    Hubble,
}

impl Category {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::All => &[],
            Category::Starlink => &["starlink"],
            Category::Iss => &["iss", "zarya"],
            Category::Gps => &["gps", "navstar"],
            Category::Weather => &["noaa", "goes", "meteosat"],
            Category::Hubble => &["hst", "hubble"],
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        if *self == Category::All {
            return true;
        }
        let lower = name.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}
