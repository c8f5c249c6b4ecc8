mod error;
mod platform;

use std::time::Duration as StdDuration;

use serde::Deserialize;

use crate::catalog::{
    load_with_fallback, Catalog, CatalogError, CatalogSource, DEFAULT_CATALOG_LIMIT,
};
use crate::frames::ObserverLocation;
use crate::predict::{PassSearch, PathSampling, DEFAULT_MIN_ELEVATION_DEG};

pub use error::ConfigError;
pub use platform::{Platform, PlatformProfile};

const DEFAULT_PASS_BUDGET: StdDuration = StdDuration::from_secs(5);
/// Element sets drift far past any useful accuracy within a few weeks.
const MAX_PASS_HORIZON: StdDuration = StdDuration::from_secs(30 * 24 * 3600);

/// Runtime settings. Anything not given falls back to the platform profile
/// or the built-in defaults, so an empty document is a valid configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    observer: ObserverLocation,
    platform: Platform,
    min_elevation_deg: f64,
    refresh_interval: Option<StdDuration>,
    max_tracked_objects: Option<usize>,
    pass_search: PassSearch,
    pass_budget: StdDuration,
    path_fine_step: Option<chrono::Duration>,
    path_coarse_step: chrono::Duration,
    path_long_period_threshold: chrono::Duration,
    catalog_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let path = PathSampling::default();
        Self {
            observer: ObserverLocation::default(),
            platform: Platform::default(),
            min_elevation_deg: DEFAULT_MIN_ELEVATION_DEG,
            refresh_interval: None,
            max_tracked_objects: None,
            pass_search: PassSearch::default(),
            pass_budget: DEFAULT_PASS_BUDGET,
            path_fine_step: None,
            path_coarse_step: path.coarse_step,
            path_long_period_threshold: path.long_period_threshold,
            catalog_limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    observer: Option<ObserverSection>,
    platform: Platform,
    visibility: VisibilitySection,
    passes: PassesSection,
    path: PathSection,
    catalog: CatalogSection,
    max_tracked_objects: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ObserverSection {
    coordinates: String,
    #[serde(default)]
    altitude_m: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VisibilitySection {
    min_elevation_deg: Option<f64>,
    refresh_interval: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PassesSection {
    min_elevation_deg: Option<f64>,
    horizon: Option<String>,
    step: Option<String>,
    budget: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PathSection {
    fine_step: Option<String>,
    coarse_step: Option<String>,
    long_period_threshold: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogSection {
    limit: Option<usize>,
}

fn parse_duration(field: &'static str, s: &str) -> Result<StdDuration, ConfigError> {
    humantime::parse_duration(s.trim()).map_err(|e| ConfigError::InvalidDuration {
        field,
        message: e.to_string(),
    })
}

fn parse_chrono_duration(field: &'static str, s: &str) -> Result<chrono::Duration, ConfigError> {
    let d = parse_duration(field, s)?;
    chrono::Duration::from_std(d).map_err(|e| ConfigError::InvalidDuration {
        field,
        message: e.to_string(),
    })
}

fn to_chrono(d: StdDuration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}

impl EngineConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml reads an empty document as null.
        let file: ConfigFile = if content.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(content)?
        };
        Self::from_sections(file)
    }

    fn from_sections(file: ConfigFile) -> Result<Self, ConfigError> {
        let mut config = Self {
            platform: file.platform,
            max_tracked_objects: file.max_tracked_objects,
            ..Self::default()
        };

        if let Some(observer) = file.observer {
            config.observer =
                ObserverLocation::from_coordinates(&observer.coordinates, Some(observer.altitude_m))
                    .ok_or(ConfigError::InvalidCoordinates(observer.coordinates))?;
        }

        if let Some(min) = file.visibility.min_elevation_deg {
            config.min_elevation_deg = min;
            config.pass_search.min_elevation_deg = min;
        }
        if let Some(s) = &file.visibility.refresh_interval {
            config.refresh_interval = Some(parse_duration("visibility.refresh_interval", s)?);
        }

        if let Some(min) = file.passes.min_elevation_deg {
            config.pass_search.min_elevation_deg = min;
        }
        if let Some(s) = &file.passes.horizon {
            let horizon = parse_duration("passes.horizon", s)?;
            if horizon > MAX_PASS_HORIZON {
                return Err(ConfigError::InvalidDuration {
                    field: "passes.horizon",
                    message: format!(
                        "{} exceeds the maximum of {}",
                        s.trim(),
                        humantime::format_duration(MAX_PASS_HORIZON)
                    ),
                });
            }
            config.pass_search.horizon = to_chrono(horizon);
        }
        if let Some(s) = &file.passes.step {
            config.pass_search.step = parse_chrono_duration("passes.step", s)?;
        }
        if let Some(s) = &file.passes.budget {
            config.pass_budget = parse_duration("passes.budget", s)?;
        }

        if let Some(s) = &file.path.fine_step {
            config.path_fine_step = Some(parse_chrono_duration("path.fine_step", s)?);
        }
        if let Some(s) = &file.path.coarse_step {
            config.path_coarse_step = parse_chrono_duration("path.coarse_step", s)?;
        }
        if let Some(s) = &file.path.long_period_threshold {
            config.path_long_period_threshold =
                parse_chrono_duration("path.long_period_threshold", s)?;
        }

        if let Some(limit) = file.catalog.limit {
            config.catalog_limit = limit;
        }

        Ok(config)
    }

    pub fn with_observer(mut self, observer: ObserverLocation) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_refresh_interval(mut self, interval: StdDuration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    pub fn with_max_tracked_objects(mut self, max: usize) -> Self {
        self.max_tracked_objects = Some(max);
        self
    }

    /// Threshold for the visibility refresh only.
    pub fn with_min_elevation(mut self, min_elevation_deg: f64) -> Self {
        self.min_elevation_deg = min_elevation_deg;
        self
    }

    /// Pass search parameters, including their own elevation threshold.
    /// The visibility refresh threshold is left as it is.
    pub fn with_pass_search(mut self, search: PassSearch) -> Self {
        self.pass_search = search;
        self
    }

    pub fn with_pass_budget(mut self, budget: StdDuration) -> Self {
        self.pass_budget = budget;
        self
    }

    pub fn observer(&self) -> ObserverLocation {
        self.observer
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn min_elevation_deg(&self) -> f64 {
        self.min_elevation_deg
    }

    pub fn profile(&self) -> PlatformProfile {
        self.platform.profile()
    }

    /// Explicit override, else the platform cap. `None` means uncapped.
    pub fn max_tracked_objects(&self) -> Option<usize> {
        self.max_tracked_objects
            .or(self.profile().max_tracked_objects)
    }

    pub fn refresh_interval(&self) -> StdDuration {
        self.refresh_interval
            .unwrap_or(self.profile().refresh_interval)
    }

    /// Starts with the visibility threshold unless `passes.min_elevation_deg`
    /// or [`with_pass_search`](Self::with_pass_search) set one.
    pub fn pass_search(&self) -> PassSearch {
        self.pass_search
    }

    pub fn pass_budget(&self) -> StdDuration {
        self.pass_budget
    }

    pub fn path_sampling(&self) -> PathSampling {
        PathSampling {
            fine_step: self
                .path_fine_step
                .unwrap_or_else(|| to_chrono(self.profile().path_fine_step)),
            coarse_step: self.path_coarse_step,
            long_period_threshold: self.path_long_period_threshold,
        }
    }

    /// `None` when the configured limit is 0.
    pub fn catalog_limit(&self) -> Option<usize> {
        Some(self.catalog_limit).filter(|l| *l > 0)
    }

    /// [`load_with_fallback`] with the configured catalog limit.
    pub fn load_catalog(
        &self,
        primary: &dyn CatalogSource,
        fallback: &dyn CatalogSource,
        min_objects: usize,
    ) -> Result<Catalog, CatalogError> {
        load_with_fallback(primary, fallback, min_objects, self.catalog_limit())
    }
}
