use std::time::Duration;

use serde::Deserialize;
use strum_macros::{Display, EnumString};

/// Capability flag of the host the engine runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// `None` tracks the whole catalog.
    pub max_tracked_objects: Option<usize>,
    pub refresh_interval: Duration,
    pub path_fine_step: Duration,
}

impl Platform {
    pub fn profile(self) -> PlatformProfile {
        match self {
            Platform::Desktop => PlatformProfile {
                max_tracked_objects: None,
                refresh_interval: Duration::from_secs(2),
                path_fine_step: Duration::from_secs(30),
            },
            Platform::Mobile => PlatformProfile {
                max_tracked_objects: Some(1000),
                refresh_interval: Duration::from_secs(2),
                path_fine_step: Duration::from_secs(30),
            },
        }
    }
}
