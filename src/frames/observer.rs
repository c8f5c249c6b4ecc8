use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{WGS84_A_KM, WGS84_E2};

/// Ground location the sky is observed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

impl Default for ObserverLocation {
    /// Accra, Ghana.
    fn default() -> Self {
        Self {
            latitude_deg: 5.6037,
            longitude_deg: -0.1870,
            altitude_m: 0.0,
        }
    }
}

impl ObserverLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m: 0.0,
        }
    }

    /// Parses `"lat,lon"` in degrees.
    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }

    /// Takes the geolocation collaborator's answer, or proceeds with `fallback`.
    pub fn resolve<E: Display>(located: Result<Self, E>, fallback: Self) -> Self {
        match located {
            Ok(location) => location,
            Err(e) => {
                log::warn!(
                    "Geolocation failed ({}), using {:.4},{:.4}",
                    e,
                    fallback.latitude_deg,
                    fallback.longitude_deg
                );
                fallback
            }
        }
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - WGS84_E2) + alt_km) * sin_lat,
        ]
    }
}
