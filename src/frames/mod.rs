mod conversions;
mod error;
mod observer;
mod types;

pub use conversions::{
    earth_fixed_to_geodetic, inertial_to_earth_fixed, look_angles, sidereal_angle,
};
pub use error::FrameError;
pub use observer::ObserverLocation;
pub use types::{GeodeticPosition, LookAngles};

// WGS-84
pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
pub const WGS84_E2: f64 = WGS84_F * (2.0 - WGS84_F);

pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;
