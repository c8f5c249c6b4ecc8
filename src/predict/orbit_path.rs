use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::catalog::TrackedObject;
use crate::frames::{
    earth_fixed_to_geodetic, inertial_to_earth_fixed, sidereal_angle, GeodeticPosition,
    MEAN_EARTH_RADIUS_KM,
};
use crate::predict::propagation::Propagator;
use crate::predict::PredictError;

/// How densely one revolution is sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSampling {
    pub fine_step: Duration,
    pub coarse_step: Duration,
    /// Orbits with a longer period use `coarse_step`.
    pub long_period_threshold: Duration,
}

impl Default for PathSampling {
    fn default() -> Self {
        Self {
            fine_step: Duration::seconds(30),
            coarse_step: Duration::minutes(5),
            long_period_threshold: Duration::minutes(1000),
        }
    }
}

impl PathSampling {
    pub fn step_for(&self, period_minutes: f64) -> Duration {
        let threshold = self.long_period_threshold.num_seconds() as f64 / 60.0;
        let step = if period_minutes > threshold {
            self.coarse_step
        } else {
            self.fine_step
        };
        step.max(Duration::seconds(1))
    }
}

/// Point on a globe of unit radius (Earth's mean radius), y towards the north
/// pole, x towards lon 0 on the equator, z towards lon -90.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PathPoint {
    pub fn from_geodetic(position: &GeodeticPosition) -> Self {
        let r = 1.0 + position.altitude_km / MEAN_EARTH_RADIUS_KM;
        let (lat, lon) = (position.latitude_rad, position.longitude_rad);
        Self {
            x: r * lat.cos() * lon.cos(),
            y: r * lat.sin(),
            z: -r * lat.cos() * lon.sin(),
        }
    }

    pub fn radius(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// One revolution in the Earth-fixed frame frozen at `sampled_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    pub object: String,
    pub sampled_at: DateTime<Utc>,
    pub period_minutes: f64,
    pub points: Vec<PathPoint>,
}

impl OrbitPath {
    fn empty(object: &TrackedObject, at: DateTime<Utc>) -> Self {
        Self {
            object: object.name().to_string(),
            sampled_at: at,
            period_minutes: object.period_minutes(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last point repeats the first.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }
}

/// Sample one orbital period starting at `at`.
///
/// Every sample is rotated with the sidereal angle of `at`, so the ring shows
/// the orbit plane as it sits over the Earth at that moment rather than a
/// ground track. Failed samples are dropped; the path is closed by repeating
/// its first point, and is empty when nothing could be sampled.
pub fn sample_path<P: Propagator + ?Sized>(
    object: &TrackedObject,
    propagator: &P,
    at: DateTime<Utc>,
    sampling: &PathSampling,
) -> OrbitPath {
    let mut path = OrbitPath::empty(object, at);
    let period = path.period_minutes;
    if !period.is_finite() || period <= 0.0 {
        log::warn!("{} has no usable orbital period ({})", object.name(), period);
        return path;
    }

    let sidereal = sidereal_angle(at);
    let step = sampling.step_for(period);
    let period = Duration::milliseconds((period * 60_000.0).round() as i64);
    let mut skipped = 0usize;
    let mut offset = Duration::zero();

    while offset <= period {
        let Some(instant) = at.checked_add_signed(offset) else {
            break;
        };
        let sample = propagator
            .propagate(object, instant)
            .and_then(|inertial| {
                earth_fixed_to_geodetic(inertial_to_earth_fixed(inertial, sidereal))
                    .map_err(PredictError::from)
            });
        match sample {
            Ok(position) => path.points.push(PathPoint::from_geodetic(&position)),
            Err(_) => skipped += 1,
        }
        match offset.checked_add(&step) {
            Some(next) => offset = next,
            None => break,
        }
    }

    if let Some(first) = path.points.first().copied() {
        path.points.push(first);
    }

    log::trace!(
        "{}: sampled {} points every {}s ({} skipped)",
        object.name(),
        path.points.len(),
        step.num_seconds(),
        skipped
    );
    path
}
