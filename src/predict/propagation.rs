use chrono::{DateTime, Utc};

use crate::catalog::TrackedObject;
use crate::frames::{
    earth_fixed_to_geodetic, inertial_to_earth_fixed, look_angles, GeodeticPosition, LookAngles,
    ObserverLocation,
};
use crate::predict::PredictError;

/// Inertial (TEME) position in km.
pub type InertialPosition = [f64; 3];

/// Element set + instant -> inertial position. Implementations must be pure.
pub trait Propagator: Send + Sync {
    fn propagate(
        &self,
        object: &TrackedObject,
        instant: DateTime<Utc>,
    ) -> Result<InertialPosition, PredictError>;
}

/// SGP4/SDP4 via the `sgp4` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        object: &TrackedObject,
        instant: DateTime<Utc>,
    ) -> Result<InertialPosition, PredictError> {
        let minutes = object
            .elements()
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .map_err(|e| PredictError::PropagationInvalid(e.to_string()))?;

        let prediction = object
            .constants()
            .propagate(minutes)
            .map_err(|e| PredictError::PropagationInvalid(e.to_string()))?;

        if !prediction.position.iter().all(|c| c.is_finite()) {
            return Err(PredictError::PropagationInvalid(
                "non-finite position".to_string(),
            ));
        }
        Ok(prediction.position)
    }
}

/// Where one object is, and how it looks from one observer, at one instant.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Observation {
    pub position: GeodeticPosition,
    pub look: LookAngles,
}

pub(crate) fn observe<P: Propagator + ?Sized>(
    propagator: &P,
    object: &TrackedObject,
    observer: &ObserverLocation,
    instant: DateTime<Utc>,
    sidereal: f64,
) -> Result<Observation, PredictError> {
    let inertial = propagator.propagate(object, instant)?;
    let earth_fixed = inertial_to_earth_fixed(inertial, sidereal);
    Ok(Observation {
        position: earth_fixed_to_geodetic(earth_fixed)?,
        look: look_angles(observer, earth_fixed)?,
    })
}
