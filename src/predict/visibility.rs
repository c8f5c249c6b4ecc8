use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::TrackedObject;
use crate::frames::{sidereal_angle, GeodeticPosition, LookAngles, ObserverLocation};
use crate::predict::propagation::{observe, Propagator};

pub const DEFAULT_MIN_ELEVATION_DEG: f64 = 10.0;

#[derive(Debug, Clone, Serialize)]
pub struct VisibleObject {
    pub object: Arc<TrackedObject>,
    pub look: LookAngles,
    pub position: GeodeticPosition,
}

impl VisibleObject {
    pub fn name(&self) -> &str {
        self.object.name()
    }

    pub fn elevation_deg(&self) -> f64 {
        self.look.elevation_deg
    }
}

/// Objects above the elevation threshold at one instant. Entries are in
/// catalog order, which carries no meaning.
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityReport {
    pub timestamp: DateTime<Utc>,
    pub observer: ObserverLocation,
    pub min_elevation_deg: f64,
    pub visible: Vec<VisibleObject>,
}

impl VisibilityReport {
    pub fn empty(
        timestamp: DateTime<Utc>,
        observer: ObserverLocation,
        min_elevation_deg: f64,
    ) -> Self {
        Self {
            timestamp,
            observer,
            min_elevation_deg,
            visible: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.visible.iter().any(|v| v.name() == name)
    }

    /// Names to highlight when showing only what is overhead.
    pub fn names(&self) -> HashSet<&str> {
        self.visible.iter().map(|v| v.name()).collect()
    }

    /// Highest first.
    pub fn sorted_by_elevation(&self) -> Vec<&VisibleObject> {
        let mut sorted: Vec<_> = self.visible.iter().collect();
        sorted.sort_by(|a, b| b.elevation_deg().total_cmp(&a.elevation_deg()));
        sorted
    }
}

/// Classify every object at `instant`. An object is visible iff its elevation
/// is strictly above `min_elevation_deg`. Objects that fail to propagate are
/// left out without affecting the rest.
pub fn evaluate<P: Propagator + ?Sized>(
    catalog: &[Arc<TrackedObject>],
    propagator: &P,
    observer: &ObserverLocation,
    instant: DateTime<Utc>,
    min_elevation_deg: f64,
) -> VisibilityReport {
    let sidereal = sidereal_angle(instant);
    let mut report = VisibilityReport::empty(instant, *observer, min_elevation_deg);
    let mut failed = 0usize;

    for object in catalog {
        match observe(propagator, object, observer, instant, sidereal) {
            Ok(obs) if obs.look.elevation_deg > min_elevation_deg => {
                report.visible.push(VisibleObject {
                    object: Arc::clone(object),
                    look: obs.look,
                    position: obs.position,
                });
            }
            Ok(_) => {}
            Err(e) => {
                log::trace!("{} excluded at {}: {}", object.name(), instant, e);
                failed += 1;
            }
        }
    }

    log::debug!(
        "{} of {} objects above {:.1} deg ({} failed to propagate)",
        report.count(),
        catalog.len(),
        min_elevation_deg,
        failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::fixtures::*;
    use crate::predict::propagation::stub::FixedPropagator;
    use crate::predict::Sgp4Propagator;
    use chrono::Duration;

    fn catalog() -> Catalog {
        Catalog::from_entries(valid_entries(), None)
    }

    fn equator() -> ObserverLocation {
        ObserverLocation::new(0.0, 0.0)
    }

    #[test]
    fn empty_catalog_gives_empty_report() {
        let report = evaluate(&[], &Sgp4Propagator, &equator(), epoch(), 10.0);
        assert_eq!(report.count(), 0);
        assert!(report.is_empty());
        assert_eq!(report.timestamp, epoch());
    }

    #[test]
    fn classifies_against_threshold() {
        let stub = FixedPropagator::default()
            .above(ISS_NAME, 0.0, 0.0, 500.0) // zenith
            .above(POLAR_NAME, 0.0, 90.0, 500.0) // far below the horizon
            .above(STARLINK_NAME, 0.0, 10.0, 500.0) // low in the east
            .above(GEO_NAME, 0.0, 0.0, 35_786.0);
        let report = evaluate(catalog().objects(), &stub, &equator(), epoch(), 10.0);

        assert!(report.contains(ISS_NAME));
        assert!(report.contains(GEO_NAME));
        assert!(!report.contains(POLAR_NAME));
        // 10 deg of arc away at 500 km: about 18.3 deg up.
        let starlink = report
            .visible
            .iter()
            .find(|v| v.name() == STARLINK_NAME)
            .unwrap();
        assert!(starlink.elevation_deg() > 15.0 && starlink.elevation_deg() < 22.0);
        assert!((starlink.look.azimuth_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn threshold_is_strict() {
        let stub = FixedPropagator::default().above(STARLINK_NAME, 0.0, 3.0, 500.0);
        let objects = catalog();
        let probe = evaluate(objects.objects(), &stub, &equator(), epoch(), -90.0);
        let elevation = probe.visible[0].elevation_deg();
        assert!(elevation > 0.0 && elevation < 90.0);

        let at = evaluate(objects.objects(), &stub, &equator(), epoch(), elevation);
        assert!(!at.contains(STARLINK_NAME));

        let below = evaluate(objects.objects(), &stub, &equator(), epoch(), elevation - 1e-6);
        assert!(below.contains(STARLINK_NAME));
    }

    #[test]
    fn propagation_failure_is_isolated() {
        // Only ISS has a position; the other three "decay".
        let stub = FixedPropagator::default().above(ISS_NAME, 0.0, 0.0, 500.0);
        let report = evaluate(catalog().objects(), &stub, &equator(), epoch(), 10.0);
        assert_eq!(report.count(), 1);
        assert_eq!(report.visible[0].name(), ISS_NAME);
        assert!((report.visible[0].position.altitude_km - 500.0).abs() < 1e-6);
    }

    #[test]
    fn repeated_evaluation_is_deterministic() {
        let objects = catalog();
        let observer = ObserverLocation::new(5.6037, -0.1870);
        let t = epoch() + Duration::minutes(17);
        let a = evaluate(objects.objects(), &Sgp4Propagator, &observer, t, 0.0);
        let b = evaluate(objects.objects(), &Sgp4Propagator, &observer, t, 0.0);
        let names = |r: &VisibilityReport| {
            r.visible
                .iter()
                .map(|v| (v.name().to_string(), v.elevation_deg()))
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn lowering_threshold_never_shrinks_the_set() {
        let objects = catalog();
        let observer = ObserverLocation::new(5.6037, -0.1870);
        let t = epoch() + Duration::minutes(42);
        let mut previous: HashSet<String> = HashSet::new();
        for threshold in [60.0, 30.0, 10.0, 0.0, -30.0, -90.0] {
            let report = evaluate(objects.objects(), &Sgp4Propagator, &observer, t, threshold);
            let current: HashSet<String> =
                report.names().into_iter().map(String::from).collect();
            assert!(previous.is_subset(&current), "threshold {threshold}");
            previous = current;
        }
        // Everything is above -90 deg.
        assert_eq!(previous.len(), objects.len());
    }

    #[test]
    fn report_helpers() {
        let stub = FixedPropagator::default()
            .above(ISS_NAME, 0.0, 0.0, 500.0)
            .above(STARLINK_NAME, 0.0, 3.0, 500.0);
        let report = evaluate(catalog().objects(), &stub, &equator(), epoch(), 0.0);
        assert_eq!(report.count(), 2);
        assert_eq!(report.names(), HashSet::from([ISS_NAME, STARLINK_NAME]));
        let sorted = report.sorted_by_elevation();
        assert_eq!(sorted[0].name(), ISS_NAME);
        assert_eq!(sorted[1].name(), STARLINK_NAME);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["visible"].as_array().unwrap().len(), 2);
        assert_eq!(json["visible"][0]["object"]["name"], ISS_NAME);
    }
}
