use std::f64::consts::TAU;

use chrono::{DateTime, Utc};

use super::{
    FrameError, GeodeticPosition, LookAngles, ObserverLocation, WGS84_A_KM, WGS84_E2,
};

const GEODETIC_MAX_ITERATIONS: usize = 20;
const GEODETIC_TOLERANCE_RAD: f64 = 1e-12;

/// Greenwich sidereal angle in `[0, 2π)`; advances one turn per sidereal day.
pub fn sidereal_angle(instant: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&instant.naive_utc()))
        .rem_euclid(TAU)
}

/// Rotates an inertial (TEME) position about the polar axis by `-sidereal`.
pub fn inertial_to_earth_fixed(pos_inertial: [f64; 3], sidereal: f64) -> [f64; 3] {
    let [x, y, z] = pos_inertial;
    let (s, c) = sidereal.sin_cos();
    [c * x + s * y, c * y - s * x, z]
}

/// Inverts an Earth-fixed position (km) onto the WGS-84 ellipsoid.
pub fn earth_fixed_to_geodetic(pos: [f64; 3]) -> Result<GeodeticPosition, FrameError> {
    let [x, y, z] = pos;
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(FrameError::invalid(pos));
    }
    let r = (x * x + y * y).sqrt();
    if r == 0.0 && z == 0.0 {
        return Err(FrameError::invalid(pos));
    }

    let longitude = y.atan2(x);
    let mut latitude = z.atan2(r * (1.0 - WGS84_E2));
    for _ in 0..GEODETIC_MAX_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let next = (z + n * WGS84_E2 * sin_lat).atan2(r);
        let converged = (next - latitude).abs() < GEODETIC_TOLERANCE_RAD;
        latitude = next;
        if converged {
            break;
        }
    }

    let sin_lat = latitude.sin();
    // Stable at the poles, unlike r / cos(lat) - N.
    let altitude = r * latitude.cos() + z * sin_lat
        - WGS84_A_KM * (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();

    Ok(GeodeticPosition {
        latitude_rad: latitude,
        longitude_rad: longitude,
        altitude_km: altitude,
    })
}

/// Topocentric azimuth/elevation/range of an Earth-fixed target.
pub fn look_angles(
    observer: &ObserverLocation,
    pos_earth_fixed: [f64; 3],
) -> Result<LookAngles, FrameError> {
    let station = observer.position_ecef_km();
    let los: [f64; 3] = std::array::from_fn(|i| pos_earth_fixed[i] - station[i]);
    let range_km = dot(los, los).sqrt();
    if !range_km.is_finite() || range_km == 0.0 {
        return Err(FrameError::invalid(pos_earth_fixed));
    }

    let [east, north, up] = horizon_axes(observer.lat_rad(), observer.lon_rad());
    Ok(LookAngles {
        azimuth_deg: dot(los, east)
            .atan2(dot(los, north))
            .to_degrees()
            .rem_euclid(360.0),
        elevation_deg: (dot(los, up) / range_km).clamp(-1.0, 1.0).asin().to_degrees(),
        range_km,
    })
}

/// Unit east, north and up vectors of the local horizon, in Earth-fixed axes.
fn horizon_axes(lat_rad: f64, lon_rad: f64) -> [[f64; 3]; 3] {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    [
        [-sin_lon, cos_lon, 0.0],
        [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat],
        [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::f64::consts::{FRAC_PI_2, PI};

    const SIDEREAL_DAY_S: f64 = 86_164.0905;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn angle_diff(later: f64, earlier: f64) -> f64 {
        (later - earlier).rem_euclid(TAU)
    }

    #[test]
    fn sidereal_angle_at_j2000() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        // 280.46061837 deg
        assert!(close(sidereal_angle(j2000), 4.894_961_2, 1e-2));
    }

    #[test]
    fn sidereal_angle_repeats_after_one_sidereal_day() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        let sidereal_day = Duration::milliseconds((SIDEREAL_DAY_S * 1000.0) as i64);
        let drift = angle_diff(sidereal_angle(t + sidereal_day), sidereal_angle(t));
        assert!(drift < 1e-4 || drift > TAU - 1e-4, "drift {drift}");

        // A solar day over-rotates by roughly 0.9856 degrees.
        let extra = angle_diff(sidereal_angle(t + Duration::hours(24)), sidereal_angle(t));
        assert!(close(extra.to_degrees(), 0.9856, 1e-3), "extra {extra}");
    }

    #[test]
    fn sidereal_angle_advances_forward() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        let step = angle_diff(sidereal_angle(t + Duration::seconds(60)), sidereal_angle(t));
        assert!(close(step, 60.0 * 7.292_115e-5, 1e-6));
    }

    #[test]
    fn rotation_by_quarter_turn() {
        let pos = inertial_to_earth_fixed([1.0, 0.0, 5.0], FRAC_PI_2);
        assert!(close(pos[0], 0.0, 1e-12));
        assert!(close(pos[1], -1.0, 1e-12));
        assert_eq!(pos[2], 5.0);

        assert_eq!(inertial_to_earth_fixed([7.0, 8.0, 9.0], 0.0), [7.0, 8.0, 9.0]);
    }

    #[test]
    fn geodetic_on_equator_and_pole() {
        let eq = earth_fixed_to_geodetic([WGS84_A_KM + 500.0, 0.0, 0.0]).unwrap();
        assert!(close(eq.latitude_rad, 0.0, 1e-12));
        assert!(close(eq.longitude_rad, 0.0, 1e-12));
        assert!(close(eq.altitude_km, 500.0, 1e-9));

        let b = WGS84_A_KM * (1.0 - WGS84_E2).sqrt();
        let pole = earth_fixed_to_geodetic([0.0, 0.0, b + 100.0]).unwrap();
        assert!(close(pole.latitude_rad, FRAC_PI_2, 1e-12));
        assert!(close(pole.altitude_km, 100.0, 1e-9));

        let west = earth_fixed_to_geodetic([-(WGS84_A_KM + 1.0), 0.0, 0.0]).unwrap();
        assert!(close(west.longitude_rad.abs(), PI, 1e-12));
    }

    #[test]
    fn geodetic_recovers_station_coordinates() {
        let station = ObserverLocation {
            latitude_deg: 45.0,
            longitude_deg: 30.0,
            altitude_m: 1000.0,
        };
        let gd = earth_fixed_to_geodetic(station.position_ecef_km()).unwrap();
        assert!(close(gd.latitude_deg(), 45.0, 1e-8));
        assert!(close(gd.longitude_deg(), 30.0, 1e-8));
        assert!(close(gd.altitude_km, 1.0, 1e-6));
    }

    #[test]
    fn geodetic_rejects_degenerate_input() {
        assert!(earth_fixed_to_geodetic([0.0, 0.0, 0.0]).is_err());
        assert!(earth_fixed_to_geodetic([f64::NAN, 1.0, 1.0]).is_err());
    }

    #[test]
    fn look_angles_overhead_and_horizon() {
        let observer = ObserverLocation::new(0.0, 0.0);

        let zenith = look_angles(&observer, [WGS84_A_KM + 500.0, 0.0, 0.0]).unwrap();
        assert!(close(zenith.elevation_deg, 90.0, 1e-9));
        assert!(close(zenith.range_km, 500.0, 1e-9));

        let east = look_angles(&observer, [WGS84_A_KM, 1000.0, 0.0]).unwrap();
        assert!(close(east.elevation_deg, 0.0, 1e-9));
        assert!(close(east.azimuth_deg, 90.0, 1e-9));

        let north = look_angles(&observer, [WGS84_A_KM, 0.0, 1000.0]).unwrap();
        assert!(close(north.azimuth_deg, 0.0, 1e-9) || close(north.azimuth_deg, 360.0, 1e-9));
    }

    #[test]
    fn look_angles_below_horizon() {
        let observer = ObserverLocation::new(0.0, 0.0);
        let antipode = look_angles(&observer, [-(WGS84_A_KM + 500.0), 0.0, 0.0]).unwrap();
        assert!(close(antipode.elevation_deg, -90.0, 1e-9));
    }

    #[test]
    fn horizon_axes_are_orthonormal() {
        let axes = horizon_axes(0.7, -2.1);
        for (i, a) in axes.iter().enumerate() {
            for (j, b) in axes.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(close(dot(*a, *b), expected, 1e-12));
            }
        }
    }

    #[test]
    fn look_angles_reject_observer_position() {
        let observer = ObserverLocation::new(10.0, 20.0);
        assert!(look_angles(&observer, observer.position_ecef_km()).is_err());
    }
}
