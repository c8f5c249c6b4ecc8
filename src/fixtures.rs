use chrono::{DateTime, TimeZone, Utc};

use crate::catalog::RawEntry;

// ISS, September 2008. Epoch 2008-09-20 12:25:40 UTC.
pub const ISS_NAME: &str = "ISS (ZARYA)";
pub const ISS_LINE1: &str =
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_LINE2: &str =
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

pub const POLAR_NAME: &str = "POLAR TEST SAT";
pub const POLAR_LINE1: &str =
    "1 40001U 15001A   08264.51782528 -.00002182  00000-0 -11606-4 0  2929";
pub const POLAR_LINE2: &str =
    "2 40001  97.8000 120.0000 0012000  90.0000  10.0000 15.50000000 12348";

pub const STARLINK_NAME: &str = "STARLINK-TEST";
pub const STARLINK_LINE1: &str =
    "1 40002U 15002A   08264.51782528 -.00002182  00000-0 -11606-4 0  2921";
pub const STARLINK_LINE2: &str =
    "2 40002  53.0000 200.0000 0001000   0.0000 180.0000 15.06000000 43210";

pub const GEO_NAME: &str = "GEO TEST SAT";
pub const GEO_LINE1: &str =
    "1 28884U 05041A   08264.51782528 -.00000100  00000-0  00000-0 0  2926";
pub const GEO_LINE2: &str =
    "2 28884   0.0171  95.6700 0002471 283.3419 166.6012  1.00271196 12341";

pub fn entry(name: &str, line1: &str, line2: &str) -> RawEntry {
    RawEntry {
        name: name.to_string(),
        line1: line1.to_string(),
        line2: line2.to_string(),
    }
}

pub fn valid_entries() -> Vec<RawEntry> {
    vec![
        entry(ISS_NAME, ISS_LINE1, ISS_LINE2),
        entry(POLAR_NAME, POLAR_LINE1, POLAR_LINE2),
        entry(STARLINK_NAME, STARLINK_LINE1, STARLINK_LINE2),
        entry(GEO_NAME, GEO_LINE1, GEO_LINE2),
    ]
}

/// Shared TLE epoch of the fixtures.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2008, 9, 20, 12, 25, 40).unwrap()
}
