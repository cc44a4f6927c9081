//! WGS84 <-> UTM transverse Mercator (Snyder 1987, USGS Prof. Paper 1395).

use geo::Coord;

// WGS84 ellipsoid.
const A: f64 = 6_378_137.0;
const F: f64 = 1.0 / 298.257_223_563;
const E2: f64 = 2.0 * F - F * F;
const E_PRIME2: f64 = E2 / (1.0 - E2);

const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Widest longitude offset from the central meridian, in degrees, for which
/// a forward and inverse round trip stays within 1e-6°. The series degrades
/// quickly beyond it: about 3e-6° at 7° and 8e-6° at 8°.
pub(crate) const ACCURATE_OFFSET_DEGREES: f64 = 5.0;

/// Longitude of the zone's central meridian, in degrees.
pub(crate) fn central_meridian(zone: u8) -> f64 {
    (f64::from(zone) - 1.0) * 6.0 - 180.0 + 3.0
}

/// Signed offset of `lon` from the zone's central meridian, wrapped into
/// `(-180, 180]` degrees.
pub(crate) fn meridian_offset(lon: f64, zone: u8) -> f64 {
    let offset = (lon - central_meridian(zone)).rem_euclid(360.0);
    if offset > 180.0 { offset - 360.0 } else { offset }
}

/// Project a (longitude, latitude) pair in degrees to (easting, northing)
/// in meters.
pub(crate) fn forward(geographic: Coord<f64>, zone: u8, north: bool) -> Coord<f64> {
    let lat = geographic.y.to_radians();
    let delta_lon = meridian_offset(geographic.x, zone).to_radians();

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let tan_lat = lat.tan();

    let n = A / (1.0 - E2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = E_PRIME2 * cos_lat * cos_lat;
    let a = cos_lat * delta_lon;
    let m = meridional_arc(lat);

    let a2 = a * a;
    let a4 = a2 * a2;
    let a6 = a4 * a2;

    // Snyder eq. 8-9
    let easting = K0
        * n
        * (a + (1.0 - t + c) * a2 * a / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * E_PRIME2) * a4 * a / 120.0)
        + FALSE_EASTING;

    // Snyder eq. 8-10
    let northing = K0
        * (m + n
            * tan_lat
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * E_PRIME2) * a6 / 720.0));

    Coord {
        x: easting,
        y: if north {
            northing
        } else {
            northing + FALSE_NORTHING_SOUTH
        },
    }
}

/// Unproject an (easting, northing) pair in meters back to
/// (longitude, latitude) in degrees.
pub(crate) fn inverse(projected: Coord<f64>, zone: u8, north: bool) -> Coord<f64> {
    let x = projected.x - FALSE_EASTING;
    let y = if north {
        projected.y
    } else {
        projected.y - FALSE_NORTHING_SOUTH
    };

    let phi1 = footpoint_latitude(y / K0);
    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let denominator = 1.0 - E2 * sin_phi1 * sin_phi1;
    let n1 = A / denominator.sqrt();
    let r1 = A * (1.0 - E2) / (denominator * denominator.sqrt());
    let t1 = tan_phi1 * tan_phi1;
    let c1 = E_PRIME2 * cos_phi1 * cos_phi1;
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d2 * d2;
    let d5 = d4 * d;
    let d6 = d4 * d2;

    // Snyder eq. 8-17
    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * E_PRIME2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                    - 252.0 * E_PRIME2
                    - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    // Snyder eq. 8-18
    let lon = central_meridian(zone).to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * E_PRIME2 + 24.0 * t1 * t1)
                * d5
                / 120.0)
            / cos_phi1;

    Coord {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}

/// Meridional arc from the equator to `lat` (radians). Snyder eq. 3-21.
fn meridional_arc(lat: f64) -> f64 {
    let e4 = E2 * E2;
    let e6 = e4 * E2;

    A * ((1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
        - (3.0 * E2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
        + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
        - (35.0 * e6 / 3072.0) * (6.0 * lat).sin())
}

/// Latitude whose meridional arc equals `m`. Snyder eqs. 3-24, 3-26.
fn footpoint_latitude(m: f64) -> f64 {
    let e4 = E2 * E2;
    let e6 = e4 * E2;
    let mu = m / (A * (1.0 - E2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

    let root = (1.0 - E2).sqrt();
    let e1 = (1.0 - root) / (1.0 + root);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_2 * e1_2;

    mu + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_close(actual: f64, expected: f64, tolerance: f64, what: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff < tolerance,
            "{what}: expected {expected}, got {actual}, diff {diff} exceeds {tolerance}"
        );
    }

    #[rstest]
    #[case(1, -177.0)]
    #[case(30, -3.0)]
    #[case(54, 141.0)]
    #[case(60, 177.0)]
    fn central_meridians(#[case] zone: u8, #[case] expected: f64) {
        assert_close(central_meridian(zone), expected, 1e-12, "central meridian");
    }

    // Reference values from PROJ, EPSG:4326 to EPSG:32630.
    //   .transform(-3.7037, 40.4168) -> (440298.94, 4474257.31)
    #[rstest]
    fn madrid_to_utm_30n() {
        let projected = forward(Coord { x: -3.7037, y: 40.4168 }, 30, true);
        assert_close(projected.x, 440_298.94, 1.0, "easting");
        assert_close(projected.y, 4_474_257.31, 1.0, "northing");
    }

    // Reference values from PROJ, EPSG:4326 to EPSG:32721.
    //   .transform(-58.3816, -34.6037) -> (373317.50, 6170036.17)
    #[rstest]
    fn buenos_aires_to_utm_21s() {
        let projected = forward(Coord { x: -58.3816, y: -34.6037 }, 21, false);
        assert_close(projected.x, 373_317.50, 1.0, "easting");
        assert_close(projected.y, 6_170_036.17, 1.0, "northing");
    }

    #[rstest]
    fn equator_on_central_meridian() {
        let projected = forward(Coord { x: -3.0, y: 0.0 }, 30, true);
        assert_close(projected.x, FALSE_EASTING, 0.01, "easting");
        assert_close(projected.y, 0.0, 0.01, "northing");
    }

    #[rstest]
    #[case(Coord { x: 139.65, y: 35.4475 }, 54, true)]
    #[case(Coord { x: -3.7037, y: 40.4168 }, 30, true)]
    #[case(Coord { x: -58.3816, y: -34.6037 }, 21, false)]
    #[case(Coord { x: 18.42, y: -33.92 }, 34, false)]
    fn inverse_undoes_forward(#[case] geographic: Coord<f64>, #[case] zone: u8, #[case] north: bool) {
        let back = inverse(forward(geographic, zone, north), zone, north);
        assert_close(back.x, geographic.x, 1e-7, "longitude");
        assert_close(back.y, geographic.y, 1e-7, "latitude");
    }

    #[rstest]
    #[case::on_meridian(141.0, 54, 0.0)]
    #[case::east(147.0, 54, 6.0)]
    #[case::west(135.5, 54, -5.5)]
    #[case::across_antimeridian(-179.0, 60, 4.0)]
    #[case::across_antimeridian_west(179.0, 1, -4.0)]
    fn meridian_offsets_wrap(#[case] lon: f64, #[case] zone: u8, #[case] expected: f64) {
        assert_close(meridian_offset(lon, zone), expected, 1e-9, "offset");
    }

    #[rstest]
    fn antimeridian_neighbour_projects_east_of_the_meridian() {
        // Zone 60 is centred on 177°E; -179° lies 4° east of it.
        let projected = forward(Coord { x: -179.0, y: 0.0 }, 60, true);
        assert!(projected.x > 900_000.0 && projected.x < 1_000_000.0);
        assert_close(projected.y, 0.0, 0.01, "northing");
    }

    #[rstest]
    #[case(Coord { x: 141.0 + ACCURATE_OFFSET_DEGREES, y: 10.0 })]
    #[case(Coord { x: 141.0 - ACCURATE_OFFSET_DEGREES, y: 45.0 })]
    #[case(Coord { x: 141.0 + ACCURATE_OFFSET_DEGREES, y: -60.0 })]
    fn round_trip_holds_at_the_edge_of_the_accurate_band(#[case] geographic: Coord<f64>) {
        let back = inverse(forward(geographic, 54, true), 54, true);
        assert_close(back.x, geographic.x, 1e-6, "longitude");
        assert_close(back.y, geographic.y, 1e-6, "latitude");
    }

    #[rstest]
    fn inverse_of_false_origin_is_central_meridian() {
        let geographic = inverse(Coord { x: FALSE_EASTING, y: 0.0 }, 54, true);
        assert_close(geographic.x, 141.0, 1e-9, "longitude");
        assert_close(geographic.y, 0.0, 1e-9, "latitude");
    }
}
