//! Coordinate reference systems and reprojection between them.
//!
//! A [`Transformer`] is a plain value built from two explicit EPSG
//! identifiers. There is no global projection context: every conversion names
//! both its source and its target.
//!
//! Supported systems are WGS84 geographic (`EPSG:4326`) and the 120 UTM zones
//! on the WGS84 ellipsoid (`EPSG:32601`-`32660` north, `EPSG:32701`-`32760`
//! south).

use std::fmt;
use std::str::FromStr;

use geo::{Coord, CoordsIter, Geometry, MapCoords};
use log::{debug, warn};
use thiserror::Error;

use crate::shape::Shape;

mod utm;

const EPSG_WGS84: u32 = 4326;
const EPSG_UTM_NORTH: u32 = 32600;
const EPSG_UTM_SOUTH: u32 = 32700;

/// A coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// Longitude and latitude in degrees on the WGS84 datum.
    Wgs84,
    /// A Universal Transverse Mercator zone, in meters.
    Utm {
        /// Zone number in `1..=60`.
        zone: u8,
        /// Whether this is the northern-hemisphere variant of the zone.
        north: bool,
    },
}

impl Crs {
    /// Look up a reference system by its EPSG code.
    ///
    /// # Examples
    ///
    /// ```
    /// use geozone_core::Crs;
    ///
    /// assert_eq!(Crs::from_epsg(32654)?, Crs::Utm { zone: 54, north: true });
    /// assert!(Crs::from_epsg(3857).is_err());
    /// # Ok::<(), geozone_core::CrsError>(())
    /// ```
    pub fn from_epsg(code: u32) -> Result<Self, CrsError> {
        let unrecognised = || CrsError::Unrecognised {
            code: format!("EPSG:{code}"),
        };
        let (offset, north) = match code {
            EPSG_WGS84 => return Ok(Self::Wgs84),
            32601..=32660 => (EPSG_UTM_NORTH, true),
            32701..=32760 => (EPSG_UTM_SOUTH, false),
            _ => return Err(unrecognised()),
        };
        let zone = u8::try_from(code - offset).map_err(|_| unrecognised())?;
        Ok(Self::Utm { zone, north })
    }

    /// The EPSG code naming this system.
    pub fn epsg(self) -> u32 {
        match self {
            Self::Wgs84 => EPSG_WGS84,
            Self::Utm { zone, north: true } => EPSG_UTM_NORTH + u32::from(zone),
            Self::Utm { zone, north: false } => EPSG_UTM_SOUTH + u32::from(zone),
        }
    }

    /// Whether coordinates are angular degrees rather than linear meters.
    pub const fn is_geographic(self) -> bool {
        matches!(self, Self::Wgs84)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl FromStr for Crs {
    type Err = CrsError;

    /// Parse an `EPSG:<code>` identifier. The authority is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognised = || CrsError::Unrecognised { code: s.to_owned() };
        let (authority, code) = s.trim().split_once(':').ok_or_else(unrecognised)?;
        if !authority.eq_ignore_ascii_case("EPSG") {
            return Err(unrecognised());
        }
        let code = code.parse::<u32>().map_err(|_| unrecognised())?;
        Self::from_epsg(code).map_err(|_| unrecognised())
    }
}

/// Errors raised while resolving reference systems or reprojecting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrsError {
    /// The identifier does not name a supported reference system.
    #[error("unrecognised coordinate reference system {code:?}")]
    Unrecognised {
        /// The identifier as supplied.
        code: String,
    },
    /// A shape was handed to a transformer built for another source system.
    #[error("shape is expressed in {found} but the transformer expects {expected}")]
    SourceMismatch {
        /// The transformer's source system.
        expected: Crs,
        /// The shape's system.
        found: Crs,
    },
}

/// Reprojects coordinates from one reference system to another.
///
/// Axis order is `(x, y)` on both sides: longitude/latitude for geographic
/// systems, easting/northing for projected ones.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use geozone_core::Transformer;
///
/// let to_meters = Transformer::from_crs("EPSG:4326", "EPSG:32654")?;
/// let to_degrees = to_meters.inverse();
///
/// let hikawa_maru = Coord { x: 139.65, y: 35.4475 };
/// let back = to_degrees.transform_coord(to_meters.transform_coord(hikawa_maru));
/// assert!((back.x - hikawa_maru.x).abs() < 1e-6);
/// assert!((back.y - hikawa_maru.y).abs() < 1e-6);
/// # Ok::<(), geozone_core::CrsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformer {
    source: Crs,
    target: Crs,
}

impl Transformer {
    /// Build a transformer between two known systems.
    pub const fn new(source: Crs, target: Crs) -> Self {
        Self { source, target }
    }

    /// Build a transformer from two `EPSG:<code>` identifiers.
    pub fn from_crs(source: &str, target: &str) -> Result<Self, CrsError> {
        Ok(Self::new(source.parse()?, target.parse()?))
    }

    /// The system input coordinates are expected in.
    pub const fn source(&self) -> Crs {
        self.source
    }

    /// The system output coordinates are produced in.
    pub const fn target(&self) -> Crs {
        self.target
    }

    /// The transformer performing the opposite conversion.
    pub const fn inverse(&self) -> Self {
        Self::new(self.target, self.source)
    }

    /// Reproject a single coordinate.
    ///
    /// Conversions between two UTM zones pass through geographic
    /// coordinates.
    ///
    /// UTM conversions use a truncated series that round-trips within 1e-6°
    /// only for longitudes up to 5° from the zone's central meridian. Further
    /// out the error grows quickly (about 8e-6° at 8°). [`Self::transform`]
    /// logs a warning when a shape strays outside that band.
    pub fn transform_coord(&self, coord: Coord<f64>) -> Coord<f64> {
        if self.source == self.target {
            return coord;
        }
        let geographic = match self.source {
            Crs::Wgs84 => coord,
            Crs::Utm { zone, north } => utm::inverse(coord, zone, north),
        };
        match self.target {
            Crs::Wgs84 => geographic,
            Crs::Utm { zone, north } => utm::forward(geographic, zone, north),
        }
    }

    /// Reproject every coordinate of `geometry`, preserving its structure.
    pub fn transform_geometry(&self, geometry: &Geometry<f64>) -> Geometry<f64> {
        let transformer = *self;
        geometry.map_coords(move |coord| transformer.transform_coord(coord))
    }

    /// Reproject a shape into the target system.
    ///
    /// Fails with [`CrsError::SourceMismatch`] when the shape is not
    /// expressed in this transformer's source system.
    pub fn transform(&self, shape: &Shape) -> Result<Shape, CrsError> {
        if shape.crs() != self.source {
            return Err(CrsError::SourceMismatch {
                expected: self.source,
                found: shape.crs(),
            });
        }
        debug!(
            "reprojecting {} from {} to {}",
            shape.kind(),
            self.source,
            self.target
        );
        let geometry = self.transform_geometry(shape.geometry());
        self.warn_if_outside_accurate_band(shape.geometry(), &geometry);
        Ok(Shape::new(geometry, self.target))
    }

    fn warn_if_outside_accurate_band(&self, input: &Geometry<f64>, output: &Geometry<f64>) {
        match (self.source, self.target) {
            (Crs::Wgs84, Crs::Wgs84) => {}
            (Crs::Wgs84, Crs::Utm { zone, .. }) => warn_if_far_from_meridian(input, zone),
            (Crs::Utm { zone, .. }, Crs::Wgs84) => warn_if_far_from_meridian(output, zone),
            (Crs::Utm { zone: from, .. }, Crs::Utm { zone: to, .. }) => {
                let geographic = Self::new(self.source, Crs::Wgs84).transform_geometry(input);
                warn_if_far_from_meridian(&geographic, from);
                warn_if_far_from_meridian(&geographic, to);
            }
        }
    }
}

fn warn_if_far_from_meridian(geographic: &Geometry<f64>, zone: u8) {
    let widest = widest_meridian_offset(geographic, zone);
    if widest > utm::ACCURATE_OFFSET_DEGREES {
        warn!(
            "coordinates lie up to {widest:.1}° from the UTM zone {zone} central meridian; \
             reprojection is only accurate to 1e-6° within {}°",
            utm::ACCURATE_OFFSET_DEGREES
        );
    }
}

/// Largest absolute longitude offset, in degrees, of any coordinate in
/// `geographic` from the central meridian of `zone`.
fn widest_meridian_offset(geographic: &Geometry<f64>, zone: u8) -> f64 {
    geographic
        .coords_iter()
        .map(|coord| utm::meridian_offset(coord.x, zone).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, line_string, polygon};
    use rstest::rstest;

    #[rstest]
    #[case("EPSG:4326", Crs::Wgs84)]
    #[case("epsg:4326", Crs::Wgs84)]
    #[case(" EPSG:32654 ", Crs::Utm { zone: 54, north: true })]
    #[case("EPSG:32601", Crs::Utm { zone: 1, north: true })]
    #[case("EPSG:32760", Crs::Utm { zone: 60, north: false })]
    fn parses_supported_codes(#[case] code: &str, #[case] expected: Crs) {
        assert_eq!(code.parse::<Crs>(), Ok(expected));
    }

    #[rstest]
    #[case("EPSG:3857")]
    #[case("EPSG:32600")]
    #[case("EPSG:32661")]
    #[case("EPSG:32700")]
    #[case("ESRI:4326")]
    #[case("4326")]
    #[case("EPSG:abc")]
    #[case("")]
    fn rejects_unknown_codes(#[case] code: &str) {
        assert_eq!(
            code.parse::<Crs>(),
            Err(CrsError::Unrecognised {
                code: code.to_owned()
            })
        );
    }

    #[rstest]
    #[case(Crs::Wgs84, "EPSG:4326")]
    #[case(Crs::Utm { zone: 54, north: true }, "EPSG:32654")]
    #[case(Crs::Utm { zone: 21, north: false }, "EPSG:32721")]
    fn displays_as_epsg(#[case] crs: Crs, #[case] expected: &str) {
        assert_eq!(crs.to_string(), expected);
    }

    #[rstest]
    fn identity_transform_is_a_no_op() {
        let transformer = Transformer::new(Crs::Wgs84, Crs::Wgs84);
        let coord = Coord { x: 139.65, y: 35.4475 };
        assert_eq!(transformer.transform_coord(coord), coord);
    }

    #[rstest]
    fn projects_into_meters() {
        let transformer =
            Transformer::from_crs("EPSG:4326", "EPSG:32654").expect("known codes");
        let projected = transformer.transform_coord(Coord { x: 139.65, y: 35.4475 });
        // West of the 141°E central meridian, so easting is below 500 km.
        assert!(projected.x > 350_000.0 && projected.x < 500_000.0);
        assert!(projected.y > 3_900_000.0 && projected.y < 4_000_000.0);
    }

    #[rstest]
    fn preserves_geometry_structure() {
        let transformer = Transformer::new(Crs::Wgs84, Crs::Utm { zone: 54, north: true });
        let park = polygon![
            (x: 139.6485, y: 35.4460),
            (x: 139.6530, y: 35.4485),
            (x: 139.6520, y: 35.4495),
            (x: 139.6475, y: 35.4470),
            (x: 139.6485, y: 35.4460),
        ];
        let projected = transformer.transform_geometry(&Geometry::Polygon(park));
        let Geometry::Polygon(projected) = projected else {
            panic!("expected a polygon");
        };
        let ring = &projected.exterior().0;
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[rstest]
    fn utm_to_utm_goes_through_geographic() {
        let zone_53 = Crs::Utm { zone: 53, north: true };
        let zone_54 = Crs::Utm { zone: 54, north: true };
        let geographic = Coord { x: 138.0, y: 35.0 };
        let in_53 = Transformer::new(Crs::Wgs84, zone_53).transform_coord(geographic);
        let in_54 = Transformer::new(zone_53, zone_54).transform_coord(in_53);
        let expected = Transformer::new(Crs::Wgs84, zone_54).transform_coord(geographic);
        assert!((in_54.x - expected.x).abs() < 0.01);
        assert!((in_54.y - expected.y).abs() < 0.01);
    }

    #[rstest]
    fn rejects_shapes_in_another_system() {
        let transformer = Transformer::new(Crs::Utm { zone: 54, north: true }, Crs::Wgs84);
        let shape = Shape::new(Geometry::Point(Point::new(139.65, 35.4475)), Crs::Wgs84);
        assert_eq!(
            transformer.transform(&shape),
            Err(CrsError::SourceMismatch {
                expected: Crs::Utm { zone: 54, north: true },
                found: Crs::Wgs84,
            })
        );
    }

    #[rstest]
    #[case::yokohama(139.65, 54, 1.35)]
    #[case::zone_edge(144.0, 54, 3.0)]
    #[case::far_east(153.0, 54, 12.0)]
    #[case::across_antimeridian(-178.0, 60, 5.0)]
    fn widest_offset_is_measured_from_the_central_meridian(
        #[case] lon: f64,
        #[case] zone: u8,
        #[case] expected: f64,
    ) {
        let meridian = utm::central_meridian(zone);
        let line = Geometry::LineString(line_string![
            (x: meridian, y: 35.0),
            (x: lon, y: 35.0),
        ]);
        let widest = widest_meridian_offset(&line, zone);
        assert!((widest - expected).abs() < 1e-9, "widest offset {widest}");
    }

    #[rstest]
    fn shapes_outside_the_accurate_band_are_still_transformed() {
        let transformer = Transformer::new(Crs::Wgs84, Crs::Utm { zone: 54, north: true });
        let far = Shape::new(Geometry::Point(Point::new(153.0, 35.0)), Crs::Wgs84);
        let projected = transformer.transform(&far).expect("transform succeeds");
        assert_eq!(projected.crs(), Crs::Utm { zone: 54, north: true });
        assert!((widest_meridian_offset(far.geometry(), 54) - 12.0).abs() < 1e-9);
    }

    #[rstest]
    fn inverse_swaps_systems() {
        let transformer = Transformer::new(Crs::Wgs84, Crs::Utm { zone: 54, north: true });
        let inverse = transformer.inverse();
        assert_eq!(inverse.source(), transformer.target());
        assert_eq!(inverse.target(), transformer.source());
    }
}
