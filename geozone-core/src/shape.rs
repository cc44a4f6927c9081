//! Building geometric shapes from GeoJSON literals and back.
//!
//! A [`Shape`] pairs a `geo` geometry with the coordinate reference system
//! its coordinates are expressed in. GeoJSON literals are always WGS84, so
//! every shape built here starts out in [`Crs::Wgs84`].

use geo::{
    Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::crs::Crs;
use crate::geojson::{GeometryLiteral, Position};

/// A geometry together with the reference system of its coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    geometry: Geometry<f64>,
    crs: Crs,
}

impl Shape {
    /// Wrap `geometry`, recording that its coordinates are in `crs`.
    pub const fn new(geometry: Geometry<f64>, crs: Crs) -> Self {
        Self { geometry, crs }
    }

    /// The wrapped geometry.
    pub const fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// Reference system the coordinates are expressed in.
    pub const fn crs(&self) -> Crs {
        self.crs
    }

    /// Discard the reference system and return the geometry.
    pub fn into_geometry(self) -> Geometry<f64> {
        self.geometry
    }

    /// Name of the geometry variant, e.g. `"Polygon"`.
    pub const fn kind(&self) -> &'static str {
        geometry_kind(&self.geometry)
    }
}

/// Errors raised while converting between literals and geometries.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The mapping is not a GeoJSON geometry object.
    #[error("malformed GeoJSON geometry: {0}")]
    Format(#[from] serde_json::Error),
    /// A position had fewer than two ordinates.
    #[error("position has {len} ordinates; at least two are required")]
    InvalidPosition {
        /// Number of ordinates found.
        len: usize,
    },
    /// A position contained `NaN` or an infinity.
    #[error("position contains a non-finite ordinate")]
    NonFinite,
    /// A line string had fewer than two positions.
    #[error("line string has {len} positions; at least two are required")]
    EmptyLineString {
        /// Number of positions found.
        len: usize,
    },
    /// A polygon had no rings at all, not even an exterior.
    #[error("polygon has no exterior ring")]
    MissingExterior,
    /// A polygon ring had fewer than four positions.
    #[error("ring {ring} has {len} positions; at least four are required")]
    RingTooShort {
        /// Index of the ring within its polygon (0 is the exterior).
        ring: usize,
        /// Number of positions found.
        len: usize,
    },
    /// A polygon ring's first and last positions differ.
    #[error("ring {ring} is not closed")]
    UnclosedRing {
        /// Index of the ring within its polygon (0 is the exterior).
        ring: usize,
    },
    /// The geometry has no GeoJSON literal form supported here.
    #[error("{kind} geometries cannot be expressed as a GeoJSON literal")]
    Unsupported {
        /// Name of the geometry variant.
        kind: &'static str,
    },
}

/// Build a WGS84 [`Shape`] from a GeoJSON geometry mapping.
///
/// # Examples
///
/// ```
/// use geozone_core::{Crs, shape_from_value};
/// use serde_json::json;
///
/// let shape = shape_from_value(&json!({"type": "Point", "coordinates": [139.65, 35.4475]}))?;
/// assert_eq!(shape.kind(), "Point");
/// assert_eq!(shape.crs(), Crs::Wgs84);
/// # Ok::<(), geozone_core::ShapeError>(())
/// ```
pub fn shape_from_value(value: &Value) -> Result<Shape, ShapeError> {
    let literal = GeometryLiteral::deserialize(value)?;
    Shape::try_from(&literal)
}

impl TryFrom<&GeometryLiteral> for Shape {
    type Error = ShapeError;

    fn try_from(literal: &GeometryLiteral) -> Result<Self, Self::Error> {
        Geometry::try_from(literal).map(|geometry| Self::new(geometry, Crs::Wgs84))
    }
}

impl TryFrom<&GeometryLiteral> for Geometry<f64> {
    type Error = ShapeError;

    fn try_from(literal: &GeometryLiteral) -> Result<Self, Self::Error> {
        let geometry = match literal {
            GeometryLiteral::Point { coordinates } => Self::Point(Point(coord(coordinates)?)),
            GeometryLiteral::MultiPoint { coordinates } => Self::MultiPoint(MultiPoint(
                coordinates
                    .iter()
                    .map(|position| coord(position).map(Point))
                    .collect::<Result<_, _>>()?,
            )),
            GeometryLiteral::LineString { coordinates } => {
                Self::LineString(line_string(coordinates)?)
            }
            GeometryLiteral::MultiLineString { coordinates } => {
                Self::MultiLineString(MultiLineString(
                    coordinates
                        .iter()
                        .map(|line| line_string(line))
                        .collect::<Result<_, _>>()?,
                ))
            }
            GeometryLiteral::Polygon { coordinates } => Self::Polygon(polygon(coordinates)?),
            GeometryLiteral::MultiPolygon { coordinates } => Self::MultiPolygon(MultiPolygon(
                coordinates
                    .iter()
                    .map(|rings| polygon(rings))
                    .collect::<Result<_, _>>()?,
            )),
        };
        Ok(geometry)
    }
}

impl TryFrom<&Geometry<f64>> for GeometryLiteral {
    type Error = ShapeError;

    fn try_from(geometry: &Geometry<f64>) -> Result<Self, Self::Error> {
        let literal = match geometry {
            Geometry::Point(point) => Self::Point {
                coordinates: position(point.0),
            },
            Geometry::Line(line) => Self::LineString {
                coordinates: vec![position(line.start), position(line.end)],
            },
            Geometry::LineString(line) => Self::LineString {
                coordinates: positions(line),
            },
            Geometry::Polygon(polygon) => Self::Polygon {
                coordinates: rings(polygon),
            },
            Geometry::MultiPoint(points) => Self::MultiPoint {
                coordinates: points.0.iter().map(|point| position(point.0)).collect(),
            },
            Geometry::MultiLineString(lines) => Self::MultiLineString {
                coordinates: lines.0.iter().map(positions).collect(),
            },
            Geometry::MultiPolygon(polygons) => Self::MultiPolygon {
                coordinates: polygons.0.iter().map(rings).collect(),
            },
            Geometry::Rect(rect) => Self::Polygon {
                coordinates: rings(&rect.to_polygon()),
            },
            Geometry::Triangle(triangle) => Self::Polygon {
                coordinates: rings(&triangle.to_polygon()),
            },
            Geometry::GeometryCollection(_) => {
                return Err(ShapeError::Unsupported {
                    kind: geometry_kind(geometry),
                });
            }
        };
        Ok(literal)
    }
}

pub(crate) const fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

fn coord(position: &[f64]) -> Result<Coord<f64>, ShapeError> {
    let [x, y, ..] = position else {
        return Err(ShapeError::InvalidPosition {
            len: position.len(),
        });
    };
    if !x.is_finite() || !y.is_finite() {
        return Err(ShapeError::NonFinite);
    }
    Ok(Coord { x: *x, y: *y })
}

fn coords(positions: &[Position]) -> Result<Vec<Coord<f64>>, ShapeError> {
    positions.iter().map(|position| coord(position)).collect()
}

fn line_string(positions: &[Position]) -> Result<LineString<f64>, ShapeError> {
    if positions.len() < 2 {
        return Err(ShapeError::EmptyLineString {
            len: positions.len(),
        });
    }
    coords(positions).map(LineString::new)
}

fn ring(index: usize, positions: &[Position]) -> Result<LineString<f64>, ShapeError> {
    if positions.len() < 4 {
        return Err(ShapeError::RingTooShort {
            ring: index,
            len: positions.len(),
        });
    }
    let vertices = coords(positions)?;
    if vertices.first() != vertices.last() {
        return Err(ShapeError::UnclosedRing { ring: index });
    }
    Ok(LineString::new(vertices))
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, ShapeError> {
    let mut parsed = rings
        .iter()
        .enumerate()
        .map(|(index, positions)| ring(index, positions));
    let exterior = parsed.next().ok_or(ShapeError::MissingExterior)??;
    let interiors = parsed.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn position(coord: Coord<f64>) -> Position {
    vec![coord.x, coord.y]
}

fn positions(line: &LineString<f64>) -> Vec<Position> {
    line.0.iter().copied().map(position).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}
