//! Metric buffering.
//!
//! Buffers are only meaningful when coordinates are linear units, so shapes
//! in a geographic system are rejected instead of being buffered by a radius
//! in degrees.

use geo::{Buffer, CoordsIter, Geometry};
use log::debug;
use thiserror::Error;

use crate::crs::Crs;
use crate::shape::Shape;

/// Errors raised by [`buffer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    /// The shape's coordinates are degrees, not meters.
    #[error("cannot buffer by meters in geographic system {crs}; reproject first")]
    GeographicCrs {
        /// The shape's system.
        crs: Crs,
    },
    /// The radius was zero, negative or not finite.
    #[error("buffer radius must be a positive number of meters, got {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// Buffering produced no area.
    #[error("buffering produced an empty geometry")]
    Empty,
}

/// Grow `shape` by `radius_meters` in every direction.
///
/// The result is a closed polygonal approximation in the same system as the
/// input: a disk for a point, a rounded outline otherwise. A single outline is
/// returned as a `Polygon`; disjoint outlines as a `MultiPolygon`.
///
/// # Examples
///
/// ```
/// use geo::{Geometry, Point};
/// use geozone_core::{Crs, Shape, buffer};
///
/// let projected = Shape::new(
///     Geometry::Point(Point::new(378_000.0, 3_923_000.0)),
///     Crs::Utm { zone: 54, north: true },
/// );
/// let zone = buffer(&projected, 100.0)?;
/// assert_eq!(zone.kind(), "Polygon");
/// assert_eq!(zone.crs(), projected.crs());
/// # Ok::<(), geozone_core::BufferError>(())
/// ```
pub fn buffer(shape: &Shape, radius_meters: f64) -> Result<Shape, BufferError> {
    if shape.crs().is_geographic() {
        return Err(BufferError::GeographicCrs { crs: shape.crs() });
    }
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(BufferError::InvalidRadius {
            radius: radius_meters,
        });
    }

    let mut outlines = shape.geometry().buffer(radius_meters);
    let geometry = if outlines.0.len() > 1 {
        Geometry::MultiPolygon(outlines)
    } else {
        outlines
            .0
            .pop()
            .map(Geometry::Polygon)
            .ok_or(BufferError::Empty)?
    };
    debug!(
        "buffered {} by {radius_meters} m in {} into {} vertices",
        shape.kind(),
        shape.crs(),
        geometry.coords_count()
    );
    Ok(Shape::new(geometry, shape.crs()))
}
