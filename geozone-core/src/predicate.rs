//! Planar containment tests.

use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Geometry, Relate};
use log::warn;

use crate::shape::Shape;

/// Whether `candidate` lies inside `area` or on its boundary.
///
/// Both shapes are assumed to share a reference system. When they do not the
/// planar answer is still returned, but it is meaningless and a warning is
/// logged.
///
/// # Examples
///
/// ```
/// use geozone_core::{contains, shape_from_value};
/// use serde_json::json;
///
/// let square = shape_from_value(&json!({
///     "type": "Polygon",
///     "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]]
/// }))?;
/// let centre = shape_from_value(&json!({"type": "Point", "coordinates": [1.0, 1.0]}))?;
/// let corner = shape_from_value(&json!({"type": "Point", "coordinates": [2.0, 2.0]}))?;
/// assert!(contains(&square, &centre));
/// assert!(contains(&square, &corner));
/// # Ok::<(), geozone_core::ShapeError>(())
/// ```
pub fn contains(area: &Shape, candidate: &Shape) -> bool {
    if area.crs() != candidate.crs() {
        warn!(
            "containment test mixes {} ({}) with {} ({}); the result is not meaningful",
            area.kind(),
            area.crs(),
            candidate.kind(),
            candidate.crs()
        );
    }
    covers(area.geometry(), candidate.geometry())
}

/// Closed planar containment between two bare geometries.
pub fn covers(area: &Geometry<f64>, candidate: &Geometry<f64>) -> bool {
    match candidate {
        Geometry::Point(point) => area.coordinate_position(&point.0) != CoordPos::Outside,
        Geometry::MultiPoint(points) => points
            .0
            .iter()
            .all(|point| area.coordinate_position(&point.0) != CoordPos::Outside),
        other => area.relate(other).is_covers(),
    }
}
