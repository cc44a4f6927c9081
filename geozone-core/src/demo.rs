//! The Yamashita Park walkthrough.
//!
//! Builds a park polygon and two landmarks around Yokohama harbour, checks
//! which landmark lies in the park, and publishes a metric safety zone around
//! the one that does as a GeoJSON feature. Every intermediate result is kept
//! in the returned [`DemoReport`] so callers can narrate the steps.

use log::{debug, info};
use serde_json::{Value, json};
use thiserror::Error;

use crate::buffer::{BufferError, buffer};
use crate::crs::{CrsError, Transformer};
use crate::feature::{FeatureRecord, Properties, package};
use crate::geojson::{DEFAULT_INDENT, GeoJsonError, to_geojson_string};
use crate::predicate::contains;
use crate::shape::{Shape, ShapeError, shape_from_value};

/// Identifier of the geographic system the literals are written in.
pub const GEOGRAPHIC_CRS: &str = "EPSG:4326";
/// UTM zone 54N, which covers Yokohama.
pub const DEFAULT_PROJECTED_CRS: &str = "EPSG:32654";
/// Radius of the safety zone.
pub const DEFAULT_RADIUS_METERS: f64 = 100.0;
/// `name` property of the published feature.
pub const DEFAULT_ZONE_NAME: &str = "100m Safety Zone around Hikawa Maru";

/// Landmark expected inside the park.
pub const INSIDE_LANDMARK: &str = "Hikawa Maru";
/// Landmark expected outside the park.
pub const OUTSIDE_LANDMARK: &str = "Landmark Tower";

/// Yamashita Park, Yokohama, as a GeoJSON polygon.
pub fn park_literal() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [139.6485, 35.4460],
            [139.6530, 35.4485],
            [139.6520, 35.4495],
            [139.6475, 35.4470],
            [139.6485, 35.4460]
        ]]
    })
}

/// The Hikawa Maru, moored alongside the park.
pub fn hikawa_maru_literal() -> Value {
    json!({
        "type": "Point",
        "coordinates": [139.6500, 35.4475]
    })
}

/// Yokohama Landmark Tower, well outside the park.
pub fn landmark_tower_literal() -> Value {
    json!({
        "type": "Point",
        "coordinates": [139.6305, 35.4556]
    })
}

/// Knobs for [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Metric system the buffer is computed in, as `EPSG:<code>`.
    pub projected_crs: String,
    /// Buffer radius in meters.
    pub radius_meters: f64,
    /// `name` property of the published feature.
    pub zone_name: String,
    /// Spaces per indent level in the GeoJSON output.
    pub indent: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            projected_crs: DEFAULT_PROJECTED_CRS.to_owned(),
            radius_meters: DEFAULT_RADIUS_METERS,
            zone_name: DEFAULT_ZONE_NAME.to_owned(),
            indent: DEFAULT_INDENT,
        }
    }
}

/// Everything the walkthrough produced, step by step.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Park literal as authored.
    pub park_literal: Value,
    /// Inside landmark literal as authored.
    pub inside_literal: Value,
    /// Outside landmark literal as authored.
    pub outside_literal: Value,
    /// Park polygon in WGS84.
    pub park: Shape,
    /// Inside landmark in WGS84.
    pub inside_point: Shape,
    /// Outside landmark in WGS84.
    pub outside_point: Shape,
    /// Whether the park contains the inside landmark.
    pub inside_contained: bool,
    /// Whether the park contains the outside landmark.
    pub outside_contained: bool,
    /// Inside landmark in the projected system.
    pub projected_point: Shape,
    /// Inside landmark projected and brought back to WGS84.
    pub round_trip_point: Shape,
    /// Safety zone in the projected system.
    pub zone_projected: Shape,
    /// Safety zone in WGS84.
    pub zone_geographic: Shape,
    /// Safety zone packaged with its metadata.
    pub feature: FeatureRecord,
    /// The feature rendered as GeoJSON.
    pub geojson: String,
    /// Radius the zone was built with, in meters.
    pub radius_meters: f64,
}

/// Errors raised by [`run`].
#[derive(Debug, Error)]
pub enum DemoError {
    /// A literal could not be turned into a shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// A reference system was unknown or misused.
    #[error(transparent)]
    Crs(#[from] CrsError),
    /// The safety zone could not be built.
    #[error(transparent)]
    Buffer(#[from] BufferError),
    /// The feature could not be rendered.
    #[error(transparent)]
    GeoJson(#[from] GeoJsonError),
}

/// Run the walkthrough once.
///
/// # Examples
///
/// ```
/// use geozone_core::demo::{DemoConfig, run};
///
/// let report = run(&DemoConfig::default())?;
/// assert!(report.inside_contained);
/// assert!(!report.outside_contained);
/// assert_eq!(report.zone_geographic.kind(), "Polygon");
/// # Ok::<(), geozone_core::demo::DemoError>(())
/// ```
pub fn run(config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let park_literal = park_literal();
    let inside_literal = hikawa_maru_literal();
    let outside_literal = landmark_tower_literal();

    let park = shape_from_value(&park_literal)?;
    let inside_point = shape_from_value(&inside_literal)?;
    let outside_point = shape_from_value(&outside_literal)?;

    let inside_contained = contains(&park, &inside_point);
    let outside_contained = contains(&park, &outside_point);
    info!("{INSIDE_LANDMARK} in park: {inside_contained}; {OUTSIDE_LANDMARK} in park: {outside_contained}");

    let to_meters = Transformer::from_crs(GEOGRAPHIC_CRS, &config.projected_crs)?;
    let to_degrees = to_meters.inverse();

    let projected_point = to_meters.transform(&inside_point)?;
    let round_trip_point = to_degrees.transform(&projected_point)?;
    debug!("projected {INSIDE_LANDMARK}: {:?}", projected_point.geometry());

    let zone_projected = buffer(&projected_point, config.radius_meters)?;
    let zone_geographic = to_degrees.transform(&zone_projected)?;

    let mut properties = Properties::new();
    properties.insert("name".to_owned(), Value::from(config.zone_name.as_str()));
    let feature = package(zone_geographic.clone(), properties);
    let geojson = to_geojson_string(&feature, config.indent)?;

    Ok(DemoReport {
        park_literal,
        inside_literal,
        outside_literal,
        park,
        inside_point,
        outside_point,
        inside_contained,
        outside_contained,
        projected_point,
        round_trip_point,
        zone_projected,
        zone_geographic,
        feature,
        geojson,
        radius_meters: config.radius_meters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::Crs;
    use geo::{CoordsIter, Geometry};
    use rstest::{fixture, rstest};

    #[fixture]
    fn report() -> DemoReport {
        run(&DemoConfig::default()).expect("default walkthrough succeeds")
    }

    #[rstest]
    fn landmarks_are_classified(report: DemoReport) {
        assert!(report.inside_contained);
        assert!(!report.outside_contained);
    }

    #[rstest]
    fn shapes_carry_their_systems(report: DemoReport) {
        let zone_54n = Crs::Utm {
            zone: 54,
            north: true,
        };
        assert_eq!(report.park.crs(), Crs::Wgs84);
        assert_eq!(report.projected_point.crs(), zone_54n);
        assert_eq!(report.zone_projected.crs(), zone_54n);
        assert_eq!(report.zone_geographic.crs(), Crs::Wgs84);
    }

    #[rstest]
    fn round_trip_returns_to_the_landmark(report: DemoReport) {
        let (Geometry::Point(original), Geometry::Point(back)) = (
            report.inside_point.geometry(),
            report.round_trip_point.geometry(),
        ) else {
            panic!("expected points");
        };
        assert!((original.x() - back.x()).abs() < 1e-6);
        assert!((original.y() - back.y()).abs() < 1e-6);
    }

    #[rstest]
    fn zone_surrounds_the_landmark(report: DemoReport) {
        let Geometry::Point(landmark) = report.inside_point.geometry() else {
            panic!("expected a point");
        };
        // 100 m is roughly 0.0011° of latitude and 0.0011° of longitude here.
        for vertex in report.zone_geographic.geometry().coords_iter() {
            let dx = (vertex.x - landmark.x()).abs();
            let dy = (vertex.y - landmark.y()).abs();
            assert!(dx < 0.0013 && dy < 0.0010, "vertex {vertex:?} too far");
        }
        assert!(crate::predicate::contains(
            &report.zone_geographic,
            &report.inside_point
        ));
    }

    #[rstest]
    fn feature_is_named(report: DemoReport) {
        assert_eq!(
            report.feature.property("name"),
            Some(&Value::from(DEFAULT_ZONE_NAME))
        );
        assert!(report.geojson.contains(DEFAULT_ZONE_NAME));
    }

    #[rstest]
    fn unknown_projection_fails() {
        let config = DemoConfig {
            projected_crs: "EPSG:3857".to_owned(),
            ..DemoConfig::default()
        };
        assert!(matches!(
            run(&config),
            Err(DemoError::Crs(CrsError::Unrecognised { .. }))
        ));
    }

    #[rstest]
    fn geographic_projection_is_refused() {
        let config = DemoConfig {
            projected_crs: GEOGRAPHIC_CRS.to_owned(),
            ..DemoConfig::default()
        };
        assert!(matches!(
            run(&config),
            Err(DemoError::Buffer(BufferError::GeographicCrs { .. }))
        ));
    }

    #[rstest]
    fn radius_is_recorded() {
        let config = DemoConfig {
            radius_meters: 250.0,
            ..DemoConfig::default()
        };
        let report = run(&config).expect("walkthrough succeeds");
        assert!((report.radius_meters - 250.0).abs() < f64::EPSILON);
    }
}
