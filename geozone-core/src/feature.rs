//! Feature records: a geometry bundled with its descriptive properties.

use geo::Geometry;
use log::warn;
use serde_json::{Map, Value};

use crate::shape::Shape;

/// Free-form feature metadata keyed by property name.
pub type Properties = Map<String, Value>;

/// A geometry with descriptive metadata, ready for serialization.
///
/// # Examples
///
/// ```
/// use geo::{Geometry, Point};
/// use geozone_core::{Crs, Properties, Shape, package};
/// use serde_json::json;
///
/// let shape = Shape::new(Geometry::Point(Point::new(139.65, 35.4475)), Crs::Wgs84);
/// let mut properties = Properties::new();
/// properties.insert("name".into(), json!("Hikawa Maru"));
///
/// let feature = package(shape, properties);
/// assert_eq!(feature.property("name"), Some(&json!("Hikawa Maru")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// The feature's geometry, in WGS84.
    pub geometry: Geometry<f64>,
    /// Metadata describing the feature.
    pub properties: Properties,
}

impl FeatureRecord {
    /// Bundle a geometry with its properties.
    pub const fn new(geometry: Geometry<f64>, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Wrap `shape` and `properties` into a [`FeatureRecord`].
///
/// GeoJSON positions are always WGS84; packaging a shape in another system
/// logs a warning but is not refused.
pub fn package(shape: Shape, properties: Properties) -> FeatureRecord {
    if shape.crs().is_geographic() {
        return FeatureRecord::new(shape.into_geometry(), properties);
    }
    warn!(
        "packaging a {} expressed in {}; GeoJSON consumers will read it as WGS84",
        shape.kind(),
        shape.crs()
    );
    FeatureRecord::new(shape.into_geometry(), properties)
}
