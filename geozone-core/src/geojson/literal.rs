//! Serde representations of GeoJSON geometry and feature objects.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A GeoJSON position: `[x, y]`, optionally followed by an altitude.
///
/// `x` is longitude (or easting) and `y` is latitude (or northing).
pub type Position = Vec<f64>;

/// A GeoJSON geometry object, discriminated by its `"type"` member.
///
/// # Examples
///
/// ```
/// use geozone_core::GeometryLiteral;
///
/// let literal: GeometryLiteral =
///     serde_json::from_str(r#"{"type": "Point", "coordinates": [139.65, 35.4475]}"#).unwrap();
/// assert_eq!(literal.kind(), "Point");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryLiteral {
    /// A single position.
    Point {
        /// The point's position.
        coordinates: Position,
    },
    /// An unconnected set of positions.
    MultiPoint {
        /// Member positions.
        coordinates: Vec<Position>,
    },
    /// A path through two or more positions.
    LineString {
        /// Path vertices in order.
        coordinates: Vec<Position>,
    },
    /// A set of paths.
    MultiLineString {
        /// Member paths.
        coordinates: Vec<Vec<Position>>,
    },
    /// An exterior ring followed by zero or more interior rings.
    Polygon {
        /// Closed rings; the first is the exterior.
        coordinates: Vec<Vec<Position>>,
    },
    /// A set of polygons.
    MultiPolygon {
        /// Member polygons, each a list of closed rings.
        coordinates: Vec<Vec<Vec<Position>>>,
    },
}

impl GeometryLiteral {
    /// The GeoJSON `"type"` tag of this literal.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point { .. } => "Point",
            Self::MultiPoint { .. } => "MultiPoint",
            Self::LineString { .. } => "LineString",
            Self::MultiLineString { .. } => "MultiLineString",
            Self::Polygon { .. } => "Polygon",
            Self::MultiPolygon { .. } => "MultiPolygon",
        }
    }
}

/// The only `"type"` a GeoJSON feature may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    /// `"Feature"`.
    #[default]
    Feature,
}

/// A GeoJSON feature object.
///
/// Field order is the serialization order: `type`, `geometry`, `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLiteral {
    /// Always [`FeatureTag::Feature`].
    #[serde(rename = "type")]
    pub kind: FeatureTag,
    /// The feature's geometry.
    pub geometry: GeometryLiteral,
    /// Free-form metadata. A `null` member is read as an empty object.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Map<String, Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
