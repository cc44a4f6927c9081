//! GeoJSON (RFC 7946) reading and writing.
//!
//! Features are written with a stable member order (`type`, `geometry`,
//! `properties`) and a configurable indent so the output is readable on a
//! console and diffable between runs.

use std::string::FromUtf8Error;

use geo::Geometry;
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::feature::FeatureRecord;
use crate::shape::ShapeError;

mod literal;

pub use literal::{FeatureLiteral, FeatureTag, GeometryLiteral, Position};

/// Indent width used when none is configured.
pub const DEFAULT_INDENT: usize = 4;

/// Errors raised while reading or writing GeoJSON text.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// The geometry has no GeoJSON representation, or the parsed geometry
    /// is invalid.
    #[error(transparent)]
    Shape(#[from] ShapeError),
    /// Encoding the feature failed.
    #[error("failed to serialize GeoJSON feature: {0}")]
    Serialize(#[source] serde_json::Error),
    /// The encoder produced bytes that are not UTF-8.
    #[error("serialized GeoJSON is not valid UTF-8: {0}")]
    Utf8(#[source] FromUtf8Error),
    /// The input is not a GeoJSON feature.
    #[error("failed to parse GeoJSON feature: {0}")]
    Parse(#[source] serde_json::Error),
}

impl TryFrom<&FeatureRecord> for FeatureLiteral {
    type Error = ShapeError;

    fn try_from(feature: &FeatureRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: FeatureTag::Feature,
            geometry: GeometryLiteral::try_from(&feature.geometry)?,
            properties: feature.properties.clone(),
        })
    }
}

impl TryFrom<FeatureLiteral> for FeatureRecord {
    type Error = ShapeError;

    fn try_from(literal: FeatureLiteral) -> Result<Self, Self::Error> {
        let geometry = Geometry::try_from(&literal.geometry)?;
        Ok(Self::new(geometry, literal.properties))
    }
}

/// Render `feature` as GeoJSON text indented by `indent` spaces per level.
///
/// # Examples
///
/// ```
/// use geo::{Geometry, Point};
/// use geozone_core::{FeatureRecord, Properties, to_geojson_string};
///
/// let feature = FeatureRecord::new(Geometry::Point(Point::new(1.0, 2.0)), Properties::new());
/// let text = to_geojson_string(&feature, 2)?;
/// assert!(text.starts_with("{\n  \"type\": \"Feature\""));
/// # Ok::<(), geozone_core::GeoJsonError>(())
/// ```
pub fn to_geojson_string(feature: &FeatureRecord, indent: usize) -> Result<String, GeoJsonError> {
    let literal = FeatureLiteral::try_from(feature)?;
    let indent = " ".repeat(indent);
    let mut serializer =
        Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(indent.as_bytes()));
    literal
        .serialize(&mut serializer)
        .map_err(GeoJsonError::Serialize)?;
    String::from_utf8(serializer.into_inner()).map_err(GeoJsonError::Utf8)
}

/// Parse GeoJSON text into a [`FeatureRecord`].
pub fn parse_feature(text: &str) -> Result<FeatureRecord, GeoJsonError> {
    let literal: FeatureLiteral = serde_json::from_str(text).map_err(GeoJsonError::Parse)?;
    Ok(FeatureRecord::try_from(literal)?)
}
