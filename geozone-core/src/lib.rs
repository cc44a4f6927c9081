//! Core geometry operations for geozone.
//!
//! The crate turns GeoJSON literals into [`Shape`]s, answers containment
//! questions, reprojects between WGS84 and UTM, buffers in meters, and writes
//! the result back out as a GeoJSON feature. Each shape carries the
//! [`Crs`] its coordinates are expressed in so unit mistakes, such as
//! buffering by meters in a degree-based system, are caught rather than
//! silently producing nonsense.
//!
//! # Examples
//!
//! ```
//! use geozone_core::{Properties, Transformer, buffer, package, shape_from_value, to_geojson_string};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let point = shape_from_value(&json!({"type": "Point", "coordinates": [139.65, 35.4475]}))?;
//! let to_meters = Transformer::from_crs("EPSG:4326", "EPSG:32654")?;
//!
//! let zone = buffer(&to_meters.transform(&point)?, 100.0)?;
//! let zone = to_meters.inverse().transform(&zone)?;
//!
//! let mut properties = Properties::new();
//! properties.insert("name".into(), json!("safety zone"));
//! let text = to_geojson_string(&package(zone, properties), 4)?;
//! assert!(text.contains("\"Polygon\""));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod buffer;
pub mod crs;
pub mod demo;
pub mod feature;
pub mod geojson;
pub mod predicate;
pub mod shape;

pub use buffer::{BufferError, buffer};
pub use crs::{Crs, CrsError, Transformer};
pub use feature::{FeatureRecord, Properties, package};
pub use geojson::{
    DEFAULT_INDENT, FeatureLiteral, FeatureTag, GeoJsonError, GeometryLiteral, Position,
    parse_feature, to_geojson_string,
};
pub use predicate::{contains, covers};
pub use shape::{Shape, ShapeError, shape_from_value};
