//! Facade crate for geozone.
//!
//! Re-exports the geometry, reprojection, buffering and GeoJSON operations
//! from `geozone-core` together with the Yamashita Park walkthrough.
//!
//! # Examples
//!
//! ```
//! use geozone::demo::{DemoConfig, run};
//! use geozone::parse_feature;
//!
//! let report = run(&DemoConfig::default())?;
//! assert!(report.inside_contained && !report.outside_contained);
//!
//! let feature = parse_feature(&report.geojson)?;
//! assert_eq!(
//!     feature.property("name").and_then(|name| name.as_str()),
//!     Some("100m Safety Zone around Hikawa Maru")
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use geozone_core::demo;
pub use geozone_core::{
    BufferError, Crs, CrsError, FeatureRecord, GeoJsonError, Properties, Shape, ShapeError,
    Transformer, buffer, contains, covers, package, parse_feature, shape_from_value,
    to_geojson_string,
};
