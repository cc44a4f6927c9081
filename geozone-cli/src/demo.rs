//! Demo command implementation for the geozone CLI.

use std::io::Write;

use clap::Parser;
use geo::Geometry;
use geozone_core::demo::{
    DEFAULT_PROJECTED_CRS, DEFAULT_RADIUS_METERS, DEFAULT_ZONE_NAME, DemoConfig, DemoReport,
    INSIDE_LANDMARK, OUTSIDE_LANDMARK, run,
};
use geozone_core::{DEFAULT_INDENT, Shape};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_INDENT, ARG_PROJECTED_CRS, ARG_RADIUS_METERS, ARG_ZONE_NAME, CliError, ENV_INDENT,
    ENV_RADIUS_METERS,
};

/// Widest GeoJSON indent accepted from the command line or configuration.
pub(crate) const MAX_INDENT: usize = 16;

/// CLI arguments for the `demo` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "demo",
    long_about = "Classify two Yokohama landmarks against Yamashita Park, then \
                 buffer the Hikawa Maru in a metric projection and print the \
                 resulting safety zone as a GeoJSON feature. Options can come \
                 from CLI flags, configuration files, or environment variables.",
    about = "Run the Yamashita Park walkthrough"
)]
#[ortho_config(prefix = "GEOZONE")]
pub(crate) struct DemoArgs {
    /// Metric reference system to buffer in (e.g. "EPSG:32654").
    #[arg(long = ARG_PROJECTED_CRS, value_name = "EPSG:code")]
    #[serde(default)]
    pub(crate) projected_crs: Option<String>,
    /// Safety zone radius in meters.
    #[arg(long = ARG_RADIUS_METERS, value_name = "meters", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) radius_meters: Option<f64>,
    /// `name` property of the published feature.
    #[arg(long = ARG_ZONE_NAME, value_name = "text")]
    #[serde(default)]
    pub(crate) zone_name: Option<String>,
    /// Spaces per indent level in the GeoJSON output (at most 16).
    #[arg(long = ARG_INDENT, value_name = "n")]
    #[serde(default)]
    pub(crate) indent: Option<usize>,
}

impl DemoArgs {
    pub(crate) fn into_config(self) -> Result<DemoConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DemoConfig::try_from(merged)
    }
}

impl TryFrom<DemoArgs> for DemoConfig {
    type Error = CliError;

    fn try_from(args: DemoArgs) -> Result<Self, Self::Error> {
        let radius_meters = args.radius_meters.unwrap_or(DEFAULT_RADIUS_METERS);
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(CliError::InvalidRadius {
                field: ARG_RADIUS_METERS,
                env: ENV_RADIUS_METERS,
                value: radius_meters,
            });
        }
        let indent = args.indent.unwrap_or(DEFAULT_INDENT);
        if indent > MAX_INDENT {
            return Err(CliError::InvalidIndent {
                field: ARG_INDENT,
                env: ENV_INDENT,
                value: indent,
                max: MAX_INDENT,
            });
        }
        Ok(Self {
            projected_crs: args
                .projected_crs
                .unwrap_or_else(|| DEFAULT_PROJECTED_CRS.to_owned()),
            radius_meters,
            zone_name: args
                .zone_name
                .unwrap_or_else(|| DEFAULT_ZONE_NAME.to_owned()),
            indent,
        })
    }
}

pub(crate) fn run_demo_with(args: DemoArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    info!(
        "running walkthrough in {} with a {} m radius",
        config.projected_crs, config.radius_meters
    );
    let report = run(&config)?;
    write_report(writer, &report).map_err(CliError::WriteOutput)
}

/// Narrate `report` step by step, ending with the GeoJSON feature.
pub(crate) fn write_report(writer: &mut dyn Write, report: &DemoReport) -> std::io::Result<()> {
    writeln!(writer, "--- geozone walkthrough: Yamashita Park, Yokohama ---")?;

    writeln!(writer)?;
    writeln!(writer, "Step 1: defined GeoJSON for the park and two landmarks.")?;
    writeln!(writer, "Park: {}", report.park_literal)?;
    writeln!(writer, "{INSIDE_LANDMARK}: {}", report.inside_literal)?;
    writeln!(writer, "{OUTSIDE_LANDMARK}: {}", report.outside_literal)?;

    writeln!(writer)?;
    writeln!(writer, "Step 2: built shapes from the GeoJSON literals.")?;
    writeln!(writer, "Park shape: {}", describe(&report.park))?;
    writeln!(writer, "Landmark shape: {}", describe(&report.inside_point))?;

    writeln!(writer)?;
    writeln!(writer, "Step 3: tested containment against the park.")?;
    writeln!(
        writer,
        "Is the {INSIDE_LANDMARK} inside the park? -> {}",
        report.inside_contained
    )?;
    writeln!(
        writer,
        "Is the {OUTSIDE_LANDMARK} inside the park? -> {}",
        report.outside_contained
    )?;

    writeln!(writer)?;
    writeln!(
        writer,
        "Step 4: buffered the {INSIDE_LANDMARK} by {} m in {}.",
        report.radius_meters,
        report.zone_projected.crs()
    )?;
    if let Geometry::Point(point) = report.projected_point.geometry() {
        writeln!(
            writer,
            "Projected position: E {:.2} m, N {:.2} m",
            point.x(),
            point.y()
        )?;
    }
    writeln!(writer, "Zone outline: {}", describe(&report.zone_geographic))?;

    writeln!(writer)?;
    writeln!(writer, "Step 5: packaged the zone as a GeoJSON feature.")?;

    writeln!(writer)?;
    writeln!(writer, "--- Safety zone GeoJSON ---")?;
    writeln!(writer, "{}", report.geojson)?;

    writeln!(writer)?;
    writeln!(writer, "--- End of walkthrough ---")
}

fn describe(shape: &Shape) -> String {
    format!("{} in {}", shape.kind(), shape.crs())
}
