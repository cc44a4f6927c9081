//! Error types emitted by the geozone CLI.

use std::sync::Arc;

use geozone_core::demo::DemoError;
use thiserror::Error;

/// Errors emitted by the geozone CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The merged radius is not a positive, finite number of meters.
    #[error("invalid {field} {value} (set --{field} or {env} to a positive number of meters)")]
    InvalidRadius {
        field: &'static str,
        env: &'static str,
        value: f64,
    },
    /// The merged indent is wider than the output allows.
    #[error("invalid {field} {value} (set --{field} or {env} to at most {max} spaces)")]
    InvalidIndent {
        field: &'static str,
        env: &'static str,
        value: usize,
        max: usize,
    },
    /// The walkthrough itself failed.
    #[error("walkthrough failed: {0}")]
    Demo(#[from] DemoError),
    /// Writing the report to the output stream failed.
    #[error("failed to write walkthrough output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
