//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use geozone_cli::CliError;

fn main() {
    if let Err(err) = geozone_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("geozone: {err}");
        std::process::exit(1);
    }
}
