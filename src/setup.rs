//! Program setup functions.
//!
//! Copyright 2023-5 Seth Pendergrass. See LICENSE.

use env_logger::Builder;
use log::LevelFilter;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::prim::Params;

/// Saved defaults, under `XDG_CONFIG_HOME/exif_stamp/`.
const PARAMS_FILE: &str = "params.json";

/// Sets up env_logger with the format "ERROR_LEVEL message" (e.g. "WARN something went wrong").
///
/// Log levels:
/// Error: Program errors.
/// Warn: Files skipped, and malformed EXIF being replaced.
/// Info: General program flow and files written.
/// Debug: Ignored directory entries and per-file field counts.
/// Trace: Byte counts of parsed and written data.
pub fn configure_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{style}{}{style:#}\t{}",
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Gets parameters from the saved defaults in XDG_CONFIG_HOME, if any, with
/// the parameter file at `path`, if given, layered on top.
pub fn load_params(path: Option<&Path>) -> Result<Params> {
    layer_params(default_params_path().as_deref(), path)
}

/// Writes `params` to XDG_CONFIG_HOME as the defaults for later runs.
pub fn save_params(params: &Params) -> Result<PathBuf> {
    let path = xdg_dirs()
        .place_config_file(PARAMS_FILE)
        .map_err(|e| Error::Config(format!("Failed to create config directory ({e}).")))?;

    write_params(&path, params)?;
    log::info!("{}: Saved parameters as defaults.", path.display());

    Ok(path)
}

fn layer_params(defaults: Option<&Path>, path: Option<&Path>) -> Result<Params> {
    let mut params = Params::default();

    if let Some(defaults) = defaults {
        log::debug!("{}: Reading default parameters.", defaults.display());
        params = read_params(defaults)?;
    }
    if let Some(path) = path {
        params = params.overlay(read_params(path)?);
    }

    Ok(params)
}

fn xdg_dirs() -> xdg::BaseDirectories {
    xdg::BaseDirectories::with_prefix(env!("CARGO_PKG_NAME"))
}

fn default_params_path() -> Option<PathBuf> {
    xdg_dirs().find_config_file(PARAMS_FILE)
}

fn read_params(path: &Path) -> Result<Params> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("{}: Failed to read ({e}).", path.display())))?;

    serde_json::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: Failed to parse ({e}).", path.display())))
}

fn write_params(path: &Path, params: &Params) -> Result<()> {
    let contents = serde_json::to_string_pretty(params)
        .map_err(|e| Error::Config(format!("Failed to serialize parameters ({e}).")))?;

    fs::write(path, contents + "\n")
        .map_err(|e| Error::Config(format!("{}: Failed to write ({e}).", path.display())))
}
