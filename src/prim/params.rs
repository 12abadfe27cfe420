// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Stamping parameters: the raw, layered form read from files and flags, and
//! the validated form the writer consumes.

use clap::Args;
use serde::{Deserialize, Serialize};

use super::{GeoCoordinate, parse_rational};
use crate::error::{Error, Result};

/// Raw parameters. Every field is optional so that the saved defaults, a
/// parameter file and command-line flags can be layered with
/// [`Params::overlay`].
#[derive(Args, Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
  /// Latitude in decimal degrees, negative for south.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub latitude: Option<f64>,

  /// Longitude in decimal degrees, negative for west.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub longitude: Option<f64>,

  /// Camera make (e.g. "Canon").
  #[arg(long)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub make: Option<String>,

  /// Camera model (e.g. "EOS 5D Mark IV").
  #[arg(long)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model: Option<String>,

  /// ISO speed.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub iso: Option<i64>,

  /// Exposure time in seconds, as `N/D`, `N` or `N.F` (e.g. "1/125").
  #[arg(long)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub exposure_time: Option<String>,

  /// F-number, as `N/D`, `N` or `N.F` (e.g. "1.8" or "18/10").
  #[arg(long)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub f_number: Option<String>,

  /// 0 = Normal, 1 = Soft, 2 = Hard. Default: 0.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contrast: Option<i64>,

  /// Brightness percentage, stored as `brightness/100`.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub brightness: Option<i64>,

  /// 0 = Normal, 1 = Low, 2 = High. Default: 0.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub saturation: Option<i64>,

  /// 0 = Normal, 1 = Soft, 2 = Hard. Default: 0.
  #[arg(long, allow_negative_numbers = true)]
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sharpness: Option<i64>,
}

impl Params {
  /// Fields set in `top` win over fields set in `self`.
  #[must_use]
  pub fn overlay(self, top: Params) -> Params {
    Params {
      latitude:      top.latitude.or(self.latitude),
      longitude:     top.longitude.or(self.longitude),
      make:          top.make.or(self.make),
      model:         top.model.or(self.model),
      iso:           top.iso.or(self.iso),
      exposure_time: top.exposure_time.or(self.exposure_time),
      f_number:      top.f_number.or(self.f_number),
      contrast:      top.contrast.or(self.contrast),
      brightness:    top.brightness.or(self.brightness),
      saturation:    top.saturation.or(self.saturation),
      sharpness:     top.sharpness.or(self.sharpness),
    }
  }

  /// Checks every value against what EXIF can represent. Nothing is written
  /// to any file until this succeeds.
  pub fn validate(&self) -> Result<Settings> {
    let latitude = GeoCoordinate::latitude(required(self.latitude, "latitude")?)?;
    let longitude = GeoCoordinate::longitude(required(self.longitude, "longitude")?)?;

    let iso = required(self.iso, "iso")?;
    let iso = u16::try_from(iso)
      .map_err(|_| Error::Validation(format!("iso `{iso}` is outside [0, 65535].")))?;

    let camera = CameraAttributes {
      make: required(self.make.clone(), "make")?,
      model: required(self.model.clone(), "model")?,
      iso,
      exposure_time: parse_rational(&required(self.exposure_time.clone(), "exposure_time")?)?,
      f_number: parse_rational(&required(self.f_number.clone(), "f_number")?)?,
    };

    let brightness = required(self.brightness, "brightness")?;
    let photo = PhotoAttributes {
      contrast: Level::parse(self.contrast, "contrast")?,
      saturation: Level::parse(self.saturation, "saturation")?,
      sharpness: Level::parse(self.sharpness, "sharpness")?,
      brightness: i32::try_from(brightness).map_err(|_| {
        Error::Validation(format!("brightness `{brightness}` does not fit in 32 bits."))
      })?,
    };

    Ok(Settings {
      latitude,
      longitude,
      camera,
      photo,
    })
  }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
  value.ok_or_else(|| Error::Validation(format!("{name} not set.")))
}

/// Strength of an in-camera adjustment, as stored in `Contrast`,
/// `Saturation` and `Sharpness`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  #[default]
  Normal,
  /// Soft (contrast, sharpness) or low (saturation).
  Low,
  /// Hard (contrast, sharpness) or high (saturation).
  High,
}

impl Level {
  fn parse(value: Option<i64>, name: &str) -> Result<Self> {
    match value {
      None | Some(0) => Ok(Level::Normal),
      Some(1) => Ok(Level::Low),
      Some(2) => Ok(Level::High),
      Some(v) => Err(Error::Validation(format!(
        "{name} `{v}` is not one of 0 (normal), 1 (low/soft), 2 (high/hard)."
      ))),
    }
  }

  pub fn value(self) -> u16 {
    match self {
      Level::Normal => 0,
      Level::Low => 1,
      Level::High => 2,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraAttributes {
  pub make:          String,
  pub model:         String,
  pub iso:           u16,
  pub exposure_time: (u32, u32),
  pub f_number:      (u32, u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoAttributes {
  pub contrast:   Level,
  pub saturation: Level,
  pub sharpness:  Level,
  /// Percentage.
  pub brightness: i32,
}

/// Validated parameters, shared read-only by every file in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
  pub latitude:  GeoCoordinate,
  pub longitude: GeoCoordinate,
  pub camera:    CameraAttributes,
  pub photo:     PhotoAttributes,
}
