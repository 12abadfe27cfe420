// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Conversions between decimal degrees and the degrees/minutes/seconds form
//! EXIF stores GPS positions in, plus parsing of rational parameters.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Seconds are stored in hundredths of a second.
pub const SECONDS_DENOMINATOR: u32 = 100;

/// Accepts `N/D`, `N`, or `N.F` (up to six fractional digits).
static RATIONAL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*(?:/\s*(\d+)|\.(\d{1,6}))?\s*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
  Latitude,
  Longitude,
}

impl Axis {
  fn limit(self) -> f64 {
    match self {
      Axis::Latitude => 90.0,
      Axis::Longitude => 180.0,
    }
  }

  fn name(self) -> &'static str {
    match self {
      Axis::Latitude => "latitude",
      Axis::Longitude => "longitude",
    }
  }
}

/// A signed position along one axis, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
  pub axis:    Axis,
  pub degrees: f64,
}

impl GeoCoordinate {
  /// Fails unless `degrees` is finite and within the axis' range (±90 for
  /// latitude, ±180 for longitude).
  pub fn new(axis: Axis, degrees: f64) -> Result<Self> {
    if !degrees.is_finite() || degrees.abs() > axis.limit() {
      return Err(Error::Validation(format!(
        "{} `{degrees}` is outside [-{limit}, {limit}].",
        axis.name(),
        limit = axis.limit()
      )));
    }

    Ok(Self { axis, degrees })
  }

  pub fn latitude(degrees: f64) -> Result<Self> {
    Self::new(Axis::Latitude, degrees)
  }

  pub fn longitude(degrees: f64) -> Result<Self> {
    Self::new(Axis::Longitude, degrees)
  }

  /// Hemisphere reference as stored in `GPSLatitudeRef`/`GPSLongitudeRef`.
  pub fn reference(&self) -> &'static str {
    match (self.axis, self.degrees >= 0.0) {
      (Axis::Latitude, true) => "N",
      (Axis::Latitude, false) => "S",
      (Axis::Longitude, true) => "E",
      (Axis::Longitude, false) => "W",
    }
  }

  pub fn to_dms(&self) -> Dms {
    Dms::from_degrees(self.degrees)
  }
}

/// Unsigned degrees, minutes and hundredths of seconds. The sign lives in the
/// hemisphere reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
  pub degrees:            u32,
  pub minutes:            u32,
  pub seconds_hundredths: u32,
}

impl Dms {
  /// Converts the absolute value of `decimal` to DMS, rounding seconds to the
  /// nearest hundredth. A result of 60.00" is carried into the minutes (and
  /// 60' into the degrees), so seconds always stay below 60.
  #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
  pub fn from_degrees(decimal: f64) -> Self {
    let decimal = decimal.abs();
    let degrees = decimal.floor();
    let minutes = ((decimal - degrees) * 60.0).floor();
    let seconds = (decimal - degrees - minutes / 60.0) * 3600.0;

    // Negative drift saturates to 0 in the casts.
    let mut dms = Self {
      degrees:            degrees as u32,
      minutes:            minutes as u32,
      seconds_hundredths: (seconds * f64::from(SECONDS_DENOMINATOR)).round() as u32,
    };

    if dms.seconds_hundredths >= 60 * SECONDS_DENOMINATOR {
      dms.seconds_hundredths -= 60 * SECONDS_DENOMINATOR;
      dms.minutes += 1;
    }
    if dms.minutes >= 60 {
      dms.minutes -= 60;
      dms.degrees += 1;
    }

    dms
  }

  /// EXIF `RATIONAL[3]` form: `[(deg, 1), (min, 1), (sec * 100, 100)]`.
  pub fn to_rationals(&self) -> [(u32, u32); 3] {
    [
      (self.degrees, 1),
      (self.minutes, 1),
      (self.seconds_hundredths, SECONDS_DENOMINATOR),
    ]
  }
}

/// Converts degrees, minutes and seconds to decimal degrees.
pub fn dms_to_degrees(deg: f64, min: f64, sec: f64) -> f64 {
  deg + (min / 60.0) + (sec / 3600.0)
}

/// Parses `1/125`, `2` or `1.8` into a `(numerator, denominator)` pair.
/// Decimals keep their precision, so `1.8` becomes `18/10`.
pub fn parse_rational(value: &str) -> Result<(u32, u32)> {
  let invalid = || Error::Validation(format!("`{value}` is not a rational (expected N/D, N or N.F)."));

  let caps = RATIONAL.captures(value).ok_or_else(invalid)?;
  let whole = caps[1].parse::<u32>().map_err(|_| invalid())?;

  if let Some(denominator) = caps.get(2) {
    let denominator = denominator.as_str().parse::<u32>().map_err(|_| invalid())?;
    if denominator == 0 {
      return Err(Error::Validation(format!("`{value}` has a zero denominator.")));
    }
    return Ok((whole, denominator));
  }

  if let Some(fraction) = caps.get(3) {
    let digits = u32::try_from(fraction.as_str().len()).map_err(|_| invalid())?;
    let denominator = 10u32.pow(digits);
    let fraction = fraction.as_str().parse::<u32>().map_err(|_| invalid())?;
    let numerator = whole
      .checked_mul(denominator)
      .and_then(|n| n.checked_add(fraction))
      .ok_or_else(invalid)?;
    return Ok((numerator, denominator));
  }

  Ok((whole, 1))
}
