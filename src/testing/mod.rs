// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Test-only utilities.

mod asserts;
mod test_dir;

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
pub use test_dir::*;

pub use crate::{assert_dir, assert_err, test_dir, test_path};
use crate::prim::{Params, Settings};

/// Lower Manhattan, Canon EOS 5D Mark IV, f/1.8 at 1/125.
pub fn example_params() -> Params {
  Params {
    latitude:      Some(40.7128),
    longitude:     Some(-74.0060),
    make:          Some("Canon".to_string()),
    model:         Some("EOS 5D Mark IV".to_string()),
    iso:           Some(100),
    exposure_time: Some("1/125".to_string()),
    f_number:      Some("18/10".to_string()),
    contrast:      Some(0),
    brightness:    Some(50),
    saturation:    Some(1),
    sharpness:     Some(2),
  }
}

pub fn example_settings() -> Settings {
  example_params().validate().unwrap()
}

/// Writes a small gradient JPEG (no EXIF segment) to `path`.
pub fn create_jpeg(path: impl AsRef<Path>) {
  let image = RgbImage::from_fn(16, 8, |x, y| {
    Rgb([
      u8::try_from(x * 16).unwrap(),
      u8::try_from(y * 32).unwrap(),
      128,
    ])
  });
  image
    .save_with_format(path.as_ref(), ImageFormat::Jpeg)
    .unwrap();
}

pub fn type_of<T>(_: T) -> &'static str {
  std::any::type_name::<T>()
}
