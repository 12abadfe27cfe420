// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Error type shared by every stage of stamping.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("{}: I/O failure ({source}).", .path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  #[error("{}: Not a readable JPEG ({reason}).", .path.display())]
  Jpeg { path: PathBuf, reason: String },

  #[error("Malformed EXIF data ({0}).")]
  ExifParse(#[source] exif::Error),

  #[error("Failed to encode EXIF data ({0}).")]
  ExifEncode(#[source] exif::Error),

  #[error("Invalid parameter: {0}")]
  Validation(String),

  #[error("Parameter file: {0}")]
  Config(String),
}

impl Error {
  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
