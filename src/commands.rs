// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Program subcommands: stamping a folder of JPEG files, and showing what a
//! file currently holds.

use std::{
  ffi::OsStr,
  fs,
  path::{Path, PathBuf},
};

use crate::{
  error::{Error, Result},
  io,
  prim::{ExifRecord, Group, Settings, dms_to_degrees, tags},
  stamp,
};

/// Outcome of stamping a folder. Every file ends up in exactly one list.
#[derive(Debug, Default)]
pub struct Summary {
  pub stamped: Vec<PathBuf>,
  pub failed:  Vec<(PathBuf, Error)>,
}

impl Summary {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

/// Stamps `settings` into every JPEG directly inside `dir`. Files are
/// independent: a failure is logged and recorded, and the batch moves on.
/// Only failing to list `dir` aborts the run.
pub fn stamp(dir: impl AsRef<Path>, settings: &Settings, apply_changes: bool) -> Result<Summary> {
  let dir = dir.as_ref();
  log::info!("Stamping JPEG files in {}.", dir.display());

  let mut summary = Summary::default();

  for path in find_jpegs(dir)? {
    match stamp::stamp_file(&path, settings, apply_changes) {
      Ok(()) => summary.stamped.push(path),
      Err(e) => {
        log::warn!("{}: Skipped. {e}", path.display());
        summary.failed.push((path, e));
      }
    }
  }

  log::info!(
    "{} file(s) stamped, {} failed.",
    summary.stamped.len(),
    summary.failed.len()
  );

  Ok(summary)
}

/// Lists regular files directly inside `dir` with a `.jpg` or `.jpeg`
/// extension in any case, sorted by path. Everything else is ignored.
pub fn find_jpegs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
  let dir = dir.as_ref();
  let mut files = Vec::new();

  for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
    let path = entry.map_err(|e| Error::io(dir, e))?.path();

    if path.is_file() && is_jpeg(&path) {
      files.push(path);
    } else {
      log::debug!("{}: Not a JPEG file. Ignoring.", path.display());
    }
  }

  files.sort();
  Ok(files)
}

fn is_jpeg(path: &Path) -> bool {
  path
    .extension()
    .and_then(OsStr::to_str)
    .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Prints the fields `stamp` manages, as currently stored in `path`.
pub fn show(path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();

  let Some(raw) = io::read_exif(path)? else {
    println!("{}: No EXIF data.", path.display());
    return Ok(());
  };
  let record = ExifRecord::parse(&raw)?;
  if record.is_empty() {
    println!("{}: No EXIF fields.", path.display());
    return Ok(());
  }

  println!("{}:", path.display());
  for (name, value) in describe(&record) {
    println!("  {name:<14}{}", value.as_deref().unwrap_or("not set"));
  }
  if let Some(thumbnail) = record.thumbnail() {
    log::debug!("{}: {} byte thumbnail.", path.display(), thumbnail.len());
  }

  Ok(())
}

/// Human-readable value of each managed field, `None` where absent.
fn describe(record: &ExifRecord) -> Vec<(&'static str, Option<String>)> {
  let ratio = |group, tag| {
    record
      .rational(group, tag)
      .map(|(num, denom)| format!("{num}/{denom}"))
  };
  let level = |tag| record.uint(Group::Exif, tag).map(|v| v.to_string());

  vec![
    (
      "Latitude",
      position(record, tags::GPS_LATITUDE_REF, tags::GPS_LATITUDE),
    ),
    (
      "Longitude",
      position(record, tags::GPS_LONGITUDE_REF, tags::GPS_LONGITUDE),
    ),
    ("Make", record.ascii(Group::Zeroth, tags::MAKE)),
    ("Model", record.ascii(Group::Zeroth, tags::MODEL)),
    (
      "ISO",
      record
        .uint(Group::Exif, tags::ISO_SPEED_RATINGS)
        .map(|v| v.to_string()),
    ),
    ("Exposure time", ratio(Group::Exif, tags::EXPOSURE_TIME)),
    ("F-number", ratio(Group::Exif, tags::F_NUMBER)),
    ("Contrast", level(tags::CONTRAST)),
    (
      "Brightness",
      record
        .srational(Group::Exif, tags::BRIGHTNESS_VALUE)
        .map(|(num, denom)| format!("{num}/{denom}")),
    ),
    ("Saturation", level(tags::SATURATION)),
    ("Sharpness", level(tags::SHARPNESS)),
    (
      "Taken",
      record.ascii(Group::Exif, tags::DATE_TIME_ORIGINAL),
    ),
  ]
}

/// Formats a GPS position as decimal degrees plus reference, e.g.
/// `40.712800 N`. Any DMS denominators are accepted.
fn position(record: &ExifRecord, ref_tag: u16, tag: u16) -> Option<String> {
  let reference = record.ascii(Group::Gps, ref_tag)?;
  let parts = record
    .rationals(Group::Gps, tag)?
    .into_iter()
    .map(|(num, denom)| (denom != 0).then(|| f64::from(num) / f64::from(denom)))
    .collect::<Option<Vec<_>>>()?;

  let &[deg, min, sec] = parts.as_slice() else {
    return None;
  };

  Some(format!("{:.6} {reference}", dms_to_degrees(deg, min, sec)))
}




#[cfg(test)]
mod test_show {
  use super::*;
  use crate::testing::*;

  #[test]
  fn reads_stamped_file() {
    let dir = test_dir!("a.jpg");
    stamp::stamp_file(dir.get_path("a.jpg"), &example_settings(), true).unwrap();

    assert!(show(dir.get_path("a.jpg")).is_ok());
  }

  #[test]
  fn accepts_file_without_exif() {
    let dir = test_dir!("a.jpg");

    assert!(show(dir.get_path("a.jpg")).is_ok());
  }

  #[test]
  fn fails_on_non_jpeg() {
    let dir = test_dir!("a.txt");

    assert_err!(show(dir.get_path("a.txt")), "Not a readable JPEG");
  }
}
