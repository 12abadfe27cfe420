// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Merges the stamping settings into a file's EXIF record and writes it back.

use std::path::Path;

use img_parts::ImageEXIF;

use crate::{
  error::Result,
  io,
  prim::{
    ExifRecord,
    GeoCoordinate,
    Group,
    Settings,
    ascii_value,
    dms_value,
    rational_value,
    short_value,
    srational_value,
    tags,
  },
};

/// Builds the record to store for an image whose current EXIF blob is
/// `existing`. Fields not covered by `settings` are kept as they are. A
/// malformed blob is replaced by an empty record.
pub fn build_record(path: &Path, existing: Option<&[u8]>, settings: &Settings) -> ExifRecord {
  let record = match existing {
    None => ExifRecord::new(),
    Some(raw) => ExifRecord::parse(raw).unwrap_or_else(|e| {
      log::warn!("{}: {e} Replacing it with a fresh record.", path.display());
      ExifRecord::new()
    }),
  };

  apply(record, settings)
}

fn apply(mut record: ExifRecord, settings: &Settings) -> ExifRecord {
  let Settings {
    latitude,
    longitude,
    camera,
    photo,
  } = settings;

  set_position(&mut record, latitude, tags::GPS_LATITUDE_REF, tags::GPS_LATITUDE);
  set_position(&mut record, longitude, tags::GPS_LONGITUDE_REF, tags::GPS_LONGITUDE);

  record.set(Group::Zeroth, tags::MAKE, ascii_value(&camera.make));
  record.set(Group::Zeroth, tags::MODEL, ascii_value(&camera.model));

  record.set(Group::Exif, tags::ISO_SPEED_RATINGS, short_value(camera.iso));
  record.set(Group::Exif, tags::EXPOSURE_TIME, rational_value(camera.exposure_time));
  record.set(Group::Exif, tags::F_NUMBER, rational_value(camera.f_number));

  record.set(Group::Exif, tags::CONTRAST, short_value(photo.contrast.value()));
  record.set(
    Group::Exif,
    tags::BRIGHTNESS_VALUE,
    srational_value((photo.brightness, 100)),
  );
  record.set(Group::Exif, tags::SATURATION, short_value(photo.saturation.value()));
  record.set(Group::Exif, tags::SHARPNESS, short_value(photo.sharpness.value()));

  record
}

fn set_position(record: &mut ExifRecord, coordinate: &GeoCoordinate, ref_tag: u16, tag: u16) {
  record.set(Group::Gps, ref_tag, ascii_value(coordinate.reference()));
  record.set(Group::Gps, tag, dms_value(&coordinate.to_dms()));
}

/// Stamps `settings` into the JPEG at `path`. With `apply_changes` unset the
/// new metadata is built and encoded, but the file is left alone.
pub fn stamp_file(path: impl AsRef<Path>, settings: &Settings, apply_changes: bool) -> Result<()> {
  let path = path.as_ref();

  let jpeg = io::read_jpeg(path)?;
  let existing = jpeg.exif();
  let record = build_record(path, existing.as_deref(), settings);
  let exif = record.encode()?;

  log::debug!(
    "{}: {} EXIF fields ({} bytes, was {}).",
    path.display(),
    record.len(),
    exif.len(),
    existing.map_or(0, |e| e.len())
  );

  if !apply_changes {
    log::info!("{}: EXIF data ready (dry run, not written).", path.display());
    return Ok(());
  }

  io::write_jpeg(path, jpeg, exif)?;
  log::info!("{}: EXIF data added.", path.display());

  Ok(())
}
