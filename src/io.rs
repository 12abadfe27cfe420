// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Functions for reading and replacing the EXIF segment of JPEG files.
//!
//! Only the APP1 EXIF segment is touched. All other segments, including the
//! entropy-coded image data, are written back byte for byte.

use std::{
  fs,
  path::{Path, PathBuf},
};

use img_parts::{Bytes, ImageEXIF, jpeg::Jpeg};

use crate::error::{Error, Result};

/// Appended to the file name while a new version is being written.
const TEMP_SUFFIX: &str = ".exstamp.tmp";

/// Reads and splits the JPEG at `path` into segments. Pixel data is not
/// decoded.
pub fn read_jpeg(path: impl AsRef<Path>) -> Result<Jpeg> {
  let path = path.as_ref();
  let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;

  Jpeg::from_bytes(Bytes::from(bytes)).map_err(|e| Error::Jpeg {
    path:   path.to_owned(),
    reason: e.to_string(),
  })
}

/// Gets the raw EXIF blob (without the `Exif\0\0` prefix) of the JPEG at
/// `path`, or `None` if it has no EXIF segment.
pub fn read_exif(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
  Ok(read_jpeg(path)?.exif().map(|exif| exif.to_vec()))
}

/// Replaces the EXIF segment of `jpeg` with `exif` and writes the result to
/// `path`. The new contents go to a sibling temporary file that is then
/// renamed over `path`, so `path` is never left half-written. Symlinks are
/// resolved first, so the file they point to is the one replaced.
pub fn write_jpeg(path: impl AsRef<Path>, mut jpeg: Jpeg, exif: Vec<u8>) -> Result<()> {
  let path = path.as_ref();
  let path = &fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
  jpeg.set_exif(Some(Bytes::from(exif)));
  let contents = jpeg.encoder().bytes();

  let temp = temp_path(path);
  let result = replace(path, &temp, &contents);

  if result.is_err() && temp.exists() {
    if let Err(e) = fs::remove_file(&temp) {
      log::warn!("{}: Failed to remove temporary file ({e}).", temp.display());
    }
  }

  result
}

/// Writes `contents` to `temp`, gives it the permissions of `path`, then
/// moves it over `path`.
fn replace(path: &Path, temp: &Path, contents: &[u8]) -> Result<()> {
  let permissions = fs::metadata(path)
    .map_err(|e| Error::io(path, e))?
    .permissions();

  fs::write(temp, contents).map_err(|e| Error::io(temp, e))?;
  fs::set_permissions(temp, permissions).map_err(|e| Error::io(temp, e))?;
  fs::rename(temp, path).map_err(|e| Error::io(path, e))?;

  log::trace!("{}: Wrote {} bytes.", path.display(), contents.len());
  Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_owned();
  name.push(TEMP_SUFFIX);

  PathBuf::from(name)
}


#[cfg(test)]
mod test_write_jpeg {
  use super::*;
  use crate::{
    prim::{ExifRecord, Group, ascii_value, tags},
    testing::*,
  };

  fn sample_exif() -> Vec<u8> {
    let mut record = ExifRecord::new();
    record.set(Group::Zeroth, tags::MAKE, ascii_value("Fujifilm"));
    record.encode().unwrap()
  }

  #[test]
  fn inserts_exif_segment() {
    let dir = test_dir!("plain.jpg");
    let path = dir.get_path("plain.jpg");
    let exif = sample_exif();

    write_jpeg(&path, read_jpeg(&path).unwrap(), exif.clone()).unwrap();

    assert_eq!(read_exif(&path).unwrap(), Some(exif));
  }

  #[test]
  fn replaces_existing_exif_segment() {
    let dir = test_dir!("plain.jpg");
    let path = dir.get_path("plain.jpg");
    write_jpeg(&path, read_jpeg(&path).unwrap(), sample_exif()).unwrap();
    let mut record = ExifRecord::new();
    record.set(Group::Zeroth, tags::MODEL, ascii_value("X-T5"));
    let replacement = record.encode().unwrap();

    write_jpeg(&path, read_jpeg(&path).unwrap(), replacement.clone()).unwrap();

    assert_eq!(read_exif(&path).unwrap(), Some(replacement));
  }

  #[test]
  fn leaves_no_temporary_file() {
    let dir = test_dir!("plain.jpg");
    let path = dir.get_path("plain.jpg");

    write_jpeg(&path, read_jpeg(&path).unwrap(), sample_exif()).unwrap();

    assert_dir!(dir, ["plain.jpg"]);
  }

  #[test]
  fn fails_without_touching_anything_when_target_is_gone() {
    let dir = test_dir!("plain.jpg");
    let path = dir.get_path("plain.jpg");
    let jpeg = read_jpeg(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_err!(write_jpeg(&path, jpeg, sample_exif()), "I/O failure");
    assert_dir!(dir, []);
  }

  #[test]
  fn removes_temporary_file_when_rename_fails() {
    let dir = test_dir!("plain.jpg", "album.jpg/");
    let jpeg = read_jpeg(dir.get_path("plain.jpg")).unwrap();

    assert_err!(
      write_jpeg(dir.get_path("album.jpg"), jpeg, sample_exif()),
      "I/O failure"
    );
    assert!(dir.get_path("album.jpg").is_dir());
    assert_dir!(dir, ["plain.jpg"]);
  }
}
