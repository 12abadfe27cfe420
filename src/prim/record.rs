// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! In-memory EXIF record: IFD group -> tag number -> value, with conversion
//! to and from the raw TIFF-structured blob stored in a JPEG's APP1 segment.

use std::{collections::BTreeMap, fmt, io::Cursor};

use exif::{Context, Field, In, Rational, SRational, Tag, Value};

use super::{Dms, tags};
use crate::error::{Error, Result};

/// The five IFD groups an EXIF blob is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
  /// Primary image (IFD0).
  Zeroth,
  Exif,
  Gps,
  Interop,
  /// Thumbnail image (IFD1).
  First,
}

impl Group {
  pub const ALL: [Group; 5] = [
    Group::Zeroth,
    Group::Exif,
    Group::Gps,
    Group::Interop,
    Group::First,
  ];

  fn index(self) -> usize {
    match self {
      Group::Zeroth => 0,
      Group::Exif => 1,
      Group::Gps => 2,
      Group::Interop => 3,
      Group::First => 4,
    }
  }

  fn context(self) -> Context {
    match self {
      Group::Zeroth | Group::First => Context::Tiff,
      Group::Exif => Context::Exif,
      Group::Gps => Context::Gps,
      Group::Interop => Context::Interop,
    }
  }

  fn ifd(self) -> In {
    match self {
      Group::First => In::THUMBNAIL,
      _ => In::PRIMARY,
    }
  }

  /// Group of a parsed field. Sub-IFDs hanging off the thumbnail have no
  /// group.
  fn locate(field: &Field) -> Option<Group> {
    let primary = field.ifd_num == In::PRIMARY;
    match field.tag.context() {
      Context::Tiff if primary => Some(Group::Zeroth),
      Context::Tiff if field.ifd_num == In::THUMBNAIL => Some(Group::First),
      Context::Exif if primary => Some(Group::Exif),
      Context::Gps if primary => Some(Group::Gps),
      Context::Interop if primary => Some(Group::Interop),
      _ => None,
    }
  }

  fn is_structural(self, tag: u16) -> bool {
    match self {
      Group::Zeroth | Group::First => tags::STRUCTURAL.contains(&tag),
      Group::Exif => tag == tags::INTEROP_IFD_POINTER,
      Group::Gps | Group::Interop => false,
    }
  }
}

impl fmt::Display for Group {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Group::Zeroth => "0th",
      Group::Exif => "Exif",
      Group::Gps => "GPS",
      Group::Interop => "Interop",
      Group::First => "1st",
    })
  }
}

/// EXIF metadata of one image.
///
/// Only image-describing fields are stored. IFD pointers and thumbnail
/// offsets are dropped on parse and rebuilt by [`ExifRecord::encode`]; the
/// thumbnail bytes themselves are carried separately.
#[derive(Debug, Clone)]
pub struct ExifRecord {
  groups:        [BTreeMap<u16, Value>; 5],
  little_endian: bool,
  thumbnail:     Option<Vec<u8>>,
}

impl Default for ExifRecord {
  fn default() -> Self {
    Self::new()
  }
}

impl ExifRecord {
  /// Five empty groups, big-endian.
  pub fn new() -> Self {
    Self {
      groups:        Default::default(),
      little_endian: false,
      thumbnail:     None,
    }
  }

  /// Parses a raw EXIF blob (TIFF header onwards, without the `Exif\0\0`
  /// prefix). The byte order of `raw` is kept for re-encoding.
  pub fn parse(raw: &[u8]) -> Result<Self> {
    let exif = exif::Reader::new()
      .read_raw(raw.to_vec())
      .map_err(Error::ExifParse)?;

    let mut record = Self::new();
    record.little_endian = exif.little_endian();

    for field in exif.fields() {
      let Some(group) = Group::locate(field) else {
        log::debug!("Dropping {} in {} IFD.", field.tag, field.ifd_num);
        continue;
      };
      let tag = field.tag.number();
      if group.is_structural(tag) {
        continue;
      }
      // The writer cannot encode types it does not know.
      if let Value::Unknown(..) = field.value {
        log::debug!("Dropping {} of unknown type.", field.tag);
        continue;
      }
      record.set(group, tag, field.value.clone());
    }

    record.thumbnail = read_thumbnail(&exif);
    log::trace!(
      "Parsed {} EXIF fields from {} bytes.",
      record.len(),
      raw.len()
    );

    Ok(record)
  }

  /// Serializes to a raw EXIF blob, tags sorted within each IFD.
  pub fn encode(&self) -> Result<Vec<u8>> {
    let fields = self.fields().collect::<Vec<_>>();

    let mut writer = exif::experimental::Writer::new();
    for field in &fields {
      writer.push_field(field);
    }
    if let Some(thumbnail) = &self.thumbnail {
      writer.set_jpeg(thumbnail, In::THUMBNAIL);
    }

    let mut buf = Cursor::new(Vec::new());
    writer
      .write(&mut buf, self.little_endian)
      .map_err(Error::ExifEncode)?;

    Ok(buf.into_inner())
  }

  /// All stored fields, in group then tag order.
  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
    Group::ALL.into_iter().flat_map(move |group| {
      self.group(group).iter().map(move |(tag, value)| Field {
        tag:     Tag(group.context(), *tag),
        ifd_num: group.ifd(),
        value:   value.clone(),
      })
    })
  }

  pub fn group(&self, group: Group) -> &BTreeMap<u16, Value> {
    &self.groups[group.index()]
  }

  pub fn get(&self, group: Group, tag: u16) -> Option<&Value> {
    self.group(group).get(&tag)
  }

  /// Sets `tag` in `group`, replacing any existing value.
  pub fn set(&mut self, group: Group, tag: u16, value: Value) {
    self.groups[group.index()].insert(tag, value);
  }

  pub fn len(&self) -> usize {
    self.groups.iter().map(BTreeMap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn thumbnail(&self) -> Option<&[u8]> {
    self.thumbnail.as_deref()
  }

  /// First string of an ASCII field. Invalid UTF-8 is replaced.
  pub fn ascii(&self, group: Group, tag: u16) -> Option<String> {
    match self.get(group, tag)? {
      Value::Ascii(strings) => strings
        .first()
        .map(|s| String::from_utf8_lossy(s).into_owned()),
      _ => None,
    }
  }

  /// First value of a BYTE, SHORT or LONG field.
  pub fn uint(&self, group: Group, tag: u16) -> Option<u32> {
    self.get(group, tag)?.get_uint(0)
  }

  pub fn rationals(&self, group: Group, tag: u16) -> Option<Vec<(u32, u32)>> {
    match self.get(group, tag)? {
      Value::Rational(values) => Some(values.iter().map(|r| (r.num, r.denom)).collect()),
      _ => None,
    }
  }

  pub fn rational(&self, group: Group, tag: u16) -> Option<(u32, u32)> {
    self.rationals(group, tag)?.first().copied()
  }

  pub fn srational(&self, group: Group, tag: u16) -> Option<(i32, i32)> {
    match self.get(group, tag)? {
      Value::SRational(values) => values.first().map(|r| (r.num, r.denom)),
      _ => None,
    }
  }
}

/// Copies out the IFD1 JPEG thumbnail, if its offset and length point inside
/// the blob.
fn read_thumbnail(exif: &exif::Exif) -> Option<Vec<u8>> {
  let uint = |tag| {
    exif
      .get_field(Tag(Context::Tiff, tag), In::THUMBNAIL)
      .and_then(|f| f.value.get_uint(0))
      .and_then(|v| usize::try_from(v).ok())
  };

  let offset = uint(tags::JPEG_INTERCHANGE_FORMAT)?;
  let length = uint(tags::JPEG_INTERCHANGE_FORMAT_LENGTH)?;

  exif
    .buf()
    .get(offset..offset.checked_add(length)?)
    .map(<[u8]>::to_vec)
}

/// Single-string ASCII value. UTF-8 is stored as-is.
pub fn ascii_value(text: &str) -> Value {
  Value::Ascii(vec![text.as_bytes().to_vec()])
}

pub fn short_value(value: u16) -> Value {
  Value::Short(vec![value])
}

pub fn rational_value((num, denom): (u32, u32)) -> Value {
  Value::Rational(vec![Rational { num, denom }])
}

pub fn srational_value((num, denom): (i32, i32)) -> Value {
  Value::SRational(vec![SRational { num, denom }])
}

/// `RATIONAL[3]` value for a GPS latitude or longitude.
pub fn dms_value(dms: &Dms) -> Value {
  Value::Rational(
    dms
      .to_rationals()
      .into_iter()
      .map(|(num, denom)| Rational { num, denom })
      .collect(),
  )
}


#[cfg(test)]
mod test_new {
  use super::*;

  #[test]
  fn starts_with_five_empty_groups() {
    let record = ExifRecord::new();

    assert!(record.is_empty());
    for group in Group::ALL {
      assert!(record.group(group).is_empty(), "{group} not empty");
    }
    assert!(record.thumbnail().is_none());
  }

  #[test]
  fn displays_group_names() {
    let names = Group::ALL.map(|g| g.to_string());

    assert_eq!(names, ["0th", "Exif", "GPS", "Interop", "1st"]);
  }

  #[test]
  fn set_replaces_existing_value() {
    let mut record = ExifRecord::new();
    record.set(Group::Exif, tags::CONTRAST, short_value(1));
    record.set(Group::Exif, tags::CONTRAST, short_value(2));

    assert_eq!(record.len(), 1);
    assert_eq!(record.uint(Group::Exif, tags::CONTRAST), Some(2));
  }
}
