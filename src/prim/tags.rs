// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! EXIF tag numbers, grouped by the IFD they live in.
//!
//! Numbers are from the EXIF 2.32 specification (CIPA DC-008).

// 0th / 1st IFD.
pub const MAKE: u16 = 0x010F;
pub const MODEL: u16 = 0x0110;
pub const STRIP_OFFSETS: u16 = 0x0111;
pub const STRIP_BYTE_COUNTS: u16 = 0x0117;
pub const TILE_OFFSETS: u16 = 0x0144;
pub const TILE_BYTE_COUNTS: u16 = 0x0145;
pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
pub const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;
pub const EXIF_IFD_POINTER: u16 = 0x8769;
pub const GPS_INFO_IFD_POINTER: u16 = 0x8825;

// Exif IFD.
pub const EXPOSURE_TIME: u16 = 0x829A;
pub const F_NUMBER: u16 = 0x829D;
/// Named `PhotographicSensitivity` since EXIF 2.3.
pub const ISO_SPEED_RATINGS: u16 = 0x8827;
pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
pub const BRIGHTNESS_VALUE: u16 = 0x9203;
pub const INTEROP_IFD_POINTER: u16 = 0xA005;
pub const CONTRAST: u16 = 0xA408;
pub const SATURATION: u16 = 0xA409;
pub const SHARPNESS: u16 = 0xA40A;

// GPS IFD.
pub const GPS_LATITUDE_REF: u16 = 0x0001;
pub const GPS_LATITUDE: u16 = 0x0002;
pub const GPS_LONGITUDE_REF: u16 = 0x0003;
pub const GPS_LONGITUDE: u16 = 0x0004;

/// 0th/1st IFD tags describing the layout of the EXIF blob rather than the
/// image. These are regenerated on every encode, so they are never kept as
/// fields.
pub const STRUCTURAL: [u16; 8] = [
  STRIP_OFFSETS,
  STRIP_BYTE_COUNTS,
  TILE_OFFSETS,
  TILE_BYTE_COUNTS,
  JPEG_INTERCHANGE_FORMAT,
  JPEG_INTERCHANGE_FORMAT_LENGTH,
  EXIF_IFD_POINTER,
  GPS_INFO_IFD_POINTER,
];
