// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Primitive types for stamping: coordinates and their DMS form, the
//! parameter set, and the EXIF record with its tag numbers.

mod conv;
mod params;
mod record;
pub mod tags;

pub use conv::*;
pub use params::*;
pub use record::*;
