//! This crate provides routines for encoding and decoding the FLH
//! animation files used by Lego Rock Raiders.
//!
//! FLH is a 16 bits-per-pixel dialect of the Autodesk FLIC family.
//! A file is a 128-byte header followed by frames; the first frame is
//! compressed with byte run length encoding (DTA_BRUN), and every
//! later frame stores the differences to its predecessor (DTA_LC).

pub use crate::errcode::{FlhError, FlhResult};
pub use crate::flh::{FlhFile, FlhFileWriter};

pub mod bitmap;
mod codec;
pub mod errcode;
pub mod flh;
mod raster;

/// Number of bytes per pixel.  FLH animations are always 16 bits
/// deep; pixels are opaque little-endian 5-5-5 RGB words.
pub const BYTES_PER_PIXEL: usize = 2;

/// Immutable frame buffer of 16-bit pixels, `w * h * 2` bytes,
/// top row first.
pub struct Raster<'a> {
    w: usize,
    h: usize,
    buf: &'a [u8],
}

/// Mutable frame buffer of 16-bit pixels, `w * h * 2` bytes,
/// top row first.
pub struct RasterMut<'a> {
    w: usize,
    h: usize,
    buf: &'a mut [u8],
}
