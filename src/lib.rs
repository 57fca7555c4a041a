//! # zenbmp
//!
//! Uncompressed Windows BMP reader and writer for palette-indexed and
//! true-color images, with in-memory mirror and quarter-turn rotation.
//!
//! ## Supported Formats
//!
//! - 1, 4, and 8-bit palette-indexed images (2, 16, 256 color tables)
//! - 24-bit direct color
//! - 54-byte header only (14-byte file header + 40-byte info header),
//!   `BI_RGB` compression only
//!
//! Rows are padded to 4 bytes. Pixel rows are kept in the order they are
//! stored in the file: matrix row 0 is the first stored row, which is the
//! bottom scanline of a positive-height BMP.
//!
//! ## Non-Goals
//!
//! - RLE or bitfield compression
//! - 16 or 32-bit images, V4/V5 headers, top-down (negative height) files
//! - Arbitrary-angle rotation, scaling, cropping
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp::{BitDepth, BitmapImage, ColorTheme, ImageInfo, RotateDirection};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {}-bit", info.width, info.height, info.bits_per_pixel);
//!
//! // Decode, rotate, encode
//! let image = BitmapImage::load(data)?.rotate(RotateDirection::Clockwise)?;
//! let encoded = image.to_bytes()?;
//!
//! // Build a 4-bit image from indices and a built-in palette
//! let image = BitmapImage::default().set_data(
//!     vec![vec![0, 1], vec![2, 3]],
//!     ColorTheme::Day,
//!     BitDepth::Bit4,
//! )?;
//! println!("{}", image.describe());
//! # Ok::<(), zenbmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;

mod decode;
mod geometry;
mod image;
mod matrix;

pub use bmp::{ColorTheme, Header, PaletteTable, pack_row, row_stride, unpack_row};
pub use decode::DecodeRequest;
pub use error::BitmapError;
pub use geometry::{MirrorAxis, RotateDirection, mirror, rotate};
pub use image::{BitmapImage, PaletteSource};
pub use info::ImageInfo;
pub use limits::Limits;
pub use matrix::PixelMatrix;
pub use pixel::BitDepth;

#[cfg(feature = "rgb")]
pub use pixel::pack_rgb;

