//! BMP container pieces: header codec, palette tables, and row packing.
//!
//! Most callers only need [`crate::BitmapImage`]; these are exposed for
//! tools that work on headers or rows directly.

pub(crate) mod decode;
pub(crate) mod encode;
pub mod header;
pub mod packing;
pub mod palette;

pub use header::{DEFAULT_RESOLUTION_PPM, HEADER_LEN, Header, INFO_HEADER_LEN, SIGNATURE};
pub use packing::{pack_row, row_stride, unpack_row};
pub use palette::{ColorTheme, PaletteTable};
