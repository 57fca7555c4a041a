//! BMP encoder: header, optional palette, then padded rows in matrix order.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use super::header::Header;
use super::packing::{pack_row_into, row_stride};
use super::palette::PaletteTable;
use crate::error::BitmapError;
use crate::matrix::PixelMatrix;

/// Encode an image whose header, palette, and pixels are already consistent.
pub(crate) fn encode_bitmap(
    header: &Header,
    palette: Option<&PaletteTable>,
    pixels: &PixelMatrix,
) -> Result<Vec<u8>, BitmapError> {
    if pixels.is_empty() {
        return Err(BitmapError::InvalidArgument(
            "cannot encode an image with no pixels".into(),
        ));
    }
    let depth = header.depth()?;
    let stride = row_stride(pixels.width(), depth)?;

    let mut out = Vec::with_capacity(header.size as usize);
    out.extend_from_slice(&header.encode());

    match (depth.is_indexed(), palette) {
        (true, Some(table)) if table.depth() == depth => table.write(&mut out),
        (false, None) => {}
        (_, table) => {
            return Err(BitmapError::InvalidArgument(format!(
                "{}-bit image cannot be written with a {}-entry palette",
                depth.bits(),
                table.map_or(0, PaletteTable::len)
            )));
        }
    }

    if out.len() != header.offset_size as usize {
        return Err(BitmapError::InvalidHeader(format!(
            "data offset {} does not match {} header and palette bytes",
            header.offset_size,
            out.len()
        )));
    }

    let mut row_buf = vec![0u8; stride];
    for row in pixels.rows() {
        row_buf.fill(0);
        pack_row_into(row, depth, &mut row_buf);
        out.extend_from_slice(&row_buf);
    }

    log::debug!(
        "encoded {}x{} {}-bit BMP ({} bytes)",
        pixels.width(),
        pixels.height(),
        depth.bits(),
        out.len()
    );
    Ok(out)
}
