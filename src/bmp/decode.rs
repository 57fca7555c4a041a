//! BMP decoder for uncompressed 1/4/8/24-bit images.

use alloc::format;

use super::header::{HEADER_LEN, Header, INFO_HEADER_LEN, PALETTE_ENTRY_LEN};
use super::packing::{row_stride, unpack_row_into};
use super::palette::PaletteTable;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::matrix::PixelMatrix;
use crate::pixel::BitDepth;

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }
}

// ── Decoded parts ───────────────────────────────────────────────────

pub(crate) struct DecodedBitmap {
    pub header: Header,
    pub palette: Option<PaletteTable>,
    pub pixels: PixelMatrix,
}

/// Validate the header fields the pixel decoder relies on.
pub(crate) fn check_header(header: &Header) -> Result<BitDepth, BitmapError> {
    let depth = header.depth()?;
    if header.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(format!(
            "compression method {} (only uncompressed is supported)",
            header.compression
        )));
    }
    if header.header_size != INFO_HEADER_LEN {
        return Err(BitmapError::UnsupportedVariant(format!(
            "info header size {} (only {INFO_HEADER_LEN}-byte BITMAPINFOHEADER is supported)",
            header.header_size
        )));
    }
    if header.planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            header.planes
        )));
    }
    if header.width == 0 || header.height == 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "zero dimension {}x{}",
            header.width, header.height
        )));
    }
    if depth.is_indexed() {
        let expected = depth.palette_len();
        let table_bytes = (header.offset_size as usize).saturating_sub(HEADER_LEN);
        let actual = table_bytes / PALETTE_ENTRY_LEN;
        if header.offset_size as usize != HEADER_LEN + expected * PALETTE_ENTRY_LEN {
            return Err(BitmapError::PaletteSizeMismatch { expected, actual });
        }
        if header.num_colors != 0 && header.num_colors as usize != expected {
            return Err(BitmapError::PaletteSizeMismatch {
                expected,
                actual: header.num_colors as usize,
            });
        }
    } else if (header.offset_size as usize) < HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "data offset {} points inside the header",
            header.offset_size
        )));
    }
    Ok(depth)
}

/// Decode a complete BMP file.
pub(crate) fn decode_bitmap(
    data: &[u8],
    limits: Option<&Limits>,
) -> Result<DecodedBitmap, BitmapError> {
    let mut header = Header::decode(data)?;
    let depth = check_header(&header)?;

    let (width, height) = (header.width, header.height);
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let mut bytes = Cursor::new(data);
    bytes.set_position(HEADER_LEN)?;

    let palette = if depth.is_indexed() {
        let table = bytes.take(depth.palette_len() * PALETTE_ENTRY_LEN)?;
        Some(PaletteTable::read(table, depth)?)
    } else {
        None
    };
    bytes.set_position(header.offset_size as usize)?;

    let (w, h) = (width as usize, height as usize);
    let stride = row_stride(w, depth)?;
    let needed = stride
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if bytes.remaining().len() < needed {
        return Err(BitmapError::UnexpectedEof);
    }

    let mut pixels = PixelMatrix::new(w, h)?;
    for y in 0..h {
        let row = bytes.take(stride)?;
        unpack_row_into(row, depth, pixels.row_mut(y));
    }

    normalize_sizes(&mut header, depth)?;
    log::debug!(
        "decoded {}x{} {}-bit BMP ({} bytes)",
        width,
        height,
        depth.bits(),
        data.len()
    );

    Ok(DecodedBitmap {
        header,
        palette,
        pixels,
    })
}

/// Recompute the size fields if the file disagrees with its geometry.
///
/// A gap between the header and the pixel rows is dropped, so the data
/// offset is recomputed too.
fn normalize_sizes(header: &mut Header, depth: BitDepth) -> Result<(), BitmapError> {
    let mut expected = *header;
    expected.set_geometry(header.width, header.height, depth)?;
    if expected.image_size != header.image_size
        || expected.size != header.size
        || expected.offset_size != header.offset_size
    {
        log::warn!(
            "bmp: header sizes (offset {}, image {}, file {}) disagree with geometry \
             (offset {}, image {}, file {}); recomputed",
            header.offset_size,
            header.image_size,
            header.size,
            expected.offset_size,
            expected.image_size,
            expected.size
        );
        header.offset_size = expected.offset_size;
        header.image_size = expected.image_size;
        header.size = expected.size;
    }
    Ok(())
}
