//! Conversion between logical pixel rows and padded on-disk rows.
//!
//! Sub-byte depths pack the leftmost pixel into the highest bits of each
//! byte. 24-bit pixels are stored as blue, green, red. Every row is padded
//! with zeros to a multiple of 4 bytes; padding is never read back.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// Bytes per stored row for `width` pixels at `depth`.
pub fn row_stride(width: usize, depth: BitDepth) -> Result<usize, BitmapError> {
    depth.row_stride(width).ok_or_else(|| too_large(width))
}

/// Pack one row of pixel values into a zero-padded `row_stride` buffer.
///
/// Indexed values are masked to `bpp` bits; 24-bit values keep their low
/// 24 bits.
pub fn pack_row(row: &[u32], depth: BitDepth) -> Result<Vec<u8>, BitmapError> {
    let mut out = vec![0u8; row_stride(row.len(), depth)?];
    pack_row_into(row, depth, &mut out);
    Ok(out)
}

/// Unpack `width` pixel values from a stored row.
///
/// `bytes` may be longer than needed (padding); it must hold at least
/// `ceil(width * bpp / 8)` bytes.
pub fn unpack_row(bytes: &[u8], depth: BitDepth, width: usize) -> Result<Vec<u32>, BitmapError> {
    let needed = depth.packed_len(width).ok_or_else(|| too_large(width))?;
    if bytes.len() < needed {
        return Err(BitmapError::BufferTooSmall {
            needed,
            actual: bytes.len(),
        });
    }
    let mut out = vec![0u32; width];
    unpack_row_into(bytes, depth, &mut out);
    Ok(out)
}

/// Pack `row` into `out`, which must be zeroed and hold the packed bytes.
pub(crate) fn pack_row_into(row: &[u32], depth: BitDepth, out: &mut [u8]) {
    match depth {
        BitDepth::Bit24 => {
            for (bgr, &value) in out.chunks_exact_mut(3).zip(row) {
                bgr[0] = value as u8;
                bgr[1] = (value >> 8) as u8;
                bgr[2] = (value >> 16) as u8;
            }
        }
        BitDepth::Bit8 => {
            for (byte, &value) in out.iter_mut().zip(row) {
                *byte = value as u8;
            }
        }
        BitDepth::Bit1 | BitDepth::Bit4 => {
            let bpp = usize::from(depth.bits());
            let per_byte = 8 / bpp;
            let mask = depth.max_value();
            for (byte, pixels) in out.iter_mut().zip(row.chunks(per_byte)) {
                for (pos, &value) in pixels.iter().enumerate() {
                    let shift = bpp * (per_byte - pos - 1);
                    *byte |= ((value & mask) << shift) as u8;
                }
            }
        }
    }
}

/// Inverse of [`pack_row_into`]; fills all of `out`.
pub(crate) fn unpack_row_into(bytes: &[u8], depth: BitDepth, out: &mut [u32]) {
    match depth {
        BitDepth::Bit24 => {
            for (value, bgr) in out.iter_mut().zip(bytes.chunks_exact(3)) {
                *value = u32::from(bgr[0]) | (u32::from(bgr[1]) << 8) | (u32::from(bgr[2]) << 16);
            }
        }
        BitDepth::Bit8 => {
            for (value, &byte) in out.iter_mut().zip(bytes) {
                *value = u32::from(byte);
            }
        }
        BitDepth::Bit1 | BitDepth::Bit4 => {
            let bpp = usize::from(depth.bits());
            let per_byte = 8 / bpp;
            let mask = depth.max_value();
            for (pixels, &byte) in out.chunks_mut(per_byte).zip(bytes) {
                for (pos, value) in pixels.iter_mut().enumerate() {
                    let shift = bpp * (per_byte - pos - 1);
                    *value = (u32::from(byte) >> shift) & mask;
                }
            }
        }
    }
}

fn too_large(width: usize) -> BitmapError {
    BitmapError::DimensionsTooLarge {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_5_at_4bpp_pads_to_4_bytes() {
        assert_eq!(row_stride(5, BitDepth::Bit4).unwrap(), 4);
        let packed = pack_row(&[1, 2, 3, 4, 5], BitDepth::Bit4).unwrap();
        assert_eq!(packed, [0x12, 0x34, 0x50, 0x00]);
        // low nibble of byte 2 is the unused fifth slot
        assert_eq!(packed[2] & 0x0F, 0);
    }

    #[test]
    fn one_bit_is_msb_first() {
        let row = [1, 0, 1, 1, 0, 0, 0, 1, 1];
        let packed = pack_row(&row, BitDepth::Bit1).unwrap();
        assert_eq!(packed, [0b1011_0001, 0b1000_0000, 0, 0]);
        assert_eq!(unpack_row(&packed, BitDepth::Bit1, row.len()).unwrap(), row);
    }

    #[test]
    fn eight_bit_is_one_byte_per_pixel() {
        let row = [0, 127, 255, 3, 9];
        let packed = pack_row(&row, BitDepth::Bit8).unwrap();
        assert_eq!(packed, [0, 127, 255, 3, 9, 0, 0, 0]);
        assert_eq!(unpack_row(&packed, BitDepth::Bit8, 5).unwrap(), row);
    }

    #[test]
    fn twenty_four_bit_is_bgr() {
        let packed = pack_row(&[0x112233, 0xAABBCC], BitDepth::Bit24).unwrap();
        assert_eq!(packed, [0x33, 0x22, 0x11, 0xCC, 0xBB, 0xAA, 0, 0]);
        assert_eq!(
            unpack_row(&packed, BitDepth::Bit24, 2).unwrap(),
            [0x112233, 0xAABBCC]
        );
    }

    #[test]
    fn out_of_range_indices_are_masked() {
        let packed = pack_row(&[0x1F, 0x02], BitDepth::Bit4).unwrap();
        assert_eq!(packed[0], 0xF2);
    }

    #[test]
    fn unpack_ignores_padding_bytes() {
        let bytes = [0xAB, 0xCD, 0xFF, 0xFF];
        assert_eq!(
            unpack_row(&bytes, BitDepth::Bit4, 3).unwrap(),
            [0xA, 0xB, 0xC]
        );
    }

    #[test]
    fn unpack_rejects_short_input() {
        assert!(matches!(
            unpack_row(&[0u8; 5], BitDepth::Bit24, 2),
            Err(BitmapError::BufferTooSmall {
                needed: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn empty_row_packs_to_nothing() {
        assert!(pack_row(&[], BitDepth::Bit4).unwrap().is_empty());
        assert!(unpack_row(&[], BitDepth::Bit1, 0).unwrap().is_empty());
    }

    #[test]
    fn strides_match_formula() {
        for width in 0..70usize {
            for depth in [BitDepth::Bit1, BitDepth::Bit4, BitDepth::Bit8, BitDepth::Bit24] {
                let bits = width * usize::from(depth.bits());
                let expected = bits.div_ceil(32) * 4;
                assert_eq!(row_stride(width, depth).unwrap(), expected);
            }
        }
    }
}
