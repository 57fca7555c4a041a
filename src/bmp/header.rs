//! Fixed 54-byte BMP header (14-byte file header + 40-byte BITMAPINFOHEADER).
//!
//! Every field is read and written at its own little-endian byte offset, so
//! the layout never depends on native struct packing.

use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// Size of the file header plus info header, in bytes.
pub const HEADER_LEN: usize = 54;

/// Size of the BITMAPINFOHEADER, the only info header variant supported.
pub const INFO_HEADER_LEN: u32 = 40;

/// `"BM"` read as a little-endian `u16`.
pub const SIGNATURE: u16 = 0x4D42;

/// Resolution written into newly built headers (72 DPI).
pub const DEFAULT_RESOLUTION_PPM: u32 = 2835;

/// Bytes per palette entry on disk (blue, green, red, reserved).
pub(crate) const PALETTE_ENTRY_LEN: usize = 4;

mod offset {
    pub const SIGNATURE: usize = 0;
    pub const SIZE: usize = 2;
    pub const RESERVED1: usize = 6;
    pub const RESERVED2: usize = 8;
    pub const OFFSET_SIZE: usize = 10;
    pub const HEADER_SIZE: usize = 14;
    pub const WIDTH: usize = 18;
    pub const HEIGHT: usize = 22;
    pub const PLANES: usize = 26;
    pub const BPP: usize = 28;
    pub const COMPRESSION: usize = 30;
    pub const IMAGE_SIZE: usize = 34;
    pub const X_PPM: usize = 38;
    pub const Y_PPM: usize = 42;
    pub const NUM_COLORS: usize = 46;
    pub const IMPORTANT_COLORS: usize = 50;
}

/// BMP header fields, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes, `0x4D42` ("BM") for valid files.
    pub signature: u16,
    /// Total file size in bytes.
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the first pixel row.
    pub offset_size: u32,
    /// Info header size (40).
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    /// Color planes (1).
    pub planes: u16,
    /// Bits per pixel as stored; see [`BitDepth`].
    pub bpp: u16,
    /// Compression method (0 = uncompressed).
    pub compression: u32,
    /// Pixel data size in bytes, padding included.
    pub image_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub x_ppm: u32,
    /// Vertical resolution in pixels per meter.
    pub y_ppm: u32,
    /// Palette entries in use (0 means `2^bpp`).
    pub num_colors: u32,
    pub important_colors: u32,
}

impl Default for Header {
    /// Header of an empty 24-bit image.
    fn default() -> Self {
        Self {
            signature: SIGNATURE,
            size: HEADER_LEN as u32,
            reserved1: 0,
            reserved2: 0,
            offset_size: HEADER_LEN as u32,
            header_size: INFO_HEADER_LEN,
            width: 0,
            height: 0,
            planes: 1,
            bpp: BitDepth::Bit24.bits(),
            compression: 0,
            image_size: 0,
            x_ppm: DEFAULT_RESOLUTION_PPM,
            y_ppm: DEFAULT_RESOLUTION_PPM,
            num_colors: 0,
            important_colors: 0,
        }
    }
}

impl Header {
    /// Parse the fixed header from the start of `bytes`.
    ///
    /// Only the signature is validated; semantic checks (bit depth,
    /// compression, palette size) belong to the image loader.
    pub fn decode(bytes: &[u8]) -> Result<Self, BitmapError> {
        let bytes: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(BitmapError::UnexpectedEof)?;

        let signature = read_u16(bytes, offset::SIGNATURE);
        if signature != SIGNATURE {
            return Err(BitmapError::UnrecognizedFormat);
        }

        Ok(Self {
            signature,
            size: read_u32(bytes, offset::SIZE),
            reserved1: read_u16(bytes, offset::RESERVED1),
            reserved2: read_u16(bytes, offset::RESERVED2),
            offset_size: read_u32(bytes, offset::OFFSET_SIZE),
            header_size: read_u32(bytes, offset::HEADER_SIZE),
            width: read_u32(bytes, offset::WIDTH),
            height: read_u32(bytes, offset::HEIGHT),
            planes: read_u16(bytes, offset::PLANES),
            bpp: read_u16(bytes, offset::BPP),
            compression: read_u32(bytes, offset::COMPRESSION),
            image_size: read_u32(bytes, offset::IMAGE_SIZE),
            x_ppm: read_u32(bytes, offset::X_PPM),
            y_ppm: read_u32(bytes, offset::Y_PPM),
            num_colors: read_u32(bytes, offset::NUM_COLORS),
            important_colors: read_u32(bytes, offset::IMPORTANT_COLORS),
        })
    }

    /// Serialize every field at its fixed offset. Does not revalidate.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        write_u16(&mut out, offset::SIGNATURE, self.signature);
        write_u32(&mut out, offset::SIZE, self.size);
        write_u16(&mut out, offset::RESERVED1, self.reserved1);
        write_u16(&mut out, offset::RESERVED2, self.reserved2);
        write_u32(&mut out, offset::OFFSET_SIZE, self.offset_size);
        write_u32(&mut out, offset::HEADER_SIZE, self.header_size);
        write_u32(&mut out, offset::WIDTH, self.width);
        write_u32(&mut out, offset::HEIGHT, self.height);
        write_u16(&mut out, offset::PLANES, self.planes);
        write_u16(&mut out, offset::BPP, self.bpp);
        write_u32(&mut out, offset::COMPRESSION, self.compression);
        write_u32(&mut out, offset::IMAGE_SIZE, self.image_size);
        write_u32(&mut out, offset::X_PPM, self.x_ppm);
        write_u32(&mut out, offset::Y_PPM, self.y_ppm);
        write_u32(&mut out, offset::NUM_COLORS, self.num_colors);
        write_u32(&mut out, offset::IMPORTANT_COLORS, self.important_colors);
        out
    }

    /// Bit depth, if the stored `bpp` is supported.
    pub fn depth(&self) -> Result<BitDepth, BitmapError> {
        BitDepth::try_from(self.bpp)
    }

    /// Bytes per stored row.
    pub fn row_stride(&self) -> Result<usize, BitmapError> {
        self.depth()?
            .row_stride(self.width as usize)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Palette entries implied by the bit depth.
    pub fn palette_len(&self) -> Result<usize, BitmapError> {
        Ok(self.depth()?.palette_len())
    }

    /// Recompute every field that depends on width, height, and depth.
    ///
    /// Sets `width`, `height`, `bpp`, `offset_size`, `image_size`, `size`, and
    /// `num_colors`. Resolution and reserved fields are left untouched.
    pub(crate) fn set_geometry(
        &mut self,
        width: u32,
        height: u32,
        depth: BitDepth,
    ) -> Result<(), BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        let stride = depth.row_stride(width as usize).ok_or_else(too_large)?;
        let image_size = stride
            .checked_mul(height as usize)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(too_large)?;
        let offset_size = (HEADER_LEN + depth.palette_len() * PALETTE_ENTRY_LEN) as u32;
        let size = offset_size.checked_add(image_size).ok_or_else(too_large)?;

        self.width = width;
        self.height = height;
        self.bpp = depth.bits();
        self.offset_size = offset_size;
        self.image_size = image_size;
        self.size = size;
        self.num_colors = depth.palette_len() as u32;
        Ok(())
    }
}

fn read_u16(bytes: &[u8; HEADER_LEN], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8; HEADER_LEN], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn write_u16(out: &mut [u8; HEADER_LEN], at: usize, value: u16) {
    out[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

fn write_u32(out: &mut [u8; HEADER_LEN], at: usize, value: u32) {
    out[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        let mut header = Header::default();
        header.set_geometry(5, 3, BitDepth::Bit4).unwrap();
        header.reserved1 = 0x1234;
        header.important_colors = 7;
        header
    }

    #[test]
    fn encode_places_fields_at_fixed_offsets() {
        let bytes = sample().encode();
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(&bytes[6..8], &0x1234u16.to_le_bytes());
        assert_eq!(&bytes[10..14], &118u32.to_le_bytes()); // 54 + 16 * 4
        assert_eq!(&bytes[14..18], &40u32.to_le_bytes());
        assert_eq!(&bytes[18..22], &5u32.to_le_bytes());
        assert_eq!(&bytes[22..26], &3u32.to_le_bytes());
        assert_eq!(&bytes[26..28], &1u16.to_le_bytes());
        assert_eq!(&bytes[28..30], &4u16.to_le_bytes());
        assert_eq!(&bytes[34..38], &12u32.to_le_bytes());
        assert_eq!(&bytes[38..42], &2835u32.to_le_bytes());
        assert_eq!(&bytes[46..50], &16u32.to_le_bytes());
        assert_eq!(&bytes[50..54], &7u32.to_le_bytes());
    }

    #[test]
    fn decode_reads_back_encoded_header() {
        let header = sample();
        assert_eq!(Header::decode(&header.encode()).unwrap(), header);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let mut bytes = sample().encode().to_vec();
        bytes.extend_from_slice(&[0xAA; 10]);
        assert_eq!(Header::decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn decode_rejects_short_buffer() {
        let bytes = sample().encode();
        assert!(matches!(
            Header::decode(&bytes[..53]),
            Err(BitmapError::UnexpectedEof)
        ));
        assert!(matches!(
            Header::decode(&[]),
            Err(BitmapError::UnexpectedEof)
        ));
    }

    #[test]
    fn decode_rejects_bad_signature() {
        let mut bytes = sample().encode();
        bytes[0] = b'P';
        assert!(matches!(
            Header::decode(&bytes),
            Err(BitmapError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn geometry_matches_stride_formula() {
        let mut header = Header::default();
        header.set_geometry(5, 2, BitDepth::Bit4).unwrap();
        assert_eq!(header.row_stride().unwrap(), 4);
        assert_eq!(header.image_size, 8);
        assert_eq!(header.offset_size, 54 + 64);
        assert_eq!(header.size, header.offset_size + header.image_size);

        header.set_geometry(3, 2, BitDepth::Bit24).unwrap();
        assert_eq!(header.row_stride().unwrap(), 12);
        assert_eq!(header.image_size, 24);
        assert_eq!(header.offset_size, 54);
        assert_eq!(header.num_colors, 0);

        header.set_geometry(33, 1, BitDepth::Bit1).unwrap();
        assert_eq!(header.row_stride().unwrap(), 8);
        assert_eq!(header.offset_size, 54 + 8);
    }

    #[test]
    fn geometry_overflow_is_reported() {
        let mut header = Header::default();
        let err = header
            .set_geometry(u32::MAX, u32::MAX, BitDepth::Bit24)
            .unwrap_err();
        assert!(matches!(err, BitmapError::DimensionsTooLarge { .. }));
        assert_eq!(header, Header::default());
    }
}
