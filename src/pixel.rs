use crate::error::BitmapError;

/// Bits per pixel of a BMP image.
///
/// Indexed depths (1, 4, 8) store palette indices; [`BitDepth::Bit24`] stores
/// packed `0xRRGGBB` values directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitDepth {
    /// 2-color palette, 8 pixels per byte.
    Bit1,
    /// 16-color palette, 2 pixels per byte.
    Bit4,
    /// 256-color palette, 1 pixel per byte.
    Bit8,
    /// Direct color, 3 bytes per pixel in blue, green, red order.
    Bit24,
}

impl BitDepth {
    /// Bits per pixel as stored in the header.
    pub const fn bits(self) -> u16 {
        match self {
            Self::Bit1 => 1,
            Self::Bit4 => 4,
            Self::Bit8 => 8,
            Self::Bit24 => 24,
        }
    }

    /// Whether pixels are palette indices.
    pub const fn is_indexed(self) -> bool {
        !matches!(self, Self::Bit24)
    }

    /// Number of palette entries required (`2^bpp`), or 0 for direct color.
    pub const fn palette_len(self) -> usize {
        match self {
            Self::Bit24 => 0,
            other => 1usize << other.bits(),
        }
    }

    /// Largest pixel value representable at this depth.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::Bit24 => 0x00FF_FFFF,
            other => (1u32 << other.bits()) - 1,
        }
    }

    /// Bytes per stored row for `width` pixels, rounded up to 4.
    ///
    /// `None` if the computation overflows.
    pub fn row_stride(self, width: usize) -> Option<usize> {
        width
            .checked_mul(usize::from(self.bits()))
            .and_then(|bits| bits.checked_add(31))
            .map(|bits| bits / 32 * 4)
    }

    /// Bytes that actually hold pixel data for `width` pixels (no padding).
    pub(crate) fn packed_len(self, width: usize) -> Option<usize> {
        width
            .checked_mul(usize::from(self.bits()))
            .and_then(|bits| bits.checked_add(7))
            .map(|bits| bits / 8)
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = BitmapError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Self::Bit1),
            4 => Ok(Self::Bit4),
            8 => Ok(Self::Bit8),
            24 => Ok(Self::Bit24),
            other => Err(BitmapError::UnsupportedBitDepth(other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> u16 {
        depth.bits()
    }
}

/// Split a packed `0xRRGGBB` value into channels.
#[cfg(feature = "rgb")]
pub(crate) fn unpack_rgb(color: u32) -> rgb::RGB8 {
    rgb::RGB8::new((color >> 16) as u8, (color >> 8) as u8, color as u8)
}

/// Pack channels into `0xRRGGBB`.
#[cfg(feature = "rgb")]
pub fn pack_rgb(color: rgb::RGB8) -> u32 {
    (u32::from(color.r) << 16) | (u32::from(color.g) << 8) | u32::from(color.b)
}
