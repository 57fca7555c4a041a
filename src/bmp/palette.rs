//! Palette tables for indexed (1/4/8-bit) images.

use alloc::vec::Vec;

use super::header::PALETTE_ENTRY_LEN;
use crate::error::BitmapError;
use crate::pixel::BitDepth;

/// Built-in 16-color palettes for 4-bit images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorTheme {
    /// Light-blue through green and yellow to deep red.
    #[default]
    Day,
    /// The classic 16-color VGA palette.
    Night,
    /// Even gray ramp from black to white.
    Grayscale,
}

static DAY_COLORS: [u32; 16] = [
    0xEBFFFF, 0xCCFFFF, 0x66FFFF, 0x00CCFF, 0x0099FF, 0x3366FF, 0x33FF00, 0x33CC00, //
    0x199900, 0xFFFF00, 0xFFCC00, 0xFF9900, 0xFF5066, 0xFF0000, 0xB70014, 0x8E0011,
];

static NIGHT_COLORS: [u32; 16] = [
    0x000000, 0x800000, 0x008000, 0x808000, 0x000080, 0x800080, 0x008080, 0xC0C0C0, //
    0x808080, 0xFF0000, 0x00FF00, 0xFFFF00, 0x0000FF, 0xFF00FF, 0x00FFFF, 0xFFFFFF,
];

static GRAYSCALE_COLORS: [u32; 16] = gray_ramp();

const fn gray_ramp() -> [u32; 16] {
    let mut table = [0u32; 16];
    let mut i = 0;
    while i < 16 {
        table[i] = 0x111111 * i as u32;
        i += 1;
    }
    table
}

impl ColorTheme {
    /// The theme's 16 `0xRRGGBB` entries.
    pub fn colors(self) -> &'static [u32; 16] {
        match self {
            Self::Day => &DAY_COLORS,
            Self::Night => &NIGHT_COLORS,
            Self::Grayscale => &GRAYSCALE_COLORS,
        }
    }
}

/// Ordered `0xRRGGBB` entries validated against a bit depth.
///
/// Indexed depths always carry exactly `2^bpp` entries. The table is
/// immutable; build a new one to change colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteTable {
    depth: BitDepth,
    entries: Vec<u32>,
}

impl PaletteTable {
    /// Validate `entries` for `depth`.
    ///
    /// Indexed depths need exactly `2^bpp` entries; 24-bit needs none.
    pub fn validate(entries: Vec<u32>, depth: BitDepth) -> Result<Self, BitmapError> {
        let expected = depth.palette_len();
        if entries.len() != expected {
            return Err(BitmapError::PaletteSizeMismatch {
                expected,
                actual: entries.len(),
            });
        }
        Ok(Self { depth, entries })
    }

    /// A 4-bit table holding one of the built-in themes.
    pub fn from_theme(theme: ColorTheme) -> Self {
        Self {
            depth: BitDepth::Bit4,
            entries: theme.colors().to_vec(),
        }
    }

    /// Color at `index`.
    pub fn lookup(&self, index: u32) -> Result<u32, BitmapError> {
        self.entries
            .get(index as usize)
            .copied()
            .ok_or(BitmapError::PaletteIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Color at `index` split into channels.
    #[cfg(feature = "rgb")]
    pub fn lookup_rgb(&self, index: u32) -> Result<rgb::RGB8, BitmapError> {
        self.lookup(index).map(crate::pixel::unpack_rgb)
    }

    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    /// Depth this table was validated for.
    pub fn depth(&self) -> BitDepth {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new table with every entry replaced by the average of its channels.
    pub fn to_grayscale(&self) -> Self {
        Self {
            depth: self.depth,
            entries: self.entries.iter().map(|&c| gray_of(c)).collect(),
        }
    }

    /// Parse `depth.palette_len()` on-disk entries (B, G, R, reserved).
    pub(crate) fn read(bytes: &[u8], depth: BitDepth) -> Result<Self, BitmapError> {
        let needed = depth.palette_len() * PALETTE_ENTRY_LEN;
        let bytes = bytes.get(..needed).ok_or(BitmapError::UnexpectedEof)?;
        let entries = bytes
            .chunks_exact(PALETTE_ENTRY_LEN)
            .map(|e| u32::from_le_bytes([e[0], e[1], e[2], e[3]]))
            .collect();
        Self::validate(entries, depth)
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        for entry in &self.entries {
            out.extend_from_slice(&entry.to_le_bytes());
        }
    }
}

/// Gray `0xRRGGBB` with each channel set to the mean of the input channels.
pub(crate) fn gray_of(color: u32) -> u32 {
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    let v = (r + g + b) / 3;
    (v << 16) | (v << 8) | v
}
