use alloc::vec::Vec;
use core::fmt;

use crate::bmp::decode::check_header;
use crate::bmp::header::{HEADER_LEN, Header, PALETTE_ENTRY_LEN};
use crate::bmp::palette::PaletteTable;
use crate::error::BitmapError;

/// Header fields and palette of a BMP image.
///
/// Returned by [`crate::BitmapImage::describe`]; [`ImageInfo::from_bytes`]
/// builds one without decoding pixels. The `Display` impl prints a field
/// table with the palette as 6-digit hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Magic bytes, `0x4D42` ("BM").
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset_size: u32,
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_ppm: u32,
    pub y_ppm: u32,
    pub num_colors: u32,
    pub important_colors: u32,
    /// Palette entries for indexed images.
    pub palette: Option<Vec<u32>>,
}

impl ImageInfo {
    pub(crate) fn new(header: &Header, palette: Option<&PaletteTable>) -> Self {
        Self {
            signature: header.signature,
            file_size: header.size,
            reserved1: header.reserved1,
            reserved2: header.reserved2,
            offset_size: header.offset_size,
            header_size: header.header_size,
            width: header.width,
            height: header.height,
            planes: header.planes,
            bits_per_pixel: header.bpp,
            compression: header.compression,
            image_size: header.image_size,
            x_ppm: header.x_ppm,
            y_ppm: header.y_ppm,
            num_colors: header.num_colors,
            important_colors: header.important_colors,
            palette: palette.map(|table| table.entries().to_vec()),
        }
    }

    /// Probe header and palette without decoding pixel rows.
    ///
    /// Header fields are reported as stored in the file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let header = Header::decode(data)?;
        let depth = check_header(&header)?;
        let palette = if depth.is_indexed() {
            let start = HEADER_LEN;
            let end = start + depth.palette_len() * PALETTE_ENTRY_LEN;
            let bytes = data.get(start..end).ok_or(BitmapError::UnexpectedEof)?;
            Some(PaletteTable::read(bytes, depth)?)
        } else {
            None
        };
        Ok(Self::new(&header, palette.as_ref()))
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "signature             : {:#06x}", self.signature)?;
        writeln!(f, "file size             : {} [byte]", self.file_size)?;
        writeln!(f, "offset size           : {} [byte]", self.offset_size)?;
        writeln!(f, "header size           : {} [byte]", self.header_size)?;
        writeln!(f, "width                 : {} [pixel]", self.width)?;
        writeln!(f, "height                : {} [pixel]", self.height)?;
        writeln!(f, "planes                : {}", self.planes)?;
        writeln!(f, "bits per pixel        : {} [bit]", self.bits_per_pixel)?;
        writeln!(f, "compression           : {}", self.compression)?;
        writeln!(f, "image size            : {} [byte]", self.image_size)?;
        writeln!(f, "horizontal resolution : {} [pixel/m]", self.x_ppm)?;
        writeln!(f, "vertical resolution   : {} [pixel/m]", self.y_ppm)?;
        writeln!(f, "number of colors      : {}", self.num_colors)?;
        write!(f, "important color index : {}", self.important_colors)?;
        if let Some(palette) = &self.palette {
            write!(f, "\ncolor palette         :")?;
            for color in palette {
                write!(f, " {color:06x}")?;
            }
        }
        Ok(())
    }
}
