use alloc::format;
use alloc::vec::Vec;

use crate::bmp::decode::DecodedBitmap;
use crate::bmp::encode::encode_bitmap;
use crate::bmp::header::Header;
use crate::bmp::palette::{ColorTheme, PaletteTable, gray_of};
use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::geometry::{self, MirrorAxis, RotateDirection};
use crate::info::ImageInfo;
use crate::matrix::PixelMatrix;
use crate::pixel::BitDepth;

/// Palette input for [`BitmapImage::set_data`]: a built-in theme or explicit
/// entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteSource {
    Theme(ColorTheme),
    Entries(Vec<u32>),
}

impl From<ColorTheme> for PaletteSource {
    fn from(theme: ColorTheme) -> Self {
        Self::Theme(theme)
    }
}

impl From<Vec<u32>> for PaletteSource {
    fn from(entries: Vec<u32>) -> Self {
        Self::Entries(entries)
    }
}

/// A BMP image: header, optional palette, and pixel matrix, kept consistent.
///
/// The header is the single source of truth for geometry. Every
/// constructor and transform recomputes width, height, data offset, image
/// size, and file size before returning.
///
/// Transforms consume and return the image so they chain:
///
/// ```
/// use zenbmp::{BitDepth, BitmapImage, ColorTheme, MirrorAxis, RotateDirection};
///
/// let image = BitmapImage::default()
///     .set_data(vec![vec![0, 15, 3], vec![1, 14, 2]], ColorTheme::Night, BitDepth::Bit4)?
///     .rotate(RotateDirection::Clockwise)?
///     .mirror(MirrorAxis::ColumnReverse);
/// assert_eq!((image.width(), image.height()), (2, 3));
/// let bytes = image.to_bytes()?;
/// assert_eq!(BitmapImage::load(&bytes)?, image);
/// # Ok::<(), zenbmp::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitmapImage {
    header: Header,
    palette: Option<PaletteTable>,
    pixels: PixelMatrix,
}

impl BitmapImage {
    /// Decode a complete BMP file held in memory.
    ///
    /// Rows are read in file order: matrix row 0 is the first stored row.
    pub fn load(data: &[u8]) -> Result<Self, BitmapError> {
        DecodeRequest::new(data).decode()
    }

    pub(crate) fn from_decoded(decoded: DecodedBitmap) -> Self {
        Self {
            header: decoded.header,
            palette: decoded.palette,
            pixels: decoded.pixels,
        }
    }

    /// Read everything from `reader` and decode it.
    #[cfg(feature = "std")]
    pub fn load_from_reader<R: std::io::Read>(mut reader: R) -> Result<Self, BitmapError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load(&data)
    }

    /// Open and decode the file at `path`.
    #[cfg(feature = "std")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self, BitmapError> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("read {} bytes from {}", data.len(), path.as_ref().display());
        Self::load(&data)
    }

    /// Encode to BMP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BitmapError> {
        encode_bitmap(&self.header, self.palette.as_ref(), &self.pixels)
    }

    /// Encode and write the whole file to `writer`.
    ///
    /// Encoding finishes before the first byte is written.
    #[cfg(feature = "std")]
    pub fn save<W: std::io::Write>(&self, mut writer: W) -> Result<(), BitmapError> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the image to `path`, replacing any existing file.
    ///
    /// On a failed write the partial file is removed.
    #[cfg(feature = "std")]
    pub fn save_to_path<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), BitmapError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let written = std::fs::File::create(path).and_then(|mut file| {
            std::io::Write::write_all(&mut file, &bytes)?;
            file.sync_all()
        });
        if let Err(err) = written {
            if let Err(cleanup) = std::fs::remove_file(path) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!(
                        "could not remove partial file {}: {}",
                        path.display(),
                        cleanup
                    );
                }
            }
            return Err(err.into());
        }
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    /// Replace the pixel data with a 4-bit image.
    ///
    /// `rows` must be rectangular and non-empty, and every value must be a
    /// valid palette index. A theme resolves to its built-in table. Only
    /// [`BitDepth::Bit4`] is accepted here; use [`BitmapImage::from_indexed`]
    /// or [`BitmapImage::from_rgb`] for other depths. Resolution and reserved
    /// header fields are kept.
    pub fn set_data(
        self,
        rows: Vec<Vec<u32>>,
        palette: impl Into<PaletteSource>,
        depth: BitDepth,
    ) -> Result<Self, BitmapError> {
        if depth != BitDepth::Bit4 {
            return Err(BitmapError::UnsupportedVariant(format!(
                "set_data accepts 4-bit images only, got {}-bit",
                depth.bits()
            )));
        }
        let pixels = PixelMatrix::from_rows(rows)?;
        let table = match palette.into() {
            PaletteSource::Theme(theme) => PaletteTable::from_theme(theme),
            PaletteSource::Entries(entries) => PaletteTable::validate(entries, depth)?,
        };
        Self::assemble(self.header, depth, Some(table), pixels)
    }

    /// Build an indexed image at the palette's depth.
    pub fn from_indexed(pixels: PixelMatrix, palette: PaletteTable) -> Result<Self, BitmapError> {
        let depth = palette.depth();
        if !depth.is_indexed() {
            return Err(BitmapError::InvalidArgument(
                "a 24-bit palette cannot back an indexed image".into(),
            ));
        }
        Self::assemble(Header::default(), depth, Some(palette), pixels)
    }

    /// Build a 24-bit image from packed `0xRRGGBB` values.
    pub fn from_rgb(pixels: PixelMatrix) -> Result<Self, BitmapError> {
        Self::assemble(Header::default(), BitDepth::Bit24, None, pixels)
    }

    fn assemble(
        mut header: Header,
        depth: BitDepth,
        palette: Option<PaletteTable>,
        pixels: PixelMatrix,
    ) -> Result<Self, BitmapError> {
        if pixels.is_empty() {
            return Err(BitmapError::InvalidArgument(
                "pixel matrix must not be empty".into(),
            ));
        }
        if let Some(pos) = pixels.as_slice().iter().position(|&v| v > depth.max_value()) {
            let (x, y) = (pos % pixels.width(), pos / pixels.width());
            return Err(BitmapError::InvalidArgument(format!(
                "pixel ({x}, {y}) value {:#x} exceeds {}-bit range",
                pixels.as_slice()[pos],
                depth.bits()
            )));
        }
        let (width, height) = dimensions(&pixels)?;
        header.set_geometry(width, height, depth)?;
        Ok(Self {
            header,
            palette,
            pixels,
        })
    }

    /// Mirror the pixels. Header geometry is unchanged.
    pub fn mirror(mut self, axis: MirrorAxis) -> Self {
        geometry::mirror(&mut self.pixels, axis);
        log::trace!("mirrored {:?}", axis);
        self
    }

    /// Rotate a quarter turn and swap the header's width and height.
    pub fn rotate(mut self, direction: RotateDirection) -> Result<Self, BitmapError> {
        let depth = self.header.depth()?;
        let rotated = geometry::rotate(&self.pixels, direction);
        let (width, height) = dimensions(&rotated)?;
        self.header.set_geometry(width, height, depth)?;
        self.pixels = rotated;
        log::trace!("rotated {:?} to {}x{}", direction, width, height);
        Ok(self)
    }

    /// Convert to gray by averaging each color's channels.
    ///
    /// 24-bit images change pixel values; indexed images get a new palette
    /// and keep their indices.
    pub fn to_grayscale(mut self) -> Result<Self, BitmapError> {
        match self.palette.take() {
            Some(table) => self.palette = Some(table.to_grayscale()),
            None => {
                let depth = self.header.depth()?;
                if depth.is_indexed() {
                    return Err(BitmapError::InvalidArgument(format!(
                        "{}-bit image has no palette",
                        depth.bits()
                    )));
                }
                for value in self.pixels.as_mut_slice() {
                    *value = gray_of(*value);
                }
            }
        }
        Ok(self)
    }

    /// Header fields and palette.
    pub fn describe(&self) -> ImageInfo {
        ImageInfo::new(&self.header, self.palette.as_ref())
    }

    /// Displayed `0xRRGGBB` color at column `x`, row `y`.
    ///
    /// Indexed values are resolved through the palette.
    pub fn color_at(&self, x: usize, y: usize) -> Result<u32, BitmapError> {
        let value = self
            .pixels
            .get(x, y)
            .ok_or(BitmapError::PixelOutOfBounds { x, y })?;
        match &self.palette {
            Some(table) => table.lookup(value),
            None => Ok(value),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn palette(&self) -> Option<&PaletteTable> {
        self.palette.as_ref()
    }

    pub fn pixels(&self) -> &PixelMatrix {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn depth(&self) -> Result<BitDepth, BitmapError> {
        self.header.depth()
    }

    /// Give up the pixel matrix and palette.
    pub fn into_parts(self) -> (Header, Option<PaletteTable>, PixelMatrix) {
        (self.header, self.palette, self.pixels)
    }
}

fn dimensions(pixels: &PixelMatrix) -> Result<(u32, u32), BitmapError> {
    match (u32::try_from(pixels.width()), u32::try_from(pixels.height())) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(BitmapError::DimensionsTooLarge {
            width: u32::MAX,
            height: u32::MAX,
        }),
    }
}
