use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;

/// Rectangular grid of pixel values, stored row-major.
///
/// Values are palette indices for indexed images and packed `0xRRGGBB` for
/// 24-bit images. Row 0 is the first row stored in the file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelMatrix {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
}

impl PixelMatrix {
    /// Zero-filled matrix. A zero dimension requires the other to be zero.
    pub fn new(width: usize, height: usize) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            pixels: vec![0; len],
            width,
            height,
        })
    }

    /// Build from nested rows. Fails on an empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, BitmapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(BitmapError::InvalidArgument(
                "pixel matrix must have at least one row and one column".into(),
            ));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(BitmapError::InvalidArgument(format!(
                "row {y} has {} pixels, expected {width}",
                row.len()
            )));
        }
        let pixels = rows.into_iter().flatten().collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Wrap a flat row-major buffer of exactly `width * height` values.
    pub fn from_vec(pixels: Vec<u32>, width: usize, height: usize) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(BitmapError::InvalidArgument(format!(
                "{} pixels do not form a {width}x{height} matrix",
                pixels.len()
            )));
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Caller guarantees `pixels.len() == width * height`.
    pub(crate) fn from_raw(pixels: Vec<u32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Row `y`. Panics if out of range.
    pub fn row(&self, y: usize) -> &[u32] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u32] {
        &mut self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Iterate rows top to bottom in storage order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        (0..self.height).map(move |y| self.row(y))
    }

    /// Flat row-major values.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.pixels
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Borrowed 2D view.
    ///
    /// No allocation or copy; the `ImgRef` borrows this matrix's buffer.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, u32> {
        imgref::ImgRef::new(self.pixels.as_slice(), self.width, self.height)
    }

    /// Convert to an owned [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn into_imgvec(self) -> imgref::ImgVec<u32> {
        imgref::ImgVec::new(self.pixels, self.width, self.height)
    }
}

/// Either both dimensions are zero or neither is.
fn checked_len(width: usize, height: usize) -> Result<usize, BitmapError> {
    if (width == 0) != (height == 0) {
        return Err(BitmapError::InvalidArgument(format!(
            "degenerate {width}x{height} matrix"
        )));
    }
    width
        .checked_mul(height)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: u32::try_from(width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_flattens_row_major() {
        let m = PixelMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert_eq!(m.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(m.row(1), &[4, 5, 6]);
        assert_eq!(m.get(2, 0), Some(3));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.to_rows(), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = PixelMatrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidArgument(_)));
    }

    #[test]
    fn from_rows_rejects_empty() {
        assert!(matches!(
            PixelMatrix::from_rows(Vec::new()),
            Err(BitmapError::InvalidArgument(_))
        ));
        assert!(matches!(
            PixelMatrix::from_rows(vec![Vec::new(), Vec::new()]),
            Err(BitmapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(PixelMatrix::from_vec(vec![0; 6], 3, 2).is_ok());
        assert!(matches!(
            PixelMatrix::from_vec(vec![0; 5], 3, 2),
            Err(BitmapError::InvalidArgument(_))
        ));
        assert!(matches!(
            PixelMatrix::from_vec(Vec::new(), 0, 4),
            Err(BitmapError::InvalidArgument(_))
        ));
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_views_share_layout() {
        let m = PixelMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let view = m.as_imgref();
        assert_eq!((view.width(), view.height()), (3, 2));
        assert_eq!(view.rows().nth(1).unwrap(), &[4, 5, 6]);
        let owned = m.into_imgvec();
        assert_eq!(owned.buf().as_slice(), &[1, 2, 3, 4, 5, 6]);
    }
}
