//! Mirror and quarter-turn transforms on a [`PixelMatrix`].
//!
//! These only permute pixels; the owning image recomputes its header
//! afterwards.

use alloc::vec::Vec;

use crate::matrix::PixelMatrix;

/// Which order a mirror reverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MirrorAxis {
    /// Reverse the order of rows (top/bottom flip).
    RowReverse,
    /// Reverse each row's columns (left/right flip).
    ColumnReverse,
}

/// Quarter-turn direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Mirror `matrix` in place. Dimensions are unchanged.
pub fn mirror(matrix: &mut PixelMatrix, axis: MirrorAxis) {
    let (width, height) = (matrix.width(), matrix.height());
    match axis {
        MirrorAxis::RowReverse => {
            let pixels = matrix.as_mut_slice();
            for y in 0..height / 2 {
                let (upper, lower) = pixels.split_at_mut((height - 1 - y) * width);
                upper[y * width..(y + 1) * width].swap_with_slice(&mut lower[..width]);
            }
        }
        MirrorAxis::ColumnReverse => {
            for y in 0..height {
                matrix.row_mut(y).reverse();
            }
        }
    }
}

/// Rotate a `height x width` matrix into a `width x height` one.
///
/// Defined as a row reversal into `m` followed by, with the rotated
/// dimensions `H' = width` and `W' = height`:
///
/// - clockwise: `out[i][j] = m[W'-1-j][H'-1-i]`
/// - counterclockwise: `out[i][j] = m[j][i]`
///
/// Row 0 is the bottom scanline of a stored BMP, so "clockwise" is clockwise
/// as the picture is displayed. Two turns in the same direction give 180°.
pub fn rotate(matrix: &PixelMatrix, direction: RotateDirection) -> PixelMatrix {
    let (width, height) = (matrix.width(), matrix.height());
    let src = matrix.as_slice();
    let mut out = Vec::with_capacity(src.len());

    // Both formulas with the row reversal folded in:
    // clockwise out[i][j] = in[j][width-1-i],
    // counterclockwise out[i][j] = in[height-1-j][i].
    for i in 0..width {
        match direction {
            RotateDirection::Clockwise => {
                let col = width - 1 - i;
                out.extend((0..height).map(|j| src[j * width + col]));
            }
            RotateDirection::CounterClockwise => {
                out.extend((0..height).map(|j| src[(height - 1 - j) * width + i]));
            }
        }
    }

    PixelMatrix::from_raw(out, height, width)
}
