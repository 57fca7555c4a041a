use alloc::string::String;

/// Errors from BMP decoding, encoding, and image construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[cfg(feature = "std")]
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("palette size mismatch: expected {expected} entries, got {actual}")]
    PaletteSizeMismatch { expected: usize, actual: usize },

    #[error("unsupported bit depth: {0} (supported: 1, 4, 8, 24)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("palette index {index} out of range for {len} entries")]
    PaletteIndexOutOfRange { index: u32, len: usize },

    #[error("pixel ({x}, {y}) is outside the image")]
    PixelOutOfBounds { x: usize, y: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },
}
