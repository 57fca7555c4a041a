use crate::bmp::decode::decode_bitmap;
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::limits::Limits;

/// Decode configuration for one BMP buffer.
///
/// ```
/// use zenbmp::{DecodeRequest, Limits};
///
/// # fn run(data: &[u8]) -> Result<(), zenbmp::BitmapError> {
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before any pixel allocation.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(self) -> Result<BitmapImage, BitmapError> {
        let decoded = decode_bitmap(self.data, self.limits)?;
        Ok(BitmapImage::from_decoded(decoded))
    }
}
