use alloc::format;

use crate::error::BitmapError;

/// Resource limits applied while decoding.
///
/// All fields default to `None` (no limit). Checks run against the header
/// before the pixel matrix is allocated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded pixel matrix (4 bytes per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject `width` x `height` if any limit is exceeded.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        let exceeded = |what: &str, value: u64, max: u64| {
            Err(BitmapError::LimitExceeded(format!(
                "{what} {value} exceeds limit {max}"
            )))
        };
        if let Some(max) = self.max_width.filter(|&max| width > max) {
            return exceeded("width", width.into(), max.into());
        }
        if let Some(max) = self.max_height.filter(|&max| height > max) {
            return exceeded("height", height.into(), max.into());
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels.filter(|&max| pixels > max) {
            return exceeded("pixel count", pixels, max);
        }
        let bytes = pixels.saturating_mul(core::mem::size_of::<u32>() as u64);
        if let Some(max) = self.max_memory_bytes.filter(|&max| bytes > max) {
            return exceeded("pixel matrix bytes", bytes, max);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_anything() {
        assert!(Limits::default().check(u32::MAX, u32::MAX).is_ok());
    }

    #[test]
    fn each_limit_rejects() {
        let width = Limits {
            max_width: Some(10),
            ..Default::default()
        };
        assert!(width.check(10, 1000).is_ok());
        assert!(matches!(width.check(11, 1), Err(BitmapError::LimitExceeded(_))));

        let height = Limits {
            max_height: Some(10),
            ..Default::default()
        };
        assert!(matches!(height.check(1, 11), Err(BitmapError::LimitExceeded(_))));

        let pixels = Limits {
            max_pixels: Some(100),
            ..Default::default()
        };
        assert!(pixels.check(10, 10).is_ok());
        assert!(matches!(pixels.check(10, 11), Err(BitmapError::LimitExceeded(_))));

        let memory = Limits {
            max_memory_bytes: Some(400),
            ..Default::default()
        };
        assert!(memory.check(10, 10).is_ok());
        assert!(matches!(memory.check(11, 10), Err(BitmapError::LimitExceeded(_))));
    }
}
