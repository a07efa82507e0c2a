//! Decoded images and the codec contract
//!
//! Icons arrive compressed, are decoded once, and are then shared read-only
//! between the renderer and the cache.

use alloc::vec::Vec;

/// Largest image accepted by codecs, in pixels
pub const MAX_IMAGE_PIXELS: usize = 256 * 256;

/// Errors from image encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Input is not in the expected format
    InvalidFormat,
    /// Format feature not supported by this codec
    Unsupported,
    /// Checksum mismatch in the input
    Corrupted,
    /// Image dimensions out of range
    InvalidDimensions,
    /// Compression failed
    Compression,
}

/// An RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Image {
    /// Wrap RGBA8 pixel data, row-major from the top-left corner
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, CodecError> {
        let pixels = (width as usize)
            .checked_mul(height as usize)
            .ok_or(CodecError::InvalidDimensions)?;
        if width == 0 || height == 0 || pixels > MAX_IMAGE_PIXELS {
            return Err(CodecError::InvalidDimensions);
        }
        if rgba.len() != pixels * 4 {
            return Err(CodecError::InvalidFormat);
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// An image filled with one color
    pub fn filled(width: u32, height: u32, pixel: [u8; 4]) -> Result<Self, CodecError> {
        let count = (width as usize).saturating_mul(height as usize);
        let mut rgba = Vec::with_capacity(count.min(MAX_IMAGE_PIXELS) * 4);
        for _ in 0..count.min(MAX_IMAGE_PIXELS + 1) {
            rgba.extend_from_slice(&pixel);
        }
        Self::from_rgba(width, height, rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 data
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Pixel at (`x`, `y`), `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ])
    }

    /// Iterate rows of RGBA8 data
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rgba.chunks_exact(self.width as usize * 4)
    }
}

/// Image codec
///
/// The platform's image routine, behind a trait so the cache and the sync
/// channel can be tested without real image data.
pub trait ImageCodec {
    /// Decode compressed bytes into an image
    fn decode(&self, bytes: &[u8]) -> Result<Image, CodecError>;

    /// Compress an image for storage
    fn encode(&self, image: &Image) -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_pixel_lookup() {
        let mut rgba = vec![0u8; 2 * 2 * 4];
        rgba[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let img = Image::from_rgba(2, 2, rgba).unwrap();

        assert_eq!(img.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.rows().count(), 2);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            Image::from_rgba(0, 4, Vec::new()),
            Err(CodecError::InvalidDimensions)
        );
        assert_eq!(
            Image::from_rgba(1024, 1024, Vec::new()),
            Err(CodecError::InvalidDimensions)
        );
        assert_eq!(
            Image::from_rgba(2, 2, vec![0; 3]),
            Err(CodecError::InvalidFormat)
        );
    }

    #[test]
    fn test_filled() {
        let img = Image::filled(3, 2, [9, 8, 7, 255]).unwrap();
        assert_eq!(img.as_rgba().len(), 24);
        assert_eq!(img.pixel(2, 1), Some([9, 8, 7, 255]));
    }
}
