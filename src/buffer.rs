extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use rgb::RGBA8;

use crate::error::PixelateError;

/// Bytes per pixel: red, green, blue, alpha.
pub const CHANNELS: usize = 4;

/// A row-major RGBA8 raster.
///
/// Channel `c` of pixel `(x, y)` lives at `(y * width + x) * 4 + c`.
/// `data.len() == width * height * 4` holds for every buffer built through
/// the checked constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, checking the length against the dimensions.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, PixelateError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PixelateError::DimensionMismatch {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A zero-filled (transparent black) buffer.
    pub fn blank(width: usize, height: usize) -> Result<Self, PixelateError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Build a buffer from packed RGBA pixels.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: &[RGBA8],
    ) -> Result<Self, PixelateError> {
        let data: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
        Self::new(width, height, data)
    }

    /// Internal constructor for outputs whose size is already known to be valid.
    pub(crate) fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * CHANNELS],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes in storage order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: usize, y: usize) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * CHANNELS;
        let c = self.data.get(i..i + CHANNELS)?;
        Some(RGBA8::new(c[0], c[1], c[2], c[3]))
    }

    /// Iterate pixels in storage order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = RGBA8> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| RGBA8::new(c[0], c[1], c[2], c[3]))
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, PixelateError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(PixelateError::DimensionOverflow { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(PixelateError::DimensionMismatch {
                len: 15,
                width: 2,
                height: 2
            })
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            PixelBuffer::blank(usize::MAX, 2),
            Err(PixelateError::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn pixel_indexing_is_row_major() {
        let pixels: Vec<RGBA8> = (0..6u8).map(|i| RGBA8::new(i, i * 2, i * 3, 255)).collect();
        let buf = PixelBuffer::from_pixels(3, 2, &pixels).unwrap();
        // (x=1, y=1) → index 4
        assert_eq!(buf.pixel(1, 1), Some(RGBA8::new(4, 8, 12, 255)));
        assert_eq!(buf.pixel(3, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
        // (x=2, y=1) → byte offset (1 * 3 + 2) * 4
        assert_eq!(buf.data()[20], 5);
    }

    #[test]
    fn pixels_round_trip_storage_order() {
        let pixels = vec![RGBA8::new(1, 2, 3, 4), RGBA8::new(5, 6, 7, 8)];
        let buf = PixelBuffer::from_pixels(2, 1, &pixels).unwrap();
        assert_eq!(buf.pixels().collect::<Vec<_>>(), pixels);
        assert_eq!(buf.into_data(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn zero_area_is_empty() {
        let buf = PixelBuffer::blank(0, 7).unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.pixels().len(), 0);
    }
}
