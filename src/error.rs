use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PixelateError {
    #[error("pixel buffer length {len} does not match dimensions {width}x{height} (RGBA)")]
    DimensionMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    #[error("dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: usize, height: usize },

    #[error("palette holds at most 256 colors, got {0}")]
    TooManyColors(usize),

    #[error("max_colors must be between 1 and 256, got {0}")]
    InvalidMaxColors(usize),
}
