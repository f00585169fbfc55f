//! Ordered unique-color extraction.
//!
//! Scans a [`PixelBuffer`] in storage order and collects each distinct RGB
//! triple the first time it appears, stopping once the palette is full.
//! Alpha never participates in uniqueness.

extern crate alloc;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::buffer::PixelBuffer;
use crate::error::PixelateError;
use crate::palette::{MAX_COLORS, Palette};

/// Receives the non-fatal notice that extraction hit its color limit.
///
/// Called at most once per extraction, after the palette is full and a new
/// color would not fit.
pub trait CapacityObserver {
    fn capacity_reached(&self, limit: usize);
}

/// Default observer: reports truncation as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CapacityObserver for TracingObserver {
    fn capacity_reached(&self, limit: usize) {
        tracing::warn!(limit, "palette is full, remaining pixels were not scanned");
    }
}

impl<T: CapacityObserver + ?Sized> CapacityObserver for &T {
    fn capacity_reached(&self, limit: usize) {
        (**self).capacity_reached(limit);
    }
}

/// Collects the distinct colors of a buffer in first-seen order.
#[derive(Debug, Clone)]
pub struct PaletteExtractor<O = TracingObserver> {
    max_colors: usize,
    observer: O,
}

impl Default for PaletteExtractor {
    fn default() -> Self {
        Self {
            max_colors: MAX_COLORS,
            observer: TracingObserver,
        }
    }
}

impl PaletteExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: CapacityObserver> PaletteExtractor<O> {
    /// Lower the color limit. Must be within `1..=256`.
    pub fn max_colors(mut self, n: usize) -> Result<Self, PixelateError> {
        if n == 0 || n > MAX_COLORS {
            return Err(PixelateError::InvalidMaxColors(n));
        }
        self.max_colors = n;
        Ok(self)
    }

    /// Route the capacity notice somewhere other than `tracing`.
    pub fn observer<P: CapacityObserver>(self, observer: P) -> PaletteExtractor<P> {
        PaletteExtractor {
            max_colors: self.max_colors,
            observer,
        }
    }

    pub fn limit(&self) -> usize {
        self.max_colors
    }

    /// Extract the ordered unique colors of `buffer`.
    pub fn extract(&self, buffer: &PixelBuffer) -> Palette {
        // Zero-area buffers carry no data.
        if buffer.width() == 0 || buffer.height() == 0 {
            return Palette::default();
        }

        let mut seen: BTreeSet<u32> = BTreeSet::new();
        let mut colors: Vec<RGB8> = Vec::with_capacity(self.max_colors.min(64));

        for px in buffer.data().chunks_exact(4) {
            let color = RGB8::new(px[0], px[1], px[2]);
            let key = pack_key(color);

            if seen.contains(&key) {
                continue;
            }

            if colors.len() >= self.max_colors {
                self.observer.capacity_reached(self.max_colors);
                break;
            }

            seen.insert(key);
            colors.push(color);
        }

        Palette::from_unique(colors)
    }
}

/// Extract with the default 256-color limit and `tracing` diagnostics.
pub fn extract_palette(buffer: &PixelBuffer) -> Palette {
    PaletteExtractor::new().extract(buffer)
}

/// Pack an RGB triple into `0x00RRGGBB`.
#[inline]
fn pack_key(c: RGB8) -> u32 {
    (c.r as u32) << 16 | (c.g as u32) << 8 | c.b as u32
}
