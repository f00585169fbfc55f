extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::error::PixelateError;

/// Palette capacity: one byte of index space.
pub const MAX_COLORS: usize = 256;

/// An ordered list of RGB colors, at most [`MAX_COLORS`] long.
///
/// Palettes produced by extraction hold no duplicate colors. Palettes built
/// by the caller through [`Palette::new`] may repeat entries; matching then
/// resolves to the earliest one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: Vec<RGB8>,
}

impl Palette {
    /// Build a palette from caller-chosen colors, kept in the given order.
    pub fn new(entries: Vec<RGB8>) -> Result<Self, PixelateError> {
        if entries.len() > MAX_COLORS {
            return Err(PixelateError::TooManyColors(entries.len()));
        }
        Ok(Self { entries })
    }

    /// Entries are known to be unique and within capacity.
    pub(crate) fn from_unique(entries: Vec<RGB8>) -> Self {
        debug_assert!(entries.len() <= MAX_COLORS);
        Self { entries }
    }

    pub fn entries(&self) -> &[RGB8] {
        &self.entries
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RGB8> {
        self.entries.iter()
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, color: RGB8) -> bool {
        self.entries.contains(&color)
    }

    /// Index of the entry closest to `color` by Euclidean RGB distance.
    ///
    /// Ties resolve to the lowest index. Panics if the palette is empty.
    pub fn nearest(&self, color: RGB8) -> u8 {
        assert!(!self.entries.is_empty(), "nearest() on an empty palette");

        let mut best_idx = 0;
        let mut best_dist = distance_sq(color, self.entries[0]);

        for (i, &entry) in self.entries.iter().enumerate().skip(1) {
            let d = distance_sq(color, entry);
            if d < best_dist {
                best_dist = d;
                best_idx = i;
            }
        }

        best_idx as u8
    }

    /// The entry closest to `color`. Panics if the palette is empty.
    pub fn nearest_color(&self, color: RGB8) -> RGB8 {
        self.entries[self.nearest(color) as usize]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a RGB8;
    type IntoIter = core::slice::Iter<'a, RGB8>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Squared Euclidean distance in raw RGB channel space.
/// Orders candidates identically to [`distance`] without the square root.
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    dr * dr + dg * dg + db * db
}

/// Euclidean distance in raw RGB channel space.
#[cfg(feature = "std")]
pub fn distance(a: RGB8, b: RGB8) -> f32 {
    (distance_sq(a, b) as f32).sqrt()
}
