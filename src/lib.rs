//! Pixelation and palette tools for RGBA8 buffers.
//!
//! - [`extract_palette`] / [`PaletteExtractor`]: ordered unique colors of an
//!   image, capped at 256.
//! - [`pixelate`]: block-average downsampling with an optional palette snap.
//! - [`apply_palette`] / [`remap_indices`]: nearest-color quantization by
//!   Euclidean RGB distance.
//!
//! Every operation reads its input without mutating it. None of them fail:
//! boundary cases (block size ≤ 1, empty palette, zero-area image) fall back
//! to a defined result. Only the constructors that validate caller data
//! return [`PixelateError`].

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod extract;
pub mod palette;
pub mod pixelate;
pub mod remap;

pub use buffer::PixelBuffer;
pub use error::PixelateError;
pub use extract::{CapacityObserver, PaletteExtractor, TracingObserver, extract_palette};
#[cfg(feature = "std")]
pub use palette::distance;
pub use palette::{MAX_COLORS, Palette, distance_sq};
pub use pixelate::pixelate;
pub use remap::{apply_palette, remap_indices};
pub use rgb::{RGB8, RGBA8};
