extern crate alloc;
use alloc::borrow::Cow;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::buffer::{CHANNELS, PixelBuffer};
use crate::palette::Palette;

/// Snap every pixel of `buffer` to its nearest palette color.
///
/// Matching uses Euclidean distance over R, G and B; the source alpha is
/// ignored and every output pixel is written fully opaque. Equidistant
/// entries resolve to the earliest one in palette order. An empty palette
/// returns the input untouched.
pub fn apply_palette<'a>(buffer: &'a PixelBuffer, palette: &Palette) -> Cow<'a, PixelBuffer> {
    if palette.is_empty() {
        return Cow::Borrowed(buffer);
    }
    Cow::Owned(quantize(buffer, palette))
}

/// Palette index chosen for each pixel, in storage order.
///
/// Same matching as [`apply_palette`]. Empty palette → empty result.
pub fn remap_indices(buffer: &PixelBuffer, palette: &Palette) -> Vec<u8> {
    if palette.is_empty() {
        return Vec::new();
    }
    buffer
        .data()
        .chunks_exact(CHANNELS)
        .map(|px| palette.nearest(RGB8::new(px[0], px[1], px[2])))
        .collect()
}

/// Non-empty palette path shared with pixelation.
pub(crate) fn quantize(buffer: &PixelBuffer, palette: &Palette) -> PixelBuffer {
    let mut out = PixelBuffer::zeroed(buffer.width(), buffer.height());
    let entries = palette.entries();

    // Consecutive identical pixels are common after block averaging.
    let mut last: Option<(RGB8, RGB8)> = None;

    for (src, dst) in buffer
        .data()
        .chunks_exact(CHANNELS)
        .zip(out.data_mut().chunks_exact_mut(CHANNELS))
    {
        let color = RGB8::new(src[0], src[1], src[2]);
        let chosen = match last {
            Some((prev, hit)) if prev == color => hit,
            _ => {
                let hit = entries[palette.nearest(color) as usize];
                last = Some((color, hit));
                hit
            }
        };
        dst.copy_from_slice(&[chosen.r, chosen.g, chosen.b, 255]);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rgb::RGBA8;

    fn gray_palette() -> Palette {
        Palette::new(vec![
            RGB8::new(0, 0, 0),
            RGB8::new(85, 85, 85),
            RGB8::new(170, 170, 170),
            RGB8::new(255, 255, 255),
        ])
        .unwrap()
    }

    #[test]
    fn empty_palette_borrows_input() {
        let buf = PixelBuffer::from_pixels(1, 1, &[RGBA8::new(1, 2, 3, 4)]).unwrap();
        let out = apply_palette(&buf, &Palette::default());
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(remap_indices(&buf, &Palette::default()).is_empty());
    }

    #[test]
    fn output_is_opaque_palette_colors() {
        let pixels: Vec<RGBA8> = (0..16u8)
            .map(|i| RGBA8::new(i * 16, 255 - i * 16, i * 7, i))
            .collect();
        let buf = PixelBuffer::from_pixels(4, 4, &pixels).unwrap();
        let palette = gray_palette();
        let out = apply_palette(&buf, &palette);

        assert_eq!((out.width(), out.height()), (4, 4));
        for px in out.pixels() {
            assert_eq!(px.a, 255);
            assert!(palette.contains(px.rgb()));
        }
    }

    #[test]
    fn indices_agree_with_colors() {
        let pixels: Vec<RGBA8> = (0..=255u8).map(|v| RGBA8::new(v, v / 2, 255 - v, 0)).collect();
        let buf = PixelBuffer::from_pixels(16, 16, &pixels).unwrap();
        let palette = gray_palette();
        let out = apply_palette(&buf, &palette);
        let indices = remap_indices(&buf, &palette);

        assert_eq!(indices.len(), 256);
        for (px, &idx) in out.pixels().zip(&indices) {
            assert_eq!(px.rgb(), palette.entries()[idx as usize]);
        }
    }

    #[test]
    fn repeated_pixels_reuse_match() {
        let pixels = vec![
            RGBA8::new(80, 80, 80, 9),
            RGBA8::new(80, 80, 80, 9),
            RGBA8::new(180, 180, 180, 9),
            RGBA8::new(80, 80, 80, 9),
        ];
        let buf = PixelBuffer::from_pixels(4, 1, &pixels).unwrap();
        let out = apply_palette(&buf, &gray_palette());
        let got: Vec<RGBA8> = out.pixels().collect();
        assert_eq!(
            got,
            vec![
                RGBA8::new(85, 85, 85, 255),
                RGBA8::new(85, 85, 85, 255),
                RGBA8::new(170, 170, 170, 255),
                RGBA8::new(85, 85, 85, 255),
            ]
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let pixels = vec![RGBA8::new(30, 40, 50, 60); 4];
        let buf = PixelBuffer::from_pixels(2, 2, &pixels).unwrap();
        let before = buf.clone();
        let _ = apply_palette(&buf, &gray_palette());
        assert_eq!(buf, before);
    }
}
