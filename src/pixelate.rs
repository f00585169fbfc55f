extern crate alloc;
use alloc::borrow::Cow;

use crate::buffer::{CHANNELS, PixelBuffer};
use crate::palette::Palette;
use crate::remap::quantize;

/// Downsample `buffer` by averaging non-overlapping `block_size × block_size`
/// blocks, then optionally snap every result pixel to `palette`.
///
/// - `block_size <= 1` returns the input untouched (the palette is not applied).
/// - Output is `floor(width / block_size) × floor(height / block_size)`;
///   trailing rows and columns that do not fill a whole block are dropped.
/// - Each channel, alpha included, is the mean of its block rounded to
///   nearest with ties to even, so 127.5 stores as 128 and 126.5 as 126.
/// - With `Some(palette)` the averaged buffer goes through
///   [`apply_palette`](crate::apply_palette),
///   which leaves it as-is when the palette is empty.
pub fn pixelate<'a>(
    buffer: &'a PixelBuffer,
    block_size: u32,
    palette: Option<&Palette>,
) -> Cow<'a, PixelBuffer> {
    if block_size <= 1 {
        return Cow::Borrowed(buffer);
    }

    let averaged = block_average(buffer, block_size as usize);

    tracing::debug!(
        src_width = buffer.width(),
        src_height = buffer.height(),
        block_size,
        out_width = averaged.width(),
        out_height = averaged.height(),
        "pixelated"
    );

    match palette {
        Some(palette) if !palette.is_empty() => Cow::Owned(quantize(&averaged, palette)),
        _ => Cow::Owned(averaged),
    }
}

/// Block-average without any palette step. `block` must be at least 2.
fn block_average(buffer: &PixelBuffer, block: usize) -> PixelBuffer {
    let (width, height) = (buffer.width(), buffer.height());
    let out_w = width / block;
    let out_h = height / block;
    let src = buffer.data();

    let mut out = PixelBuffer::zeroed(out_w, out_h);
    let dst = out.data_mut();

    for oy in 0..out_h {
        let y0 = oy * block;
        let y1 = (y0 + block).min(height);

        for ox in 0..out_w {
            let x0 = ox * block;
            let x1 = (x0 + block).min(width);

            let mut sums = [0u64; CHANNELS];
            let mut count = 0u64;

            for y in y0..y1 {
                let row = &src[(y * width + x0) * CHANNELS..(y * width + x1) * CHANNELS];
                for px in row.chunks_exact(CHANNELS) {
                    for (sum, &v) in sums.iter_mut().zip(px) {
                        *sum += v as u64;
                    }
                    count += 1;
                }
            }

            let o = (oy * out_w + ox) * CHANNELS;
            for (c, &sum) in sums.iter().enumerate() {
                dst[o + c] = mean_round_half_even(sum, count);
            }
        }
    }

    out
}

/// `sum / count` rounded to nearest, ties to even. `count` is never zero
/// for a visited block.
#[inline]
fn mean_round_half_even(sum: u64, count: u64) -> u8 {
    let q = sum / count;
    let r = sum % count;
    let twice = r * 2;
    let rounded = if twice > count || (twice == count && q % 2 == 1) {
        q + 1
    } else {
        q
    };
    // Mean of u8 values never exceeds 255.
    rounded.min(255) as u8
}
