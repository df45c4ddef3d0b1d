/// Image probing and decoding
///
/// Dimension probing reads only as much of the entry as the format
/// header requires; the full decode is deferred until a page is
/// actually materialized.

use image::imageops::FilterType;
use image::ImageReader;
use std::io::Cursor;

use crate::error::ViewerError;

/// Bytes per pixel of the decoded output (RGB8, row-major, no padding)
pub const BYTES_PER_PIXEL: usize = 3;

/// Probe the natural dimensions of an encoded image without decoding it.
/// Returns `None` when the format cannot be recognized or the header is
/// corrupt; callers record `(0, 0)` and continue.
pub fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Decode an encoded image and scale it to exactly `(width, height)`,
/// returning a packed RGB8 buffer of `width * height * 3` bytes.
pub fn decode_and_scale(bytes: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ViewerError> {
    let img = image::load_from_memory(bytes)?;
    let scaled = img.resize_exact(width, height, FilterType::Lanczos3);
    Ok(scaled.to_rgb8().into_raw())
}
