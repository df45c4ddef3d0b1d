/// Shared test fixtures: tiny CBZ archives built in a temp directory.

use image::{ImageFormat, RgbImage};
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::PathBuf;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Create a unique, empty directory under the system temp dir
pub fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "cbz_viewer_test_{}_{}_{:?}",
        tag,
        std::process::id(),
        std::thread::current().id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Encode a solid PNG of the given size
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::new(width, height);
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Write a CBZ at `path`. Each entry is `(name, size)`; `Some((w, h))`
/// becomes a valid PNG of that size, `None` becomes unparseable bytes.
pub fn write_cbz(path: &std::path::Path, entries: &[(&str, Option<(u32, u32)>)]) {
    let file = File::create(path).unwrap();
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, size) in entries {
        writer.start_file(*name, options).unwrap();
        match size {
            Some((w, h)) => writer.write_all(&png_bytes(*w, *h)).unwrap(),
            None => writer.write_all(b"not an image").unwrap(),
        }
    }
    writer.finish().unwrap();
}
