/// Error types for the viewer engine
///
/// Only genuinely fatal conditions surface through `ViewerError`:
/// a single-archive load that cannot open, or a page lookup outside
/// the valid range. Per-entry and per-archive failures during folder
/// loads are absorbed at the call site and logged instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The archive file could not be read at all (single-file load path)
    #[error("failed to open archive {path}: {source}")]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A global page number outside [0, total_pages)
    #[error("page {page} out of range (total pages: {total})")]
    OutOfRange { page: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
}
