/// The Archive Catalog opens a set of CBZ/ZIP archives and indexes
/// their image entries: name plus natural (unscaled) dimensions.
/// It never stores decoded pixels; full decoding is deferred to the
/// page cache at materialization time.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::archive::codec;
use crate::error::ViewerError;

/// Archive file extensions we recognize (lowercase)
const ARCHIVE_EXTENSIONS: [&str; 2] = ["cbz", "zip"];

/// Image entry extensions we recognize (lowercase)
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A single page image inside an archive.
/// Dimensions are `(0, 0)` when probing failed — a recognized degraded
/// state, not an error; the page still occupies a fallback-height slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// An open archive and its sorted image entries.
/// The zip handle is owned exclusively by the catalog and is closed
/// when the catalog is dropped.
pub struct Archive {
    pub display_name: String,
    pub entries: Vec<Entry>,
    zip: ZipArchive<File>,
}

impl Archive {
    /// Read the raw (still encoded) bytes of a local entry
    pub fn read_entry(&mut self, local_index: usize) -> Result<Vec<u8>, ViewerError> {
        let name = self
            .entries
            .get(local_index)
            .ok_or(ViewerError::OutOfRange {
                page: local_index,
                total: self.entries.len(),
            })?
            .name
            .clone();
        let mut file = self.zip.by_name(&name)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// The ordered set of loaded archives
pub struct Catalog {
    archives: Vec<Archive>,
}

impl Catalog {
    /// Load every recognized archive directly inside `folder`, sorted by
    /// filename. Archives that fail to open or contain no recognized
    /// images are skipped with a warning rather than aborting the load.
    pub fn load_folder(folder: &Path) -> Result<Self, ViewerError> {
        let mut paths: Vec<PathBuf> = WalkDir::new(folder)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_archive_path(e.path()))
            .map(|e| e.into_path())
            .collect();
        paths.sort();

        let mut archives = Vec::new();
        for path in &paths {
            match open_archive(path) {
                Ok(archive) if archive.entries.is_empty() => {
                    eprintln!("⚠️  No images in {}, skipping", path.display());
                }
                Ok(archive) => archives.push(archive),
                Err(e) => {
                    eprintln!("⚠️  Failed to open {}: {}", path.display(), e);
                }
            }
        }

        println!("📚 Loaded {} archive(s) from {}", archives.len(), folder.display());
        Ok(Catalog { archives })
    }

    /// Load exactly one archive. Unlike the folder path, an open failure
    /// here is fatal — there is nothing else to display.
    pub fn load_single(path: &Path) -> Result<Self, ViewerError> {
        let archive = open_archive(path)?;
        if archive.entries.is_empty() {
            eprintln!("⚠️  No images in {}", path.display());
            return Ok(Catalog { archives: Vec::new() });
        }
        Ok(Catalog {
            archives: vec![archive],
        })
    }

    pub fn archives(&self) -> &[Archive] {
        &self.archives
    }

    pub fn archive_mut(&mut self, index: usize) -> Option<&mut Archive> {
        self.archives.get_mut(index)
    }

    pub fn num_archives(&self) -> usize {
        self.archives.len()
    }

    /// Natural dimensions of an entry, `(0, 0)` if unknown
    pub fn natural_size(&self, archive_index: usize, local_index: usize) -> (u32, u32) {
        self.archives
            .get(archive_index)
            .and_then(|a| a.entries.get(local_index))
            .map(|e| (e.natural_width, e.natural_height))
            .unwrap_or((0, 0))
    }
}

/// Open one archive: list its entries, keep the recognized images in
/// name order, and probe each one's natural dimensions.
fn open_archive(path: &Path) -> Result<Archive, ViewerError> {
    let file = File::open(path)?;
    let mut zip = ZipArchive::new(file).map_err(|source| ViewerError::OpenArchive {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = zip
        .file_names()
        .filter(|name| is_image_name(name))
        .map(str::to_string)
        .collect();
    names.sort();

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let (natural_width, natural_height) = probe_entry(&mut zip, &name);
        entries.push(Entry {
            name,
            natural_width,
            natural_height,
        });
    }

    let display_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(Archive {
        display_name,
        entries,
        zip,
    })
}

/// Probe an entry's dimensions, falling back to `(0, 0)` on any failure
fn probe_entry(zip: &mut ZipArchive<File>, name: &str) -> (u32, u32) {
    let mut bytes = Vec::new();
    let ok = zip
        .by_name(name)
        .ok()
        .and_then(|mut f| f.read_to_end(&mut bytes).ok())
        .is_some();
    if !ok {
        eprintln!("⚠️  Could not read entry {}", name);
        return (0, 0);
    }
    match codec::probe_dimensions(&bytes) {
        Some(dims) => dims,
        None => {
            eprintln!("⚠️  Could not probe dimensions of {}", name);
            (0, 0)
        }
    }
}

fn is_archive_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map_or(false, |ext| ARCHIVE_EXTENSIONS.contains(&ext.as_str()))
}

fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}
