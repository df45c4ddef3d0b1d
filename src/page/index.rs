/// The Page Index flattens all archives' entries into one global,
/// order-preserving page sequence: archives in catalog order, entries
/// within an archive in sorted-name order.

use crate::archive::catalog::Catalog;
use crate::error::ViewerError;

pub struct PageIndex {
    /// global page -> (archive index, local index)
    pages: Vec<(usize, usize)>,
    /// First global page of each archive, plus the total as a sentinel.
    /// Length num_archives + 1, monotonically increasing.
    archive_starts: Vec<usize>,
}

impl PageIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut pages = Vec::new();
        let mut archive_starts = vec![0];
        for (archive_index, archive) in catalog.archives().iter().enumerate() {
            for local_index in 0..archive.entries.len() {
                pages.push((archive_index, local_index));
            }
            archive_starts.push(pages.len());
        }
        PageIndex {
            pages,
            archive_starts,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Map a global page to its (archive, local page) pair
    pub fn resolve(&self, global_page: usize) -> Result<(usize, usize), ViewerError> {
        self.pages
            .get(global_page)
            .copied()
            .ok_or(ViewerError::OutOfRange {
                page: global_page,
                total: self.pages.len(),
            })
    }

    /// Index of the archive owning a global page. Out-of-range pages
    /// clamp to the last archive rather than erroring; position display
    /// tolerates a stale page number.
    pub fn archive_of(&self, global_page: usize) -> usize {
        let num_archives = self.archive_starts.len() - 1;
        if num_archives == 0 {
            return 0;
        }
        let idx = self
            .archive_starts
            .partition_point(|&start| start <= global_page);
        idx.saturating_sub(1).min(num_archives - 1)
    }

    /// First global page of an archive
    pub fn archive_start(&self, archive_index: usize) -> usize {
        self.archive_starts[archive_index.min(self.archive_starts.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    /// Three archives: a has 3 pages, b has no images (skipped by the
    /// catalog), c has 2 pages.
    fn fixture_index() -> PageIndex {
        let dir = testutil::temp_dir("index_concat");
        testutil::write_cbz(
            &dir.join("a.cbz"),
            &[
                ("1.png", Some((4, 4))),
                ("2.png", Some((4, 4))),
                ("3.png", Some((4, 4))),
            ],
        );
        testutil::write_cbz(&dir.join("b.cbz"), &[("cover.txt", None)]);
        testutil::write_cbz(
            &dir.join("c.cbz"),
            &[("1.png", Some((4, 4))), ("2.png", Some((4, 4)))],
        );
        let catalog = Catalog::load_folder(&dir).unwrap();
        PageIndex::build(&catalog)
    }

    #[test]
    fn test_concatenation_across_archives() {
        let index = fixture_index();
        assert_eq!(index.total_pages(), 5);
        assert_eq!(index.resolve(0).unwrap(), (0, 0));
        assert_eq!(index.resolve(2).unwrap(), (0, 2));
        // First page of the second surviving archive
        assert_eq!(index.resolve(3).unwrap(), (1, 0));
        assert_eq!(index.resolve(4).unwrap(), (1, 1));
    }

    #[test]
    fn test_resolve_out_of_range() {
        let index = fixture_index();
        assert!(index.resolve(5).is_err());
        assert!(index.resolve(usize::MAX).is_err());
    }

    #[test]
    fn test_archive_of_with_clamp() {
        let index = fixture_index();
        assert_eq!(index.archive_of(0), 0);
        assert_eq!(index.archive_of(2), 0);
        assert_eq!(index.archive_of(3), 1);
        assert_eq!(index.archive_of(4), 1);
        // Past the end: clamp to the last archive
        assert_eq!(index.archive_of(99), 1);
    }

    #[test]
    fn test_archive_starts() {
        let index = fixture_index();
        assert_eq!(index.archive_start(0), 0);
        assert_eq!(index.archive_start(1), 3);
    }
}
