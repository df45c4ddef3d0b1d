/// The Layout Model computes every page's scaled height for the current
/// viewport width — without decoding anything — and keeps a prefix-sum
/// table of cumulative heights for offset -> page lookups.
///
/// The table is rebuilt in full on every width change and swapped in
/// whole, so readers never observe a partially-built table.

use crate::archive::catalog::Catalog;
use crate::page::index::PageIndex;

/// Height used for pages whose dimensions could not be probed
const FALLBACK_PAGE_HEIGHT: u32 = 100;

pub struct Layout {
    viewport_width: u32,
    heights: Vec<u32>,
    /// Prefix sums, length total_pages + 1, cumulative[0] == 0
    cumulative: Vec<u64>,
    total_height: u64,
}

impl Layout {
    /// Build the full layout for a viewport width
    pub fn recompute(catalog: &Catalog, index: &PageIndex, viewport_width: u32) -> Self {
        let total_pages = index.total_pages();
        let mut heights = Vec::with_capacity(total_pages);
        let mut cumulative = Vec::with_capacity(total_pages + 1);
        cumulative.push(0u64);
        let mut running = 0u64;
        for global_page in 0..total_pages {
            let (archive_index, local_index) = index
                .resolve(global_page)
                .expect("page index and layout must agree on total pages");
            let (natural_w, natural_h) = catalog.natural_size(archive_index, local_index);
            let height = scaled_height(natural_w, natural_h, viewport_width);
            heights.push(height);
            running += height as u64;
            cumulative.push(running);
        }
        // Floor of 1 so an empty sequence never yields a zero-height view
        let total_height = running.max(1);
        Layout {
            viewport_width,
            heights,
            cumulative,
            total_height,
        }
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn total_height(&self) -> u64 {
        self.total_height
    }

    pub fn height_of(&self, global_page: usize) -> u32 {
        self.heights.get(global_page).copied().unwrap_or(0)
    }

    /// The greatest page whose cumulative start is <= offset, clamped to
    /// the valid range. Returns 0 for an empty sequence.
    pub fn page_at_offset(&self, offset: u64) -> usize {
        if self.heights.is_empty() {
            return 0;
        }
        let first_above = self.cumulative.partition_point(|&c| c <= offset);
        (first_above - 1).min(self.heights.len() - 1)
    }
}

/// Scale a natural size to the viewport width, preserving aspect ratio
fn scaled_height(natural_width: u32, natural_height: u32, viewport_width: u32) -> u32 {
    if natural_width == 0 {
        return FALLBACK_PAGE_HEIGHT;
    }
    (natural_height as f64 * viewport_width as f64 / natural_width as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn fixture(entries: &[(&str, Option<(u32, u32)>)], viewport_width: u32) -> Layout {
        let dir = testutil::temp_dir("layout");
        let path = dir.join("book.cbz");
        testutil::write_cbz(&path, entries);
        let catalog = Catalog::load_single(&path).unwrap();
        let index = PageIndex::build(&catalog);
        Layout::recompute(&catalog, &index, viewport_width)
    }

    #[test]
    fn test_scaled_height_formula() {
        assert_eq!(scaled_height(1600, 2400, 800), 1200);
        assert_eq!(scaled_height(1000, 1500, 1000), 1500);
        // Rounding, not truncation
        assert_eq!(scaled_height(3, 2, 800), 533);
        // Unknown dimensions fall back to a fixed slot height
        assert_eq!(scaled_height(0, 0, 800), FALLBACK_PAGE_HEIGHT);
    }

    #[test]
    fn test_single_page_total_height() {
        let layout = fixture(&[("p.png", Some((1600, 2400)))], 800);
        assert_eq!(layout.height_of(0), 1200);
        assert_eq!(layout.total_height(), 1200);
    }

    #[test]
    fn test_cumulative_is_monotone_and_totals() {
        let layout = fixture(
            &[
                ("1.png", Some((100, 200))),
                ("2.png", Some((100, 50))),
                ("3.png", None),
                ("4.png", Some((100, 300))),
            ],
            100,
        );
        assert_eq!(layout.cumulative[0], 0);
        for pair in layout.cumulative.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*layout.cumulative.last().unwrap(), layout.total_height());
        // Unprobeable page occupies the fallback slot
        assert_eq!(layout.height_of(2), FALLBACK_PAGE_HEIGHT);
        assert_eq!(layout.total_height(), 200 + 50 + 100 + 300);
    }

    #[test]
    fn test_page_at_offset_boundaries() {
        let layout = fixture(
            &[
                ("1.png", Some((100, 100))),
                ("2.png", Some((100, 100))),
                ("3.png", Some((100, 100))),
            ],
            100,
        );
        // 3 pages of height 100 each
        assert_eq!(layout.page_at_offset(0), 0);
        assert_eq!(layout.page_at_offset(99), 0);
        assert_eq!(layout.page_at_offset(100), 1);
        assert_eq!(layout.page_at_offset(layout.total_height() - 1), 2);
        // Past the end clamps to the last page
        assert_eq!(layout.page_at_offset(100_000), 2);
    }

    #[test]
    fn test_page_at_offset_is_monotone() {
        let layout = fixture(
            &[
                ("1.png", Some((100, 37))),
                ("2.png", Some((100, 211))),
                ("3.png", Some((100, 5))),
                ("4.png", Some((100, 90))),
            ],
            100,
        );
        let mut last = 0;
        for offset in 0..layout.total_height() + 10 {
            let page = layout.page_at_offset(offset);
            assert!(page >= last);
            last = page;
        }
    }

    #[test]
    fn test_empty_sequence_degenerates_safely() {
        let dir = testutil::temp_dir("layout_empty");
        let path = dir.join("empty.cbz");
        testutil::write_cbz(&path, &[("notes.txt", None)]);
        let catalog = Catalog::load_single(&path).unwrap();
        let index = PageIndex::build(&catalog);
        let layout = Layout::recompute(&catalog, &index, 800);
        assert_eq!(layout.total_height(), 1);
        assert_eq!(layout.page_at_offset(0), 0);
        assert_eq!(layout.page_at_offset(500), 0);
    }
}
