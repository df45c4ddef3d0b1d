/// Visible-window computation
///
/// Maps the current scroll offset and viewport height to the range of
/// visible pages, expands it by a fixed lookahead/lookbehind margin to
/// get the load window, and derives the position metadata shown in the
/// status line. All functions here are pure; the viewer applies the
/// resulting materialize/release decisions to the page cache.

use crate::archive::catalog::Catalog;
use crate::page::index::PageIndex;
use crate::page::layout::Layout;

/// Pages kept materialized beyond the visible range, in each direction
pub const LOAD_MARGIN: usize = 5;

/// Visible and load ranges for one scroll/resize event.
/// All bounds are inclusive global page numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start_page: usize,
    pub end_page: usize,
    pub load_start: usize,
    pub load_end: usize,
}

impl Window {
    pub fn contains(&self, global_page: usize) -> bool {
        self.load_start <= global_page && global_page <= self.load_end
    }
}

/// Compute the window for a scroll position. Returns `None` when there
/// are no pages at all.
pub fn compute(layout: &Layout, total_pages: usize, scroll_offset: u64, viewport_height: u32) -> Option<Window> {
    if total_pages == 0 {
        return None;
    }
    let start_page = layout.page_at_offset(scroll_offset);
    let end_page = layout.page_at_offset(scroll_offset + viewport_height as u64);
    Some(Window {
        start_page,
        end_page,
        load_start: start_page.saturating_sub(LOAD_MARGIN),
        load_end: (end_page + LOAD_MARGIN).min(total_pages - 1),
    })
}

/// Position metadata derived from the top of the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// 1-based page number in the global sequence
    pub global_page: usize,
    pub total_pages: usize,
    /// Display name of the archive owning the top visible page
    pub archive_name: String,
    /// 1-based page number within that archive
    pub local_page: usize,
    pub local_total: usize,
    /// floor(scroll_offset / total_height * 100)
    pub percentage: u64,
}

impl Position {
    /// Status line, e.g. "vol1.cbz - Page 3/20 | Global: 3/45 (4%)"
    pub fn status_text(&self) -> String {
        format!(
            "{} - Page {}/{} | Global: {}/{} ({}%)",
            self.archive_name,
            self.local_page,
            self.local_total,
            self.global_page,
            self.total_pages,
            self.percentage
        )
    }
}

/// Derive the position metadata for the current window
pub fn position(
    catalog: &Catalog,
    index: &PageIndex,
    layout: &Layout,
    window: &Window,
    scroll_offset: u64,
) -> Position {
    let archive_index = index.archive_of(window.start_page);
    let archive_name = catalog
        .archives()
        .get(archive_index)
        .map(|a| a.display_name.clone())
        .unwrap_or_default();
    let local_total = catalog
        .archives()
        .get(archive_index)
        .map(|a| a.entries.len())
        .unwrap_or(0);
    let local_page = window.start_page - index.archive_start(archive_index) + 1;
    let percentage = if layout.total_height() > 0 {
        scroll_offset * 100 / layout.total_height()
    } else {
        0
    };
    Position {
        global_page: window.start_page + 1,
        total_pages: index.total_pages(),
        archive_name,
        local_page,
        local_total,
        percentage,
    }
}
