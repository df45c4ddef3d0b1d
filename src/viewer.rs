/// The viewer ties the components together: it owns the catalog, page
/// index, layout, and cache, and turns the presentation layer's events
/// (scroll, resize, show, close) into layout recomputes, window sweeps,
/// and session saves/restores.
///
/// Everything runs on the caller's thread; a sweep finishes before the
/// next event is processed, so a release can never resurrect a page a
/// later event decided to drop.

use std::path::{Path, PathBuf};

use crate::archive::catalog::Catalog;
use crate::error::ViewerError;
use crate::page::cache::{CachedPage, PageCache};
use crate::page::index::PageIndex;
use crate::page::layout::Layout;
use crate::page::window::{self, Window};
use crate::state::session;

pub struct Viewer {
    catalog: Catalog,
    index: PageIndex,
    layout: Layout,
    cache: PageCache,
    /// Set only for folder loads; session state is scoped to it
    folder_path: Option<PathBuf>,
    scroll_offset: u64,
    viewport_height: u32,
    window: Option<Window>,
}

impl Viewer {
    /// Open a source path: a folder of archives, or one archive file.
    /// Folder loads skip broken archives; a single-archive load that
    /// fails to open is fatal.
    pub fn open(path: &Path, viewport_width: u32, viewport_height: u32) -> Result<Self, ViewerError> {
        let (catalog, folder_path) = if path.is_dir() {
            (Catalog::load_folder(path)?, Some(path.to_path_buf()))
        } else {
            (Catalog::load_single(path)?, None)
        };
        let index = PageIndex::build(&catalog);
        let layout = Layout::recompute(&catalog, &index, viewport_width);
        let cache = PageCache::new(index.total_pages());

        println!("📖 {} page(s), content height {}", index.total_pages(), layout.total_height());

        let mut viewer = Viewer {
            catalog,
            index,
            layout,
            cache,
            folder_path,
            scroll_offset: 0,
            viewport_height,
            window: None,
        };
        viewer.sweep();
        Ok(viewer)
    }

    /// Scroll event: new offset and viewport height
    pub fn on_scroll(&mut self, scroll_offset: u64, viewport_height: u32) {
        self.scroll_offset = scroll_offset;
        self.viewport_height = viewport_height;
        self.sweep();
    }

    /// Resize event: the layout must be rebuilt for the new width before
    /// the sweep; cached pages decoded for the old width become stale
    /// and are re-decoded lazily as the sweep touches them.
    pub fn on_resize(&mut self, viewport_width: u32, viewport_height: u32) {
        self.layout = Layout::recompute(&self.catalog, &self.index, viewport_width);
        self.viewport_height = viewport_height;
        self.sweep();
    }

    /// Show event: restore the saved position, folder loads only
    pub fn on_show(&mut self) {
        if let Some(folder) = &self.folder_path {
            if let Some(scroll_pos) = session::restore(folder) {
                self.scroll_offset = scroll_pos;
                self.sweep();
            }
        }
    }

    /// Close event: persist the position, folder loads only. Archive
    /// handles are closed when the viewer is dropped.
    pub fn on_close(&mut self) {
        if let Some(folder) = &self.folder_path {
            session::save(folder, self.scroll_offset);
        }
    }

    /// Recompute the window and bring the cache in line with it:
    /// materialize every page inside the load range, release every page
    /// outside it. Both directions are idempotent, so sweeping is safe
    /// on every event.
    fn sweep(&mut self) {
        self.window = window::compute(
            &self.layout,
            self.index.total_pages(),
            self.scroll_offset,
            self.viewport_height,
        );
        let Some(win) = self.window else {
            return;
        };
        for page in 0..self.index.total_pages() {
            if win.contains(page) {
                self.cache
                    .materialize(&mut self.catalog, &self.index, &self.layout, page);
            } else {
                self.cache.release(page);
            }
        }
    }

    pub fn total_content_height(&self) -> u64 {
        self.layout.total_height()
    }

    pub fn height_of(&self, global_page: usize) -> u32 {
        self.layout.height_of(global_page)
    }

    pub fn total_pages(&self) -> usize {
        self.index.total_pages()
    }

    /// Decoded pixels for a page, if currently materialized
    pub fn page(&self, global_page: usize) -> Option<&CachedPage> {
        self.cache.get(global_page)
    }

    /// Status line for the current position, `None` when there are no
    /// pages to report on
    pub fn status_text(&self) -> Option<String> {
        let win = self.window.as_ref()?;
        let pos = window::position(
            &self.catalog,
            &self.index,
            &self.layout,
            win,
            self.scroll_offset,
        );
        Some(pos.status_text())
    }

    #[cfg(test)]
    fn materialized_pages(&self) -> Vec<usize> {
        (0..self.index.total_pages())
            .filter(|&p| self.cache.is_materialized(p))
            .collect()
    }
}
