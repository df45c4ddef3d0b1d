/// The Page Cache owns the decoded RGB8 buffer of every materialized
/// page. Materialize and release are both idempotent, and a buffer is
/// tagged with the viewport width it was decoded for: after a resize
/// every surviving buffer is stale and gets re-decoded on its next
/// materialize.

use crate::archive::catalog::Catalog;
use crate::error::ViewerError;
use crate::page::index::PageIndex;
use crate::page::layout::Layout;

/// A decoded, scaled page. `pixels` is packed RGB8, row-major.
pub struct CachedPage {
    pub pixels: Vec<u8>,
    /// Viewport width the page was decoded for
    pub width: u32,
    pub height: u32,
}

pub struct PageCache {
    slots: Vec<Option<CachedPage>>,
}

impl PageCache {
    pub fn new(total_pages: usize) -> Self {
        let mut slots = Vec::with_capacity(total_pages);
        slots.resize_with(total_pages, || None);
        PageCache { slots }
    }

    /// Decode and scale a page if it is absent or stale. A decode
    /// failure leaves the page absent (it renders as empty space of its
    /// layout height) and never affects other pages.
    pub fn materialize(
        &mut self,
        catalog: &mut Catalog,
        index: &PageIndex,
        layout: &Layout,
        global_page: usize,
    ) {
        let fresh = matches!(
            self.slots.get(global_page),
            Some(Some(cached)) if cached.width == layout.viewport_width()
        );
        if fresh {
            return;
        }
        match decode_page(catalog, index, layout, global_page) {
            Ok(cached) => self.slots[global_page] = Some(cached),
            Err(e) => {
                eprintln!("⚠️  Error loading page {}: {}", global_page, e);
                if let Some(slot) = self.slots.get_mut(global_page) {
                    *slot = None;
                }
            }
        }
    }

    /// Discard a page's buffer; a no-op when already absent
    pub fn release(&mut self, global_page: usize) {
        if let Some(slot) = self.slots.get_mut(global_page) {
            *slot = None;
        }
    }

    pub fn is_materialized(&self, global_page: usize) -> bool {
        matches!(self.slots.get(global_page), Some(Some(_)))
    }

    pub fn get(&self, global_page: usize) -> Option<&CachedPage> {
        self.slots.get(global_page).and_then(|s| s.as_ref())
    }

    pub fn materialized_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

fn decode_page(
    catalog: &mut Catalog,
    index: &PageIndex,
    layout: &Layout,
    global_page: usize,
) -> Result<CachedPage, ViewerError> {
    let (archive_index, local_index) = index.resolve(global_page)?;
    let bytes = catalog
        .archive_mut(archive_index)
        .ok_or(ViewerError::OutOfRange {
            page: global_page,
            total: index.total_pages(),
        })?
        .read_entry(local_index)?;
    let width = layout.viewport_width();
    let height = layout.height_of(global_page);
    let pixels = crate::archive::codec::decode_and_scale(&bytes, width, height)?;
    Ok(CachedPage {
        pixels,
        width,
        height,
    })
}
