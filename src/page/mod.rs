/// Virtualized page engine
///
/// This module handles:
/// - Flattening archives into one global page sequence (index.rs)
/// - Scaled heights and the cumulative offset table (layout.rs)
/// - Visible-range and position computation (window.rs)
/// - Decoded page buffers and their lifecycle (cache.rs)

pub mod cache;
pub mod index;
pub mod layout;
pub mod window;
