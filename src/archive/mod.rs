/// Archive access module
///
/// This module handles:
/// - Opening and indexing CBZ/ZIP archives (catalog.rs)
/// - Probing image dimensions and decoding pages (codec.rs)

pub mod catalog;
pub mod codec;
