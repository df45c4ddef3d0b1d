/// Session persistence module
///
/// Saves and restores the reading position for folder loads (session.rs).

pub mod session;
