/// Reading-position persistence
///
/// A small JSON record inside the source folder itself, so the position
/// travels with the comics. Saved on shutdown, restored on show; both
/// directions are best-effort. Unknown fields in the file are ignored,
/// so newer versions can add fields without breaking older ones.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed file name inside the source folder
const STATE_FILE_NAME: &str = ".cbzviewer_state.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct SessionPosition {
    scroll_pos: u64,
}

/// Write the scroll position. Failure is logged and swallowed; losing
/// the bookmark is not worth failing shutdown over.
pub fn save(folder: &Path, scroll_offset: u64) {
    let record = SessionPosition {
        scroll_pos: scroll_offset,
    };
    let result = serde_json::to_string(&record)
        .map_err(|e| e.to_string())
        .and_then(|json| {
            std::fs::write(folder.join(STATE_FILE_NAME), json).map_err(|e| e.to_string())
        });
    match result {
        Ok(()) => println!("💾 Saved scroll position: {}", scroll_offset),
        Err(e) => eprintln!("⚠️  Error saving session state: {}", e),
    }
}

/// Read the scroll position back. A missing or unparseable file yields
/// `None` — the viewer simply starts at the top.
pub fn restore(folder: &Path) -> Option<u64> {
    let json = std::fs::read_to_string(folder.join(STATE_FILE_NAME)).ok()?;
    let record: SessionPosition = serde_json::from_str(&json).ok()?;
    println!("💾 Restoring scroll position: {}", record.scroll_pos);
    Some(record.scroll_pos)
}
