use std::path::Path;
use std::process::ExitCode;

// Declare the modules
mod archive;
mod error;
mod page;
mod state;
mod viewer;

#[cfg(test)]
mod testutil;

/// Default window geometry
const DEFAULT_VIEWPORT_WIDTH: u32 = 800;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;

fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: cbz-viewer <file.cbz | folder>");
        return ExitCode::FAILURE;
    };
    let path = Path::new(&path);

    let mut viewer = match viewer::Viewer::open(path, DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT) {
        Ok(viewer) => viewer,
        Err(e) => {
            eprintln!("❌ Failed to open {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if viewer.total_pages() == 0 {
        println!("Nothing to display.");
        return ExitCode::SUCCESS;
    }

    viewer.on_show();

    if let Some(status) = viewer.status_text() {
        println!("{}", status);
    }

    viewer.on_close();
    ExitCode::SUCCESS
}
