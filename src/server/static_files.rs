//! Serves the dashboard front-ends from the configured static directory.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

pub const INDEX_FILE: &str = "index.html";

/// Files under `dir`; unknown paths fall back to `index.html` so client-side
/// routes resolve.
pub fn static_service(dir: &Path) -> ServeDir<ServeFile> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "static directory not found; only the API will respond");
    }
    ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(dir.join(INDEX_FILE)))
}
