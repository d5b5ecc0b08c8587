//! Static client page server.
//!
//! The editor page is plain files on disk; serving it is independent of
//! the preview endpoint.

use tower_http::services::ServeDir;

/// Returns a service serving the client page directory.
pub fn client_service(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir)
}
