//! Static-site serving with SPA fallback and cache headers.

use std::path::Path;

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tower_http::services::{ServeDir, ServeFile};

const IMMUTABLE_CACHE: &str = "public, max-age=2592000, immutable";

/// Media files get range support for seeking.
const MEDIA_EXTENSIONS: &[&str] = &["mp3", "mp4", "ogg", "webm", "flac"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// File service for everything the API router does not match. Unmatched
/// paths fall back to the index document (single-page-app style).
pub fn service(site_dir: &str) -> ServeDir<ServeFile> {
    let index = Path::new(site_dir).join("index.html");
    ServeDir::new(site_dir).fallback(ServeFile::new(index))
}

/// Attach cache headers by request path: the index document is never cached
/// (it must pick up deployments immediately), media and images are immutable
/// for 30 days.
pub async fn cache_headers(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_ascii_lowercase();
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    if path == "/" || path.ends_with("/index.html") {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    } else if has_extension(&path, MEDIA_EXTENSIONS) {
        headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE),
        );
    } else if has_extension(&path, IMAGE_EXTENSIONS) {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(IMMUTABLE_CACHE),
        );
    }
    response
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}
