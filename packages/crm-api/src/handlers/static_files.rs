//! Static file responder for paths that match no API route.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;

use crate::router::{AppState, RouterError};

use super::response::build_response;

/// Serves `config.static_dir` for GET and HEAD requests.
///
/// `/` and directories resolve to their `index.html`. Other verbs, and
/// paths that try to climb out of the static directory, are answered
/// with 404.
pub async fn serve_static<B>(
    req: Request<B>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(RouterError::NotFound);
    }

    let mut path = resolve_static_path(&state.config.static_dir, req.uri().path())
        .ok_or(RouterError::NotFound)?;

    let metadata = tokio::fs::metadata(&path).await.map_err(map_io_error)?;
    if metadata.is_dir() {
        path.push("index.html");
    }

    let contents = tokio::fs::read(&path).await.map_err(map_io_error)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "serving static file");
    build_response(StatusCode::OK, content_type_for(&path), Bytes::from(contents))
}

/// Maps a request path onto a file below `root`.
///
/// Returns `None` for any `..` segment or a segment carrying a
/// path separator or NUL after percent-decoding.
pub fn resolve_static_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for segment in uri_path.split('/') {
        let segment = percent_decode_str(segment).decode_utf8().ok()?;
        match segment.as_ref() {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(['/', '\\', '\0']) => return None,
            s => resolved.push(s),
        }
    }
    Some(resolved)
}

/// Content type by file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn map_io_error(e: std::io::Error) -> RouterError {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::PermissionDenied => RouterError::NotFound,
        _ => RouterError::InternalError(format!("Failed to read static file: {}", e)),
    }
}
