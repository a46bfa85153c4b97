//! Embedded stylesheet and image serving.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::Mime;

use crate::application::error::ErrorReport;

static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

const SOURCE: &str = "infra::assets::serve_static_asset";
// Assets are not fingerprinted, so keep the client cache short.
const ASSET_CACHE_CONTROL: &str = "public, max-age=3600";

/// Serve a file from the embedded `static/` directory.
pub async fn serve_static_asset(path: Option<Path<String>>) -> Response {
    let requested = path.map(|Path(value)| value).unwrap_or_default();
    match resolve_asset(&requested) {
        Ok(Some((bytes, mime))) => build_response(bytes, mime),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Static asset not found"),
        Err(status) => error_response(status, "Static asset request rejected"),
    }
}

fn resolve_asset(requested: &str) -> Result<Option<(Bytes, Mime)>, StatusCode> {
    let candidate = requested.trim_start_matches('/');

    if candidate.split('/').any(|segment| segment == "..") || candidate.contains('\\') {
        return Err(StatusCode::BAD_REQUEST);
    }

    if candidate.is_empty() || candidate.ends_with('/') {
        return Ok(None);
    }

    let Some(file) = STATIC_ASSETS.get_file(candidate) else {
        return Ok(None);
    };

    let mime = mime_guess::from_path(candidate).first_or_octet_stream();
    Ok(Some((Bytes::from_static(file.contents()), mime)))
}

fn build_response(bytes: Bytes, mime: Mime) -> Response {
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(ASSET_CACHE_CONTROL),
    );

    response
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    let mut response = status.into_response();
    ErrorReport::from_message(SOURCE, message).attach(&mut response);
    response
}
