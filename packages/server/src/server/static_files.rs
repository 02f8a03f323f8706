//! Embedded admin UI.
//!
//! The page lives in `packages/admin-ui` and is compiled into the binary.
//! It is served at `/` and under `/admin/`; unknown paths below `/admin/`
//! fall back to the page itself.

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

const INDEX: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "../admin-ui"]
pub struct AdminAssets;

/// GET /, /admin and /admin/*path
pub async fn serve_admin(uri: Uri) -> Response {
    let asset = asset_path(uri.path());

    if let Some(file) = AdminAssets::get(asset) {
        let mime = mime_guess::from_path(asset).first_or_octet_stream();
        return ([(header::CONTENT_TYPE, mime.as_ref())], file.data).into_response();
    }

    match AdminAssets::get(INDEX) {
        Some(page) => ([(header::CONTENT_TYPE, "text/html")], page.data).into_response(),
        None => (StatusCode::NOT_FOUND, "admin UI not bundled").into_response(),
    }
}

fn asset_path(request_path: &str) -> &str {
    let relative = request_path
        .strip_prefix("/admin")
        .unwrap_or(request_path)
        .trim_start_matches('/');

    if relative.is_empty() {
        INDEX
    } else {
        relative
    }
}
