//! Route handlers for the upload/download gateway.
//!
//! Validation failures are plain `(StatusCode, String)` responses with fixed
//! messages; conversion failures surface as 500s carrying the error text.
//! The upload handler follows POST-redirect-GET: a successful conversion
//! answers with a redirect to the download URL rather than the file itself.

use crate::convert::{convert, derive_output_name};
use crate::gateway::AppState;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, Redirect, Response};
use std::sync::Arc;
use tracing::{error, info};

/// Non-success responses are a status plus a human-readable message.
pub type RouteError = (StatusCode, String);

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>txt2pdf</title>
</head>
<body>
  <h1>Convert a text file to PDF</h1>
  <form method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".txt">
    <button type="submit">Convert</button>
  </form>
</body>
</html>
"#;

fn bad_request(message: &str) -> RouteError {
    (StatusCode::BAD_REQUEST, message.to_string())
}

fn internal_error(message: String) -> RouteError {
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Landing page with the upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Accept a multipart upload, convert it, and redirect to the download.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, RouteError> {
    let mut uploaded = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| bad_request(&format!("Malformed upload: {e}")))?;
            uploaded = Some((filename, data));
            break;
        }
    }

    let Some((filename, data)) = uploaded else {
        return Err(bad_request("No file uploaded"));
    };
    if filename.is_empty() {
        return Err(bad_request("No file selected"));
    }
    if !state.gateway.is_allowed(&filename) {
        return Err(bad_request(
            "Invalid file format. Only .txt files are allowed.",
        ));
    }

    // Strip any directory components the client may have sent; only the
    // final path component is used on disk.
    let filename = std::path::Path::new(&filename)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| bad_request("Invalid filename"))?;

    let staged = state.gateway.upload_dir.join(&filename);
    tokio::fs::write(&staged, &data).await.map_err(|e| {
        error!("failed to stage upload '{}': {e}", staged.display());
        internal_error(format!("Failed to store upload: {e}"))
    })?;

    let pdf_name = derive_output_name(&filename);
    let destination = state.gateway.output_dir.join(&pdf_name);

    let stats = convert(&staged, &destination, &state.conversion)
        .await
        .map_err(|e| {
            error!("conversion failed for '{}': {e}", staged.display());
            internal_error(format!("Conversion failed: {e}"))
        })?;

    info!(
        "upload '{}' converted to '{}' ({} pages)",
        filename, pdf_name, stats.page_count
    );

    Ok(Redirect::to(&format!("/download/{pdf_name}")))
}

/// Serve a rendered PDF from the output directory as an attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, RouteError> {
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(bad_request("Invalid filename"));
    }

    let path = state.gateway.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            (StatusCode::NOT_FOUND, "File not found".to_string())
        } else {
            error!("failed to read '{}': {e}", path.display());
            internal_error(format!("Failed to read file: {e}"))
        }
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .map_err(|e| internal_error(e.to_string()))
}
