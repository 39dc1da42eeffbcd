use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::catalog;
use crate::error::{AppError, Result};
use crate::session::{CurrentAccount, Flash};
use crate::views::{self, url_path_segment, Page, PageContext};
use crate::AppState;

/// List the downloadable files
pub async fn downloads(
    State(state): State<AppState>,
    account: CurrentAccount,
    flash: Flash,
) -> Result<Page> {
    let files = catalog::list_files(&state.config.download_dir).await?;
    Ok(views::downloads(&PageContext::new(Some(account), flash), &files))
}

/// Send one file from the download directory as an attachment
///
/// Only regular files directly inside the directory are served; symlinks are
/// refused the same way `catalog::list_files` leaves them out. The body is
/// streamed from disk.
pub async fn download_file(
    State(state): State<AppState>,
    CurrentAccount(account): CurrentAccount,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response> {
    let path = catalog::resolve(&state.config.download_dir, &filename).ok_or_else(|| {
        tracing::warn!("Rejected download name from account {}: {:?}", account.id, filename);
        AppError::FileNotFound
    })?;

    let size = match tokio::fs::symlink_metadata(&path).await {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => return Err(AppError::FileNotFound),
    };

    let mut response = ServeFile::new(&path)
        .oneshot(request)
        .await
        .unwrap_or_else(|e| match e {})
        .map(Body::new);

    if response.status().is_success() {
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        if let Ok(value) = HeaderValue::from_str(&content_disposition(&filename)) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }

        tracing::info!(
            "Account {} downloaded {} ({} bytes)",
            account.id,
            filename,
            size
        );
    }

    Ok(response)
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        url_path_segment(filename)
    )
}
