use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Request, StatusCode, Url};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use crate::config::UPLOAD_CACHE_CONTROL;
use crate::document::suggested_file_name;
use crate::error::{AssetError, Result};
use crate::models::{ImageReference, UploadTarget};

// ── Shared client ────────────────────────────────────────────────────────────

/// Process-wide client. No timeout: callers bound transfers with the token.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

// ── Download ─────────────────────────────────────────────────────────────────

/// GET `url` and stream the body to `destination`, returning the bytes written.
///
/// Only a 200 response is accepted; nothing touches the filesystem otherwise.
/// Missing parent directories are created and an existing file is overwritten.
/// A cancelled download may leave a truncated file behind.
pub async fn download(
    cancel: &CancellationToken,
    url: &str,
    destination: impl AsRef<Path>,
    auth_header: Option<&str>,
) -> Result<u64> {
    if cancel.is_cancelled() {
        return Err(AssetError::Cancelled);
    }

    let mut request = HTTP_CLIENT.get(url).build().map_err(request_error)?;
    if let Some(auth) = auth_header.filter(|a| !a.is_empty()) {
        request
            .headers_mut()
            .insert(AUTHORIZATION, header_value(auth)?);
    }

    let destination = destination.as_ref();
    tracing::debug!(url = %loggable(request.url()), path = %destination.display(), "starting download");

    tokio::select! {
        _ = cancel.cancelled() => Err(AssetError::Cancelled),
        result = fetch_to_file(request, destination) => result,
    }
}

/// Download an extracted reference into `dir`, naming the file after the URL.
/// `auth_header` is attached only for references on the known host.
pub async fn download_reference(
    cancel: &CancellationToken,
    reference: &ImageReference,
    dir: impl AsRef<Path>,
    index: usize,
    auth_header: Option<&str>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(suggested_file_name(reference, index));
    let auth = auth_header.filter(|_| reference.is_from_known_host);
    download(cancel, &reference.url, &path, auth).await?;
    Ok(path)
}

async fn fetch_to_file(request: Request, destination: &Path) -> Result<u64> {
    let url = loggable(request.url());
    let mut response = HTTP_CLIENT
        .execute(request)
        .await
        .map_err(request_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!(%url, status = status.as_u16(), "download rejected");
        return Err(AssetError::Status {
            status: status.as_u16(),
            body: None,
        });
    }

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AssetError::fs(parent, e))?;
    }

    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(|e| AssetError::fs(destination, e))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(request_error)? {
        file.write_all(&chunk)
            .await
            .map_err(|e| AssetError::fs(destination, e))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| AssetError::fs(destination, e))?;

    tracing::info!(%url, bytes = written, path = %destination.display(), "download complete");
    Ok(written)
}

// ── Upload ───────────────────────────────────────────────────────────────────

/// PUT `content` to the target's pre-signed URL.
///
/// `Content-Type` and a one-year public `Cache-Control` are set first, then
/// every service-supplied header is applied on top and may replace them.
/// Accepts 200 and 204; any other status carries the response body.
pub async fn upload(
    cancel: &CancellationToken,
    target: &UploadTarget,
    content: Vec<u8>,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(AssetError::Cancelled);
    }

    let request = build_upload_request(target, content)?;
    tracing::debug!(
        url = %loggable(request.url()),
        content_type = %target.content_type,
        size = target.size,
        "starting upload"
    );

    tokio::select! {
        _ = cancel.cancelled() => Err(AssetError::Cancelled),
        result = send_upload(request) => result,
    }
}

fn build_upload_request(target: &UploadTarget, content: Vec<u8>) -> Result<Request> {
    let mut request = HTTP_CLIENT
        .put(&target.upload_url)
        .body(content)
        .build()
        .map_err(request_error)?;

    let headers = request.headers_mut();
    headers.insert(CONTENT_TYPE, header_value(&target.content_type)?);
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(UPLOAD_CACHE_CONTROL));

    // Signing headers go last so they win over the defaults above.
    for (key, value) in &target.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| AssetError::InvalidRequest(format!("header name {:?}: {}", key, e)))?;
        headers.insert(name, header_value(value)?);
    }

    Ok(request)
}

async fn send_upload(request: Request) -> Result<()> {
    let url = loggable(request.url());
    let response = HTTP_CLIENT
        .execute(request)
        .await
        .map_err(request_error)?;

    let status = response.status();
    if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
        tracing::info!(%url, status = status.as_u16(), "upload complete");
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(%url, status = status.as_u16(), "upload rejected");
    Err(AssetError::Status {
        status: status.as_u16(),
        body: Some(body),
    })
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AssetError::InvalidRequest(format!("header value: {}", e)))
}

fn request_error(e: reqwest::Error) -> AssetError {
    // Pre-signed URLs carry credentials in the query string.
    let e = e.without_url();
    if e.is_builder() {
        AssetError::InvalidRequest(e.to_string())
    } else {
        AssetError::Network(e.to_string())
    }
}

/// URL without query or fragment, safe to log.
fn loggable(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.to_string()
}
