use std::path::Path;

use crate::error::{AssetError, Result};
use crate::models::FileMetadata;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Size from the filesystem, content type from the extension alone.
pub fn resolve_metadata(path: impl AsRef<Path>) -> Result<FileMetadata> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path).map_err(|e| AssetError::fs(path, e))?;
    Ok(FileMetadata {
        size: meta.len(),
        content_type: content_type_for(path),
    })
}

/// Map a file extension to a MIME type. Case-insensitive; unknown or
/// missing extensions map to `application/octet-stream`.
///
/// The extension is whatever follows the last `.` of the file name, so a
/// bare `.png` counts as a png.
pub fn content_type_for(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("pdf") => "application/pdf",
        _ => OCTET_STREAM,
    }
}

pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|e| AssetError::fs(path, e))
}
