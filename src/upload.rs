use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{AssetError, Result};
use crate::metadata::{read_file, resolve_metadata};
use crate::models::UploadTarget;
use crate::transfer::upload;

/// Requests upload permission from the asset service.
#[async_trait]
pub trait UploadTargetSource: Send + Sync {
    async fn request_upload(
        &self,
        file_name: &str,
        size: u64,
        content_type: &str,
    ) -> Result<UploadTarget>;
}

/// Upload a local file and return its permanent asset URL.
pub async fn upload_file<S>(
    cancel: &CancellationToken,
    source: &S,
    path: impl AsRef<Path>,
) -> Result<String>
where
    S: UploadTargetSource + ?Sized,
{
    let path = path.as_ref();
    let meta = resolve_metadata(path)?;
    let content = read_file(path).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            AssetError::InvalidRequest(format!("{} has no file name", path.display()))
        })?;

    let target = source
        .request_upload(&file_name, meta.size, meta.content_type)
        .await?;
    tracing::debug!(file = %file_name, size = meta.size, "upload target granted");

    upload(cancel, &target, content).await?;
    Ok(target.asset_url)
}
