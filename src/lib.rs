//! Moves image assets between markdown documents and a remote asset host:
//! find embedded images, download them, upload local files through
//! pre-signed URLs, and append the hosted reference back into the text.

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod logging;
pub mod metadata;
pub mod models;
pub mod transfer;
pub mod upload;

pub use config::AssetConfig;
pub use document::{append_image, sanitize_name, suggested_file_name};
pub use error::{AssetError, Result};
pub use extract::{extract_images, extract_images_with_host};
pub use metadata::{content_type_for, read_file, resolve_metadata};
pub use models::{FileMetadata, HeaderPair, ImageReference, UploadGrant, UploadTarget};
pub use transfer::{download, download_reference, upload};
pub use upload::{upload_file, UploadTargetSource};

pub use tokio_util::sync::CancellationToken;
