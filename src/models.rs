use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An image embedded in document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference {
    pub url: String,
    pub alt_text: String,
    /// The URL contains the asset service's domain; callers use this to
    /// decide whether a download needs the auth header.
    pub is_from_known_host: bool,
}

/// A single-use destination handed out by the asset service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub upload_url: String,
    pub asset_url: String,
    /// Signing headers required by the service; applied after the defaults.
    pub headers: BTreeMap<String, String>,
    pub content_type: String,
    pub size: u64,
}

/// Upload permission as returned by the asset service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGrant {
    pub upload_url: String,
    pub asset_url: String,
    pub content_type: String,
    #[serde(default)]
    pub headers: Vec<HeaderPair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderPair {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub content_type: &'static str,
}

impl UploadTarget {
    pub fn from_grant(grant: UploadGrant, size: u64) -> Self {
        let headers = grant
            .headers
            .into_iter()
            .map(|h| (h.key, h.value))
            .collect();
        UploadTarget {
            upload_url: grant.upload_url,
            asset_url: grant.asset_url,
            headers,
            content_type: grant.content_type,
            size,
        }
    }
}
