use crate::extract::extract_images_with_host;
use crate::models::ImageReference;

/// Domain of the asset-hosting service.
pub const DEFAULT_KNOWN_HOST: &str = "linear.app";

/// Cache directive sent with every upload: public, one year.
pub const UPLOAD_CACHE_CONTROL: &str = "public, max-age=31536000";

const KNOWN_HOST_ENV: &str = "DOC_ASSETS_KNOWN_HOST";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Substring identifying URLs served by the asset service.
    pub known_host: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            known_host: DEFAULT_KNOWN_HOST.to_string(),
        }
    }
}

impl AssetConfig {
    /// Defaults, with the known host overridable via `DOC_ASSETS_KNOWN_HOST`.
    pub fn from_env() -> Self {
        Self::with_known_host(std::env::var(KNOWN_HOST_ENV).ok())
    }

    fn with_known_host(host: Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(host) = host.map(|h| h.trim().to_string()).filter(|h| !h.is_empty()) {
            cfg.known_host = host;
        }
        cfg
    }

    /// Extract images, flagging URLs on this config's known host.
    pub fn extract_images(&self, document: &str) -> Vec<ImageReference> {
        extract_images_with_host(document, &self.known_host)
    }
}
