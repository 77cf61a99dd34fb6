use std::path::PathBuf;

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The request could not be built (malformed URL, invalid header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Transport failure before a response was received.
    #[error("request failed: {0}")]
    Network(String),
    #[error("request cancelled")]
    Cancelled,
    /// A response arrived with a status outside the accepted set.
    #[error("unexpected status {status}{}", body_suffix(.body))]
    Status { status: u16, body: Option<String> },
    #[error("{}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AssetError>;

impl AssetError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Short, stable classification for logging and matching.
    pub fn reason(&self) -> &'static str {
        match self {
            AssetError::InvalidRequest(_) => "request",
            AssetError::Network(_) => "network",
            AssetError::Cancelled => "cancelled",
            AssetError::Status { .. } => "status",
            AssetError::Filesystem { .. } => "io",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AssetError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body captured for a rejected upload.
    pub fn body(&self) -> Option<&str> {
        match self {
            AssetError::Status { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body.as_deref().map(str::trim) {
        Some(b) if !b.is_empty() => format!(": {}", b),
        _ => String::new(),
    }
}
