use std::path::Path;

use url::Url;

use crate::models::ImageReference;

const MAX_NAME_LEN: usize = 200;
const DEFAULT_ALT: &str = "image";

// ── Names ────────────────────────────────────────────────────────────────────

/// Replace everything outside `[A-Za-z0-9._-]` with `_` and cap at 200 chars.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect()
}

/// Local file name for a downloaded reference: the URL's last path segment,
/// or `image_<index>` when there is none. Names without an extension get `.png`.
pub fn suggested_file_name(reference: &ImageReference, index: usize) -> String {
    let segment = Url::parse(&reference.url).ok().and_then(|u| {
        u.path_segments()
            .and_then(|mut segs| segs.rfind(|s| !s.is_empty()).map(str::to_string))
    });

    let mut name = segment.unwrap_or_else(|| format!("image_{}", index));
    if Path::new(&name).extension().is_none() {
        name.push_str(".png");
    }
    sanitize_name(&name)
}

// ── Markdown mutation ────────────────────────────────────────────────────────

/// Append `![alt](url)` after a blank line. An empty alt becomes "image";
/// a blank document is replaced by the reference alone.
pub fn append_image(document: &str, asset_url: &str, alt_text: &str) -> String {
    let alt = if alt_text.is_empty() { DEFAULT_ALT } else { alt_text };
    let image_md = format!("![{}]({})", alt, asset_url);

    if document.trim().is_empty() {
        return image_md;
    }
    format!("{}\n\n{}", document, image_md)
}
