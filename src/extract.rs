use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DEFAULT_KNOWN_HOST;
use crate::models::ImageReference;

// ── Lazy static regexes ──────────────────────────────────────────────────────

/// `![alt](url)`; the URL stops at the first closing parenthesis.
static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// `<img ... src="url"`; only double-quoted src attributes are recognized.
static HTML_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src="([^"]+)""#).unwrap());

// ── Public API ───────────────────────────────────────────────────────────────

/// Find embedded images, flagging URLs on the default asset host.
pub fn extract_images(document: &str) -> Vec<ImageReference> {
    extract_images_with_host(document, DEFAULT_KNOWN_HOST)
}

/// Find embedded images in `document`.
///
/// All markdown-style references come first in scan order, followed by all
/// `<img>` tags in scan order. The two forms are not interleaved by position.
/// URLs are passed through unvalidated.
pub fn extract_images_with_host(document: &str, known_host: &str) -> Vec<ImageReference> {
    let markdown = MARKDOWN_IMAGE_RE.captures_iter(document).map(|cap| {
        reference(cap[2].to_string(), cap[1].to_string(), known_host)
    });

    let html = HTML_IMAGE_RE
        .captures_iter(document)
        .map(|cap| reference(cap[1].to_string(), String::new(), known_host));

    let images: Vec<ImageReference> = markdown.chain(html).collect();
    tracing::debug!(count = images.len(), "extracted image references");
    images
}

fn reference(url: String, alt_text: String, known_host: &str) -> ImageReference {
    // Substring match so subdomains and query strings still count.
    let is_from_known_host = !known_host.is_empty() && url.contains(known_host);
    ImageReference {
        url,
        alt_text,
        is_from_known_host,
    }
}
