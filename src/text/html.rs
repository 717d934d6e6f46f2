//! Plain text from an HTML string
//!
//! Regex stripping, in order: comments and `<script>`/`<style>` blocks are removed with their
//! contents, block-level tags become a space (so `<p>a</p><p>b</p>` reads "a b"), every other
//! tag is removed, entities are decoded, and whitespace is collapsed.

use super::truncate::normalize_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());

static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

static BLOCK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)</?(?:p|h[1-6]|ul|ol|li|blockquote|pre|table|thead|tbody|tfoot|tr|td|th|div|section|article|header|footer|figure|figcaption|details|summary|hr|br|img|video|iframe)\b[^>]*>",
    )
    .unwrap()
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[A-Za-z!][^>]*>").unwrap());

/// The visible text of an HTML fragment, whitespace collapsed.
pub fn html_to_text(html: &str) -> String {
    let text = COMMENT.replace_all(html, " ");
    let text = SCRIPT.replace_all(&text, " ");
    let text = STYLE.replace_all(&text, " ");
    let text = BLOCK_TAG.replace_all(&text, " ");
    let text = ANY_TAG.replace_all(&text, "");
    let decoded = html_escape::decode_html_entities(&text);
    normalize_whitespace(&decoded)
}
