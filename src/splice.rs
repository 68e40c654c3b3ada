// Template splicing - pure string rewriting of page template source.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel comment a theme places in the detail template to opt in to an
/// explicit insertion point.
pub const RELATED_PRODUCT_TAG: &str = "<!--# RelatedProductPlugin-Tag #-->";

/// Literal anchor on the admin product editor; the form fragment goes
/// immediately before it.
pub const ADMIN_FOOTER_ANCHOR: &str =
    r#"<div id="detail_box__footer" class="row hidden-xs hidden-sm">"#;

/// Fallback anchor for themes without the sentinel: the free-area conditional
/// block of the stock detail template, matched non-greedily across lines.
static FREE_AREA_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{% if Product\.freearea %\}.*?\{% endif %\}")
        .expect("free-area pattern is valid")
});

/// Where to place a fragment relative to a located anchor.
#[derive(Debug, Clone, Copy)]
pub enum SpliceMode<'a> {
    /// After the first occurrence of a marker token; the marker is kept.
    AfterMarker(&'a str),
    /// After the first full match of a block pattern; the block is kept.
    AfterBlock(&'a Regex),
    /// Before the first occurrence of a literal anchor string.
    BeforeAnchor(&'a str),
}

/// Insert `fragment` into `source` at the position selected by `mode`.
/// When the anchor is not found the source comes back unchanged; splicing
/// never inserts at an undefined location.
pub fn splice(source: &str, fragment: &str, mode: SpliceMode<'_>) -> String {
    let insert_at = match mode {
        SpliceMode::AfterMarker(marker) => source.find(marker).map(|at| at + marker.len()),
        SpliceMode::AfterBlock(pattern) => pattern.find(source).map(|m| m.end()),
        SpliceMode::BeforeAnchor(anchor) => source.find(anchor),
    };
    match insert_at {
        Some(at) => {
            let mut out = String::with_capacity(source.len() + fragment.len());
            out.push_str(&source[..at]);
            out.push_str(fragment);
            out.push_str(&source[at..]);
            out
        }
        None => source.to_string(),
    }
}

/// Storefront strategy: the explicit marker wins, the free-area block is the
/// fallback. No anchor at all leaves the page untouched.
pub fn splice_storefront(source: &str, fragment: &str) -> String {
    if source.contains(RELATED_PRODUCT_TAG) {
        splice(source, fragment, SpliceMode::AfterMarker(RELATED_PRODUCT_TAG))
    } else {
        splice(source, fragment, SpliceMode::AfterBlock(&FREE_AREA_BLOCK))
    }
}

/// Admin strategy: the form fragment goes ahead of the footer container and
/// the modal dialog is appended at the very end of the page.
pub fn splice_admin(source: &str, fragment: &str, modal: &str) -> String {
    let mut out = splice(source, fragment, SpliceMode::BeforeAnchor(ADMIN_FOOTER_ANCHOR));
    out.push_str(modal);
    out
}
