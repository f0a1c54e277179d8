//! Rewrites figure image paths so the notebook server can serve them.
//!
//! The IPython notebook serves files relative to the notebook directory
//! under a `files/` route, so `images/foo.png` must become
//! `files/images/foo.png`.

use std::collections::BTreeSet;

use tracing::debug;

use crate::dom::{Dom, NodeId};

/// Prefix the `src` of every `img` inside a `figure` with `prefix`.
///
/// Each image is rewritten once even when figures nest. Absolute paths and
/// URLs with a scheme are left alone, as are images without `src`.
/// Returns the number of images rewritten.
pub fn rewrite_figure_images(dom: &mut Dom, prefix: &str) -> usize {
    let images: BTreeSet<NodeId> = dom
        .find_all_by_tag("figure")
        .into_iter()
        .flat_map(|figure| dom.descendants(figure).collect::<Vec<_>>())
        .filter(|&id| dom.has_tag(id, "img"))
        .collect();

    let mut rewritten = 0;
    for img in images {
        let Some(src) = dom.get_attr(img, "src") else {
            continue;
        };
        let Some(new_src) = prefixed_path(prefix, src) else {
            continue;
        };
        debug!(from = src, to = %new_src, "rewriting figure image");
        if dom.set_attr(img, "src", new_src) {
            rewritten += 1;
        }
    }
    rewritten
}

/// `prefix` joined in front of a relative path, or `None` when the path
/// should not be touched.
pub fn prefixed_path(prefix: &str, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with('/') || src.starts_with('#') || has_scheme(src) {
        return None;
    }
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return None;
    }
    Some(format!("{prefix}/{src}"))
}

/// True for `http://…`, `data:…` and other scheme-qualified URLs.
fn has_scheme(src: &str) -> bool {
    let Some(colon) = src.find(':') else {
        return false;
    };
    let scheme = &src[..colon];
    !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
