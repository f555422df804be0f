//! Slug generation for family and category labels.
//!
//! `slugify` is the single source of identifier truth for the taxonomy:
//! the grouping pass, the default taxonomy, and every URL path all go
//! through it, so a spreadsheet label and a curated label that differ
//! only in accents or punctuation land on the same slug.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Slug used when a label is blank or reduces to nothing.
pub const FALLBACK_SLUG: &str = "general";

/// Convert a free-text label to a URL-safe slug.
///
/// Lowercases, strips diacritics via NFD decomposition, collapses any run
/// of characters outside `[a-z0-9]` to a single hyphen, and trims leading
/// and trailing hyphens. Blank input, or input with no usable characters
/// at all, yields [`FALLBACK_SLUG`] so every label maps to a non-empty
/// slug. Idempotent: slugifying a slug returns it unchanged.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Best-effort display form of a slug: hyphens to spaces, words
/// title-cased. Used by consumers that only hold a slug (breadcrumbs,
/// not-found pages); the merged taxonomy carries real display names.
pub fn unslugify(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
