//! Document reference resolution.
//!
//! Spreadsheet cells reference compliance documents (TDS, SDS, COA,
//! labels) hosted on Google Drive, in whatever shape the sheet maintainer
//! pasted: a share URL, a bare file id, or an `id=` query form. The
//! recognizers below run in priority order; the final fallback passes the
//! raw value through so a malformed cell degrades to a possibly-dead link
//! instead of an error. Resolution never fails: a blank cell is `None`.

/// Extract a Drive file id from a reference cell, or `None` when blank.
///
/// Rules, in priority order:
/// 1. share-URL path form, `…/file/d/<ID>/…`
/// 2. bare token: no `/` and longer than 20 characters (real ids are 25+)
/// 3. query-parameter form, `…?id=<ID>` or `…&id=<ID>`
/// 4. best-effort fallback: the trimmed input verbatim, which may not be
///    a valid id at all
pub fn extract_drive_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(id) = match_file_path(trimmed) {
        return Some(id.to_string());
    }
    if let Some(id) = match_bare_token(trimmed) {
        return Some(id.to_string());
    }
    if let Some(id) = match_id_param(trimmed) {
        return Some(id.to_string());
    }

    Some(trimmed.to_string())
}

/// Inline-view URL for a reference cell, `None` when the cell is blank.
pub fn view_url(reference: &str) -> Option<String> {
    extract_drive_id(reference)
        .map(|id| format!("https://drive.google.com/file/d/{}/view?usp=sharing", id))
}

/// Forced-download URL for a reference cell, `None` when the cell is blank.
pub fn download_url(reference: &str) -> Option<String> {
    extract_drive_id(reference)
        .map(|id| format!("https://drive.google.com/uc?export=download&id={}", id))
}

fn match_file_path(input: &str) -> Option<&str> {
    let start = input.find("/file/d/")? + "/file/d/".len();
    let id = leading_id(&input[start..]);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

fn match_bare_token(input: &str) -> Option<&str> {
    if !input.contains('/') && input.len() > 20 {
        Some(input)
    } else {
        None
    }
}

fn match_id_param(input: &str) -> Option<&str> {
    for marker in ["?id=", "&id="] {
        if let Some(pos) = input.find(marker) {
            let id = leading_id(&input[pos + marker.len()..]);
            if !id.is_empty() {
                return Some(id);
            }
        }
    }
    None
}

/// Longest leading run of id characters: `[A-Za-z0-9_-]`.
fn leading_id(input: &str) -> &str {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(input.len());
    &input[..end]
}
