// src/core/sanitize.rs

/// Decode the handful of entities that show up in attribute values.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Inbox handle → file-name stem. Every char outside `[A-Za-z0-9_-]` becomes `_`,
/// one for one (no collapsing), so distinct handles stay distinct.
pub fn sanitize_scope(handle: &str) -> String {
    handle
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' { ch } else { '_' })
        .collect()
}
