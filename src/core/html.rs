// src/core/html.rs
// Just enough markup scanning to read attributes off open tags. Case-insensitive
// on tag and attribute names; byte offsets line up because only ASCII is lowered.

use super::sanitize::normalize_entities;

/// Every `<tag ...>` opening tag in `doc`, in document order.
pub fn open_tags_ci<'a>(doc: &'a str, tag: &str) -> Vec<&'a str> {
    let lc = doc.to_ascii_lowercase();
    let needle = format!("<{}", tag.to_ascii_lowercase());
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = lc[pos..].find(&needle) {
        let start = pos + rel;
        let after = start + needle.len();
        // `<meta` must not match `<metadata`
        let boundary = lc[after..].chars().next();
        if !matches!(boundary, Some(c) if c.is_whitespace() || c == '>' || c == '/') {
            pos = after;
            continue;
        }
        let Some(end_rel) = doc[after..].find('>') else { break };
        let end = after + end_rel + 1;
        out.push(&doc[start..end]);
        pos = end;
    }
    out
}

/// `(name, raw value)` pairs of one opening tag, in order. A valueless attribute
/// gets `""`. Quoted values are skipped whole, so their text never reads as a name.
fn attributes(tag: &str) -> Vec<(&str, &str)> {
    let is_end = |c: char| c.is_whitespace() || c == '>' || c == '/';
    let mut rest = tag.trim_start_matches('<').trim_start_matches(|c: char| !is_end(c));
    let mut out = Vec::new();

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() || rest.starts_with('>') {
            break;
        }
        let name_end = rest.find(|c: char| is_end(c) || c == '=').unwrap_or(rest.len());
        let name = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let Some(value) = rest.strip_prefix('=').map(str::trim_start) else {
            out.push((name, ""));
            continue;
        };
        let (raw, next) = match value.chars().next() {
            Some(q @ ('"' | '\'')) => match value[1..].find(q) {
                Some(close) => (&value[1..1 + close], &value[close + 2..]),
                None => (&value[1..], ""),
            },
            _ => {
                let end = value.find(|c: char| c.is_whitespace() || c == '>').unwrap_or(value.len());
                let bare = &value[..end];
                // `name=x/>` closes the tag, the slash is not part of the value
                let bare = match bare.strip_suffix('/') {
                    Some(b) if value[end..].starts_with('>') => b,
                    _ => bare,
                };
                (bare, &value[end..])
            }
        };
        out.push((name, raw));
        rest = next;
    }
    out
}

/// Value of `attr` on a single opening tag. Handles `"..."`, `'...'` and bare values.
pub fn attr_value(tag: &str, attr: &str) -> Option<String> {
    attributes(tag)
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(attr))
        .map(|(_, raw)| normalize_entities(raw))
}

/// `content` of the first `<meta name="{name}">` with a non-empty value.
pub fn meta_content(doc: &str, name: &str) -> Option<String> {
    open_tags_ci(doc, "meta")
        .into_iter()
        .filter(|t| attr_value(t, "name").is_some_and(|n| n.eq_ignore_ascii_case(name)))
        .filter_map(|t| attr_value(t, "content"))
        .find(|c| !c.is_empty())
}
