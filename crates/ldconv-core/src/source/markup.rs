//! Markup trimming for entry content.

/// Remove `<...>` tags from `content` and trim surrounding whitespace.
///
/// Text between tags is kept verbatim. An unterminated `<` is kept as text.
pub fn strip_tags(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}
