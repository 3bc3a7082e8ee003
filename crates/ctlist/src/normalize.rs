//! Turns the markup of a result cell into plain host names.

use lazy_regex::regex;

/// Entities left behind by the HTML serializer. `&amp;` comes last so that
/// `&amp;lt;` decodes to `&lt;` and not to `<`.
const ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

/// Replaces line-break tags with newlines, drops every other tag and decodes
/// the fixed set of entities.
pub fn normalize_markup(markup: &str) -> String {
    let line_break = regex!(r"(?i)<br\b[^>]*>");
    let any_tag = regex!(r"<[^>]*>");

    let text = line_break.replace_all(markup, "\n");
    let text = any_tag.replace_all(&text, "");

    ENTITIES
        .iter()
        .fold(text.into_owned(), |text, (entity, decoded)| {
            text.replace(entity, decoded)
        })
}

/// One trimmed, non-empty name per line of the normalized markup.
pub fn split_names(markup: &str) -> Vec<String> {
    normalize_markup(markup)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
