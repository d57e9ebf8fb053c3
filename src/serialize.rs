//! Markup serialization of compile-time values.
//!
//! Everything written here ends up inside a literal template segment, so it
//! is escaped here. Values deferred to holes never pass through this module;
//! escaping those is the runtime template function's job.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use crate::eval::{Mapping, StaticValue};

static VOID_ELEMENTS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track",
        "wbr",
    ]
    .into_iter()
    .collect()
});

static RAW_TEXT_ELEMENTS: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| ["script", "style"].into_iter().collect());

/// Elements that never have children and close with a bare `>`.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(tag)
}

/// Elements whose text content is written without markup escaping.
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(tag)
}

/// Neutralizes the characters that are significant in markup text and in
/// double-quoted attribute values.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders one attribute. `None` when the attribute is omitted entirely
/// (`false`, `null`, `undefined`) or has no static text form.
pub fn serialize_attribute(name: &str, value: &StaticValue) -> Option<String> {
    match value {
        StaticValue::Bool(true) => Some(name.to_string()),
        StaticValue::Bool(false) | StaticValue::Null | StaticValue::Undefined => None,
        other => {
            let text = other.to_js_string()?;
            Some(format!("{name}=\"{}\"", escape_text(&text)))
        }
    }
}

/// Renders a folded attribute mapping in mapping order, space separated.
pub fn serialize_attributes(attrs: &Mapping) -> String {
    attrs
        .iter()
        .filter_map(|(name, value)| serialize_attribute(name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a static child value as text content.
///
/// Booleans, `null` and `undefined` render nothing, as they do in JSX.
/// Returns `None` for mappings, which must be left to the runtime.
pub fn serialize_child(value: &StaticValue, raw_text: bool) -> Option<String> {
    let text = match value {
        StaticValue::Bool(..) | StaticValue::Null | StaticValue::Undefined => return Some(String::new()),
        StaticValue::Mapping(..) => return None,
        other => other.to_js_string()?,
    };
    Some(if raw_text { text } else { escape_text(&text) })
}
