//! Generic JSON-to-XML conversion.
//!
//! Object keys become element names, restricted to `[A-Za-z0-9_.-]` with every
//! other character replaced by `_`. Array elements repeat under the singular
//! of the key (`playlists` → `playlist`, otherwise `item`). `null` becomes an
//! empty element. Scalars are escaped text.
//!
//! The converter accepts any `serde_json::Value` and never fails. It
//! recurses once per nesting level; `Value` trees cannot contain cycles.

use serde_json::Value;

use crate::utils::escape_markup;

const INDENT: &str = "  ";

/// Converts `value` into an XML document wrapped in `<root>`.
pub fn to_xml(value: &Value) -> String {
    let mut out = String::from("<root>\n");
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                write_member(&mut out, &sanitize_tag(key), v, 1);
            }
        }
        Value::Array(items) => write_array(&mut out, "item", items, 1),
        scalar => {
            out.push_str(INDENT);
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
    out.push_str("</root>");
    out
}

/// Replaces every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn sanitize_tag(key: &str) -> String {
    let tag: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if tag.is_empty() { "_".to_string() } else { tag }
}

fn singular(tag: &str) -> &str {
    match tag.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem,
        _ => "item",
    }
}

fn write_member(out: &mut String, tag: &str, value: &Value, depth: usize) {
    match value {
        Value::Array(items) => write_array(out, singular(tag), items, depth),
        other => write_element(out, tag, other, depth),
    }
}

fn write_array(out: &mut String, tag: &str, items: &[Value], depth: usize) {
    for item in items {
        write_element(out, tag, item, depth);
    }
}

fn write_element(out: &mut String, tag: &str, value: &Value, depth: usize) {
    let indent = INDENT.repeat(depth);
    match value {
        Value::Null => {
            out.push_str(&format!("{indent}<{tag}/>\n"));
        }
        Value::Object(map) => {
            out.push_str(&format!("{indent}<{tag}>\n"));
            for (key, v) in map {
                write_member(out, &sanitize_tag(key), v, depth + 1);
            }
            out.push_str(&format!("{indent}</{tag}>\n"));
        }
        Value::Array(items) => {
            out.push_str(&format!("{indent}<{tag}>\n"));
            write_array(out, "item", items, depth + 1);
            out.push_str(&format!("{indent}</{tag}>\n"));
        }
        scalar => {
            out.push_str(&format!("{indent}<{tag}>{}</{tag}>\n", scalar_text(scalar)));
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => escape_markup(s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
