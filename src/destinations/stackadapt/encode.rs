//! GraphQL scalar-escaping encoder
//!
//! GraphQL enum literals must appear unquoted, but a generic JSON serializer
//! has no notion of "this string is actually an enum". This module renders a
//! JSON value as text in which every object entry whose key is literally
//! `type` and whose value is a string becomes an unquoted uppercase enum
//! token, then escapes the remaining quotes so the result can be spliced
//! into an already-double-quoted GraphQL argument position.
//!
//! The rewrite walks the parsed JSON tree rather than pattern-matching the
//! serialized text, so `"type":"…"` occurring inside an unrelated string
//! value is left alone. Only keys literally named `type` are special-cased;
//! differently-named enum-valued keys are deliberately not covered.

use crate::types::JsonValue;

/// Render a JSON value as compact JSON text with `type` string fields
/// promoted to unquoted uppercase enum tokens
pub fn gql_enum_json(value: &JsonValue) -> String {
    let mut out = String::new();
    render(value, &mut out);
    out
}

/// Render a JSON value for embedding inside a double-quoted GraphQL literal
///
/// [`gql_enum_json`] plus escaping of every remaining `"` as `\"`. Pure and
/// deterministic: equal inputs yield byte-identical output.
pub fn stringify_with_escaped_quotes(value: &JsonValue) -> String {
    gql_enum_json(value).replace('"', "\\\"")
}

fn render(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Object(map) => {
            out.push('{');
            let mut first = true;
            for (key, entry) in map {
                if !first {
                    out.push(',');
                }
                first = false;
                render_leaf(&JsonValue::String(key.clone()), out);
                out.push(':');
                match entry {
                    JsonValue::String(s) if key == "type" => out.push_str(&s.to_uppercase()),
                    other => render(other, out),
                }
            }
            out.push('}');
        }
        JsonValue::Array(items) => {
            out.push('[');
            let mut first = true;
            for item in items {
                if !first {
                    out.push(',');
                }
                first = false;
                render(item, out);
            }
            out.push(']');
        }
        leaf => render_leaf(leaf, out),
    }
}

fn render_leaf(value: &JsonValue, out: &mut String) {
    // Serializing a primitive JSON value to a string is infallible.
    let text = serde_json::to_string(value).expect("primitive JSON serialization");
    out.push_str(&text);
}
