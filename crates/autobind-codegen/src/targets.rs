//! Built-in generation targets
//!
//! Each target is a plain function from a [`RenderContext`](crate::RenderContext)
//! to output text, written with `String` building the same way for all four.

pub mod cpp_binding;
pub mod json_codec;
pub mod native_shim;
pub mod pyi_stub;

/// First line of every generated file (comment syntax added per target).
pub(crate) const GENERATED_NOTICE: &str = "Generated by autobind. Do not edit.";

/// Escape text for a C++ string literal.
pub(crate) fn cpp_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Prefix every non-empty line with `width` spaces.
pub(crate) fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
