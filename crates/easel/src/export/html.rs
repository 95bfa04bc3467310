//! Standalone HTML page around a canvas script.
//!
//! The page holds a single `<canvas>` element and an inline script that binds
//! `context` to its 2D drawing context before running the painted statements.

use std::io::{self, Write};

use super::canvas::encode::{CONTEXT, escape_js_string};

/// Canvas element attributes of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasElement<'a> {
    id: &'a str,
    width: u32,
    height: u32,
}

impl<'a> CanvasElement<'a> {
    pub fn new(id: &'a str, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Writes a complete HTML5 page that runs `script` against `canvas`.
pub fn write_page<W: Write + ?Sized>(
    sink: &mut W,
    canvas: CanvasElement<'_>,
    script: &str,
) -> io::Result<()> {
    let CanvasElement { id, width, height } = canvas;

    writeln!(sink, "<!DOCTYPE html>")?;
    writeln!(sink, "<html>")?;
    writeln!(sink, "<head>")?;
    writeln!(sink, "<meta charset=\"utf-8\">")?;
    writeln!(sink, "</head>")?;
    writeln!(sink, "<body>")?;
    writeln!(
        sink,
        "<canvas id=\"{}\" width=\"{width}\" height=\"{height}\"></canvas>",
        escape_html_attribute(id)
    )?;
    writeln!(sink, "<script>")?;
    writeln!(
        sink,
        "var {CONTEXT} = document.getElementById(\"{}\").getContext(\"2d\");",
        escape_js_string(id)
    )?;
    sink.write_all(script.as_bytes())?;
    if !script.is_empty() && !script.ends_with('\n') {
        writeln!(sink)?;
    }
    writeln!(sink, "</script>")?;
    writeln!(sink, "</body>")?;
    writeln!(sink, "</html>")
}

fn escape_html_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
