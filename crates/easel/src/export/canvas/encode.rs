//! Statement encoders for the canvas script.
//!
//! Each function appends one or more statements against a 2D context named
//! `context`. Encoders carry no style state: callers set fill or stroke style
//! before drawing.

use std::io::{self, Write};

/// Name of the drawing context variable in the emitted script.
pub const CONTEXT: &str = "context";

/// `context.font="<font>";` with `css_font` as an escaped string literal.
pub fn set_font<W: Write + ?Sized>(sink: &mut W, css_font: &str) -> io::Result<()> {
    writeln!(sink, "{CONTEXT}.font=\"{}\";", escape_js_string(css_font))
}

/// `context.fillStyle="<color>";`
pub fn fill_style<W: Write + ?Sized>(sink: &mut W, color: &str) -> io::Result<()> {
    write!(sink, "{CONTEXT}.fillStyle=\"{color}\";")
}

/// `context.strokeStyle="<color>";`
pub fn stroke_style<W: Write + ?Sized>(sink: &mut W, color: &str) -> io::Result<()> {
    writeln!(sink, "{CONTEXT}.strokeStyle=\"{color}\";")
}

/// `context.lineWidth=<width>;`
pub fn line_width<W: Write + ?Sized>(sink: &mut W, width: i32) -> io::Result<()> {
    writeln!(sink, "{CONTEXT}.lineWidth={width};")
}

/// Move to the first point, line to the second, stroke.
pub fn draw_line<W: Write + ?Sized>(
    sink: &mut W,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> io::Result<()> {
    write!(sink, "{CONTEXT}.moveTo({x1},{y1}); ")?;
    write!(sink, "{CONTEXT}.lineTo({x2},{y2}); ")?;
    writeln!(sink, "{CONTEXT}.stroke();")
}

/// A filled disc: begin path, full counterclockwise arc, close path, fill.
pub fn draw_circle<W: Write + ?Sized>(sink: &mut W, x: i32, y: i32, radius: i32) -> io::Result<()> {
    write!(sink, "{CONTEXT}.beginPath();")?;
    write!(sink, "{CONTEXT}.arc({x},{y},{radius},0,Math.PI*2,true);")?;
    write!(sink, "{CONTEXT}.closePath();")?;
    write!(sink, "{CONTEXT}.fill();")
}

/// `context.fillText("<text>",x,y);` with `text` as an escaped string literal.
pub fn fill_text<W: Write + ?Sized>(sink: &mut W, text: &str, x: i32, y: i32) -> io::Result<()> {
    writeln!(
        sink,
        "{CONTEXT}.fillText(\"{}\",{x},{y});",
        escape_js_string(text)
    )
}

/// Escapes `text` for use inside a double-quoted JavaScript string literal.
///
/// `<` is escaped as well so the script can be inlined in an HTML
/// `<script>` element.
pub fn escape_js_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '<' => escaped.push_str("\\x3C"),
            '\u{2028}' | '\u{2029}' => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04x}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}
