//! HTML canvas script backend.
//!
//! [`CanvasScriptEmitter`] walks a rendering tree and writes JavaScript
//! statements against a 2D drawing context named `context`. Coordinates are
//! mapped to integer device pixels through the paint context's transform.
//!
//! # Output
//!
//! A symbol `"Cl"` at device point `(100, 50)` produces, in order:
//!
//! ```text
//! context.fillStyle="#FFFFFF";context.beginPath();context.arc(100,50,9,0,Math.PI*2,true);context.closePath();context.fill();context.fillStyle="#1ff01f";context.fillText("Cl",92,56);
//! ```
//!
//! A line produces:
//!
//! ```text
//! context.strokeStyle="#444444";
//! context.lineWidth=3;
//! context.moveTo(10,10); context.lineTo(90,10); context.stroke();
//! ```
//!
//! # Example
//!
//! ```
//! use easel::{context::PaintContext, export::canvas};
//! use easel_core::{
//!     color::Color,
//!     element::{ElementGroup, LineElement, RenderingElement, SymbolElement},
//!     geometry::Transform,
//!     model::RendererModel,
//!     text::{CosmicTextMetrics, FontDescriptor},
//! };
//!
//! let tree: RenderingElement = ElementGroup::new()
//!     .with_child(LineElement::new(10.0, 10.0, 90.0, 10.0, 3.0))
//!     .with_child(SymbolElement::new("O", 90.0, 10.0, Color::rgb(255, 13, 13)))
//!     .into();
//!
//! let font = FontDescriptor::default();
//! let context = PaintContext::new(
//!     Transform::IDENTITY,
//!     &RendererModel::default(),
//!     &font,
//!     &CosmicTextMetrics,
//! )
//! .unwrap();
//!
//! let mut script = Vec::new();
//! let report = canvas::paint(&mut script, &context, &tree);
//! assert!(report.is_clean());
//! assert_eq!((report.lines(), report.symbols()), (1, 1));
//! ```

pub mod encode;

use std::io::{self, Write};

use log::{debug, trace, warn};

use easel_core::{
    element::{ElementKind, LineElement, RenderingElement, SymbolElement},
    text::{FontDescriptor, TextExtent},
};

use crate::{
    context::PaintContext,
    export::{DrawVisitor, EmitError, EmitStage},
};

/// Fill used for the disc behind symbol labels.
pub const BACKING_FILL: &str = "#FFFFFF";
/// Stroke color of every line.
pub const LINE_STROKE: &str = "#444444";

/// Returns true for the element kinds this backend draws. Other kinds are
/// skipped and counted in [`PaintReport::skipped`].
pub fn is_painted(kind: ElementKind) -> bool {
    matches!(kind, ElementKind::Symbol | ElementKind::Line)
}

/// Paints `root` into `sink` and returns what happened.
///
/// The font statement comes first, followed by the tree in depth-first
/// pre-order.
pub fn paint<W: Write>(
    sink: &mut W,
    context: &PaintContext<'_>,
    root: &RenderingElement,
) -> PaintReport {
    let mut emitter = CanvasScriptEmitter::new(sink, context);
    emitter.paint(root);
    emitter.finish()
}

/// Outcome of one paint call.
#[derive(Debug, Default)]
pub struct PaintReport {
    errors: Vec<EmitError>,
    symbols: usize,
    lines: usize,
    skipped: usize,
}

impl PaintReport {
    /// Sink failures, in the order they happened.
    pub fn errors(&self) -> &[EmitError] {
        &self.errors
    }

    /// Consumes the report, returning its sink failures.
    pub fn into_errors(self) -> Vec<EmitError> {
        self.errors
    }

    /// Number of symbols visited.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Number of lines visited.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of elements of kinds this backend does not draw.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns true if every statement was written.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Emits canvas statements for rendering elements.
///
/// The emitter borrows its sink exclusively for its whole lifetime and holds
/// no other mutable state than the current font and the report.
pub struct CanvasScriptEmitter<'a, W: Write> {
    sink: &'a mut W,
    context: &'a PaintContext<'a>,
    font: &'a FontDescriptor,
    report: PaintReport,
}

impl<'a, W: Write> CanvasScriptEmitter<'a, W> {
    /// Creates an emitter using the context's font.
    ///
    /// Nothing is written until [`paint`](Self::paint), [`set_font`](Self::set_font)
    /// or [`visit`](DrawVisitor::visit) is called.
    pub fn new(sink: &'a mut W, context: &'a PaintContext<'a>) -> Self {
        Self {
            sink,
            context,
            font: context.font(),
            report: PaintReport::default(),
        }
    }

    /// Emits the font statement, then visits `root`.
    pub fn paint(&mut self, root: &RenderingElement) {
        self.set_font(self.font);
        self.visit(root);
    }

    /// Emits a `font` statement and measures subsequent symbols with `font`.
    pub fn set_font(&mut self, font: &'a FontDescriptor) {
        self.font = font;
        let css_font = font.css_font();
        self.step(None, EmitStage::Font, |sink| encode::set_font(sink, &css_font));
    }

    /// Returns the report, ending the emitter's borrow of the sink.
    pub fn finish(self) -> PaintReport {
        self.report
    }

    /// Emits the backing circle and the label of a symbol.
    ///
    /// A failure while writing the backing circle does not prevent the label
    /// from being attempted.
    pub fn visit_symbol(&mut self, symbol: &SymbolElement) {
        self.report.symbols += 1;

        let position = symbol.position();
        let (x, y) = self
            .context
            .transform()
            .transform_point(position.x(), position.y());
        let extent = self.context.metrics().measure(symbol.text(), self.font);
        let radius = backing_radius(extent);
        let (base_x, base_y) = text_base_point(extent, x, y);

        debug!(
            text = symbol.text(),
            x, y, radius, base_x, base_y;
            "Emitting symbol"
        );

        self.step(Some(ElementKind::Symbol), EmitStage::BackingCircle, |sink| {
            encode::fill_style(sink, BACKING_FILL)?;
            encode::draw_circle(sink, x, y, radius)
        });

        let color = symbol.color().to_hex();
        self.step(Some(ElementKind::Symbol), EmitStage::Label, |sink| {
            encode::fill_style(sink, &color)?;
            encode::fill_text(sink, symbol.text(), base_x, base_y)
        });
    }

    /// Emits stroke style, width and path of a line.
    pub fn visit_line(&mut self, line: &LineElement) {
        self.report.lines += 1;

        let transform = self.context.transform();
        let (x1, y1) = transform.transform_point(line.first().x(), line.first().y());
        let (x2, y2) = transform.transform_point(line.second().x(), line.second().y());
        let width = device_line_width(line.width(), self.context.scale());

        debug!(x1, y1, x2, y2, width; "Emitting line");

        self.step(Some(ElementKind::Line), EmitStage::Stroke, |sink| {
            encode::stroke_style(sink, LINE_STROKE)?;
            encode::line_width(sink, width)?;
            encode::draw_line(sink, x1, y1, x2, y2)
        });
    }

    /// Runs one write step, recording its failure instead of propagating it.
    fn step(
        &mut self,
        element: Option<ElementKind>,
        stage: EmitStage,
        write: impl FnOnce(&mut W) -> io::Result<()>,
    ) {
        if let Err(err) = write(&mut *self.sink) {
            warn!(
                element = element.map_or("paint", ElementKind::name),
                stage = stage.name(),
                err:err;
                "Failed to write canvas statement"
            );
            self.report.errors.push(EmitError::new(element, stage, err));
        }
    }
}

impl<W: Write> DrawVisitor for CanvasScriptEmitter<'_, W> {
    fn visit(&mut self, element: &RenderingElement) {
        match element {
            RenderingElement::Group(group) => {
                trace!(children = group.children().len(); "Visiting group");
                for child in group.children() {
                    self.visit(child);
                }
            }
            RenderingElement::Symbol(symbol) => self.visit_symbol(symbol),
            RenderingElement::Line(line) => self.visit_line(line),
            RenderingElement::Rectangle(_) | RenderingElement::Oval(_) => {
                debug!(kind = element.kind().name(); "Skipping unsupported element");
                self.report.skipped += 1;
            }
        }
    }
}

/// Radius of the disc behind a label: half the larger of the truncated
/// width and height.
fn backing_radius(extent: TextExtent) -> i32 {
    (extent.width() as i32).max(extent.height() as i32) / 2
}

/// Baseline origin that centers a label on `(x, y)`.
fn text_base_point(extent: TextExtent, x: i32, y: i32) -> (i32, i32) {
    let base_x = x as f64 - extent.width() / 2.0;
    let base_y = y as f64 + (extent.ascent() - extent.height() / 2.0);
    (base_x as i32, base_y as i32)
}

/// Device line width, truncated toward zero; negative widths become 1.
fn device_line_width(model_width: f64, scale: f64) -> i32 {
    let width = (model_width * scale) as i32;
    if width < 0 { 1 } else { width }
}

#[cfg(test)]
mod tests {
    use easel_core::{
        color::Color,
        element::{ElementGroup, OvalElement, RectangleElement},
        geometry::Transform,
        model::{RendererModel, SCALE},
        text::TextMetrics,
    };

    use super::*;

    /// Every glyph is 8px wide, 16px tall, with a 12px ascent.
    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn measure(&self, text: &str, _font: &FontDescriptor) -> TextExtent {
            TextExtent::new(8.0 * text.chars().count() as f64, 16.0, 12.0)
        }
    }

    /// Fails every write whose buffer contains `needle`.
    struct FailingSink {
        needle: &'static str,
        written: String,
    }

    impl FailingSink {
        fn new(needle: &'static str) -> Self {
            Self {
                needle,
                written: String::new(),
            }
        }
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let chunk = String::from_utf8_lossy(buf);
            if chunk.contains(self.needle) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.written.push_str(&chunk);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_context<T>(scale: f64, f: impl FnOnce(&PaintContext<'_>) -> T) -> T {
        let font = FontDescriptor::default();
        let model = RendererModel::empty().with_parameter(SCALE, scale);
        let context = PaintContext::new(Transform::IDENTITY, &model, &font, &FixedMetrics)
            .expect("valid context");
        f(&context)
    }

    fn render(scale: f64, root: &RenderingElement) -> (String, PaintReport) {
        with_context(scale, |context| {
            let mut sink = Vec::new();
            let report = paint(&mut sink, context, root);
            (String::from_utf8(sink).unwrap(), report)
        })
    }

    fn visit_only(scale: f64, root: &RenderingElement) -> String {
        with_context(scale, |context| {
            let mut sink = Vec::new();
            let mut emitter = CanvasScriptEmitter::new(&mut sink, context);
            emitter.visit(root);
            assert!(emitter.finish().is_clean());
            String::from_utf8(sink).unwrap()
        })
    }

    #[test]
    fn test_paint_starts_with_font() {
        let (script, report) = render(1.0, &ElementGroup::new().into());
        assert_eq!(script, "context.font=\"12pt Arial\";\n");
        assert!(report.is_clean());
    }

    #[test]
    fn test_symbol_output() {
        let symbol = SymbolElement::new("Cl", 100.0, 50.0, Color::rgb(31, 240, 31));
        let script = visit_only(1.0, &symbol.into());

        // extent 16x16, ascent 12: radius 8, base (100 - 8, 50 + 12 - 8)
        assert_eq!(
            script,
            "context.fillStyle=\"#FFFFFF\";context.beginPath();\
             context.arc(100,50,8,0,Math.PI*2,true);context.closePath();context.fill();\
             context.fillStyle=\"#1ff01f\";context.fillText(\"Cl\",92,54);\n"
        );
    }

    #[test]
    fn test_backing_circle_precedes_label() {
        let symbol = SymbolElement::new("Cl", 0.0, 0.0, Color::BLACK);
        let script = visit_only(1.0, &symbol.into());
        let circle = script.find("context.arc(").unwrap();
        let text = script.find("context.fillText(").unwrap();
        assert!(circle < text);
    }

    #[test]
    fn test_line_output() {
        let line = LineElement::new(10.0, 10.0, 90.0, 10.0, 0.1);
        let script = visit_only(30.0, &line.into());
        assert_eq!(
            script,
            "context.strokeStyle=\"#444444\";\n\
             context.lineWidth=3;\n\
             context.moveTo(10,10); context.lineTo(90,10); context.stroke();\n"
        );
    }

    #[test]
    fn test_negative_line_width_clamps_to_one() {
        let line = LineElement::new(0.0, 0.0, 1.0, 1.0, -5.0);
        let script = visit_only(1.0, &line.into());
        assert!(script.contains("context.lineWidth=1;\n"));
    }

    #[test]
    fn test_transform_applies_to_points() {
        let font = FontDescriptor::default();
        let model = RendererModel::default();
        let transform = Transform::scale(2.0, 2.0).then(Transform::translate(5.0, -5.0));
        let context = PaintContext::new(transform, &model, &font, &FixedMetrics).unwrap();

        let mut sink = Vec::new();
        let mut emitter = CanvasScriptEmitter::new(&mut sink, &context);
        emitter.visit(&LineElement::new(1.0, 1.0, 3.5, 4.0, 1.0).into());
        drop(emitter);

        let script = String::from_utf8(sink).unwrap();
        assert!(script.contains("context.moveTo(7,-3); context.lineTo(12,3);"));
    }

    #[test]
    fn test_group_concatenates_children() {
        let line = LineElement::new(0.0, 0.0, 10.0, 0.0, 2.0);
        let symbol = SymbolElement::new("O", 10.0, 0.0, Color::rgb(255, 13, 13));
        let group: RenderingElement = ElementGroup::new()
            .with_child(line.clone())
            .with_child(ElementGroup::new().with_child(symbol.clone()))
            .into();

        let expected = visit_only(1.0, &line.into()) + &visit_only(1.0, &symbol.into());
        assert_eq!(visit_only(1.0, &group), expected);
    }

    #[test]
    fn test_empty_group_emits_nothing() {
        assert_eq!(visit_only(1.0, &ElementGroup::new().into()), "");
    }

    #[test]
    fn test_unsupported_elements_are_skipped() {
        let group: RenderingElement = ElementGroup::new()
            .with_child(RectangleElement::new(0.0, 0.0, 5.0, 5.0, true, Color::BLACK))
            .with_child(OvalElement::new(0.0, 0.0, 2.0, false, Color::BLACK))
            .with_child(LineElement::new(0.0, 0.0, 1.0, 0.0, 1.0))
            .into();

        let (script, report) = render(1.0, &group);
        assert!(report.is_clean());
        assert_eq!(report.skipped(), 2);
        assert!(!is_painted(ElementKind::Rectangle));
        assert!(!is_painted(ElementKind::Oval));
        assert!(is_painted(ElementKind::Symbol));
        assert_eq!(report.lines(), 1);
        assert_eq!(script.matches("context.").count(), 6);
    }

    #[test]
    fn test_output_is_deterministic() {
        let group: RenderingElement = ElementGroup::new()
            .with_child(LineElement::new(0.0, 0.0, 10.0, 5.0, 1.5))
            .with_child(SymbolElement::new("N", 10.0, 5.0, Color::rgb(48, 80, 248)))
            .into();
        assert_eq!(render(4.0, &group).0, render(4.0, &group).0);
    }

    #[test]
    fn test_set_font_emits_statement() {
        let large = FontDescriptor::new("Courier", 20);
        with_context(1.0, |context| {
            let mut sink = Vec::new();
            let mut emitter = CanvasScriptEmitter::new(&mut sink, context);
            emitter.set_font(&large);
            assert!(emitter.finish().is_clean());
            assert_eq!(
                String::from_utf8(sink).unwrap(),
                "context.font=\"20pt Courier\";\n"
            );
        });
    }

    #[test]
    fn test_backing_failure_still_attempts_label() {
        let symbol = SymbolElement::new("Cl", 0.0, 0.0, Color::BLACK);
        with_context(1.0, |context| {
            let mut sink = FailingSink::new("arc(");
            let report = paint(&mut sink, context, &symbol.into());

            assert_eq!(report.errors().len(), 1);
            let err = &report.errors()[0];
            assert_eq!(err.element(), Some(ElementKind::Symbol));
            assert_eq!(err.stage(), EmitStage::BackingCircle);
            assert!(sink.written.contains("context.fillText(\"Cl\""));
        });
    }

    #[test]
    fn test_failures_do_not_stop_traversal() {
        let group: RenderingElement = ElementGroup::new()
            .with_child(LineElement::new(0.0, 0.0, 1.0, 0.0, 1.0))
            .with_child(LineElement::new(0.0, 0.0, 2.0, 0.0, 1.0))
            .with_child(SymbolElement::new("S", 1.0, 1.0, Color::BLACK))
            .into();

        with_context(1.0, |context| {
            let mut sink = FailingSink::new("lineWidth");
            let report = paint(&mut sink, context, &group);

            assert_eq!(report.lines(), 2);
            assert_eq!(report.symbols(), 1);
            assert_eq!(report.errors().len(), 2);
            assert!(report.errors().iter().all(|e| e.stage() == EmitStage::Stroke));
            assert!(!sink.written.contains("moveTo"));
            assert!(sink.written.contains("context.fillText(\"S\""));
        });
    }

    #[test]
    fn test_backing_radius() {
        assert_eq!(backing_radius(TextExtent::new(17.8, 16.1, 12.0)), 8);
        assert_eq!(backing_radius(TextExtent::new(10.0, 21.9, 12.0)), 10);
        assert_eq!(backing_radius(TextExtent::default()), 0);
    }

    #[test]
    fn test_text_base_point() {
        // width 16, height 20, ascent 15: x - 8, y + (15 - 10)
        let extent = TextExtent::new(16.0, 20.0, 15.0);
        assert_eq!(text_base_point(extent, 100, 50), (92, 55));
    }

    #[test]
    fn test_text_base_point_truncates_toward_zero() {
        let extent = TextExtent::new(5.0, 4.0, 1.0);
        // x: 1 - 2.5 = -1.5 -> -1, y: 0 + (1 - 2) = -1
        assert_eq!(text_base_point(extent, 1, 0), (-1, -1));
    }

    #[test]
    fn test_device_line_width() {
        assert_eq!(device_line_width(0.1, 30.0), 3);
        assert_eq!(device_line_width(0.05, 30.0), 1);
        assert_eq!(device_line_width(0.01, 30.0), 0);
        assert_eq!(device_line_width(-5.0, 2.0), 1);
        assert_eq!(device_line_width(2.0, -3.0), 1);
        assert_eq!(device_line_width(-0.1, 5.0), 0);
    }
}
