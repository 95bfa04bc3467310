//! Export backends for rendering element trees.
//!
//! This module provides the [`DrawVisitor`] trait implemented by renderers
//! that walk a [`RenderingElement`] tree. It is the final stage in the Easel
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Element producer (layout engine, scene file)
//!     ↓
//! RenderingElement tree
//!     ↓ export (this module)
//! Canvas script / HTML page
//! ```
//!
//! # Available Backends
//!
//! - [`canvas`] - HTML canvas script via [`canvas::CanvasScriptEmitter`]
//! - [`html`] - a standalone page around a canvas script
//!
//! # Error Handling
//!
//! Sink failures never abort a traversal. Each failed step is recorded as an
//! [`EmitError`] in the [`canvas::PaintReport`] returned to the caller.

pub mod canvas;
pub mod html;

use std::{fmt, io};

use thiserror::Error;

use easel_core::element::{ElementKind, RenderingElement};

/// A renderer that walks a rendering tree.
///
/// Implementors decide which element kinds they draw; kinds they do not
/// understand are skipped without error.
pub trait DrawVisitor {
    /// Visits one element, recursing into groups.
    fn visit(&mut self, element: &RenderingElement);
}

/// The part of an element's output a failed write belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStage {
    /// The `font` statement at the start of a paint or after a font change.
    Font,
    /// The white disc erasing lines behind a symbol.
    BackingCircle,
    /// The colored symbol text.
    Label,
    /// Stroke style, width and path of a line.
    Stroke,
}

impl EmitStage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::BackingCircle => "backing circle",
            Self::Label => "label",
            Self::Stroke => "stroke",
        }
    }
}

impl fmt::Display for EmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A sink write that failed while emitting one element.
#[derive(Debug, Error)]
#[error(
    "failed to write {stage}{}: {source}",
    .element.map(|kind| format!(" of {kind}")).unwrap_or_default()
)]
pub struct EmitError {
    element: Option<ElementKind>,
    stage: EmitStage,
    #[source]
    source: io::Error,
}

impl EmitError {
    pub fn new(element: Option<ElementKind>, stage: EmitStage, source: io::Error) -> Self {
        Self {
            element,
            stage,
            source,
        }
    }

    /// The element being drawn, or `None` for paint-level statements.
    pub fn element(&self) -> Option<ElementKind> {
        self.element
    }

    pub fn stage(&self) -> EmitStage {
        self.stage
    }

    pub fn io_error(&self) -> &io::Error {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_error_display() {
        let err = EmitError::new(
            Some(ElementKind::Symbol),
            EmitStage::BackingCircle,
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        assert_eq!(
            err.to_string(),
            "failed to write backing circle of symbol: pipe closed"
        );
        assert_eq!(err.element(), Some(ElementKind::Symbol));
        assert_eq!(err.io_error().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_emit_error_display_paint_level() {
        let err = EmitError::new(
            None,
            EmitStage::Font,
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert_eq!(err.to_string(), "failed to write font: disk full");
        assert_eq!(err.stage(), EmitStage::Font);
    }
}
