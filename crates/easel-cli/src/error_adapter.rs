//! Error adapter for converting EaselError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan,
};

use easel::{EaselError, scene::SceneError};

/// Adapter for a malformed scene file.
///
/// Wraps a [`SceneError`] with the scene source so the offending span can be
/// shown in context.
pub struct SceneDiagnostic<'a> {
    err: &'a SceneError,
    src: &'a str,
}

impl<'a> SceneDiagnostic<'a> {
    pub fn new(err: &'a SceneError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for SceneDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for SceneDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for SceneDiagnostic<'_> {}

impl MietteDiagnostic for SceneDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("easel::scene"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a scene is a [scene] table whose elements have type = \"group\", \"symbol\", \"line\", \"rectangle\" or \"oval\"",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.err.message().to_string()), span),
        )))
    }
}

/// Adapter for non-scene [`EaselError`] variants.
///
/// This adapter handles errors without source locations: I/O errors,
/// configuration errors and export errors.
pub struct ErrorAdapter<'a>(pub &'a EaselError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            EaselError::Io(_) => "easel::io",
            EaselError::Scene { .. } => "easel::scene",
            EaselError::Config(_) => "easel::config",
            EaselError::Export(_) => "easel::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            EaselError::Export(_) => Some(Box::new(
                "rerun without --strict to keep the partial script",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A scene error with source location information.
    Diagnostic(SceneDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`EaselError`] into a list of reportable errors.
///
/// Scene errors become a [`SceneDiagnostic`] labeling the offending span;
/// every other variant becomes an [`ErrorAdapter`].
pub fn to_reportables(err: &EaselError) -> Vec<Reportable<'_>> {
    match err {
        EaselError::Scene { err, src } => {
            vec![Reportable::Diagnostic(SceneDiagnostic::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Renders every reportable of `err` with `handler`, one report after another.
///
/// # Errors
///
/// Returns [`fmt::Error`] if the handler fails to format a report.
pub fn render_report(
    err: &EaselError,
    handler: &GraphicalReportHandler,
) -> Result<String, fmt::Error> {
    let mut rendered = String::new();
    for reportable in to_reportables(err) {
        handler.render_report(&mut rendered, &reportable)?;
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use std::io;

    use easel::context::ConfigError;
    use miette::GraphicalTheme;

    use super::*;

    #[test]
    fn test_scene_diagnostic_label() {
        let src = "[scene]\ntype = \"polygon\"\n";
        let err = EaselError::new_scene_error(SceneError::new("unknown variant", Some(8..24)), src);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let Reportable::Diagnostic(d) = &reportables[0] else {
            panic!("Expected Diagnostic");
        };
        assert_eq!(d.to_string(), "invalid scene: unknown variant");

        let labels: Vec<_> = d.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label(), Some("unknown variant"));
        assert_eq!(labels[0].offset(), 8);
        assert_eq!(labels[0].len(), 16);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_scene_diagnostic_without_span() {
        let err = SceneError::new("missing field `scene`", None);
        let diag = SceneDiagnostic::new(&err, "");
        assert!(diag.labels().is_none());
        assert_eq!(diag.code().unwrap().to_string(), "easel::scene");
    }

    #[test]
    fn test_non_scene_errors() {
        let cases = [
            (EaselError::Io(io::Error::other("gone")), "easel::io"),
            (
                EaselError::Config(ConfigError::InvalidScale(0.0)),
                "easel::config",
            ),
            (EaselError::Export(Vec::new()), "easel::export"),
        ];

        for (err, code) in &cases {
            let reportables = to_reportables(err);
            assert_eq!(reportables.len(), 1);
            match &reportables[0] {
                Reportable::Error(e) => {
                    assert_eq!(e.code().unwrap().to_string(), *code);
                    assert_eq!(e.to_string(), err.to_string());
                }
                Reportable::Diagnostic(_) => panic!("Expected Error"),
            }
        }
    }

    #[test]
    fn test_render_report_plain() {
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::none());
        let err = EaselError::Config(ConfigError::InvalidScale(0.0));

        let rendered = render_report(&err, &handler).unwrap();
        assert!(rendered.contains("easel::config"), "{rendered}");
        assert!(rendered.contains("invalid scale 0"), "{rendered}");
    }

    #[test]
    fn test_render_report_labels_scene_source() {
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::none());
        let src = "[scene]\ntype = \"polygon\"\n";
        let err = EaselError::new_scene_error(SceneError::new("unknown variant", Some(8..24)), src);

        let rendered = render_report(&err, &handler).unwrap();
        assert!(rendered.contains("easel::scene"), "{rendered}");
        assert!(rendered.contains("type = \"polygon\""), "{rendered}");
    }
}
