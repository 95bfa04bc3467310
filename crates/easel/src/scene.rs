//! Scene files: rendering element trees stored as TOML.
//!
//! A scene has a single `[scene]` root element. Every element carries a
//! `type` tag naming its variant:
//!
//! ```toml
//! [scene]
//! type = "group"
//!
//! [[scene.children]]
//! type = "line"
//! x1 = 0.0
//! y1 = 0.0
//! x2 = 1.5
//! y2 = 0.0
//! width = 0.1
//!
//! [[scene.children]]
//! type = "symbol"
//! text = "O"
//! x = 1.5
//! y = 0.0
//! color = "#ff0d0d"
//! ```

use std::ops::Range;

use serde::Deserialize;
use thiserror::Error;

use easel_core::element::RenderingElement;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    scene: RenderingElement,
}

/// A scene file that could not be read into an element tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid scene: {message}")]
pub struct SceneError {
    message: String,
    span: Option<Range<usize>>,
}

impl SceneError {
    pub fn new(message: impl Into<String>, span: Option<Range<usize>>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// What is wrong, without location information.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending source text, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

impl From<toml::de::Error> for SceneError {
    fn from(err: toml::de::Error) -> Self {
        Self::new(err.message().trim_end(), err.span())
    }
}

/// Parses a TOML scene into its root element.
///
/// # Errors
///
/// Returns [`SceneError`] for TOML syntax errors, a missing `[scene]` table,
/// unknown element types, missing fields and unparsable colors.
pub fn parse_scene(source: &str) -> Result<RenderingElement, SceneError> {
    let file: SceneFile = toml::from_str(source)?;
    Ok(file.scene)
}
