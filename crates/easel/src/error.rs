//! Error types for Easel operations.
//!
//! This module provides the main error type [`EaselError`] which wraps
//! the error conditions that can occur while loading and painting scenes.

use std::io;

use thiserror::Error;

use crate::{context::ConfigError, export::EmitError, scene::SceneError};

/// The main error type for Easel operations.
///
/// # Diagnostic Variants
///
/// The `Scene` variant keeps the scene source next to the error, so the
/// offending span can be shown in rich error reports.
#[derive(Debug, Error)]
pub enum EaselError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Scene { err: SceneError, src: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(
        "Export error: {} statement(s) could not be written{}",
        .0.len(),
        .0.first().map(|err| format!(", first: {err}")).unwrap_or_default()
    )]
    Export(Vec<EmitError>),
}

impl EaselError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(err: SceneError, src: impl Into<String>) -> Self {
        Self::Scene {
            err,
            src: src.into(),
        }
    }
}
