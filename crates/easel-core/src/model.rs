//! Renderer model: keyed rendering parameters.
//!
//! Rendering parameters (scale, zoom, ...) are looked up by name. Renderers
//! read the parameters they need and ignore the rest.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Parameter key for the scale, in device pixels per model unit.
pub const SCALE: &str = "scale";

/// A keyed store of numeric rendering parameters.
///
/// The default model carries `scale = 1.0`. A deserialized table without a
/// `scale` entry gets the same default.
///
/// # Examples
///
/// ```
/// # use easel_core::model::{RendererModel, SCALE};
/// let model = RendererModel::empty().with_parameter(SCALE, 30.0);
/// assert_eq!(model.scale(), Some(30.0));
/// assert_eq!(model.parameter("zoom"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, f64>")]
pub struct RendererModel {
    parameters: BTreeMap<String, f64>,
}

impl From<BTreeMap<String, f64>> for RendererModel {
    fn from(mut parameters: BTreeMap<String, f64>) -> Self {
        parameters.entry(SCALE.to_string()).or_insert(1.0);
        Self { parameters }
    }
}

impl Default for RendererModel {
    fn default() -> Self {
        Self::empty().with_parameter(SCALE, 1.0)
    }
}

impl RendererModel {
    /// Creates a model with no parameters.
    pub fn empty() -> Self {
        Self {
            parameters: BTreeMap::new(),
        }
    }

    /// Sets a parameter (builder style).
    pub fn with_parameter(mut self, name: &str, value: f64) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set_parameter(&mut self, name: &str, value: f64) {
        self.parameters.insert(name.to_string(), value);
    }

    /// Returns the value of a parameter, if set.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters.get(name).copied()
    }

    /// Returns the [`SCALE`] parameter, if set.
    pub fn scale(&self) -> Option<f64> {
        self.parameter(SCALE)
    }

    /// Iterates over all parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.parameters
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }
}
