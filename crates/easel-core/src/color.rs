//! Color handling for Easel rendering elements
//!
//! This module provides the [`Color`] type, an opaque 8-bit RGB triple.
//! Colors can be parsed from any CSS color string through the `color`
//! crate and are encoded for canvas scripts as `#rrggbb`.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::Deserialize;

/// An opaque RGB color with 8-bit channels.
///
/// Alpha is not carried: canvas statements emitted by Easel always use the
/// six-digit hex form.
///
/// # Examples
///
/// ```
/// use easel_core::color::Color;
///
/// let red = Color::new("red").unwrap();
/// assert_eq!(red, Color::rgb(255, 0, 0));
/// assert_eq!(red.to_hex(), "#ff0000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates a color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// Colors outside the sRGB gamut are clamped per channel; alpha is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel_core::color::Color;
    ///
    /// let teal = Color::new("#008080").unwrap();
    /// assert_eq!(teal.green(), 128);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        let dynamic = DynamicColor::from_str(color_str)
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))?;
        let rgba = dynamic.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self::rgb(rgba.r, rgba.g, rgba.b))
    }

    /// Returns the red channel.
    pub fn red(self) -> u8 {
        self.r
    }

    /// Returns the green channel.
    pub fn green(self) -> u8 {
        self.g
    }

    /// Returns the blue channel.
    pub fn blue(self) -> u8 {
        self.b
    }

    /// Encodes the color as `#` followed by three lowercase, zero-padded hex
    /// channels.
    ///
    /// # Examples
    ///
    /// ```
    /// use easel_core::color::Color;
    ///
    /// assert_eq!(Color::rgb(5, 5, 5).to_hex(), "#050505");
    /// assert_eq!(Color::rgb(0, 128, 255).to_hex(), "#0080ff");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert_eq!(red, Ok(Color::rgb(255, 0, 0)));

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_new_named_and_functional() {
        assert_eq!(Color::new("blue").unwrap(), Color::rgb(0, 0, 255));
        assert_eq!(
            Color::new("rgb(10, 20, 30)").unwrap(),
            Color::rgb(10, 20, 30)
        );
    }

    #[test]
    fn test_color_new_drops_alpha() {
        let color = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn test_color_to_hex_examples() {
        assert_eq!(Color::rgb(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Color::rgb(255, 0, 0).to_hex(), "#ff0000");
        assert_eq!(Color::rgb(5, 5, 5).to_hex(), "#050505");
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }

    #[test]
    fn test_color_to_hex_pads_each_channel() {
        assert_eq!(Color::rgb(15, 16, 0).to_hex(), "#0f1000");
        assert_eq!(Color::rgb(0, 15, 255).to_hex(), "#000fff");
    }

    #[test]
    fn test_color_display_matches_hex() {
        let color = Color::rgb(18, 52, 86);
        assert_eq!(format!("{color}"), "#123456");
    }

    #[test]
    fn test_color_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            color: Color,
        }

        let holder: Holder = toml::from_str(r##"color = "#00ff00""##).unwrap();
        assert_eq!(holder.color, Color::rgb(0, 255, 0));

        let invalid: Result<Holder, _> = toml::from_str(r#"color = "chartreuse-ish""#);
        assert!(invalid.is_err());
    }
}
