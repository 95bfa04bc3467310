//! Rendering elements: the abstract drawing primitives Easel consumes.
//!
//! A drawing is a tree of [`RenderingElement`]s in model space. Producers
//! (layout engines, scene generators, scene files) build the tree; renderers
//! walk it. Groups own their children in draw order.
//!
//! # Example
//!
//! ```
//! # use easel_core::{color::Color, element::*};
//! let tree = RenderingElement::from(ElementGroup::from_iter([
//!     LineElement::new(0.0, 0.0, 1.5, 0.0, 0.1).into(),
//!     SymbolElement::new("O", 1.5, 0.0, Color::rgb(255, 13, 13)).into(),
//! ]));
//!
//! assert_eq!(tree.iter().count(), 3);
//! assert!(tree.bounds_of(|_| true).is_some());
//! ```

use std::fmt;

use serde::Deserialize;

use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
};

/// A node of the rendering tree.
///
/// Renderers draw the variants they understand and skip the others, so new
/// variants can be added without breaking existing renderers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderingElement {
    Group(ElementGroup),
    Symbol(SymbolElement),
    Line(LineElement),
    Rectangle(RectangleElement),
    Oval(OvalElement),
}

/// Discriminant of a [`RenderingElement`], for logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Group,
    Symbol,
    Line,
    Rectangle,
    Oval,
}

impl ElementKind {
    /// Returns a human-readable name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Symbol => "symbol",
            Self::Line => "line",
            Self::Rectangle => "rectangle",
            Self::Oval => "oval",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl RenderingElement {
    /// Returns the kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Group(_) => ElementKind::Group,
            Self::Symbol(_) => ElementKind::Symbol,
            Self::Line(_) => ElementKind::Line,
            Self::Rectangle(_) => ElementKind::Rectangle,
            Self::Oval(_) => ElementKind::Oval,
        }
    }

    /// Iterates over this element and all its descendants in depth-first
    /// pre-order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Returns the model-space bounds of the elements whose kind passes
    /// `include`, or `None` when no such element has geometry (e.g. an empty
    /// group).
    ///
    /// Symbols contribute only their anchor point: their extent depends on
    /// the font, which is a rendering concern.
    pub fn bounds_of(&self, include: impl Fn(ElementKind) -> bool) -> Option<Bounds> {
        self.iter()
            .filter(|element| include(element.kind()))
            .filter_map(|element| match element {
                Self::Group(_) => None,
                Self::Symbol(symbol) => {
                    Some(Bounds::new_from_corners(symbol.position(), symbol.position()))
                }
                Self::Line(line) => Some(Bounds::new_from_corners(line.first(), line.second())),
                Self::Rectangle(rect) => Some(rect.bounds()),
                Self::Oval(oval) => Some(oval.bounds()),
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Depth-first pre-order iterator over a rendering tree.
pub struct Iter<'a> {
    stack: Vec<&'a RenderingElement>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a RenderingElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        if let RenderingElement::Group(group) = element {
            self.stack.extend(group.children.iter().rev());
        }
        Some(element)
    }
}

/// An ordered collection of child elements.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ElementGroup {
    #[serde(default)]
    children: Vec<RenderingElement>,
}

impl ElementGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a child (builder style).
    pub fn with_child(mut self, child: impl Into<RenderingElement>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a child.
    pub fn push(&mut self, child: impl Into<RenderingElement>) {
        self.children.push(child.into());
    }

    /// Returns the children in draw order.
    pub fn children(&self) -> &[RenderingElement] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl FromIterator<RenderingElement> for ElementGroup {
    fn from_iter<I: IntoIterator<Item = RenderingElement>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().collect(),
        }
    }
}

/// A text label (e.g. an atom symbol) centered on a model-space point.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymbolElement {
    text: String,
    x: f64,
    y: f64,
    #[serde(default)]
    color: Color,
}

impl SymbolElement {
    pub fn new(text: impl Into<String>, x: f64, y: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the anchor point the label is centered on.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A straight line segment with a model-space stroke width.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineElement {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    width: f64,
}

impl LineElement {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, width: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            width,
        }
    }

    pub fn first(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn second(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Stroke width in model units.
    pub fn width(&self) -> f64 {
        self.width
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RectangleElement {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    filled: bool,
    #[serde(default)]
    color: Color,
}

impl RectangleElement {
    pub fn new(x: f64, y: f64, width: f64, height: f64, filled: bool, color: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            filled,
            color,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_corners(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// A circle given by its center and radius.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OvalElement {
    x: f64,
    y: f64,
    radius: f64,
    #[serde(default)]
    filled: bool,
    #[serde(default)]
    color: Color,
}

impl OvalElement {
    pub fn new(x: f64, y: f64, radius: f64, filled: bool, color: Color) -> Self {
        Self {
            x,
            y,
            radius,
            filled,
            color,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bounds(&self) -> Bounds {
        let diameter = self.radius.abs() * 2.0;
        self.center().to_bounds(Size::new(diameter, diameter))
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl From<ElementGroup> for RenderingElement {
    fn from(group: ElementGroup) -> Self {
        Self::Group(group)
    }
}

impl From<SymbolElement> for RenderingElement {
    fn from(symbol: SymbolElement) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<LineElement> for RenderingElement {
    fn from(line: LineElement) -> Self {
        Self::Line(line)
    }
}

impl From<RectangleElement> for RenderingElement {
    fn from(rect: RectangleElement) -> Self {
        Self::Rectangle(rect)
    }
}

impl From<OvalElement> for RenderingElement {
    fn from(oval: OvalElement) -> Self {
        Self::Oval(oval)
    }
}
