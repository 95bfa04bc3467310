//! Geometric primitives for model and device space.
//!
//! This module provides the geometric types Easel uses to position rendering
//! elements and to map them onto a canvas.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in model space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Transform`] - A 2D affine map from model space to device space
//!
//! # Coordinate System
//!
//! Device space follows the HTML canvas convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Model space is whatever the element producer used. Generators that work
//! with a y-up model should use [`Transform::fit`] with `flip_y` set.

/// A 2D point in model coordinate space.
///
/// # Examples
///
/// ```
/// # use easel_core::geometry::{Point, Size};
/// let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(4.0, 6.0));
/// assert_eq!(bounds.min_x(), 8.0);
/// assert_eq!(bounds.max_y(), 23.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates the smallest bounds containing both points, in any order.
    pub fn new_from_corners(p1: Point, p2: Point) -> Self {
        Self {
            min_x: p1.x.min(p2.x),
            min_y: p1.y.min(p2.y),
            max_x: p1.x.max(p2.x),
            max_y: p1.y.max(p2.y),
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use easel_core::geometry::{Bounds, Point};
    /// let a = Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(100.0, 30.0));
    /// let b = Bounds::new_from_corners(Point::new(10.0, 40.0), Point::new(130.0, 120.0));
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A 2D affine transform from model space to device space.
///
/// Coefficients follow the canvas `setTransform(a, b, c, d, e, f)` order:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// # Examples
///
/// ```
/// # use easel_core::geometry::Transform;
/// let transform = Transform::scale(2.0, 2.0).then(Transform::translate(10.0, 0.0));
/// assert_eq!(transform.transform_point(1.9, -3.7), (13, -7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Creates a transform from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// A pure scaling transform.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A pure translation.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Returns the coefficients as `[a, b, c, d, e, f]`.
    pub fn coefficients(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Composes two transforms: the result applies `self` first, then `next`.
    pub fn then(self, next: Transform) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    /// Returns the determinant of the linear part.
    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Returns true if every coefficient is a finite number.
    pub fn is_finite(self) -> bool {
        self.coefficients().iter().all(|v| v.is_finite())
    }

    /// Returns true if the transform is finite and has an inverse.
    pub fn is_invertible(self) -> bool {
        let det = self.determinant();
        self.is_finite() && det.is_finite() && det != 0.0
    }

    /// Applies the transform to a point without rounding.
    pub fn apply(self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    /// Maps a model-space point to integer device coordinates.
    ///
    /// Each coordinate is truncated toward zero (not rounded). Values outside
    /// the `i32` range saturate.
    pub fn transform_point(self, x: f64, y: f64) -> (i32, i32) {
        let device = self.apply(Point::new(x, y));
        (device.x as i32, device.y as i32)
    }

    /// Builds a transform that fits `model` bounds into `device` bounds.
    ///
    /// The drawing is scaled uniformly so that it fills the device area minus
    /// `margin` (a fraction of each device dimension, clamped to `[0, 1)`),
    /// and centered. With `flip_y`, model y grows upward.
    ///
    /// Degenerate model bounds (a single point, or a horizontal or vertical
    /// segment) are fitted along the dimension that has extent; a single
    /// point is centered with unit zoom.
    ///
    /// # Examples
    ///
    /// ```
    /// # use easel_core::geometry::{Bounds, Point, Transform};
    /// let model = Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(10.0, 5.0));
    /// let device = Bounds::new_from_corners(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
    ///
    /// let fit = Transform::fit(model, device, 0.0, false);
    /// assert_eq!(fit.transform_point(0.0, 0.0), (0, 25));
    /// assert_eq!(fit.transform_point(10.0, 5.0), (100, 75));
    /// ```
    pub fn fit(model: Bounds, device: Bounds, margin: f64, flip_y: bool) -> Self {
        let fill = 1.0 - margin.clamp(0.0, 0.99);
        let available_width = device.width() * fill;
        let available_height = device.height() * fill;

        let zoom_x = (model.width() > 0.0).then(|| available_width / model.width());
        let zoom_y = (model.height() > 0.0).then(|| available_height / model.height());
        let zoom = match (zoom_x, zoom_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(z), None) | (None, Some(z)) => z,
            (None, None) => 1.0,
        };

        let model_center = model.center();
        let device_center = device.center();
        let y_zoom = if flip_y { -zoom } else { zoom };

        Transform::translate(-model_center.x(), -model_center.y())
            .then(Transform::scale(zoom, y_zoom))
            .then(Transform::translate(device_center.x(), device_center.y()))
    }
}
