#![forbid(unsafe_code)]

//! Geometric primitives in layout space.
//!
//! Layout space is the inner plotting area: origin at the top-left of the
//! area inside the [`Viewport`] margins, y growing downwards. Coordinates are
//! `f64` world units.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A position in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        (self - other).length_sq()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// Whether both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A displacement or velocity in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared length.
    #[inline]
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Length.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

/// A half-open vertical interval `[start, end)` assigned to one category.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Band {
    pub start: f64,
    pub end: f64,
}

impl Band {
    /// Create a band from its edges.
    #[inline]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Width of the band (`end - start`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the band.
    #[inline]
    pub fn center(&self) -> f64 {
        self.start + self.width() / 2.0
    }

    /// Whether `y` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.start && y < self.end
    }
}

/// Margins around the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    /// Create margins with specific values.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Canvas dimensions plus the margins that frame the inner plotting area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Viewport {
    /// 700x500 canvas with a 50/30/40/40 margin (inner height 410).
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            margin: Margin::new(50.0, 30.0, 40.0, 40.0),
        }
    }
}

impl Viewport {
    /// Width of the plotting area, never negative.
    #[inline]
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plotting area, never negative.
    #[inline]
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Translate a layout-space point into canvas coordinates.
    #[inline]
    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(p.x + self.margin.left, p.y + self.margin.top)
    }
}
