//! Geometric primitives shared by layouts and the painter.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in picture space
//! - [`Size`] - Width and height dimensions
//! - [`Extent`] - Anything that occupies a rectangle
//!
//! # Coordinate System
//!
//! algviz uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Layouts work in their own local frame; a frame's top-left corner may be
//! negative when the layout was finalized around a centered reference point.

/// A 2D point in picture coordinate space.
///
/// # Examples
///
/// ```
/// # use algviz_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Squared distance between two points.
    ///
    /// Enough for "which pair is closest" comparisons without a square root.
    pub fn distance_squared(self, other: Point) -> f32 {
        let d = self.sub_point(other);
        d.x * d.x + d.y * d.y
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use algviz_core::geometry::Point;
    /// let doubled = Point::new(10.0, 20.0).scale(2.0);
    /// assert_eq!(doubled.x(), 20.0);
    /// assert_eq!(doubled.y(), 40.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns true when this point is not left of nor above `other`,
    /// allowing `epsilon` of floating point slack.
    pub fn is_at_or_after(self, other: Point, epsilon: f32) -> bool {
        self.x >= other.x - epsilon && self.y >= other.y - epsilon
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown by `amount` on every side
    pub fn pad(self, amount: f32) -> Self {
        Self {
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }

    /// Multiplies both dimension by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Length of the diagonal
    pub fn diagonal(self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// Anything that occupies a rectangle: picture elements, layouts and plain sizes.
///
/// The anchor functions in [`crate::anchor`] accept any `Extent`.
pub trait Extent {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl Extent for Size {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..1000.0, 0.0f32..1000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn scale_strategy() -> impl Strategy<Value = f32> {
        0.1f32..10.0
    }

    /// Point addition should be commutative: p1 + p2 == p2 + p1.
    fn check_point_add_is_commutative(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result1 = p1.add_point(p2);
        let result2 = p2.add_point(p1);

        prop_assert!(approx_eq!(f32, result1.x(), result2.x()));
        prop_assert!(approx_eq!(f32, result1.y(), result2.y()));
        Ok(())
    }

    /// Adding then subtracting a point should return the original.
    fn check_add_sub_inverse(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let result = p1.add_point(p2).sub_point(p2);

        prop_assert!(approx_eq!(f32, result.x(), p1.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, result.y(), p1.y(), epsilon = 0.001));
        Ok(())
    }

    /// Scaling a size composes multiplicatively.
    fn check_size_scale_composes(s: Size, a: f32, b: f32) -> Result<(), TestCaseError> {
        let twice = s.scale(a).scale(b);
        let once = s.scale(a * b);

        prop_assert!(approx_eq!(f32, twice.width(), once.width(), epsilon = 0.01, ulps = 4));
        prop_assert!(approx_eq!(f32, twice.height(), once.height(), epsilon = 0.01, ulps = 4));
        Ok(())
    }

    /// The diagonal is never shorter than either side.
    fn check_diagonal_bounds_sides(s: Size) -> Result<(), TestCaseError> {
        prop_assert!(s.diagonal() >= s.width());
        prop_assert!(s.diagonal() >= s.height());
        Ok(())
    }

    proptest! {
        #[test]
        fn point_add_is_commutative(p1 in point_strategy(), p2 in point_strategy()) {
            check_point_add_is_commutative(p1, p2)?;
        }

        #[test]
        fn add_sub_inverse(p1 in point_strategy(), p2 in point_strategy()) {
            check_add_sub_inverse(p1, p2)?;
        }

        #[test]
        fn size_scale_composes(s in size_strategy(), a in scale_strategy(), b in scale_strategy()) {
            check_size_scale_composes(s, a, b)?;
        }

        #[test]
        fn diagonal_bounds_sides(s in size_strategy()) {
            check_diagonal_bounds_sides(s)?;
        }
    }
}
