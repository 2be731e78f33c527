//! The 3×3 anchor grid over a rectangle.
//!
//! An [`Anchor`] names one of nine reference points of a rectangle: its four
//! corners, the middle of its four edges, and its center. Layouts use anchors to
//! place elements and children without hand-written offset arithmetic:
//!
//! ```text
//!   TopLeft ──── Top ──── TopRight
//!      │                     │
//!    Left      Center      Right
//!      │                     │
//!  BottomLeft ─ Bottom ─ BottomRight
//! ```
//!
//! Each anchor carries an `(x, y)` factor pair drawn from `{-1, 0, 1}`, which
//! interpolates between the low edge, the middle and the high edge of an axis.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::geometry::{Extent, Point, Size};

/// One of the nine reference points of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Error returned when parsing an anchor name fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor `{0}`, expected one of top_left, top, top_right, left, center, right, bottom_left, bottom, bottom_right")]
pub struct AnchorParseError(pub String);

impl Anchor {
    /// All anchors, in declaration order.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    /// Horizontal and vertical interpolation factors of this anchor.
    pub fn factors(self) -> (f32, f32) {
        match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::Top => (0.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Center => (0.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::Bottom => (0.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// Returns the snake_case name of this anchor
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::Top => "top",
            Self::TopRight => "top_right",
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::BottomLeft => "bottom_left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = AnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|anchor| anchor.name() == s)
            .ok_or_else(|| AnchorParseError(s.to_string()))
    }
}

fn corner_axis(coord: f32, side: f32, factor: f32) -> f32 {
    coord - side / 2.0 * (1.0 + factor)
}

/// Computes the top-left corner of `rect` such that `coord` lands on its `anchor` point.
///
/// # Examples
///
/// ```
/// # use algviz_core::{anchor::{Anchor, top_left_corner}, geometry::{Point, Size}};
/// let corner = top_left_corner(&Size::new(10.0, 6.0), Point::default(), Anchor::BottomRight);
/// assert_eq!(corner, Point::new(-10.0, -6.0));
/// ```
pub fn top_left_corner<E: Extent + ?Sized>(rect: &E, coord: Point, anchor: Anchor) -> Point {
    let (fx, fy) = anchor.factors();
    Point::new(
        corner_axis(coord.x(), rect.width(), fx),
        corner_axis(coord.y(), rect.height(), fy),
    )
}

/// Computes the coordinate of `rect`'s `anchor` point given its top-left corner.
///
/// This is [`top_left_corner`] applied to the rectangle with negated sides.
pub fn from_top_left_corner<E: Extent + ?Sized>(rect: &E, top_left: Point, anchor: Anchor) -> Point {
    let negated = Size::new(-rect.width(), -rect.height());
    top_left_corner(&negated, top_left, anchor)
}

/// Re-expresses a coordinate given relative to `from` as one relative to `to` on the same rectangle.
pub fn anchor_translate<E: Extent + ?Sized>(
    rect: &E,
    coord: Point,
    from: Anchor,
    to: Anchor,
) -> Point {
    from_top_left_corner(rect, top_left_corner(rect, coord, from), to)
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn anchor_strategy() -> impl Strategy<Value = Anchor> {
        (0usize..9).prop_map(|idx| Anchor::ALL[idx])
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..500.0, 0.0f32..500.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Placing a rectangle by an anchor and reading the anchor back gives the same point.
    fn check_anchor_roundtrip(rect: Size, coord: Point, anchor: Anchor) -> Result<(), TestCaseError> {
        let corner = top_left_corner(&rect, coord, anchor);
        let back = from_top_left_corner(&rect, corner, anchor);

        prop_assert!(approx_eq!(f32, back.x(), coord.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, back.y(), coord.y(), epsilon = 0.001));
        Ok(())
    }

    /// Translating there and back between two anchors is the identity.
    fn check_translate_roundtrip(
        rect: Size,
        coord: Point,
        from: Anchor,
        to: Anchor,
    ) -> Result<(), TestCaseError> {
        let there = anchor_translate(&rect, coord, from, to);
        let back = anchor_translate(&rect, there, to, from);

        prop_assert!(approx_eq!(f32, back.x(), coord.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, back.y(), coord.y(), epsilon = 0.001));
        Ok(())
    }

    /// The computed corner is never right of nor below the anchored point.
    fn check_corner_is_up_left(rect: Size, coord: Point, anchor: Anchor) -> Result<(), TestCaseError> {
        let corner = top_left_corner(&rect, coord, anchor);

        prop_assert!(corner.x() <= coord.x() + 0.001);
        prop_assert!(corner.y() <= coord.y() + 0.001);
        Ok(())
    }

    proptest! {
        #[test]
        fn anchor_roundtrip(rect in size_strategy(), coord in point_strategy(), anchor in anchor_strategy()) {
            check_anchor_roundtrip(rect, coord, anchor)?;
        }

        #[test]
        fn translate_roundtrip(
            rect in size_strategy(),
            coord in point_strategy(),
            from in anchor_strategy(),
            to in anchor_strategy(),
        ) {
            check_translate_roundtrip(rect, coord, from, to)?;
        }

        #[test]
        fn corner_is_up_left(rect in size_strategy(), coord in point_strategy(), anchor in anchor_strategy()) {
            check_corner_is_up_left(rect, coord, anchor)?;
        }
    }
}
