//! Sizing information layouts need before anything is drawn.
//!
//! Layouts decide where things go, but only the painter knows how large a
//! piece of text or a pointer dot ends up. [`SizeHint`] is that contract; the
//! SVG painter's [`Theme`](crate::export::svg::Theme) implements it.

use algviz_core::geometry::Size;

/// Answers "how big will this be when painted?" for layouts.
pub trait SizeHint {
    /// Size of a (possibly multi-line) text label.
    fn string_size(&self, text: &str) -> Size;

    /// Size of the marker drawn at a pointer's origin.
    fn pointer_source_size(&self) -> Size;

    /// Size of the marker drawn for a null value.
    fn null_size(&self) -> Size;

    /// Minimum spacing between neighbouring pieces of a picture.
    fn margin(&self) -> f32;

    /// Padding between an array frame and its cells.
    fn array_border_margin(&self) -> f32;

    /// Horizontal gap between array cells.
    fn array_cell_sep(&self) -> f32;

    /// Vertical gap between a tree node and its children.
    fn tree_level_gap(&self) -> f32 {
        3.0 * self.margin()
    }
}
