//! The picture-element vocabulary.
//!
//! Elements describe *what* gets drawn and how large it is, never *where*:
//! coordinates belong to the layout that places them. There are two families:
//!
//! - [`RectElement`]: occupies a rectangle (node boxes, text labels, pointer
//!   dots, null markers, array frames).
//! - [`Decoration`]: occupies no space of its own and refers to rectangular
//!   elements by [`ElementId`] (arrows).
//!
//! Element ids come from a process-wide counter, so elements built by layouts
//! that know nothing of each other never collide.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point, Size},
};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a rectangular element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    fn next() -> Self {
        Self(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// What a rectangular element depicts.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A box around a container such as a tree node.
    Node,
    /// A text label.
    String { text: String },
    /// The dot a pointer arrow starts from.
    PointerSource,
    /// The marker for a null value.
    Null,
    /// The outline of an array, with separator x-offsets from its left edge.
    ArrayFrame { separators: Vec<f32> },
}

/// A drawable primitive with a size but no position.
#[derive(Debug, Clone, PartialEq)]
pub struct RectElement {
    id: ElementId,
    kind: ElementKind,
    size: Size,
}

impl RectElement {
    fn new(kind: ElementKind, size: Size) -> Self {
        Self {
            id: ElementId::next(),
            kind,
            size,
        }
    }

    pub fn node(size: Size) -> Self {
        Self::new(ElementKind::Node, size)
    }

    pub fn string(text: impl Into<String>, size: Size) -> Self {
        Self::new(ElementKind::String { text: text.into() }, size)
    }

    pub fn pointer_source(size: Size) -> Self {
        Self::new(ElementKind::PointerSource, size)
    }

    pub fn null(size: Size) -> Self {
        Self::new(ElementKind::Null, size)
    }

    pub fn array_frame(size: Size, separators: Vec<f32>) -> Self {
        Self::new(ElementKind::ArrayFrame { separators }, size)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Multiplies the element's dimensions, and any inner geometry, by `factor`.
    pub fn scale(&mut self, factor: f32) {
        self.size = self.size.scale(factor);
        if let ElementKind::ArrayFrame { separators } = &mut self.kind {
            for separator in separators.iter_mut() {
                *separator *= factor;
            }
        }
    }

    /// Returns a scaled copy that keeps this element's identity.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut copy = self.clone();
        copy.scale(factor);
        copy
    }
}

impl Extent for RectElement {
    fn width(&self) -> f32 {
        self.size.width()
    }

    fn height(&self) -> f32 {
        self.size.height()
    }
}

/// How an arrow is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    /// A straight line; used for tree and graph edges.
    Straight,
    /// A curve; used for pointers between sub-pictures.
    Spline,
}

/// An arrow between two rectangular elements.
///
/// Without preferred anchors the painter connects the closest pair of anchor
/// points of the two elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    kind: ArrowKind,
    origin: ElementId,
    destination: ElementId,
    origin_anchor: Option<Anchor>,
    destination_anchor: Option<Anchor>,
}

impl Arrow {
    pub fn straight(origin: ElementId, destination: ElementId) -> Self {
        Self::new(ArrowKind::Straight, origin, destination)
    }

    pub fn spline(origin: ElementId, destination: ElementId) -> Self {
        Self::new(ArrowKind::Spline, origin, destination)
    }

    fn new(kind: ArrowKind, origin: ElementId, destination: ElementId) -> Self {
        Self {
            kind,
            origin,
            destination,
            origin_anchor: None,
            destination_anchor: None,
        }
    }

    /// Pins both ends of the arrow to specific anchors.
    pub fn with_anchors(mut self, origin: Anchor, destination: Anchor) -> Self {
        self.origin_anchor = Some(origin);
        self.destination_anchor = Some(destination);
        self
    }

    pub fn kind(&self) -> ArrowKind {
        self.kind
    }

    pub fn origin(&self) -> ElementId {
        self.origin
    }

    pub fn destination(&self) -> ElementId {
        self.destination
    }

    pub fn origin_anchor(&self) -> Option<Anchor> {
        self.origin_anchor
    }

    pub fn destination_anchor(&self) -> Option<Anchor> {
        self.destination_anchor
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ArrowKind::Straight => "straight",
            ArrowKind::Spline => "spline",
        };
        write!(f, "{kind} arrow {} -> {}", self.origin, self.destination)
    }
}

/// Something drawn relative to other elements rather than at a coordinate.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    Arrow(Arrow),
}

impl From<Arrow> for Decoration {
    fn from(arrow: Arrow) -> Self {
        Self::Arrow(arrow)
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrow(arrow) => arrow.fmt(f),
        }
    }
}

/// One entry of a flattened layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    /// A rectangular element and its top-left corner in the layout's frame.
    Rect { top_left: Point, element: RectElement },
    Decoration(Decoration),
}
