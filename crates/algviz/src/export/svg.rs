//! The SVG painter.
//!
//! [`SvgPainter`] walks the flattened items of a finalized [`Layout`] once.
//! Rectangular elements are painted as they come and their boxes recorded.
//! An arrow can only be painted once both of its endpoints have been placed,
//! which may happen after the arrow itself shows up in the stream, so arrows
//! wait in a queue keyed by a missing endpoint and are retried whenever that
//! element is painted. Arrows still waiting at the end make the whole picture
//! fail with [`Error::IncompleteLayout`].

mod arrows;
mod layer;
mod shapes;
mod text;
mod theme;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use theme::Theme;

use std::collections::HashMap;

use log::{debug, error, trace};
use svg::{Document, node::element as svg_element};

use algviz_core::{
    anchor::{Anchor, from_top_left_corner},
    geometry::{Extent, Point, Size},
};

use super::Error;
use crate::{
    element::{Arrow, Decoration, ElementId, LayoutItem},
    layout::Layout,
};

/// Paints layouts as standalone SVG documents.
#[derive(Debug, Clone, Default)]
pub struct SvgPainter {
    theme: Theme,
}

impl SvgPainter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Paints `layout` and returns the SVG markup.
    ///
    /// The document is exactly as large as the layout, with its view box
    /// starting at the layout's top-left corner.
    ///
    /// # Errors
    ///
    /// [`Error::IncompleteLayout`] when an arrow refers to an element that
    /// the layout never placed, and [`Error::Layout`] when the layout cannot
    /// be flattened.
    pub fn paint(&self, layout: &Layout) -> Result<String, Error> {
        let doc = self.render_document(layout)?;
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }

    fn render_document(&self, layout: &Layout) -> Result<Document, Error> {
        let top_left = layout.top_left();
        let size = layout.size();
        let mut canvas = Canvas::new(&self.theme);

        if let Some(color) = self.theme.background_color() {
            canvas.output.add_to_layer(
                RenderLayer::Background,
                Box::new(
                    svg_element::Rectangle::new()
                        .set("x", top_left.x())
                        .set("y", top_left.y())
                        .set("width", size.width())
                        .set("height", size.height())
                        .set("fill", color.to_string())
                        .set("fill-opacity", color.alpha()),
                ),
            );
        }

        for item in layout.elements()? {
            canvas.paint_item(item);
        }
        let output = canvas.finish()?;

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    top_left.x(),
                    top_left.y(),
                    size.width(),
                    size.height()
                ),
            )
            .set("width", size.width())
            .set("height", size.height());
        for node in output.render() {
            doc = doc.add(node);
        }
        Ok(doc)
    }
}

/// The state of one paint pass.
struct Canvas<'a> {
    theme: &'a Theme,
    output: LayeredOutput,
    placed: HashMap<ElementId, (Point, Size)>,
    /// Arrows keyed by an endpoint that has not been painted yet.
    pending: HashMap<ElementId, Vec<Arrow>>,
    arrows: usize,
}

impl<'a> Canvas<'a> {
    fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            output: LayeredOutput::new(),
            placed: HashMap::new(),
            pending: HashMap::new(),
            arrows: 0,
        }
    }

    fn paint_item(&mut self, item: LayoutItem) {
        match item {
            LayoutItem::Rect { top_left, element } => {
                trace!(element:% = element.id(), top_left:?; "Painting element");
                self.output
                    .merge(shapes::render_element(self.theme, &element, top_left));
                self.placed.insert(element.id(), (top_left, element.size()));
                for arrow in self.pending.remove(&element.id()).unwrap_or_default() {
                    self.paint_or_defer(arrow);
                }
            }
            LayoutItem::Decoration(Decoration::Arrow(arrow)) => self.paint_or_defer(arrow),
        }
    }

    fn paint_or_defer(&mut self, arrow: Arrow) {
        let origin = self.placed.get(&arrow.origin()).copied();
        let destination = self.placed.get(&arrow.destination()).copied();
        match (origin, destination) {
            (Some(origin), Some(destination)) => {
                let (start, end) = connection_points(&arrow, origin, destination);
                trace!(arrow:%, start:?, end:?; "Painting arrow");
                self.output.add_to_layer(
                    RenderLayer::Arrows,
                    arrows::render_arrow(
                        arrow.kind(),
                        start,
                        end,
                        self.theme.arrow_color(),
                        self.theme.arrow_width(),
                    ),
                );
                self.arrows += 1;
            }
            (None, _) => self.pending.entry(arrow.origin()).or_default().push(arrow),
            (Some(_), None) => self
                .pending
                .entry(arrow.destination())
                .or_default()
                .push(arrow),
        }
    }

    fn finish(mut self) -> Result<LayeredOutput, Error> {
        if !self.pending.is_empty() {
            let mut orphans: Vec<String> = self
                .pending
                .values()
                .flatten()
                .map(ToString::to_string)
                .collect();
            orphans.sort();
            error!(arrows:? = orphans; "Arrows with endpoints that were never painted");
            return Err(Error::IncompleteLayout(orphans));
        }
        if self.arrows > 0 {
            let markers = svg_element::Definitions::new().add(arrows::create_marker(self.theme.arrow_color()));
            self.output.add_to_layer(RenderLayer::Markers, Box::new(markers));
        }
        debug!(elements = self.placed.len(), arrows = self.arrows; "Painted layout");
        Ok(self.output)
    }
}

/// Picks where an arrow leaves its origin and enters its destination.
///
/// Pinned anchors are used as given. Otherwise every anchor pair is tried
/// and the closest one wins, ties going to the first pair in [`Anchor::ALL`]
/// order.
fn connection_points(arrow: &Arrow, origin: (Point, Size), destination: (Point, Size)) -> (Point, Point) {
    let candidates = |pinned: Option<Anchor>| match pinned {
        Some(anchor) => vec![anchor],
        None => Anchor::ALL.to_vec(),
    };
    let starts: Vec<Point> = candidates(arrow.origin_anchor())
        .into_iter()
        .map(|anchor| from_top_left_corner(&origin.1, origin.0, anchor))
        .collect();
    let ends: Vec<Point> = candidates(arrow.destination_anchor())
        .into_iter()
        .map(|anchor| from_top_left_corner(&destination.1, destination.0, anchor))
        .collect();

    let mut best = (starts[0], ends[0]);
    let mut best_distance = f32::INFINITY;
    for &start in &starts {
        for &end in &ends {
            let distance = start.distance_squared(end);
            if distance < best_distance {
                best = (start, end);
                best_distance = distance;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use algviz_core::structure::{ObjectGraph, Structure};

    use super::*;
    use crate::{
        element::RectElement,
        layout::{LayoutDispatch, create_layout},
    };

    fn row_with_arrow(arrow_to_nowhere: bool) -> Layout {
        let mut layout = Layout::new("row");
        let a = layout
            .add_rect_element(RectElement::node(Size::new(10.0, 10.0)), Point::default(), Anchor::TopLeft, None)
            .unwrap();
        let b = layout
            .add_rect_element(
                RectElement::node(Size::new(10.0, 10.0)),
                Point::new(30.0, 0.0),
                Anchor::TopLeft,
                None,
            )
            .unwrap();
        let destination = if arrow_to_nowhere {
            RectElement::node(Size::new(1.0, 1.0)).id()
        } else {
            b
        };
        layout.add_decoration(Arrow::straight(a, destination)).unwrap();
        layout
            .finalize(Size::new(40.0, 10.0), Point::default(), Anchor::TopLeft)
            .unwrap();
        layout
    }

    #[test]
    fn test_document_size_matches_layout() {
        let svg = SvgPainter::default().paint(&row_with_arrow(false)).unwrap();
        assert!(svg.contains("width=\"40\""));
        assert!(svg.contains("height=\"10\""));
        assert!(svg.contains("viewBox=\"0 0 40 10\""));
    }

    #[test]
    fn test_closest_anchors_are_connected() {
        let svg = SvgPainter::default().paint(&row_with_arrow(false)).unwrap();
        // Right edge of the first box to the left edge of the second.
        assert!(svg.contains("x1=\"10\""));
        assert!(svg.contains("x2=\"30\""));
        assert_eq!(svg.matches("<marker").count(), 1);
    }

    #[test]
    fn test_orphan_arrow_fails() {
        let err = SvgPainter::default().paint(&row_with_arrow(true)).unwrap_err();
        let Error::IncompleteLayout(arrows) = err else {
            panic!("expected an incomplete layout, got {err}");
        };
        assert_eq!(arrows.len(), 1);
        assert!(arrows[0].starts_with("straight arrow"));
    }

    #[test]
    fn test_arrow_before_its_endpoints() {
        // Tree arrows are stored on the parent, whose own items come before
        // the children that hold the endpoints.
        let mut graph = ObjectGraph::new();
        let data = graph.add(Structure::String("B".to_string()));
        let b = graph.add(Structure::TreeNode {
            data,
            children: vec![],
        });
        let data = graph.add(Structure::String("A".to_string()));
        let a = graph.add(Structure::TreeNode {
            data,
            children: vec![b],
        });
        let painter = SvgPainter::default();
        let layout = create_layout(&graph, a, &LayoutDispatch::default(), painter.theme()).unwrap();

        let svg = painter.paint(&layout).unwrap();
        assert_eq!(svg.matches("<line").count(), 1);
    }

    #[test]
    fn test_pinned_anchors() {
        let arrow = Arrow::straight(RectElement::node(Size::default()).id(), RectElement::node(Size::default()).id())
            .with_anchors(Anchor::Bottom, Anchor::Top);
        let (start, end) = connection_points(
            &arrow,
            (Point::new(0.0, 0.0), Size::new(10.0, 10.0)),
            (Point::new(0.0, 40.0), Size::new(20.0, 10.0)),
        );
        assert_eq!(start, Point::new(5.0, 10.0));
        assert_eq!(end, Point::new(10.0, 40.0));
    }

    #[test]
    fn test_ties_go_to_first_anchor_pair() {
        let arrow = Arrow::spline(RectElement::node(Size::default()).id(), RectElement::node(Size::default()).id());
        // Two zero-sized elements at the same spot: every pair is a tie.
        let (start, end) = connection_points(
            &arrow,
            (Point::new(3.0, 3.0), Size::default()),
            (Point::new(3.0, 3.0), Size::default()),
        );
        assert_eq!(start, Point::new(3.0, 3.0));
        assert_eq!(end, Point::new(3.0, 3.0));
    }

    #[test]
    fn test_background() {
        let config = crate::config::AppConfig::new(
            crate::config::LayoutConfig::default(),
            crate::config::StyleConfig::default().with_background_color("white"),
        );
        let painter = SvgPainter::new(Theme::from_config(&config).unwrap());
        let svg = painter.paint(&row_with_arrow(false)).unwrap();
        assert!(svg.contains("data-layer=\"background\""));
    }
}
