use log::debug;

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point, Size},
};

use super::{Layout, LayoutError};
use crate::{element::Arrow, hint::SizeHint};

/// Places independently built layouts side by side and connects pointers
/// across them.
///
/// Sub-layouts are top-aligned, left to right, a margin apart. Every pending
/// pointer requirement whose referent is drawn in any of them gets a spline
/// arrow and is marked satisfied; the rest stay pending on the result.
///
/// # Errors
///
/// Returns [`LayoutError::EmptyComposite`] when `layouts` is empty.
pub fn composite(hint: &dyn SizeHint, layouts: Vec<Layout>) -> Result<Layout, LayoutError> {
    if layouts.is_empty() {
        return Err(LayoutError::EmptyComposite);
    }
    let margin = hint.margin();
    let count = layouts.len();

    let mut layout = Layout::new("composite");
    let mut next_x = 0.0;
    let mut height: f32 = 0.0;
    for child in layouts {
        let size = child.size();
        layout.add_child(child, Point::new(next_x, 0.0), Anchor::TopLeft)?;
        next_x += size.width() + margin;
        height = height.max(size.height());
    }

    let mut linked = 0;
    for requirement in layout.pointer_requirements() {
        let Some(target) = layout.target(requirement.referent()).map(|t| t.element()) else {
            debug!(pointer:% = requirement.pointer(), referent:% = requirement.referent(); "Pointer target not drawn yet");
            continue;
        };
        layout.add_decoration(Arrow::spline(requirement.pointer_element(), target))?;
        layout.satisfy(requirement.pointer_element())?;
        linked += 1;
    }
    debug!(children = count, arrows = linked; "Stitched composite layout");

    layout.finalize(
        Size::new(next_x - margin, height),
        Point::default(),
        Anchor::TopLeft,
    )?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use algviz_core::structure::{ObjectGraph, ObjectRef, Structure};

    use super::*;
    use crate::{
        element::{ArrowKind, Decoration, ElementId, LayoutItem},
        layout::{LayoutContext, LayoutDispatch, tests_support::FixedHint},
    };

    fn arrows(layout: &Layout) -> Vec<(ArrowKind, ElementId, ElementId)> {
        layout
            .elements()
            .unwrap()
            .into_iter()
            .filter_map(|item| match item {
                LayoutItem::Decoration(Decoration::Arrow(arrow)) => {
                    Some((arrow.kind(), arrow.origin(), arrow.destination()))
                }
                LayoutItem::Rect { .. } => None,
            })
            .collect()
    }

    fn pointer_and_string() -> (ObjectGraph, ObjectRef, ObjectRef) {
        let mut graph = ObjectGraph::new();
        let s = graph.add(Structure::String("hello world!".to_string()));
        let p = graph.add(Structure::Pointer { referent: s });
        (graph, p, s)
    }

    #[test]
    fn test_pointer_resolution() {
        let (graph, p, s) = pointer_and_string();
        let dispatch = LayoutDispatch::default();
        let mut ctx = LayoutContext::new(&graph, &FixedHint, &dispatch);
        let pointer = ctx.layout_object(p).unwrap();
        let string = ctx.layout_object(s).unwrap();
        let dot = pointer.primary_element().unwrap();
        let label = string.primary_element().unwrap();

        let layout = composite(&FixedHint, vec![pointer, string]).unwrap();

        assert_eq!(arrows(&layout), vec![(ArrowKind::Spline, dot, label)]);
        assert!(layout.pointer_requirements().is_empty());
    }

    #[test]
    fn test_unresolved_pointer_stays_pending() {
        let (graph, p, _) = pointer_and_string();
        let dispatch = LayoutDispatch::default();
        let pointer = LayoutContext::new(&graph, &FixedHint, &dispatch)
            .layout_object(p)
            .unwrap();

        let layout = composite(&FixedHint, vec![pointer]).unwrap();
        assert!(arrows(&layout).is_empty());
        assert_eq!(layout.pointer_requirements().len(), 1);
    }

    #[test]
    fn test_side_by_side_geometry() {
        let (graph, p, s) = pointer_and_string();
        let dispatch = LayoutDispatch::default();
        let mut ctx = LayoutContext::new(&graph, &FixedHint, &dispatch);
        let layouts = vec![ctx.layout_object(p).unwrap(), ctx.layout_object(s).unwrap()];

        let layout = composite(&FixedHint, layouts).unwrap();
        assert!(approx_eq!(f32, layout.width(), 8.0 + 7.0 + 96.0));
        assert!(approx_eq!(f32, layout.height(), 15.0));
        assert_eq!(layout.top_left(), Point::default());
    }

    #[test]
    fn test_empty_composite_fails() {
        assert_eq!(
            composite(&FixedHint, vec![]).unwrap_err(),
            LayoutError::EmptyComposite
        );
    }
}
