use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point},
    structure::{ObjectRef, Structure},
};

use super::{Layout, LayoutError, LayoutKind, dispatch::LayoutContext};
use crate::element::RectElement;

/// Draws a node's data inside a box with a margin on every side.
///
/// Accepts graph nodes and tree nodes; for tree nodes only the data is drawn.
pub(super) fn build(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let object = ctx.object(handle);
    let data = match object.structure() {
        Structure::Node { data } | Structure::TreeNode { data, .. } => *data,
        _ => {
            return Err(LayoutError::Unsupported {
                layout: LayoutKind::Node,
                kind: object.kind(),
                uid: object.uid(),
            });
        }
    };

    let margin = ctx.hint().margin();
    let content = ctx.layout_object(data)?;
    let size = content.size().pad(margin);

    let mut layout = Layout::new("node");
    layout.add_child(content, Point::new(margin, margin), Anchor::TopLeft)?;
    let id = layout.add_rect_element(RectElement::node(size), Point::default(), Anchor::TopLeft, Some(object))?;
    layout.set_primary(id);
    layout.finalize(size, Point::default(), Anchor::TopLeft)?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use algviz_core::{geometry::Size, structure::ObjectGraph};

    use super::*;
    use crate::{
        element::{ElementKind, LayoutItem},
        layout::{LayoutDispatch, tests_support::FixedHint},
    };

    #[test]
    fn test_node_wraps_data_with_margin() {
        let mut graph = ObjectGraph::new();
        let data = graph.add(Structure::String("ab".to_string()));
        let node = graph.add(Structure::Node { data });

        let dispatch = LayoutDispatch::default();
        let mut ctx = LayoutContext::new(&graph, &FixedHint, &dispatch);
        let layout = ctx.layout_object(node).unwrap();

        assert_eq!(layout.size(), Size::new(16.0 + 14.0, 15.0 + 14.0));
        let items = layout.elements().unwrap();
        let [
            LayoutItem::Rect { top_left: box_corner, element: frame },
            LayoutItem::Rect { top_left: text_corner, element: text },
        ] = &items[..]
        else {
            panic!("expected a box and a label, got {items:?}");
        };
        assert_eq!(frame.kind(), &ElementKind::Node);
        assert_eq!(*box_corner, Point::default());
        assert!(matches!(text.kind(), ElementKind::String { .. }));
        assert_eq!(*text_corner, Point::new(7.0, 7.0));

        assert_eq!(layout.primary_element(), Some(frame.id()));
        assert_eq!(layout.target(node).map(|t| t.element()), Some(frame.id()));
        assert_eq!(layout.target(data).map(|t| t.element()), Some(text.id()));
    }

    #[test]
    fn test_node_rejects_non_nodes() {
        let mut graph = ObjectGraph::new();
        let s = graph.add(Structure::String("x".to_string()));
        let dispatch = LayoutDispatch::default();
        let mut ctx = LayoutContext::new(&graph, &FixedHint, &dispatch);
        assert!(matches!(
            ctx.layout_with(s, LayoutKind::Node),
            Err(LayoutError::Unsupported { layout: LayoutKind::Node, .. })
        ));
    }
}
