//! Circular graph layout.
//!
//! Nodes are spread at equal angles around a circle, starting at three
//! o'clock and going clockwise in screen coordinates. The circle is sized so
//! that the circumference holds every node's diagonal plus a margin. Edges
//! are straight arrows between node boxes.

use std::{collections::HashMap, f32::consts::PI};

use log::debug;

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point, Size},
    structure::{ObjectRef, Structure},
};

use super::{Layout, LayoutError, LayoutKind, dispatch::LayoutContext};
use crate::element::{Arrow, ElementId};

pub(super) fn circular(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let object = ctx.object(handle);
    let Structure::Graph { nodes, edges } = object.structure() else {
        return Err(LayoutError::Unsupported {
            layout: LayoutKind::CircularGraph,
            kind: object.kind(),
            uid: object.uid(),
        });
    };
    let malformed = |reason: String| LayoutError::MalformedGraph {
        graph: object.uid(),
        reason,
    };

    let mut layout = Layout::new("circular_graph");
    if nodes.is_empty() {
        let margin = ctx.hint().margin();
        layout.finalize(Size::new(margin, margin), Point::default(), Anchor::TopLeft)?;
        return Ok(layout);
    }

    let node_layouts = nodes
        .iter()
        .map(|&node| ctx.layout_object(node))
        .collect::<Result<Vec<_>, _>>()?;

    let mut node_elements: HashMap<ObjectRef, ElementId> = HashMap::new();
    for (&node, node_layout) in nodes.iter().zip(&node_layouts) {
        let element = node_layout.primary_element().ok_or_else(|| {
            malformed(format!("node `{}` has nothing to attach edges to", ctx.object(node).uid()))
        })?;
        node_elements.insert(node, element);
    }

    let count = node_layouts.len() as f32;
    let node_radius = node_layouts
        .iter()
        .map(|node| node.size().diagonal())
        .fold(0.0, f32::max);
    let circumference = (2.0 * node_radius + ctx.hint().margin()) * count;
    let radius = circumference / (2.0 * PI);
    debug!(uid:% = object.uid(), nodes = node_layouts.len(), radius; "Circular graph");

    for (idx, node_layout) in node_layouts.into_iter().enumerate() {
        let angle = 2.0 * PI / count * idx as f32;
        let center = Point::new(radius * angle.cos(), radius * angle.sin());
        layout.add_child(node_layout, center, Anchor::Center)?;
    }

    for &edge in edges {
        let edge_object = ctx.object(edge);
        let Structure::Edge { orig, dest, .. } = edge_object.structure() else {
            return Err(malformed(format!(
                "`{}` is a {}, expected an edge",
                edge_object.uid(),
                edge_object.kind()
            )));
        };
        let endpoint = |end: ObjectRef| {
            node_elements.get(&end).copied().ok_or_else(|| {
                malformed(format!(
                    "edge `{}` refers to `{}`, which is not a node of the graph",
                    edge_object.uid(),
                    ctx.object(end).uid()
                ))
            })
        };
        layout.add_decoration(Arrow::straight(endpoint(*orig)?, endpoint(*dest)?))?;
    }

    let diameter = 2.0 * (radius + node_radius);
    layout.finalize(Size::new(diameter, diameter), Point::default(), Anchor::Center)?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use algviz_core::structure::ObjectGraph;

    use super::*;
    use crate::{
        element::{Decoration, LayoutItem},
        layout::{LayoutDispatch, tests_support::FixedHint},
    };

    fn build(graph: &ObjectGraph, handle: ObjectRef) -> Result<Layout, LayoutError> {
        let dispatch = LayoutDispatch::default();
        LayoutContext::new(graph, &FixedHint, &dispatch).layout_with(handle, LayoutKind::CircularGraph)
    }

    fn node(graph: &mut ObjectGraph, value: i64) -> ObjectRef {
        let data = graph.add(Structure::Int(value));
        graph.add(Structure::Node { data })
    }

    #[test]
    fn test_empty_graph_is_margin_sized() {
        let mut graph = ObjectGraph::new();
        let g = graph.add(Structure::Graph {
            nodes: vec![],
            edges: vec![],
        });
        let layout = build(&graph, g).unwrap();
        assert_eq!(layout.size(), Size::new(7.0, 7.0));
    }

    #[test]
    fn test_nodes_and_edges() {
        let mut graph = ObjectGraph::new();
        let a = node(&mut graph, 1);
        let b = node(&mut graph, 2);
        let c = node(&mut graph, 3);
        let ab = graph.add(Structure::Edge {
            orig: a,
            dest: b,
            data: ObjectRef::NULL,
        });
        let ca = graph.add(Structure::Edge {
            orig: c,
            dest: a,
            data: ObjectRef::NULL,
        });
        let g = graph.add(Structure::Graph {
            nodes: vec![a, b, c],
            edges: vec![ab, ca],
        });
        let layout = build(&graph, g).unwrap();

        let arrows: Vec<_> = layout
            .elements()
            .unwrap()
            .into_iter()
            .filter_map(|item| match item {
                LayoutItem::Decoration(Decoration::Arrow(arrow)) => Some(arrow),
                LayoutItem::Rect { .. } => None,
            })
            .collect();
        assert_eq!(arrows.len(), 2);
        assert_eq!(Some(arrows[0].origin()), layout.target(a).map(|t| t.element()));
        assert_eq!(Some(arrows[0].destination()), layout.target(b).map(|t| t.element()));

        // Square, centered on the origin.
        assert!(approx_eq!(f32, layout.width(), layout.height()));
        assert!(approx_eq!(f32, layout.top_left().x(), -layout.width() / 2.0));
    }

    #[test]
    fn test_edge_to_foreign_node_fails() {
        let mut graph = ObjectGraph::new();
        let a = node(&mut graph, 1);
        let stranger = node(&mut graph, 2);
        let edge = graph.add(Structure::Edge {
            orig: a,
            dest: stranger,
            data: ObjectRef::NULL,
        });
        let g = graph.add(Structure::Graph {
            nodes: vec![a],
            edges: vec![edge],
        });
        assert!(matches!(
            build(&graph, g).unwrap_err(),
            LayoutError::MalformedGraph { .. }
        ));
    }

    #[test]
    fn test_non_edge_fails() {
        let mut graph = ObjectGraph::new();
        let a = node(&mut graph, 1);
        let g = graph.add(Structure::Graph {
            nodes: vec![a],
            edges: vec![a],
        });
        let err = build(&graph, g).unwrap_err();
        assert!(err.to_string().contains("expected an edge"));
    }
}
