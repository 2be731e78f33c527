//! Layouts made of a single element: text, null markers and pointer sources.

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point},
    structure::{ObjectRef, Structure},
};

use super::{
    Layout, LayoutError, LayoutKind, PointerRequirement, dispatch::LayoutContext, single_element,
};
use crate::element::RectElement;

fn unsupported(ctx: &LayoutContext<'_>, handle: ObjectRef, layout: LayoutKind) -> LayoutError {
    let object = ctx.object(handle);
    LayoutError::Unsupported {
        layout,
        kind: object.kind(),
        uid: object.uid(),
    }
}

fn text_layout(ctx: &LayoutContext<'_>, handle: ObjectRef, name: &'static str, text: String) -> Result<Layout, LayoutError> {
    let size = ctx.hint().string_size(&text);
    single_element(name, RectElement::string(text, size), ctx.object(handle))
}

/// A label showing a string's text, or a number's digits.
pub(super) fn string(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let text = match ctx.object(handle).structure() {
        Structure::String(text) => text.clone(),
        Structure::Int(value) => value.to_string(),
        Structure::Float(value) => value.to_string(),
        _ => return Err(unsupported(ctx, handle, LayoutKind::String)),
    };
    text_layout(ctx, handle, "string", text)
}

/// A label showing a value's debug representation; strings appear quoted.
pub(super) fn string_repr(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let text = match ctx.object(handle).structure() {
        Structure::String(text) => format!("{text:?}"),
        Structure::Int(value) => format!("{value:?}"),
        Structure::Float(value) => format!("{value:?}"),
        _ => return Err(unsupported(ctx, handle, LayoutKind::Repr)),
    };
    text_layout(ctx, handle, "repr", text)
}

pub(super) fn null(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    if !handle.is_null() {
        return Err(unsupported(ctx, handle, LayoutKind::Null));
    }
    let element = RectElement::null(ctx.hint().null_size());
    single_element("null", element, ctx.object(handle))
}

/// A pointer-source dot that still owes an arrow to its referent.
pub(super) fn pointer(ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
    let Structure::Pointer { referent } = ctx.object(handle).structure() else {
        return Err(unsupported(ctx, handle, LayoutKind::Pointer));
    };

    let element = RectElement::pointer_source(ctx.hint().pointer_source_size());
    let size = element.size();
    let mut layout = Layout::new("pointer");
    let dot = layout.add_rect_element(element, Point::default(), Anchor::TopLeft, Some(ctx.object(handle)))?;
    layout.set_primary(dot);
    layout.set_requirement(PointerRequirement::new(dot, handle, *referent))?;
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

    fn label(layout: &Layout) -> String {
        match &layout.elements().unwrap()[..] {
            [LayoutItem::Rect { element, .. }] => match element.kind() {
                ElementKind::String { text } => text.clone(),
                other => panic!("expected a label, got {other:?}"),
            },
            items => panic!("expected a single element, got {items:?}"),
        }
    }

    fn build(graph: &ObjectGraph, handle: ObjectRef, kind: LayoutKind) -> Result<Layout, LayoutError> {
        let dispatch = LayoutDispatch::default();
        let hint = FixedHint;
        LayoutContext::new(graph, &hint, &dispatch).layout_with(handle, kind)
    }

    #[test]
    fn test_string_layout_matches_text_size() {
        let mut graph = ObjectGraph::new();
        let s = graph.add(Structure::String("hello".to_string()));
        let layout = build(&graph, s, LayoutKind::String).unwrap();

        assert_eq!(layout.size(), Size::new(40.0, 15.0));
        assert_eq!(label(&layout), "hello");
        assert!(layout.target(s).is_some());
        assert_eq!(layout.primary_element(), layout.target(s).map(|t| t.element()));
    }

    #[test]
    fn test_repr_layout() {
        let mut graph = ObjectGraph::new();
        let i = graph.add(Structure::Int(42));
        let f = graph.add(Structure::Float(2.0));
        let s = graph.add(Structure::String("hi".to_string()));

        assert_eq!(label(&build(&graph, i, LayoutKind::Repr).unwrap()), "42");
        assert_eq!(label(&build(&graph, f, LayoutKind::Repr).unwrap()), "2.0");
        assert_eq!(label(&build(&graph, s, LayoutKind::Repr).unwrap()), "\"hi\"");
    }

    #[test]
    fn test_null_layout() {
        let graph = ObjectGraph::new();
        let layout = build(&graph, ObjectRef::NULL, LayoutKind::Null).unwrap();
        assert_eq!(layout.size(), Size::new(6.0, 8.0));
    }

    #[test]
    fn test_pointer_layout_has_one_requirement() {
        let mut graph = ObjectGraph::new();
        let s = graph.add(Structure::String("target".to_string()));
        let p = graph.add(Structure::Pointer { referent: s });
        let layout = build(&graph, p, LayoutKind::Pointer).unwrap();

        let requirements = layout.pointer_requirements();
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].pointer(), p);
        assert_eq!(requirements[0].referent(), s);
        assert_eq!(Some(requirements[0].pointer_element()), layout.primary_element());
        assert_eq!(layout.size(), Size::new(8.0, 8.0));
    }

    #[test]
    fn test_terminal_rejects_other_structures() {
        let mut graph = ObjectGraph::new();
        let xs = graph.add(Structure::Array { items: vec![] });
        let err = build(&graph, xs, LayoutKind::Pointer).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Unsupported {
                layout: LayoutKind::Pointer,
                ..
            }
        ));
        assert!(build(&graph, xs, LayoutKind::Null).is_err());
    }
}
