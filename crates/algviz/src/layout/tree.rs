//! Top-down tree layout.
//!
//! The root is drawn as a node box centered above its subtrees, which sit side
//! by side one level gap below. Each non-null subtree hangs from the root by a
//! straight arrow from the bottom of the root box to the top of the subtree's
//! root box.
//!
//! A null child keeps its slot: it becomes an empty placeholder the size of
//! its parent's root box.

use log::trace;

use algviz_core::{
    anchor::Anchor,
    geometry::{Extent, Point, Size},
    structure::{ObjectRef, Structure, StructureKind},
};

use super::{Layout, LayoutError, LayoutKind, dispatch::LayoutContext, node};
use crate::element::{Arrow, ElementId};

/// Lays out the tree rooted at `handle`.
///
/// `parent_root` is the size of the parent's root box, borrowed by null
/// subtrees; a null tree with no parent cannot be sized.
pub(super) fn build(
    ctx: &mut LayoutContext<'_>,
    handle: ObjectRef,
    parent_root: Option<Size>,
) -> Result<Layout, LayoutError> {
    if handle.is_null() {
        let size = parent_root.ok_or(LayoutError::NullTreeRoot)?;
        let mut placeholder = Layout::new("tree");
        placeholder.finalize(size, Point::default(), Anchor::TopLeft)?;
        return Ok(placeholder);
    }

    let object = ctx.object(handle);
    let Structure::TreeNode { children, .. } = object.structure() else {
        return Err(LayoutError::Unsupported {
            layout: LayoutKind::Tree,
            kind: object.kind(),
            uid: object.uid(),
        });
    };

    let root = node::build(ctx, handle)?;
    let root_size = root.size();
    let root_element = root.primary_element();
    let mut layout = Layout::new("tree");

    if children.is_empty() {
        layout.add_child(root, Point::default(), Anchor::TopLeft)?;
        set_primary(&mut layout, root_element);
        layout.finalize(root_size, Point::default(), Anchor::TopLeft)?;
        return Ok(layout);
    }

    let subtrees = children
        .iter()
        .map(|&child| subtree(ctx, handle, child, root_size))
        .collect::<Result<Vec<_>, _>>()?;

    let margin = ctx.hint().margin();
    let children_width = subtrees.iter().map(Extent::width).sum::<f32>()
        + margin * (subtrees.len() - 1) as f32;
    let width = root_size.width().max(children_width);
    let child_y = root_size.height() + ctx.hint().tree_level_gap();
    let children_height = subtrees.iter().map(Extent::height).fold(0.0, f32::max);
    trace!(uid:% = object.uid(), width, children_width, child_y; "Tree level");

    layout.add_child(root, Point::new(width / 2.0, 0.0), Anchor::Top)?;
    let mut next_x = (width - children_width) / 2.0;
    for subtree in subtrees {
        let subtree_width = subtree.width();
        let subtree_root = subtree.primary_element();
        layout.add_child(subtree, Point::new(next_x, child_y), Anchor::TopLeft)?;
        if let (Some(parent), Some(child)) = (root_element, subtree_root) {
            layout.add_decoration(Arrow::straight(parent, child).with_anchors(Anchor::Bottom, Anchor::Top))?;
        }
        next_x += subtree_width + margin;
    }

    set_primary(&mut layout, root_element);
    layout.finalize(
        Size::new(width, child_y + children_height),
        Point::default(),
        Anchor::TopLeft,
    )?;
    Ok(layout)
}

fn set_primary(layout: &mut Layout, element: Option<ElementId>) {
    if let Some(element) = element {
        layout.set_primary(element);
    }
}

fn subtree(
    ctx: &mut LayoutContext<'_>,
    parent: ObjectRef,
    child: ObjectRef,
    root_size: Size,
) -> Result<Layout, LayoutError> {
    let kind = ctx.object(child).kind();
    if !matches!(kind, StructureKind::TreeNode | StructureKind::Null) {
        return Err(LayoutError::MalformedTree {
            parent: ctx.object(parent).uid(),
            child: ctx.object(child).uid(),
            kind,
        });
    }
    ctx.nested(child, |ctx| build(ctx, child, Some(root_size)))
}
