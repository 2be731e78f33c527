//! Laying out everything reachable from a root object.
//!
//! Layouts only recurse through containment (tree children, node data, array
//! items, graph nodes). Objects reachable only through pointers get their own
//! top-level sub-picture, discovered from the pointer requirements left
//! pending by the pictures built so far. Once no referent is missing, the
//! sub-pictures are combined by [`composite`], which draws the pointer arrows.

use std::collections::{HashSet, VecDeque};

use log::{debug, info};

use algviz_core::structure::{ObjectGraph, ObjectRef};

use super::{Layout, LayoutDispatch, LayoutError, composite, dispatch::LayoutContext};
use crate::hint::SizeHint;

/// A top-level sub-picture and the objects it depicts.
#[derive(Debug)]
struct UnlinkedLayout {
    layout: Layout,
    objects: HashSet<ObjectRef>,
}

impl UnlinkedLayout {
    /// The root counts as depicted even when no element registers it, e.g. a
    /// linked array, so that it is never laid out twice.
    fn new(root: ObjectRef, layout: Layout) -> Self {
        let mut objects: HashSet<ObjectRef> = layout.objects().collect();
        objects.insert(root);
        Self { layout, objects }
    }

    fn contained_in(&self, other: &UnlinkedLayout) -> bool {
        self.objects.is_subset(&other.objects)
    }
}

/// Adds `new` to a list of sub-pictures that should not depict the same
/// objects twice.
///
/// With `may_be_redundant`, `new` is dropped when an existing sub-picture
/// already depicts all of its objects. Existing sub-pictures whose objects are
/// all depicted by `new` are dropped in any case.
fn add_to_disjoint_layouts(layouts: &mut Vec<UnlinkedLayout>, new: UnlinkedLayout, may_be_redundant: bool) {
    if may_be_redundant && layouts.iter().any(|old| new.contained_in(old)) {
        debug!(objects = new.objects.len(); "Dropping redundant sub-picture");
        return;
    }
    layouts.retain(|old| !old.contained_in(&new));
    layouts.push(new);
}

/// Builds the complete picture of `root` and everything it points to.
///
/// # Errors
///
/// Propagates the first [`LayoutError`] raised by any sub-layout.
pub fn create_layout(
    graph: &ObjectGraph,
    root: ObjectRef,
    dispatch: &LayoutDispatch,
    hint: &dyn SizeHint,
) -> Result<Layout, LayoutError> {
    info!(root:% = graph.get(root).uid(); "Building layout");
    let mut ctx = LayoutContext::new(graph, hint, dispatch);
    let mut layouts = Vec::new();
    let mut covered = HashSet::new();
    let mut needed = VecDeque::from([root]);

    while let Some(next) = needed.pop_front() {
        if covered.contains(&next) {
            continue;
        }
        let unlinked = UnlinkedLayout::new(next, ctx.layout_object(next)?);
        covered.extend(unlinked.objects.iter().copied());
        for requirement in unlinked.layout.pointer_requirements() {
            if !covered.contains(&requirement.referent()) {
                needed.push_back(requirement.referent());
            }
        }
        add_to_disjoint_layouts(&mut layouts, unlinked, false);
    }

    info!(sub_pictures = layouts.len(); "Combining sub-pictures");
    composite(hint, layouts.into_iter().map(|unlinked| unlinked.layout).collect())
}
