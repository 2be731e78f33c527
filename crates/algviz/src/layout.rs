//! Recursive, anchored layouts.
//!
//! A [`Layout`] is a rectangle in its own local coordinate frame holding:
//!
//! - placed rectangular elements,
//! - nested child layouts, each stored with the offset of its frame,
//! - decorations (arrows) that refer to elements by id,
//! - the table of objects it depicts, used to resolve pointers.
//!
//! A layout goes through two phases. While *open* it accepts elements,
//! children and decorations. [`Layout::finalize`] fixes its size and top-left
//! corner, after which it can only be scaled, embedded into a parent, or
//! flattened with [`Layout::elements`].
//!
//! Concrete layouts for each kind of data structure live in the submodules and
//! are chosen by [`dispatch`]; [`create_layout`] stitches the sub-pictures of a
//! whole object graph together.

mod array;
mod composite;
mod create;
pub mod dispatch;
mod graph;
mod node;
mod terminal;
mod tree;

use indexmap::IndexMap;
use log::{trace, warn};
use thiserror::Error;

use algviz_core::{
    anchor::{Anchor, top_left_corner},
    geometry::{Extent, Point, Size},
    identifier::Id,
    structure::{Object, ObjectRef, StructureKind},
};

use crate::element::{Decoration, ElementId, LayoutItem, RectElement};

pub use composite::composite;
pub use create::create_layout;
pub use dispatch::{LayoutContext, LayoutDispatch, LayoutKind};

/// Slack allowed when checking that content stays inside its frame.
const EPSILON: f32 = 1e-3;

/// Structural and usage errors raised while building layouts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout `{0}` is already finalized")]
    AlreadyFinalized(&'static str),

    #[error("layout `{0}` is not finalized yet")]
    NotFinalized(&'static str),

    #[error("cannot add unfinalized child layout `{child}` to `{parent}`")]
    ChildNotFinalized {
        parent: &'static str,
        child: &'static str,
    },

    #[error("content of layout `{layout}` at ({x}, {y}) lies outside its frame starting at ({min_x}, {min_y})")]
    OutOfBounds {
        layout: &'static str,
        x: f32,
        y: f32,
        min_x: f32,
        min_y: f32,
    },

    #[error("invalid scale factor {0}")]
    InvalidScale(f32),

    #[error("a composite layout needs at least one sub-layout")]
    EmptyComposite,

    #[error("no layout registered for `{kind}` object `{uid}`")]
    UnknownStructure { kind: StructureKind, uid: Id },

    #[error("unknown layout `{name}`")]
    UnknownLayout { name: String },

    #[error("unknown structure kind `{0}` in layout overrides")]
    UnknownStructureName(String),

    #[error("layout `{layout}` cannot draw `{kind}` object `{uid}`")]
    Unsupported {
        layout: LayoutKind,
        kind: StructureKind,
        uid: Id,
    },

    #[error("a null tree root has no parent to borrow its size from")]
    NullTreeRoot,

    #[error("tree node `{parent}` has a `{kind}` child `{child}`, expected a tree node or null")]
    MalformedTree {
        parent: Id,
        child: Id,
        kind: StructureKind,
    },

    #[error("malformed graph `{graph}`: {reason}")]
    MalformedGraph { graph: Id, reason: String },

    #[error("object `{uid}` contains itself")]
    Cycle { uid: Id },
}

/// An obligation to draw an arrow from a pointer's marker to whatever element
/// ends up depicting its referent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerRequirement {
    pointer_element: ElementId,
    pointer: ObjectRef,
    referent: ObjectRef,
}

impl PointerRequirement {
    pub fn new(pointer_element: ElementId, pointer: ObjectRef, referent: ObjectRef) -> Self {
        Self {
            pointer_element,
            pointer,
            referent,
        }
    }

    /// The pointer-source element the arrow starts from.
    pub fn pointer_element(&self) -> ElementId {
        self.pointer_element
    }

    pub fn pointer(&self) -> ObjectRef {
        self.pointer
    }

    pub fn referent(&self) -> ObjectRef {
        self.referent
    }
}

/// The element registered as the picture of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    element: ElementId,
    uid: Id,
    draw_once: bool,
}

impl Target {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn uid(&self) -> Id {
        self.uid
    }

    fn is_redrawn_by(&self, next: &Target) -> bool {
        self.draw_once && self.element != next.element
    }
}

#[derive(Debug, Clone)]
struct Placement {
    element: RectElement,
    top_left: Point,
}

#[derive(Debug, Clone)]
struct Child {
    layout: Layout,
    /// Where the child's local `(0, 0)` lies in the parent's frame.
    origin: Point,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    size: Size,
    top_left: Point,
}

#[derive(Debug, Clone)]
struct Requirement {
    requirement: PointerRequirement,
    satisfied: bool,
}

/// A rectangle of placed elements, child layouts and decorations.
#[derive(Debug, Clone)]
pub struct Layout {
    name: &'static str,
    placements: Vec<Placement>,
    children: Vec<Child>,
    decorations: Vec<Decoration>,
    targets: IndexMap<ObjectRef, Target>,
    requirement: Option<Requirement>,
    primary: Option<ElementId>,
    frame: Option<Frame>,
    scale: f32,
}

impl Layout {
    /// Creates an open layout; `name` shows up in errors and logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            placements: Vec::new(),
            children: Vec::new(),
            decorations: Vec::new(),
            targets: IndexMap::new(),
            requirement: None,
            primary: None,
            frame: None,
            scale: 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finalized(&self) -> bool {
        self.frame.is_some()
    }

    fn ensure_open(&self) -> Result<(), LayoutError> {
        if self.is_finalized() {
            return Err(LayoutError::AlreadyFinalized(self.name));
        }
        Ok(())
    }

    /// Places `element` so that its `anchor` point lands on the local `coord`.
    ///
    /// When `represents` is given the element becomes the arrow target for
    /// pointers to that object. Registering an object flagged "draw once" a
    /// second time is allowed but logged; the newest registration wins.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::AlreadyFinalized`] after [`Layout::finalize`].
    pub fn add_rect_element(
        &mut self,
        element: RectElement,
        coord: Point,
        anchor: Anchor,
        represents: Option<&Object>,
    ) -> Result<ElementId, LayoutError> {
        self.ensure_open()?;
        let id = element.id();
        let top_left = top_left_corner(&element, coord, anchor);
        trace!(layout = self.name, element:% = id, top_left:?; "Placing element");

        if let Some(object) = represents {
            let target = Target {
                element: id,
                uid: object.uid(),
                draw_once: object.metadata().draw_once(),
            };
            self.register(object.handle(), target);
        }
        self.placements.push(Placement { element, top_left });
        Ok(id)
    }

    /// Records `target` as the picture of `object`; returns whether this
    /// redraws an object flagged draw_once, which is logged as a warning.
    fn register(&mut self, object: ObjectRef, target: Target) -> bool {
        let Some(previous) = self.targets.insert(object, target) else {
            return false;
        };
        if !previous.is_redrawn_by(&target) {
            return false;
        }
        warn!(
            layout = self.name, uid:% = target.uid,
            previous:% = previous.element, element:% = target.element;
            "Object flagged draw_once is drawn more than once",
        );
        true
    }

    /// Embeds a finalized child so that the `anchor` point of its bounding box
    /// lands on the local `coord`.
    ///
    /// The child's object table is merged into this layout's.
    ///
    /// # Errors
    ///
    /// Fails when this layout is already finalized or the child is not.
    pub fn add_child(&mut self, child: Layout, coord: Point, anchor: Anchor) -> Result<(), LayoutError> {
        self.ensure_open()?;
        if !child.is_finalized() {
            return Err(LayoutError::ChildNotFinalized {
                parent: self.name,
                child: child.name,
            });
        }
        let origin = top_left_corner(&child, coord, anchor).sub_point(child.top_left());
        trace!(layout = self.name, child = child.name, origin:?; "Embedding child layout");

        for (object, target) in &child.targets {
            self.register(*object, *target);
        }
        self.children.push(Child {
            layout: child,
            origin,
        });
        Ok(())
    }

    /// Adds a decoration; it is resolved against elements only when painted.
    pub fn add_decoration(&mut self, decoration: impl Into<Decoration>) -> Result<(), LayoutError> {
        self.ensure_open()?;
        self.decorations.push(decoration.into());
        Ok(())
    }

    /// Records the pointer requirement this layout originates.
    pub fn set_requirement(&mut self, requirement: PointerRequirement) -> Result<(), LayoutError> {
        self.ensure_open()?;
        self.requirement = Some(Requirement {
            requirement,
            satisfied: false,
        });
        Ok(())
    }

    /// Marks the element arrows should attach to when pointing at this layout
    /// as a whole, e.g. a tree's root box.
    pub fn set_primary(&mut self, element: ElementId) {
        self.primary = Some(element);
    }

    pub fn primary_element(&self) -> Option<ElementId> {
        self.primary
    }

    /// Fixes the size of this layout and positions its frame so that
    /// `ref_point` is the frame's `ref_anchor` point.
    ///
    /// # Errors
    ///
    /// Fails when called twice, or when any placed element or child would
    /// start left of or above the resulting frame.
    pub fn finalize(&mut self, size: Size, ref_point: Point, ref_anchor: Anchor) -> Result<(), LayoutError> {
        self.ensure_open()?;
        let top_left = top_left_corner(&size, ref_point, ref_anchor);

        let placed = self.placements.iter().map(|p| p.top_left);
        let nested = self
            .children
            .iter()
            .map(|c| c.origin.add_point(c.layout.top_left()));
        for point in placed.chain(nested) {
            self.check_contained(point, top_left)?;
        }

        trace!(layout = self.name, size:?, top_left:?; "Finalized layout");
        self.frame = Some(Frame { size, top_left });
        Ok(())
    }

    fn check_contained(&self, point: Point, top_left: Point) -> Result<(), LayoutError> {
        if point.is_at_or_after(top_left, EPSILON) {
            return Ok(());
        }
        Err(LayoutError::OutOfBounds {
            layout: self.name,
            x: point.x(),
            y: point.y(),
            min_x: top_left.x(),
            min_y: top_left.y(),
        })
    }

    /// Scales the whole layout by `factor`. Repeated calls compose.
    ///
    /// # Errors
    ///
    /// Fails before [`Layout::finalize`] and for non-positive or non-finite factors.
    pub fn scale(&mut self, factor: f32) -> Result<(), LayoutError> {
        if !self.is_finalized() {
            return Err(LayoutError::NotFinalized(self.name));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(LayoutError::InvalidScale(factor));
        }
        self.scale *= factor;
        Ok(())
    }

    /// Top-left corner of the frame, in the frame's own (scaled) coordinates.
    ///
    /// Open layouts report the origin.
    pub fn top_left(&self) -> Point {
        self.frame
            .map(|frame| frame.top_left.scale(self.scale))
            .unwrap_or_default()
    }

    /// Flattens this layout into placed elements and decorations.
    ///
    /// Own placements come first, then own decorations, then each child's
    /// items in insertion order. Coordinates are in this layout's frame with
    /// every scale factor applied. Every call builds a fresh list.
    ///
    /// # Errors
    ///
    /// Fails if this layout is open or if any element lies outside its frame.
    pub fn elements(&self) -> Result<Vec<LayoutItem>, LayoutError> {
        let frame = self.frame.ok_or(LayoutError::NotFinalized(self.name))?;
        let mut items = Vec::with_capacity(self.placements.len() + self.decorations.len());

        for placement in &self.placements {
            self.check_contained(placement.top_left, frame.top_left)?;
            items.push(LayoutItem::Rect {
                top_left: placement.top_left.scale(self.scale),
                element: placement.element.scaled(self.scale),
            });
        }
        items.extend(self.decorations.iter().cloned().map(LayoutItem::Decoration));

        for child in &self.children {
            for item in child.layout.elements()? {
                match item {
                    LayoutItem::Rect { top_left, element } => {
                        let local = child.origin.add_point(top_left);
                        self.check_contained(local, frame.top_left)?;
                        items.push(LayoutItem::Rect {
                            top_left: local.scale(self.scale),
                            element: element.scaled(self.scale),
                        });
                    }
                    decoration @ LayoutItem::Decoration(_) => items.push(decoration),
                }
            }
        }
        Ok(items)
    }

    /// Own decorations, without those of children.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// Unsatisfied pointer requirements of this layout and all descendants.
    pub fn pointer_requirements(&self) -> Vec<PointerRequirement> {
        let mut pending = Vec::new();
        self.collect_requirements(&mut pending);
        pending
    }

    fn collect_requirements(&self, pending: &mut Vec<PointerRequirement>) {
        if let Some(own) = self.requirement.as_ref().filter(|own| !own.satisfied) {
            pending.push(own.requirement);
        }
        for child in &self.children {
            child.layout.collect_requirements(pending);
        }
    }

    /// Marks the requirement originating at `pointer_element` as satisfied.
    ///
    /// Returns whether a matching requirement was found.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::AlreadyFinalized`] after [`Layout::finalize`].
    pub fn satisfy(&mut self, pointer_element: ElementId) -> Result<bool, LayoutError> {
        self.ensure_open()?;
        Ok(self.mark_satisfied(pointer_element))
    }

    fn mark_satisfied(&mut self, pointer_element: ElementId) -> bool {
        if let Some(own) = self
            .requirement
            .as_mut()
            .filter(|own| own.requirement.pointer_element == pointer_element)
        {
            own.satisfied = true;
            return true;
        }
        self.children
            .iter_mut()
            .any(|child| child.layout.mark_satisfied(pointer_element))
    }

    /// Objects depicted somewhere in this layout, in registration order.
    pub fn objects(&self) -> impl Iterator<Item = ObjectRef> + '_ {
        self.targets.keys().copied()
    }

    /// The element depicting `object`, if it is drawn in this layout.
    pub fn target(&self, object: ObjectRef) -> Option<&Target> {
        self.targets.get(&object)
    }
}

impl Extent for Layout {
    fn width(&self) -> f32 {
        self.frame
            .map(|frame| frame.size.width() * self.scale)
            .unwrap_or_default()
    }

    fn height(&self) -> f32 {
        self.frame
            .map(|frame| frame.size.height() * self.scale)
            .unwrap_or_default()
    }
}

/// A finalized layout holding a single element sized to its content.
pub(crate) fn single_element(
    name: &'static str,
    element: RectElement,
    represents: &Object,
) -> Result<Layout, LayoutError> {
    let mut layout = Layout::new(name);
    let size = element.size();
    let id = layout.add_rect_element(element, Point::default(), Anchor::TopLeft, Some(represents))?;
    layout.set_primary(id);
    layout.finalize(size, Point::default(), Anchor::TopLeft)?;
    Ok(layout)
}
