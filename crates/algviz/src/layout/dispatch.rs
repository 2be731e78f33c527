//! Choosing a layout for each object.
//!
//! Layout kinds form a closed set. [`LayoutDispatch`] maps each structure kind
//! to the layout drawing it by default; callers may override entries, and an
//! object may request a layout by name through its metadata.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};

use log::debug;

use algviz_core::structure::{Object, ObjectGraph, ObjectRef, StructureKind};

use super::{Layout, LayoutError, array, graph, node, terminal, tree};
use crate::hint::SizeHint;

/// The layouts available for drawing objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Root box above its children, connected by straight arrows.
    Tree,
    /// A box around the node's data.
    Node,
    /// Text of a string, or the digits of a number.
    String,
    /// Debug representation of a value.
    Repr,
    Null,
    /// A dot that an arrow to the referent starts from.
    Pointer,
    /// Items in a row of equal cells inside a frame.
    Array,
    /// Items side by side without a frame.
    LinkedArray,
    /// Graph nodes spread evenly around a circle.
    CircularGraph,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 9] = [
        Self::Tree,
        Self::Node,
        Self::String,
        Self::Repr,
        Self::Null,
        Self::Pointer,
        Self::Array,
        Self::LinkedArray,
        Self::CircularGraph,
    ];

    /// Name used in configuration files and object metadata.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Node => "node",
            Self::String => "string",
            Self::Repr => "repr",
            Self::Null => "null",
            Self::Pointer => "pointer",
            Self::Array => "array",
            Self::LinkedArray => "linked_array",
            Self::CircularGraph => "circular_graph",
        }
    }

    /// Builds the layout of `handle` with this kind.
    fn build(self, ctx: &mut LayoutContext<'_>, handle: ObjectRef) -> Result<Layout, LayoutError> {
        match self {
            Self::Tree => tree::build(ctx, handle, None),
            Self::Node => node::build(ctx, handle),
            Self::String => terminal::string(ctx, handle),
            Self::Repr => terminal::string_repr(ctx, handle),
            Self::Null => terminal::null(ctx, handle),
            Self::Pointer => terminal::pointer(ctx, handle),
            Self::Array => array::framed(ctx, handle),
            Self::LinkedArray => array::linked(ctx, handle),
            Self::CircularGraph => graph::circular(ctx, handle),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LayoutKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LayoutError::UnknownLayout {
                name: s.to_string(),
            })
    }
}

/// Structure kind to layout kind table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDispatch {
    table: HashMap<StructureKind, LayoutKind>,
}

impl Default for LayoutDispatch {
    fn default() -> Self {
        let table = HashMap::from([
            (StructureKind::TreeNode, LayoutKind::Tree),
            (StructureKind::String, LayoutKind::String),
            (StructureKind::Int, LayoutKind::Repr),
            (StructureKind::Float, LayoutKind::Repr),
            (StructureKind::Array, LayoutKind::Array),
            (StructureKind::Graph, LayoutKind::CircularGraph),
            (StructureKind::Node, LayoutKind::Node),
            (StructureKind::Null, LayoutKind::Null),
            (StructureKind::Pointer, LayoutKind::Pointer),
        ]);
        Self { table }
    }
}

impl LayoutDispatch {
    /// Replaces the layout used for one structure kind.
    pub fn with_override(mut self, kind: StructureKind, layout: LayoutKind) -> Self {
        self.table.insert(kind, layout);
        self
    }

    /// Builds the default table with `(structure kind, layout kind)` name
    /// pairs taking precedence.
    ///
    /// # Errors
    ///
    /// Fails on an unknown structure kind or layout name.
    pub fn from_overrides<'s>(
        overrides: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Result<Self, LayoutError> {
        let mut dispatch = Self::default();
        for (kind, layout) in overrides {
            let kind = kind
                .parse::<StructureKind>()
                .map_err(|_| LayoutError::UnknownStructureName(kind.to_string()))?;
            let layout = layout.parse::<LayoutKind>()?;
            debug!(kind:%, layout:%; "Overriding default layout");
            dispatch.table.insert(kind, layout);
        }
        Ok(dispatch)
    }

    pub fn get(&self, kind: StructureKind) -> Option<LayoutKind> {
        self.table.get(&kind).copied()
    }

    /// Picks the layout for `object`: its metadata's request first, then the table.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownLayout`] for an unknown requested name and
    /// [`LayoutError::UnknownStructure`] when nothing draws this kind.
    pub fn choose(&self, object: &Object) -> Result<LayoutKind, LayoutError> {
        if let Some(name) = object.metadata().layout() {
            return name.parse();
        }
        self.get(object.kind())
            .ok_or_else(|| LayoutError::UnknownStructure {
                kind: object.kind(),
                uid: object.uid(),
            })
    }
}

/// State shared by every layout built for one picture.
pub struct LayoutContext<'a> {
    graph: &'a ObjectGraph,
    hint: &'a dyn SizeHint,
    dispatch: &'a LayoutDispatch,
    /// Objects whose layout is under construction.
    building: HashSet<ObjectRef>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(graph: &'a ObjectGraph, hint: &'a dyn SizeHint, dispatch: &'a LayoutDispatch) -> Self {
        Self {
            graph,
            hint,
            dispatch,
            building: HashSet::new(),
        }
    }

    pub fn graph(&self) -> &'a ObjectGraph {
        self.graph
    }

    pub fn hint(&self) -> &'a dyn SizeHint {
        self.hint
    }

    pub fn object(&self, handle: ObjectRef) -> &'a Object {
        self.graph.get(handle)
    }

    /// Lays out `handle` with the layout dispatch picks for it.
    pub fn layout_object(&mut self, handle: ObjectRef) -> Result<Layout, LayoutError> {
        let object = self.object(handle);
        let kind = self.dispatch.choose(object)?;
        debug!(uid:% = object.uid(), structure:% = object.kind(), layout:% = kind; "Dispatching layout");
        self.layout_with(handle, kind)
    }

    /// Lays out `handle` with an explicit layout kind.
    pub fn layout_with(&mut self, handle: ObjectRef, kind: LayoutKind) -> Result<Layout, LayoutError> {
        self.nested(handle, |ctx| kind.build(ctx, handle))
    }

    /// Runs `build` with `handle` marked as under construction.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Cycle`] if `handle` is already being built further up.
    pub(crate) fn nested<R>(
        &mut self,
        handle: ObjectRef,
        build: impl FnOnce(&mut Self) -> Result<R, LayoutError>,
    ) -> Result<R, LayoutError> {
        if handle.is_null() {
            return build(self);
        }
        if !self.building.insert(handle) {
            return Err(LayoutError::Cycle {
                uid: self.object(handle).uid(),
            });
        }
        let result = build(self);
        self.building.remove(&handle);
        result
    }
}
