//! The decoded object graph.
//!
//! A snapshot of a running program is a graph of objects: arrays, tree nodes,
//! graphs, pointers and scalar values that may reference each other freely,
//! including cyclically. [`ObjectGraph`] stores them in an arena addressed by
//! copyable [`ObjectRef`] handles, so that layouts can use object identity as a
//! map key without borrowing the graph.
//!
//! Handle `0` is always the shared null object ([`ObjectRef::NULL`]).

use std::{collections::HashMap, fmt, str::FromStr};

use log::trace;
use thiserror::Error;

use crate::identifier::Id;

/// Handle to an object inside an [`ObjectGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(u32);

impl ObjectRef {
    /// The shared null object.
    pub const NULL: ObjectRef = ObjectRef(0);

    /// Position of the object in its graph's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Per-object rendering hints carried by the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    draw_once: bool,
    layout: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            draw_once: true,
            layout: None,
        }
    }
}

impl Metadata {
    /// Default metadata for a structure of the given kind.
    ///
    /// Numbers and null are values rather than identities; the same literal may
    /// show up in many places, so they are never "draw once".
    pub fn for_kind(kind: StructureKind) -> Self {
        let draw_once = !matches!(
            kind,
            StructureKind::Null | StructureKind::Int | StructureKind::Float
        );
        Self {
            draw_once,
            layout: None,
        }
    }

    /// Whether the object is expected to appear at most once in a picture.
    pub fn draw_once(&self) -> bool {
        self.draw_once
    }

    /// Name of the layout explicitly requested for this object, if any.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn with_draw_once(mut self, draw_once: bool) -> Self {
        self.draw_once = draw_once;
        self
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = Some(layout.into());
        self
    }
}

/// The shape of a decoded object, with references to other objects as handles.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Pointer {
        referent: ObjectRef,
    },
    Array {
        items: Vec<ObjectRef>,
    },
    TreeNode {
        data: ObjectRef,
        children: Vec<ObjectRef>,
    },
    Node {
        data: ObjectRef,
    },
    Edge {
        orig: ObjectRef,
        dest: ObjectRef,
        data: ObjectRef,
    },
    Graph {
        nodes: Vec<ObjectRef>,
        edges: Vec<ObjectRef>,
    },
    /// An opaque UI object; it has no picture.
    Widget,
}

impl Structure {
    pub fn kind(&self) -> StructureKind {
        match self {
            Self::Null => StructureKind::Null,
            Self::Int(_) => StructureKind::Int,
            Self::Float(_) => StructureKind::Float,
            Self::String(_) => StructureKind::String,
            Self::Pointer { .. } => StructureKind::Pointer,
            Self::Array { .. } => StructureKind::Array,
            Self::TreeNode { .. } => StructureKind::TreeNode,
            Self::Node { .. } => StructureKind::Node,
            Self::Edge { .. } => StructureKind::Edge,
            Self::Graph { .. } => StructureKind::Graph,
            Self::Widget => StructureKind::Widget,
        }
    }

    /// A tree node without children. Other structures are never leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::TreeNode { children, .. } if children.is_empty())
    }
}

/// Discriminant of [`Structure`], used as the dispatch key for layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    Null,
    Int,
    Float,
    String,
    Pointer,
    Array,
    TreeNode,
    Node,
    Edge,
    Graph,
    Widget,
}

impl StructureKind {
    pub const ALL: [StructureKind; 11] = [
        Self::Null,
        Self::Int,
        Self::Float,
        Self::String,
        Self::Pointer,
        Self::Array,
        Self::TreeNode,
        Self::Node,
        Self::Edge,
        Self::Graph,
        Self::Widget,
    ];

    /// Name used in snapshots and configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Pointer => "ptr",
            Self::Array => "array",
            Self::TreeNode => "treenode",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Graph => "graph",
            Self::Widget => "widget",
        }
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown structure kind `{s}`"))
    }
}

/// A decoded object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    handle: ObjectRef,
    uid: Id,
    metadata: Metadata,
    structure: Structure,
}

impl Object {
    pub fn handle(&self) -> ObjectRef {
        self.handle
    }

    pub fn uid(&self) -> Id {
        self.uid
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn kind(&self) -> StructureKind {
        self.structure.kind()
    }
}

/// Errors raised while building an [`ObjectGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate uid `{0}`")]
    DuplicateUid(Id),

    #[error("uid `{0}` contains the reserved character `#`")]
    ReservedUid(String),
}

/// Arena of decoded objects.
#[derive(Debug, Clone)]
pub struct ObjectGraph {
    objects: Vec<Object>,
    by_uid: HashMap<Id, ObjectRef>,
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectGraph {
    /// Creates a graph holding only the null object.
    pub fn new() -> Self {
        let mut graph = Self {
            objects: Vec::new(),
            by_uid: HashMap::new(),
        };
        graph.push(None, Structure::Null);
        graph
    }

    fn push(&mut self, uid: Option<Id>, structure: Structure) -> ObjectRef {
        let handle = ObjectRef(self.objects.len() as u32);
        let uid = uid.unwrap_or_else(|| Id::auto(handle.index()));
        let metadata = Metadata::for_kind(structure.kind());
        trace!(handle:% = handle, uid:% = uid, kind:% = structure.kind(); "Adding object");
        self.by_uid.insert(uid, handle);
        self.objects.push(Object {
            handle,
            uid,
            metadata,
            structure,
        });
        handle
    }

    /// Adds an anonymous object; it gets an automatic `#N` uid.
    ///
    /// Adding [`Structure::Null`] returns the shared null object.
    pub fn add(&mut self, structure: Structure) -> ObjectRef {
        if structure == Structure::Null {
            return ObjectRef::NULL;
        }
        self.push(None, structure)
    }

    /// Adds an object under a user-chosen uid.
    ///
    /// # Errors
    ///
    /// Fails if the uid is already taken or contains `#`, which is reserved for
    /// automatic uids.
    pub fn add_named(&mut self, uid: &str, structure: Structure) -> Result<ObjectRef, GraphError> {
        if uid.contains(Id::AUTO_PREFIX) {
            return Err(GraphError::ReservedUid(uid.to_string()));
        }
        let id = Id::new(uid);
        if self.by_uid.contains_key(&id) {
            return Err(GraphError::DuplicateUid(id));
        }
        Ok(self.push(Some(id), structure))
    }

    /// Replaces the structure of an existing object.
    ///
    /// Decoders create objects first and fill them in once every reference can
    /// be resolved.
    pub fn set_structure(&mut self, handle: ObjectRef, structure: Structure) {
        if handle.is_null() {
            return;
        }
        let object = &mut self.objects[handle.index()];
        object.metadata.draw_once &= Metadata::for_kind(structure.kind()).draw_once;
        object.structure = structure;
    }

    pub fn set_metadata(&mut self, handle: ObjectRef, metadata: Metadata) {
        if handle.is_null() {
            return;
        }
        self.objects[handle.index()].metadata = metadata;
    }

    /// Returns the object behind a handle produced by this graph.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another graph.
    pub fn get(&self, handle: ObjectRef) -> &Object {
        &self.objects[handle.index()]
    }

    pub fn find(&self, uid: &str) -> Option<ObjectRef> {
        self.by_uid.get(&Id::new(uid)).copied()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when only the null object is present.
    pub fn is_empty(&self) -> bool {
        self.objects.len() <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }
}

/// One decoded program state: the object graph, its top-level objects in
/// declaration order and the named variables pointing into it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    graph: ObjectGraph,
    roots: Vec<ObjectRef>,
    names: HashMap<String, ObjectRef>,
}

impl Snapshot {
    pub fn new(
        graph: ObjectGraph,
        roots: Vec<ObjectRef>,
        names: HashMap<String, ObjectRef>,
    ) -> Self {
        Self {
            graph,
            roots,
            names,
        }
    }

    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    pub fn roots(&self) -> &[ObjectRef] {
        &self.roots
    }

    /// Looks up the object bound to a program variable.
    pub fn var(&self, name: &str) -> Option<ObjectRef> {
        self.names.get(name).copied()
    }

    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}
