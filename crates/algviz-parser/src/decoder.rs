//! Turns parsed JSON values into an [`ObjectGraph`].
//!
//! Objects are decoded post-order: nested objects and inline lists become
//! objects of their own before their owner is filled in. A JSON string in a
//! reference position names another object by uid; since that object may be
//! declared later, the reference is recorded as a [`Fixup`] and patched once the
//! whole snapshot has been read.

use std::collections::HashMap;

use algviz_core::structure::{
    GraphError, Metadata, ObjectGraph, ObjectRef, Snapshot, Structure, StructureKind,
};
use log::{debug, trace};
use serde_json::{Map, Value};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    tokens,
};

/// Which reference field of an object a fixup patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Referent,
    Data,
    Orig,
    Dest,
    Child(usize),
    Item(usize),
    Node(usize),
    Edge(usize),
}

#[derive(Debug)]
struct Fixup {
    owner: ObjectRef,
    slot: Slot,
    uid: String,
    path: String,
}

fn structure_kind(type_name: &str) -> Option<StructureKind> {
    match type_name {
        tokens::ARRAY_T => Some(StructureKind::Array),
        tokens::TREE_NODE_T => Some(StructureKind::TreeNode),
        tokens::EDGE_T => Some(StructureKind::Edge),
        tokens::GRAPH_T => Some(StructureKind::Graph),
        tokens::NODE_T => Some(StructureKind::Node),
        tokens::NULL_T => Some(StructureKind::Null),
        tokens::POINTER_T => Some(StructureKind::Pointer),
        tokens::STRING_T => Some(StructureKind::String),
        tokens::WIDGET_T => Some(StructureKind::Widget),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Decodes the objects of one snapshot.
pub(crate) struct SnapshotDecoder {
    graph: ObjectGraph,
    roots: Vec<ObjectRef>,
    names: HashMap<String, ObjectRef>,
    fixups: Vec<Fixup>,
    diagnostics: Vec<Diagnostic>,
}

impl SnapshotDecoder {
    pub(crate) fn new() -> Self {
        Self {
            graph: ObjectGraph::new(),
            roots: Vec::new(),
            names: HashMap::new(),
            fixups: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Decodes every entry of a snapshot list. `path` is the JSON path of the list.
    pub(crate) fn decode(mut self, entries: &[Value], path: &str) -> Result<Snapshot, ParseError> {
        for (idx, entry) in entries.iter().enumerate() {
            let entry_path = format!("{path}[{idx}]");
            match entry {
                Value::Object(map) => {
                    if let Some(handle) = self.object(map, &entry_path) {
                        self.roots.push(handle);
                    }
                }
                other => self.report(
                    Diagnostic::error(format!(
                        "snapshot entries must be objects, found {}",
                        json_kind(other)
                    ))
                    .with_code(ErrorCode::E101)
                    .with_path(entry_path),
                ),
            }
        }

        self.resolve();

        if !self.diagnostics.is_empty() {
            return Err(ParseError::new(self.diagnostics));
        }

        debug!(
            objects = self.graph.len(),
            roots = self.roots.len(),
            vars = self.names.len();
            "Decoded snapshot"
        );
        Ok(Snapshot::new(self.graph, self.roots, self.names))
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        trace!(diagnostic:% = diagnostic; "Decoder diagnostic");
        self.diagnostics.push(diagnostic);
    }

    fn object(&mut self, map: &Map<String, Value>, path: &str) -> Option<ObjectRef> {
        let kind = self.object_kind(map, path)?;
        let uid = match map.get(tokens::UID) {
            None => None,
            Some(Value::String(uid)) => Some(uid.as_str()),
            Some(other) => {
                self.report(
                    Diagnostic::error(format!("`uid` must be a string, found {}", json_kind(other)))
                        .with_code(ErrorCode::E204)
                        .with_path(path),
                );
                return None;
            }
        };

        if kind == StructureKind::Null {
            if let Some(uid) = uid {
                self.report(
                    Diagnostic::error(format!("`null` object has uid `{uid}`"))
                        .with_code(ErrorCode::E205)
                        .with_path(path)
                        .with_help("null objects are shared and cannot be named; remove the `uid`"),
                );
            }
            return Some(ObjectRef::NULL);
        }

        let handle = match uid {
            None => self.graph.add(Structure::Widget),
            Some(uid) => match self.graph.add_named(uid, Structure::Widget) {
                Ok(handle) => handle,
                Err(err @ GraphError::DuplicateUid(_)) => {
                    self.report(
                        Diagnostic::error(err.to_string())
                            .with_code(ErrorCode::E300)
                            .with_path(path),
                    );
                    return None;
                }
                Err(err @ GraphError::ReservedUid(_)) => {
                    self.report(
                        Diagnostic::error(err.to_string())
                            .with_code(ErrorCode::E302)
                            .with_path(path)
                            .with_help("`#` is reserved for uids generated by the decoder"),
                    );
                    return None;
                }
            },
        };

        let structure = self.structure(kind, handle, map, path)?;
        self.graph.set_structure(handle, structure);

        if let Some(value) = map.get(tokens::METADATA) {
            let metadata = self.metadata(kind, value, path)?;
            self.graph.set_metadata(handle, metadata);
        }

        if let Some(value) = map.get(tokens::VAR) {
            self.bind_var(handle, value, path);
        }

        Some(handle)
    }

    fn object_kind(&mut self, map: &Map<String, Value>, path: &str) -> Option<StructureKind> {
        let type_value = match (map.get(tokens::TYPE), map.get(tokens::TYPE_ALIAS)) {
            (Some(_), Some(_)) => {
                self.report(
                    Diagnostic::error("both `T` and `type` are specified")
                        .with_code(ErrorCode::E202)
                        .with_path(path)
                        .with_help("`T` is an alias of `type`; keep only one of them"),
                );
                return None;
            }
            (Some(value), None) | (None, Some(value)) => value,
            (None, None) => {
                self.report(
                    Diagnostic::error("object has no `type`")
                        .with_code(ErrorCode::E200)
                        .with_path(path),
                );
                return None;
            }
        };

        let Value::String(type_name) = type_value else {
            self.report(
                Diagnostic::error(format!(
                    "`type` must be a string, found {}",
                    json_kind(type_value)
                ))
                .with_code(ErrorCode::E204)
                .with_path(path),
            );
            return None;
        };

        match structure_kind(type_name) {
            Some(kind) => Some(kind),
            None => {
                self.report(
                    Diagnostic::error(format!("unknown object type `{type_name}`"))
                        .with_code(ErrorCode::E201)
                        .with_path(path)
                        .with_help(format!("expected one of: {}", tokens::TYPE_NAMES.join(", "))),
                );
                None
            }
        }
    }

    fn structure(
        &mut self,
        kind: StructureKind,
        handle: ObjectRef,
        map: &Map<String, Value>,
        path: &str,
    ) -> Option<Structure> {
        let structure = match kind {
            StructureKind::String => {
                let value = self.required(map, tokens::DATA, kind, path)?;
                match value {
                    Value::String(text) => Structure::String(text.clone()),
                    other => {
                        self.wrong_shape(tokens::DATA, "a string", other, path);
                        return None;
                    }
                }
            }
            StructureKind::Pointer => {
                let value = self.required(map, tokens::DATA, kind, path)?;
                let referent = self.reference(handle, Slot::Referent, value, &field_path(path, tokens::DATA));
                Structure::Pointer { referent }
            }
            StructureKind::Array => {
                let value = self.required(map, tokens::DATA, kind, path)?;
                let items = self.reference_list(handle, Slot::Item, tokens::DATA, value, path)?;
                Structure::Array { items }
            }
            StructureKind::TreeNode => {
                let data = self.optional_reference(handle, Slot::Data, map, tokens::DATA, path);
                let children = match map.get(tokens::CHILDREN) {
                    Some(value) => {
                        self.reference_list(handle, Slot::Child, tokens::CHILDREN, value, path)?
                    }
                    None => Vec::new(),
                };
                Structure::TreeNode { data, children }
            }
            StructureKind::Node => {
                let data = self.optional_reference(handle, Slot::Data, map, tokens::DATA, path);
                Structure::Node { data }
            }
            StructureKind::Edge => {
                let orig = self.required(map, tokens::FROM, kind, path)?;
                let dest = self.required(map, tokens::TO, kind, path)?;
                let orig = self.reference(handle, Slot::Orig, orig, &field_path(path, tokens::FROM));
                let dest = self.reference(handle, Slot::Dest, dest, &field_path(path, tokens::TO));
                let data = self.optional_reference(handle, Slot::Data, map, tokens::DATA, path);
                Structure::Edge { orig, dest, data }
            }
            StructureKind::Graph => {
                let value = self.required(map, tokens::NODES, kind, path)?;
                let nodes = self.reference_list(handle, Slot::Node, tokens::NODES, value, path)?;
                let edges = match map.get(tokens::EDGES) {
                    Some(value) => {
                        self.reference_list(handle, Slot::Edge, tokens::EDGES, value, path)?
                    }
                    None => Vec::new(),
                };
                Structure::Graph { nodes, edges }
            }
            StructureKind::Widget => Structure::Widget,
            StructureKind::Null | StructureKind::Int | StructureKind::Float => Structure::Null,
        };
        Some(structure)
    }

    fn required<'v>(
        &mut self,
        map: &'v Map<String, Value>,
        key: &str,
        kind: StructureKind,
        path: &str,
    ) -> Option<&'v Value> {
        let value = map.get(key);
        if value.is_none() {
            self.report(
                Diagnostic::error(format!("`{kind}` object is missing field `{key}`"))
                    .with_code(ErrorCode::E203)
                    .with_path(path),
            );
        }
        value
    }

    fn wrong_shape(&mut self, key: &str, expected: &str, found: &Value, path: &str) {
        self.report(
            Diagnostic::error(format!(
                "field `{key}` must be {expected}, found {}",
                json_kind(found)
            ))
            .with_code(ErrorCode::E204)
            .with_path(field_path(path, key)),
        );
    }

    fn optional_reference(
        &mut self,
        owner: ObjectRef,
        slot: Slot,
        map: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> ObjectRef {
        match map.get(key) {
            Some(value) => self.reference(owner, slot, value, &field_path(path, key)),
            None => ObjectRef::NULL,
        }
    }

    fn reference_list(
        &mut self,
        owner: ObjectRef,
        slot: fn(usize) -> Slot,
        key: &str,
        value: &Value,
        path: &str,
    ) -> Option<Vec<ObjectRef>> {
        let Value::Array(values) = value else {
            self.wrong_shape(key, "a list", value, path);
            return None;
        };
        let list_path = field_path(path, key);
        let refs = values
            .iter()
            .enumerate()
            .map(|(idx, item)| self.reference(owner, slot(idx), item, &format!("{list_path}[{idx}]")))
            .collect();
        Some(refs)
    }

    /// Decodes a value in reference position into an object handle.
    ///
    /// Uid strings resolve later; the returned handle is a null placeholder
    /// until the fixup is applied.
    fn reference(&mut self, owner: ObjectRef, slot: Slot, value: &Value, path: &str) -> ObjectRef {
        match value {
            Value::Null => ObjectRef::NULL,
            Value::String(uid) => {
                self.fixups.push(Fixup {
                    owner,
                    slot,
                    uid: uid.clone(),
                    path: path.to_string(),
                });
                ObjectRef::NULL
            }
            Value::Bool(flag) => self.graph.add(Structure::Int(i64::from(*flag))),
            Value::Number(number) => match number.as_i64() {
                Some(int) => self.graph.add(Structure::Int(int)),
                None => self
                    .graph
                    .add(Structure::Float(number.as_f64().unwrap_or(f64::NAN))),
            },
            Value::Object(map) => self.object(map, path).unwrap_or(ObjectRef::NULL),
            Value::Array(values) => {
                let handle = self.graph.add(Structure::Widget);
                let items = values
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| self.reference(handle, Slot::Item(idx), item, &format!("{path}[{idx}]")))
                    .collect();
                self.graph.set_structure(handle, Structure::Array { items });
                handle
            }
        }
    }

    fn metadata(&mut self, kind: StructureKind, value: &Value, path: &str) -> Option<Metadata> {
        let meta_path = field_path(path, tokens::METADATA);
        let Value::Object(map) = value else {
            self.report(
                Diagnostic::error(format!("`metadata` must be an object, found {}", json_kind(value)))
                    .with_code(ErrorCode::E206)
                    .with_path(meta_path),
            );
            return None;
        };

        let mut metadata = Metadata::for_kind(kind);
        for (key, entry) in map {
            match (key.as_str(), entry) {
                (tokens::META_DRAW_ONCE, Value::Bool(flag)) => {
                    metadata = metadata.with_draw_once(*flag);
                }
                (tokens::META_LAYOUT, Value::String(layout)) => {
                    metadata = metadata.with_layout(layout.clone());
                }
                (tokens::META_DRAW_ONCE | tokens::META_LAYOUT, other) => {
                    self.report(
                        Diagnostic::error(format!(
                            "metadata `{key}` has the wrong type, found {}",
                            json_kind(other)
                        ))
                        .with_code(ErrorCode::E206)
                        .with_path(field_path(&meta_path, key)),
                    );
                    return None;
                }
                _ => {
                    self.report(
                        Diagnostic::error(format!("unknown metadata key `{key}`"))
                            .with_code(ErrorCode::E206)
                            .with_path(field_path(&meta_path, key))
                            .with_help("supported keys are `draw_once` and `layout`"),
                    );
                    return None;
                }
            }
        }
        Some(metadata)
    }

    fn bind_var(&mut self, handle: ObjectRef, value: &Value, path: &str) {
        let Value::String(name) = value else {
            self.wrong_shape(tokens::VAR, "a string", value, path);
            return;
        };
        if self.names.contains_key(name) {
            self.report(
                Diagnostic::error(format!("variable `{name}` is bound twice"))
                    .with_code(ErrorCode::E303)
                    .with_path(field_path(path, tokens::VAR)),
            );
            return;
        }
        self.names.insert(name.clone(), handle);
    }

    fn resolve(&mut self) {
        for fixup in std::mem::take(&mut self.fixups) {
            let Some(target) = self.graph.find(&fixup.uid) else {
                self.report(
                    Diagnostic::error(format!("no object has uid `{}`", fixup.uid))
                        .with_code(ErrorCode::E301)
                        .with_path(fixup.path),
                );
                continue;
            };
            trace!(owner:% = fixup.owner, uid = fixup.uid.as_str(), target:% = target; "Resolving reference");
            self.patch(fixup.owner, fixup.slot, target);
        }
    }

    fn patch(&mut self, owner: ObjectRef, slot: Slot, target: ObjectRef) {
        let mut structure = self.graph.get(owner).structure().clone();
        let field = match (&mut structure, slot) {
            (Structure::Pointer { referent }, Slot::Referent) => Some(referent),
            (Structure::TreeNode { data, .. }, Slot::Data)
            | (Structure::Node { data }, Slot::Data)
            | (Structure::Edge { data, .. }, Slot::Data) => Some(data),
            (Structure::Edge { orig, .. }, Slot::Orig) => Some(orig),
            (Structure::Edge { dest, .. }, Slot::Dest) => Some(dest),
            (Structure::TreeNode { children, .. }, Slot::Child(idx)) => children.get_mut(idx),
            (Structure::Array { items }, Slot::Item(idx)) => items.get_mut(idx),
            (Structure::Graph { nodes, .. }, Slot::Node(idx)) => nodes.get_mut(idx),
            (Structure::Graph { edges, .. }, Slot::Edge(idx)) => edges.get_mut(idx),
            _ => None,
        };
        if let Some(field) = field {
            *field = target;
            self.graph.set_structure(owner, structure);
        }
    }
}

fn field_path(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}
