//! Keys and type names recognized in snapshot JSON.

pub const UID: &str = "uid";
pub const TYPE: &str = "type";
/// Short alias of [`TYPE`] for hand-written snapshots.
pub const TYPE_ALIAS: &str = "T";
pub const FROM: &str = "from";
pub const TO: &str = "to";
pub const CHILDREN: &str = "children";
pub const DATA: &str = "data";
pub const NODES: &str = "nodes";
pub const EDGES: &str = "edges";
pub const VAR: &str = "var";
pub const METADATA: &str = "metadata";

pub const META_DRAW_ONCE: &str = "draw_once";
pub const META_LAYOUT: &str = "layout";

pub const ARRAY_T: &str = "array";
pub const TREE_NODE_T: &str = "treenode";
pub const EDGE_T: &str = "edge";
pub const GRAPH_T: &str = "graph";
pub const NODE_T: &str = "node";
pub const NULL_T: &str = "null";
pub const POINTER_T: &str = "ptr";
pub const STRING_T: &str = "string";
pub const WIDGET_T: &str = "widget";

/// Every accepted value of the `type` key.
pub const TYPE_NAMES: [&str; 9] = [
    ARRAY_T,
    TREE_NODE_T,
    EDGE_T,
    GRAPH_T,
    NODE_T,
    NULL_T,
    POINTER_T,
    STRING_T,
    WIDGET_T,
];
