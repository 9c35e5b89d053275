//! In-memory attribute registry implementing [`AttributeHost`].
//!
//! Records every attribute the builder creates as a flat arena of
//! [`AttributeNode`]s linked by [`AttrId`]. Useful for tests, dry runs, and
//! dumping the attribute tree a declaration set would produce.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use crate::error::BuildError;
use crate::host::{AttributeFlags, AttributeHost, NumericKind, TypedDataKind};
use crate::options::ScalarUnit;
use crate::range::NumericRange;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AttrId(pub u32);

/// What kind of host attribute a node stands for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttributeKind {
    Numeric { numeric: NumericKind },
    NumericCompound,
    Unit { unit: ScalarUnit },
    Typed { data: TypedDataKind },
    Matrix,
    Color,
    Message,
    Compound,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
    pub id: AttrId,
    pub name: String,
    pub kind: AttributeKind,
    pub flags: AttributeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,
    pub children: Vec<AttrId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<AttrId>,
}

#[derive(Debug, Default)]
pub struct AttributeRegistry {
    nodes: Vec<AttributeNode>,
    /// Latest attribute created under each name.
    by_name: HashMap<String, AttrId>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: AttrId) -> Option<&AttributeNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Most recently created attribute with this name.
    pub fn find(&self, name: &str) -> Option<&AttributeNode> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    /// Attributes without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = &AttributeNode> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }

    pub fn children(&self, id: AttrId) -> impl Iterator<Item = &AttributeNode> {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|c| self.get(*c))
    }

    /// Direct child of `id` named `name`.
    pub fn child(&self, id: AttrId, name: &str) -> Option<&AttributeNode> {
        self.children(id).find(|c| c.name == name)
    }

    /// Resolve a dotted path of names starting at a root, e.g. `rig.arm.twist`.
    pub fn resolve(&self, path: &str) -> Option<&AttributeNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.roots().filter(|n| n.name == first).last()?;
        for seg in segments {
            node = self.child(node.id, seg)?;
        }
        Some(node)
    }

    /// Nested JSON view of the tree rooted at `id`.
    pub fn to_json(&self, id: AttrId) -> JsonValue {
        let Some(node) = self.get(id) else {
            return JsonValue::Null;
        };
        let mut value = serde_json::to_value(&node.kind).unwrap_or(JsonValue::Null);
        value["name"] = json!(node.name);
        value["flags"] = serde_json::to_value(node.flags).unwrap_or(JsonValue::Null);
        if let Some(range) = &node.range {
            value["range"] = serde_json::to_value(range).unwrap_or(JsonValue::Null);
        }
        if !node.children.is_empty() {
            let children: Vec<JsonValue> = node.children.iter().map(|c| self.to_json(*c)).collect();
            value["children"] = JsonValue::Array(children);
        }
        value
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_name.clear();
    }

    fn insert(&mut self, name: &str, kind: AttributeKind) -> Result<AttrId, BuildError> {
        if name.is_empty() {
            return Err(BuildError::host(name, "attribute name is empty"));
        }
        let id = AttrId(self.nodes.len() as u32);
        self.nodes.push(AttributeNode {
            id,
            name: name.to_string(),
            kind,
            flags: AttributeFlags::default(),
            range: None,
            children: Vec::new(),
            parent: None,
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    fn insert_parent(
        &mut self,
        name: &str,
        kind: AttributeKind,
        children: Vec<AttrId>,
    ) -> Result<AttrId, BuildError> {
        for (i, child) in children.iter().enumerate() {
            let node = self
                .get(*child)
                .ok_or_else(|| BuildError::host(name, format!("unknown child {child:?}")))?;
            if node.parent.is_some() {
                return Err(BuildError::host(
                    name,
                    format!("child '{}' already has a parent", node.name),
                ));
            }
            if children[..i].iter().any(|prev| self.nodes[prev.0 as usize].name == node.name) {
                return Err(BuildError::host(
                    name,
                    format!("duplicate child name '{}'", node.name),
                ));
            }
        }
        let id = self.insert(name, kind)?;
        for child in &children {
            self.nodes[child.0 as usize].parent = Some(id);
        }
        self.nodes[id.0 as usize].children = children;
        Ok(id)
    }

    fn node_mut(&mut self, id: AttrId) -> Result<&mut AttributeNode, BuildError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or_else(|| BuildError::host(format!("{id:?}"), "unknown attribute"))
    }
}

impl AttributeHost for AttributeRegistry {
    type Handle = AttrId;

    fn create_numeric(&mut self, name: &str, kind: NumericKind) -> Result<AttrId, BuildError> {
        self.insert(name, AttributeKind::Numeric { numeric: kind })
    }

    fn create_numeric_compound(
        &mut self,
        name: &str,
        children: [AttrId; 3],
    ) -> Result<AttrId, BuildError> {
        self.insert_parent(name, AttributeKind::NumericCompound, children.to_vec())
    }

    fn create_unit(&mut self, name: &str, unit: ScalarUnit) -> Result<AttrId, BuildError> {
        self.insert(name, AttributeKind::Unit { unit })
    }

    fn create_typed(&mut self, name: &str, data: TypedDataKind) -> Result<AttrId, BuildError> {
        self.insert(name, AttributeKind::Typed { data })
    }

    fn create_matrix(&mut self, name: &str) -> Result<AttrId, BuildError> {
        self.insert(name, AttributeKind::Matrix)
    }

    fn create_color(&mut self, name: &str, channels: [AttrId; 3]) -> Result<AttrId, BuildError> {
        self.insert_parent(name, AttributeKind::Color, channels.to_vec())
    }

    fn create_message(&mut self, name: &str) -> Result<AttrId, BuildError> {
        self.insert(name, AttributeKind::Message)
    }

    fn create_compound(&mut self, name: &str, children: Vec<AttrId>) -> Result<AttrId, BuildError> {
        self.insert_parent(name, AttributeKind::Compound, children)
    }

    fn set_flags(&mut self, handle: &AttrId, flags: AttributeFlags) -> Result<(), BuildError> {
        self.node_mut(*handle)?.flags = flags;
        Ok(())
    }

    fn set_range(&mut self, handle: &AttrId, range: &NumericRange) -> Result<(), BuildError> {
        self.node_mut(*handle)?.range = Some(*range);
        Ok(())
    }

    fn checkpoint(&self) -> usize {
        self.nodes.len()
    }

    fn rollback(&mut self, checkpoint: usize) {
        if checkpoint >= self.nodes.len() {
            return;
        }
        self.nodes.truncate(checkpoint);
        let live = checkpoint as u32;
        for node in &mut self.nodes {
            if node.parent.is_some_and(|p| p.0 >= live) {
                node.parent = None;
            }
            node.children.retain(|c| c.0 < live);
        }
        self.by_name = self
            .nodes
            .iter()
            .map(|n| (n.name.clone(), n.id))
            .collect();
    }
}
