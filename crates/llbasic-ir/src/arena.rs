//! Node arena.
//!
//! All nodes of a program live in one [`Ast`]. Structural ownership is a tree
//! of [`NodeId`]s stored in parent payloads; cross references are plain ids in
//! side tables. Nodes are never removed, so ids stay valid for the lifetime of
//! the arena.

use llbasic_core::{Fail, FailResult};

use crate::node::{Node, NodeId, NodeKind, Variant};
use crate::visitor::{VisitResult, Visitor};

/// Arena owning every node of a program.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Ast {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a node into the arena and return its identity.
    pub fn alloc(&mut self, node: impl Into<Node>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node.into());
        id
    }

    /// Number of nodes allocated.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Look up a node mutably.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Look up a node, reporting a dangling id as an internal failure.
    pub fn node(&self, id: NodeId) -> FailResult<&Node> {
        self.get(id)
            .ok_or_else(|| Fail::internal(format!("dangling node id {}", id)))
    }

    /// Runtime type tag of a node.
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get(id).map(Node::kind)
    }

    /// Check whether `id` names a node of variant `V`.
    pub fn is<V: Variant>(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is::<V>)
    }

    /// Typed view of a node, or `None` if missing or another variant.
    pub fn get_as<V: Variant>(&self, id: NodeId) -> Option<&V> {
        self.get(id).and_then(Node::downcast::<V>)
    }

    /// Mutable typed view of a node, or `None` if missing or another variant.
    pub fn get_as_mut<V: Variant>(&mut self, id: NodeId) -> Option<&mut V> {
        self.get_mut(id).and_then(Node::downcast_mut::<V>)
    }

    /// Typed view of a node whose variant is required by the IR shape.
    ///
    /// A mismatch means the IR is malformed and is reported as an internal
    /// failure located at the offending node.
    pub fn expect<V: Variant>(&self, id: NodeId) -> FailResult<&V> {
        let node = self.node(id)?;
        node.downcast::<V>().ok_or_else(|| {
            Fail::internal_at(
                format!(
                    "expected {} at node {}, found {}",
                    V::KIND,
                    id,
                    node.kind()
                ),
                node.location(),
            )
        })
    }

    /// Dispatch node `id` to the visitor handler matching its variant.
    pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> VisitResult {
        self.node(id)?.accept(id, visitor)
    }

    /// Dispatch every node of `ids` in order, stopping at the first failure.
    pub fn accept_all<V: Visitor + ?Sized>(&self, ids: &[NodeId], visitor: &mut V) -> VisitResult {
        for &id in ids {
            self.accept(id, visitor)?;
        }
        Ok(())
    }

    /// Iterate over all nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }
}
