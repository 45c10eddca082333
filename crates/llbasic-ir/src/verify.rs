//! Structural ownership check.
//!
//! Every node has at most one structural parent. A node reached twice while
//! descending from the top-level modules is either shared between parents or
//! part of a cycle; both are malformed IR.

use rustc_hash::FxHashSet;

use llbasic_core::{Fail, FailResult};

use crate::node::NodeId;
use crate::program::Program;

/// Check that the structural edges below the program's modules form a tree.
///
/// Returns the number of reachable nodes.
pub fn verify_ownership(program: &Program) -> FailResult<usize> {
    let ast = program.ast();
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut stack: Vec<NodeId> = program.modules().iter().rev().copied().collect();

    while let Some(id) = stack.pop() {
        let node = ast.node(id)?;
        if !seen.insert(id) {
            return Err(Fail::internal_at(
                format!("node {} ({}) has more than one owner", id, node.kind()),
                node.location(),
            ));
        }
        stack.extend(node.children().into_iter().rev());
    }

    Ok(seen.len())
}
