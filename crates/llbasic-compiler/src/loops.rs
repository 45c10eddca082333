//! Loop tracking for break/continue linkage.

use llbasic_ir::NodeId;

/// Stack of enclosing `While` loops, innermost last.
#[derive(Debug, Default)]
pub struct LoopStack {
    loops: Vec<NodeId>,
}

impl LoopStack {
    /// An empty stack, outside of any loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loop `id`.
    pub fn enter_loop(&mut self, id: NodeId) {
        self.loops.push(id);
    }

    /// Leave the innermost loop.
    pub fn exit_loop(&mut self) -> Option<NodeId> {
        self.loops.pop()
    }

    /// The loop a `break` or `continue` here would leave.
    pub fn innermost(&self) -> Option<NodeId> {
        self.loops.last().copied()
    }
}
