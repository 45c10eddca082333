//! Statement nodes.
//!
//! Control flow (`If`, `While`) owns its nested statement lists directly;
//! `Break` and `Continue` only carry a location, the loop they leave is
//! recorded by name resolution in the `enclosing_loops` side table.

use llbasic_core::{FailResult, Location, Token};

use crate::NodeId;

/// Assignment to a named variable (`name = expr`).
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// Target variable name (identifier token)
    pub name: Token,
    /// Assigned expression
    pub value: NodeId,
}

impl Assign {
    /// The target variable name.
    pub fn name(&self) -> FailResult<&str> {
        self.name.get_text()
    }
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    /// Optional return value
    pub value: Option<NodeId>,
    /// Source location
    pub location: Location,
}

/// An if statement with optional else branch.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    /// The condition
    pub condition: NodeId,
    /// Statements run when the condition holds
    pub then_branch: Vec<NodeId>,
    /// Statements run otherwise (may be empty)
    pub else_branch: Vec<NodeId>,
    /// Source location
    pub location: Location,
}

impl If {
    /// Append a statement to the then (`true`) or else (`false`) branch.
    pub fn add_stmt(&mut self, stmt: NodeId, branch: bool) {
        if branch {
            self.then_branch.push(stmt);
        } else {
            self.else_branch.push(stmt);
        }
    }
}

/// A while loop.
#[derive(Debug, Clone, PartialEq)]
pub struct While {
    /// The loop condition
    pub condition: NodeId,
    /// Loop body
    pub body: Vec<NodeId>,
    /// Source location
    pub location: Location,
}

impl While {
    /// Append a statement to the loop body.
    pub fn add_stmt(&mut self, stmt: NodeId) {
        self.body.push(stmt);
    }
}

/// A break statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    /// Source location
    pub location: Location,
}

/// A continue statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    /// Source location
    pub location: Location,
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStatement {
    /// The expression
    pub expr: NodeId,
    /// Source location
    pub location: Location,
}
