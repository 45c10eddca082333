//! Expression nodes.

use llbasic_core::{FailResult, Location, Token};

use crate::NodeId;
use crate::ops::{BinaryOperator, UnaryOperator};

/// A literal value: integer, float or string.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// The literal token; its kind selects how the value is rendered.
    pub value: Token,
}

impl Literal {
    /// Create a literal from its token.
    pub fn new(value: Token) -> Self {
        Self { value }
    }
}

/// A reference to a variable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The identifier token.
    pub name: Token,
}

impl Identifier {
    /// Create an identifier from its token.
    pub fn new(name: Token) -> Self {
        Self { name }
    }

    /// The referenced name.
    pub fn name(&self) -> FailResult<&str> {
        self.name.get_text()
    }
}

/// A binary operation (`lhs op rhs`), including assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    /// The operator
    pub op: BinaryOperator,
    /// Left operand
    pub lhs: NodeId,
    /// Right operand
    pub rhs: NodeId,
    /// Location of the operator
    pub location: Location,
}

/// A prefix operation (`op operand`).
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    /// The operator
    pub op: UnaryOperator,
    /// The operand
    pub operand: NodeId,
    /// Location of the operator
    pub location: Location,
}

/// A function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Callee name (identifier token)
    pub name: Token,
    /// Argument expressions
    pub args: Vec<NodeId>,
}

impl Call {
    /// Create a call without arguments.
    pub fn new(name: Token) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    /// The callee name.
    pub fn name(&self) -> FailResult<&str> {
        self.name.get_text()
    }

    /// Append an argument.
    pub fn add_arg(&mut self, arg: NodeId) {
        self.args.push(arg);
    }
}
