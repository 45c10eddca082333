//! Intermediate representation for the llbasic compiler.
//!
//! The IR is a tree of [`Node`]s stored in an [`Ast`] arena and rooted at the
//! modules of a [`Program`]. The node set is closed; each variant has a
//! payload struct implementing [`Variant`], so callers can test a node's
//! variant in O(1) and borrow a typed view of it without panicking.
//!
//! Traversals implement [`visitor::Visitor`]. Results of analyses are kept
//! outside the nodes, in the write-once tables of [`Annotations`].
//!
//! # Modules
//!
//! - `node`, `arena`: variants, tags, downcast, the node arena
//! - `decl`, `expr`, `stmt`, `ops`: node payloads
//! - [`visitor`]: the double-dispatch protocol
//! - `program`, `builder`: the container and its constructors
//! - `annotations`: side tables filled by passes
//! - `printer`, `verify`: diagnostics

mod annotations;
mod arena;
mod builder;
mod decl;
mod expr;
mod node;
mod ops;
mod printer;
mod program;
mod stmt;
mod verify;
pub mod visitor;

pub use annotations::{Annotations, SideTable, ValueType};
pub use arena::Ast;
pub use builder::Builder;
pub use decl::{FunctionBody, FunctionDecl, Module, VarDecl, VarScope};
pub use expr::{BinaryOp, Call, Identifier, Literal, UnaryOp};
pub use node::{Node, NodeId, NodeKind, Variant};
pub use ops::{BinaryOperator, UnaryOperator};
pub use printer::TreePrinter;
pub use program::Program;
pub use stmt::{Assign, Break, Continue, ExprStatement, If, Return, While};
pub use verify::verify_ownership;
