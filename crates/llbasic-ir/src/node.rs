//! The closed set of IR node variants.
//!
//! Every node is a [`Node`] enum value stored in the [`Ast`](crate::Ast)
//! arena and addressed by a [`NodeId`]. The variant set is fixed by the
//! language, so runtime type identification is the enum tag itself:
//! [`NodeKind`] assigns each variant a sequential tag, [`Node::is`] compares
//! tags and [`Node::downcast`] hands out a typed view only when they match.

use std::fmt;

use llbasic_core::Location;

use crate::decl::{FunctionBody, FunctionDecl, Module, VarDecl};
use crate::expr::{BinaryOp, Call, Identifier, Literal, UnaryOp};
use crate::stmt::{Assign, Break, Continue, ExprStatement, If, Return, While};
use crate::visitor::{VisitResult, Visitor};

/// Stable identity of a node inside its arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Implemented by the payload struct of every node variant.
pub trait Variant: Sized {
    /// Tag of the variant.
    const KIND: NodeKind;

    /// Borrow the payload if `node` is this variant.
    fn from_node(node: &Node) -> Option<&Self>;

    /// Mutably borrow the payload if `node` is this variant.
    fn from_node_mut(node: &mut Node) -> Option<&mut Self>;

    /// Wrap the payload into a node.
    fn into_node(self) -> Node;

    /// Dispatch to the visitor handler for this variant.
    fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> VisitResult;
}

macro_rules! node_variants {
    ($($variant:ident => $visit:ident),* $(,)?) => {
        /// An IR node.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Node {
            $(
                #[doc = concat!("A `", stringify!($variant), "` node.")]
                $variant($variant),
            )*
        }

        /// Runtime type tag of a node variant.
        ///
        /// Tags are assigned sequentially in declaration order and are only
        /// meaningful within a single build of the compiler.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $(
                #[doc = concat!("Tag of [`", stringify!($variant), "`].")]
                $variant,
            )*
        }

        impl NodeKind {
            /// Every tag, in tag order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant),*];

            /// Variant name for diagnostics.
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => stringify!($variant),)*
                }
            }
        }

        impl Node {
            /// The runtime type tag of this node.
            #[inline]
            pub fn kind(&self) -> NodeKind {
                match self {
                    $(Node::$variant(_) => NodeKind::$variant,)*
                }
            }

            /// Invoke the visitor handler matching this node's variant.
            pub fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> VisitResult {
                match self {
                    $(Node::$variant(node) => visitor.$visit(id, node),)*
                }
            }
        }

        $(
            impl Variant for $variant {
                const KIND: NodeKind = NodeKind::$variant;

                #[inline]
                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                #[inline]
                fn from_node_mut(node: &mut Node) -> Option<&mut Self> {
                    match node {
                        Node::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn into_node(self) -> Node {
                    Node::$variant(self)
                }

                fn accept<V: Visitor + ?Sized>(&self, id: NodeId, visitor: &mut V) -> VisitResult {
                    visitor.$visit(id, self)
                }
            }

            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

node_variants! {
    Module => visit_module,
    FunctionDecl => visit_function_decl,
    FunctionBody => visit_function_body,
    VarDecl => visit_var_decl,
    Literal => visit_literal,
    Identifier => visit_identifier,
    BinaryOp => visit_binary_op,
    UnaryOp => visit_unary_op,
    Assign => visit_assign,
    Call => visit_call,
    Return => visit_return,
    If => visit_if,
    While => visit_while,
    Break => visit_break,
    Continue => visit_continue,
    ExprStatement => visit_expr_statement,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Node {
    /// Check whether this node was constructed as variant `V`.
    #[inline]
    pub fn is<V: Variant>(&self) -> bool {
        self.kind() == V::KIND
    }

    /// Typed view of this node, or `None` if it is another variant.
    #[inline]
    pub fn downcast<V: Variant>(&self) -> Option<&V> {
        if !self.is::<V>() {
            return None;
        }
        V::from_node(self)
    }

    /// Mutable typed view of this node, or `None` if it is another variant.
    #[inline]
    pub fn downcast_mut<V: Variant>(&mut self) -> Option<&mut V> {
        if !self.is::<V>() {
            return None;
        }
        V::from_node_mut(self)
    }

    /// Source location the node was built from.
    pub fn location(&self) -> Location {
        match self {
            Node::Module(n) => n.location,
            Node::FunctionDecl(n) => n.name.location,
            Node::FunctionBody(n) => n.location,
            Node::VarDecl(n) => n.name.location,
            Node::Literal(n) => n.value.location,
            Node::Identifier(n) => n.name.location,
            Node::BinaryOp(n) => n.location,
            Node::UnaryOp(n) => n.location,
            Node::Assign(n) => n.name.location,
            Node::Call(n) => n.name.location,
            Node::Return(n) => n.location,
            Node::If(n) => n.location,
            Node::While(n) => n.location,
            Node::Break(n) => n.location,
            Node::Continue(n) => n.location,
            Node::ExprStatement(n) => n.location,
        }
    }

    /// Structurally owned children, in source order.
    ///
    /// Back-references (resolved declarations, loop linkage) are not
    /// children; they live in side tables.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            Node::Module(n) => n.functions.iter().chain(&n.globals).copied().collect(),
            Node::FunctionDecl(n) => n.args.iter().copied().chain(n.body).collect(),
            Node::FunctionBody(n) => n.statements.clone(),
            Node::VarDecl(n) => n.init.into_iter().collect(),
            Node::Literal(_) | Node::Identifier(_) | Node::Break(_) | Node::Continue(_) => {
                Vec::new()
            }
            Node::BinaryOp(n) => vec![n.lhs, n.rhs],
            Node::UnaryOp(n) => vec![n.operand],
            Node::Assign(n) => vec![n.value],
            Node::Call(n) => n.args.clone(),
            Node::Return(n) => n.value.into_iter().collect(),
            Node::If(n) => std::iter::once(n.condition)
                .chain(n.then_branch.iter().copied())
                .chain(n.else_branch.iter().copied())
                .collect(),
            Node::While(n) => std::iter::once(n.condition)
                .chain(n.body.iter().copied())
                .collect(),
            Node::ExprStatement(n) => vec![n.expr],
        }
    }
}
