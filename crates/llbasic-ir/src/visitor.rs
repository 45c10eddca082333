//! Visitor protocol for traversing the IR.
//!
//! A traversal implements [`Visitor`], which has one required handler per
//! node variant. Dispatch goes through [`Ast::accept`], [`Node::accept`] or
//! [`Variant::accept`](crate::Variant::accept); all three pick the handler
//! from the node's own variant, however the caller holds the node.
//!
//! There are no default handlers: adding a variant breaks the build of every
//! visitor until it handles the new case. Visitors that only care about a few
//! variants call [`walk_children`] from the remaining handlers.
//!
//! # Example: counting calls
//!
//! ```
//! use llbasic_ir::visitor::{walk_children, VisitResult, Visitor};
//! use llbasic_ir::*;
//!
//! struct CallCounter<'a> {
//!     ast: &'a Ast,
//!     calls: usize,
//! }
//!
//! macro_rules! descend {
//!     ($($name:ident: $ty:ty),*) => {
//!         $(fn $name(&mut self, id: NodeId, _: &$ty) -> VisitResult {
//!             walk_children(self.ast, id, self)
//!         })*
//!     };
//! }
//!
//! impl Visitor for CallCounter<'_> {
//!     fn visit_call(&mut self, id: NodeId, _: &Call) -> VisitResult {
//!         self.calls += 1;
//!         walk_children(self.ast, id, self)
//!     }
//!
//!     descend!(visit_module: Module, visit_function_decl: FunctionDecl,
//!         visit_function_body: FunctionBody, visit_var_decl: VarDecl,
//!         visit_literal: Literal, visit_identifier: Identifier,
//!         visit_binary_op: BinaryOp, visit_unary_op: UnaryOp, visit_assign: Assign,
//!         visit_return: Return, visit_if: If, visit_while: While, visit_break: Break,
//!         visit_continue: Continue, visit_expr_statement: ExprStatement);
//! }
//!
//! let mut program = Program::new();
//! let mut b = program.builder();
//! let call = b.call("print", vec![]);
//! let stmt = b.expr_stmt(call);
//! let body = b.body(vec![stmt]);
//! let main = b.function("main", "void", vec![], Some(body));
//! b.module("main", vec![main], vec![]).unwrap();
//!
//! let mut counter = CallCounter { ast: program.ast(), calls: 0 };
//! program.visit(&mut counter).unwrap();
//! assert_eq!(counter.calls, 1);
//! ```

use llbasic_core::FailResult;

use crate::arena::Ast;
use crate::decl::{FunctionBody, FunctionDecl, Module, VarDecl};
use crate::expr::{BinaryOp, Call, Identifier, Literal, UnaryOp};
use crate::node::NodeId;
use crate::stmt::{Assign, Break, Continue, ExprStatement, If, Return, While};

/// Result of a visitor handler.
pub type VisitResult = FailResult<()>;

/// One handler per IR node variant.
pub trait Visitor {
    // === Declarations ===

    /// Visit a module.
    fn visit_module(&mut self, id: NodeId, node: &Module) -> VisitResult;

    /// Visit a function declaration.
    fn visit_function_decl(&mut self, id: NodeId, node: &FunctionDecl) -> VisitResult;

    /// Visit a function body.
    fn visit_function_body(&mut self, id: NodeId, node: &FunctionBody) -> VisitResult;

    /// Visit a variable declaration (global, local or parameter).
    fn visit_var_decl(&mut self, id: NodeId, node: &VarDecl) -> VisitResult;

    // === Expressions ===

    /// Visit a literal.
    fn visit_literal(&mut self, id: NodeId, node: &Literal) -> VisitResult;

    /// Visit an identifier.
    fn visit_identifier(&mut self, id: NodeId, node: &Identifier) -> VisitResult;

    /// Visit a binary operation.
    fn visit_binary_op(&mut self, id: NodeId, node: &BinaryOp) -> VisitResult;

    /// Visit a unary operation.
    fn visit_unary_op(&mut self, id: NodeId, node: &UnaryOp) -> VisitResult;

    /// Visit a function call.
    fn visit_call(&mut self, id: NodeId, node: &Call) -> VisitResult;

    // === Statements ===

    /// Visit an assignment.
    fn visit_assign(&mut self, id: NodeId, node: &Assign) -> VisitResult;

    /// Visit a return statement.
    fn visit_return(&mut self, id: NodeId, node: &Return) -> VisitResult;

    /// Visit an if statement.
    fn visit_if(&mut self, id: NodeId, node: &If) -> VisitResult;

    /// Visit a while loop.
    fn visit_while(&mut self, id: NodeId, node: &While) -> VisitResult;

    /// Visit a break statement.
    fn visit_break(&mut self, id: NodeId, node: &Break) -> VisitResult;

    /// Visit a continue statement.
    fn visit_continue(&mut self, id: NodeId, node: &Continue) -> VisitResult;

    /// Visit an expression statement.
    fn visit_expr_statement(&mut self, id: NodeId, node: &ExprStatement) -> VisitResult;
}

/// Dispatch every structural child of `id`, in source order.
pub fn walk_children<V: Visitor + ?Sized>(ast: &Ast, id: NodeId, visitor: &mut V) -> VisitResult {
    for child in ast.node(id)?.children() {
        ast.accept(child, visitor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::tests::one_of_each;
    use crate::node::{Node, NodeKind, Variant};
    use llbasic_core::{Fail, Location, Token};

    /// Records the name of every handler invoked.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<&'static str>,
    }

    macro_rules! record {
        ($($name:ident: $ty:ty => $label:literal),* $(,)?) => {
            $(fn $name(&mut self, _: NodeId, _: &$ty) -> VisitResult {
                self.seen.push($label);
                Ok(())
            })*
        };
    }

    impl Visitor for Recorder {
        record! {
            visit_module: Module => "Module",
            visit_function_decl: FunctionDecl => "FunctionDecl",
            visit_function_body: FunctionBody => "FunctionBody",
            visit_var_decl: VarDecl => "VarDecl",
            visit_literal: Literal => "Literal",
            visit_identifier: Identifier => "Identifier",
            visit_binary_op: BinaryOp => "BinaryOp",
            visit_unary_op: UnaryOp => "UnaryOp",
            visit_call: Call => "Call",
            visit_assign: Assign => "Assign",
            visit_return: Return => "Return",
            visit_if: If => "If",
            visit_while: While => "While",
            visit_break: Break => "Break",
            visit_continue: Continue => "Continue",
            visit_expr_statement: ExprStatement => "ExprStatement",
        }
    }

    /// A second visitor: fails on one chosen variant, counts the rest.
    struct FailOn {
        kind: NodeKind,
        ids: Vec<NodeId>,
    }

    impl FailOn {
        fn check(&mut self, id: NodeId, kind: NodeKind) -> VisitResult {
            if kind == self.kind {
                return Err(Fail::internal(format!("{} rejected", kind)));
            }
            self.ids.push(id);
            Ok(())
        }
    }

    macro_rules! check_kind {
        ($($name:ident: $ty:ident),* $(,)?) => {
            $(fn $name(&mut self, id: NodeId, _: &$ty) -> VisitResult {
                self.check(id, NodeKind::$ty)
            })*
        };
    }

    impl Visitor for FailOn {
        check_kind! {
            visit_module: Module,
            visit_function_decl: FunctionDecl,
            visit_function_body: FunctionBody,
            visit_var_decl: VarDecl,
            visit_literal: Literal,
            visit_identifier: Identifier,
            visit_binary_op: BinaryOp,
            visit_unary_op: UnaryOp,
            visit_call: Call,
            visit_assign: Assign,
            visit_return: Return,
            visit_if: If,
            visit_while: While,
            visit_break: Break,
            visit_continue: Continue,
            visit_expr_statement: ExprStatement,
        }
    }

    fn arena_of_each() -> (Ast, Vec<NodeId>) {
        let mut ast = Ast::new();
        let ids = one_of_each().into_iter().map(|n| ast.alloc(n)).collect();
        (ast, ids)
    }

    #[test]
    fn dispatch_through_arena_matches_variant() {
        let (ast, ids) = arena_of_each();
        for id in ids {
            let mut recorder = Recorder::default();
            ast.accept(id, &mut recorder).unwrap();
            assert_eq!(recorder.seen, vec![ast.kind(id).unwrap().name()]);
        }
    }

    #[test]
    fn dispatch_through_node_matches_variant() {
        for (index, node) in one_of_each().iter().enumerate() {
            let mut recorder = Recorder::default();
            node.accept(NodeId(index as u32), &mut recorder).unwrap();
            assert_eq!(recorder.seen, vec![node.kind().name()]);
        }
    }

    #[test]
    fn dispatch_through_concrete_type_matches_variant() {
        let node: Node = Literal::new(Token::float(1.5, Location::new(1, 1))).into();
        let literal = node.downcast::<Literal>().unwrap();
        let mut recorder = Recorder::default();
        Variant::accept(literal, NodeId(0), &mut recorder).unwrap();
        assert_eq!(recorder.seen, vec!["Literal"]);
    }

    #[test]
    fn every_variant_reaches_its_handler_in_second_visitor() {
        let (ast, ids) = arena_of_each();
        for &kind in NodeKind::ALL {
            let mut visitor = FailOn {
                kind,
                ids: Vec::new(),
            };
            let err = ast.accept_all(&ids, &mut visitor).unwrap_err();
            assert_eq!(err, Fail::internal(format!("{} rejected", kind)));
            assert_eq!(visitor.ids.len(), kind as usize);
        }
    }

    #[test]
    fn dispatch_through_trait_object() {
        let (ast, ids) = arena_of_each();
        let mut recorder = Recorder::default();
        let visitor: &mut dyn Visitor = &mut recorder;
        ast.accept_all(&ids, visitor).unwrap();
        assert_eq!(recorder.seen.len(), NodeKind::ALL.len());
    }

    #[test]
    fn walk_children_visits_in_source_order() {
        let mut ast = Ast::new();
        let loc = Location::new(1, 1);
        let lhs = ast.alloc(Identifier::new(Token::identifier("a", loc)));
        let rhs = ast.alloc(Literal::new(Token::int(2, loc)));
        let bin = ast.alloc(BinaryOp {
            op: crate::BinaryOperator::Add,
            lhs,
            rhs,
            location: loc,
        });
        let mut recorder = Recorder::default();
        walk_children(&ast, bin, &mut recorder).unwrap();
        assert_eq!(recorder.seen, vec!["Identifier", "Literal"]);
    }
}
