//! The program container.

use llbasic_core::{Fail, FailResult};

use crate::arena::Ast;
use crate::builder::Builder;
use crate::decl::Module;
use crate::node::NodeId;
use crate::visitor::{VisitResult, Visitor};

/// A whole program: the node arena plus the ordered top-level modules.
///
/// The parser populates it one module at a time; passes read it through
/// [`Program::visit`] or by walking [`Program::modules`].
#[derive(Debug, Clone, Default)]
pub struct Program {
    ast: Ast,
    modules: Vec<NodeId>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// The node arena.
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// The node arena, mutably (for building and in-place edits).
    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    /// A builder allocating into this program.
    pub fn builder(&mut self) -> Builder<'_> {
        Builder::new(self)
    }

    /// Append a top-level module.
    ///
    /// Only `Module` nodes may sit at the top level; anything else is an
    /// internal failure and leaves the program unchanged.
    pub fn push(&mut self, module: NodeId) -> FailResult<()> {
        let node = self.ast.node(module)?;
        if !node.is::<Module>() {
            return Err(Fail::internal_at(
                format!(
                    "only modules can be top-level nodes, found {} at {}",
                    node.kind(),
                    module
                ),
                node.location(),
            ));
        }
        self.modules.push(module);
        Ok(())
    }

    /// Remove and return the last module.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.modules.pop()
    }

    /// The last module, if any.
    pub fn top(&self) -> Option<NodeId> {
        self.modules.last().copied()
    }

    /// Number of top-level modules.
    pub fn index(&self) -> usize {
        self.modules.len()
    }

    /// Top-level modules in insertion order.
    pub fn modules(&self) -> &[NodeId] {
        &self.modules
    }

    /// Dispatch every module to `visitor` in order, stopping at the first
    /// failure.
    pub fn visit<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        self.ast.accept_all(&self.modules, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk_children;
    use crate::{
        Assign, BinaryOp, Break, Call, Continue, ExprStatement, FunctionBody, FunctionDecl,
        Identifier, If, Literal, Return, UnaryOp, VarDecl, While,
    };

    /// Collects module names; fails on a chosen one.
    struct ModuleNames<'a> {
        ast: &'a Ast,
        names: Vec<String>,
        stop_at: Option<&'static str>,
    }

    macro_rules! ignore {
        ($($name:ident: $ty:ty),*) => {
            $(fn $name(&mut self, _: NodeId, _: &$ty) -> VisitResult { Ok(()) })*
        };
    }

    impl Visitor for ModuleNames<'_> {
        fn visit_module(&mut self, id: NodeId, node: &Module) -> VisitResult {
            if self.stop_at == Some(node.name.as_str()) {
                return Err(Fail::internal(format!("stopped at {}", node.name)));
            }
            self.names.push(node.name.clone());
            walk_children(self.ast, id, self)
        }

        ignore!(visit_function_decl: FunctionDecl, visit_function_body: FunctionBody,
            visit_var_decl: VarDecl, visit_literal: Literal, visit_identifier: Identifier,
            visit_binary_op: BinaryOp, visit_unary_op: UnaryOp, visit_call: Call,
            visit_assign: Assign, visit_return: Return, visit_if: If, visit_while: While,
            visit_break: Break, visit_continue: Continue, visit_expr_statement: ExprStatement);
    }

    fn three_modules() -> Program {
        let mut program = Program::new();
        let mut b = program.builder();
        for name in ["a", "b", "c"] {
            b.module(name, vec![], vec![]).unwrap();
        }
        program
    }

    #[test]
    fn push_pop_top_index() {
        let mut program = three_modules();
        assert_eq!(program.index(), 3);
        let top = program.top().unwrap();
        assert_eq!(program.ast().expect::<Module>(top).unwrap().name, "c");
        assert_eq!(program.pop(), Some(top));
        assert_eq!(program.index(), 2);
        program.push(top).unwrap();
        assert_eq!(program.top(), Some(top));
    }

    #[test]
    fn push_rejects_non_modules() {
        let mut program = Program::new();
        let lit = program.builder().int(1);
        let err = program.push(lit).unwrap_err();
        assert!(err.is_internal());
        assert!(err.message().contains("found Literal"));
        assert_eq!(program.index(), 0);
    }

    #[test]
    fn pop_on_empty_is_none() {
        let mut program = Program::new();
        assert_eq!(program.pop(), None);
        assert_eq!(program.top(), None);
    }

    #[test]
    fn visit_goes_in_order() {
        let program = three_modules();
        let mut v = ModuleNames {
            ast: program.ast(),
            names: Vec::new(),
            stop_at: None,
        };
        program.visit(&mut v).unwrap();
        assert_eq!(v.names, vec!["a", "b", "c"]);
    }

    #[test]
    fn visit_stops_at_first_failure() {
        let program = three_modules();
        let mut v = ModuleNames {
            ast: program.ast(),
            names: Vec::new(),
            stop_at: Some("b"),
        };
        let err = program.visit(&mut v).unwrap_err();
        assert_eq!(err, Fail::internal("stopped at b"));
        assert_eq!(v.names, vec!["a"]);
    }
}
