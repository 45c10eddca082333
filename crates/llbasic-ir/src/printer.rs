//! Indented tree dump of a program, for diagnostics and test failures.
//!
//! ```text
//! Module main
//!   FunctionDecl main: void
//!     FunctionBody
//!       ExprStatement
//!         Call print
//! ```

use std::fmt::Write;

use llbasic_core::{Fail, Token, TokenKind};

use crate::arena::Ast;
use crate::decl::{FunctionBody, FunctionDecl, Module, VarDecl, VarScope};
use crate::expr::{BinaryOp, Call, Identifier, Literal, UnaryOp};
use crate::node::NodeId;
use crate::program::Program;
use crate::stmt::{Assign, Break, Continue, ExprStatement, If, Return, While};
use crate::visitor::{VisitResult, Visitor, walk_children};

/// Visitor rendering one line per node, children indented two spaces.
pub struct TreePrinter<'a> {
    ast: &'a Ast,
    depth: usize,
    out: String,
}

impl<'a> TreePrinter<'a> {
    /// Printer over the nodes of `ast`.
    pub fn new(ast: &'a Ast) -> Self {
        Self {
            ast,
            depth: 0,
            out: String::new(),
        }
    }

    /// Render every module of `program`.
    pub fn print(program: &Program) -> Result<String, Fail> {
        let mut printer = TreePrinter::new(program.ast());
        program.visit(&mut printer)?;
        Ok(printer.finish())
    }

    /// The text rendered so far.
    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, id: NodeId, text: std::fmt::Arguments<'_>) -> VisitResult {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        writeln!(self.out, "{}", text).map_err(|e| Fail::internal(e.to_string()))?;
        self.depth += 1;
        let result = walk_children(self.ast, id, self);
        self.depth -= 1;
        result
    }
}

fn literal_text(token: &Token) -> Result<String, Fail> {
    Ok(match token.kind {
        TokenKind::IntLiteral => token.get_int()?.to_string(),
        TokenKind::FloatLiteral => format!("{:?}", token.get_float()?),
        _ => token.get_text()?.to_string(),
    })
}

impl Visitor for TreePrinter<'_> {
    fn visit_module(&mut self, id: NodeId, node: &Module) -> VisitResult {
        self.line(id, format_args!("Module {}", node.name))
    }

    fn visit_function_decl(&mut self, id: NodeId, node: &FunctionDecl) -> VisitResult {
        let extern_marker = if node.has_body() { "" } else { " (extern)" };
        self.line(
            id,
            format_args!(
                "FunctionDecl {}: {}{}",
                node.name()?,
                node.return_type()?,
                extern_marker
            ),
        )
    }

    fn visit_function_body(&mut self, id: NodeId, _: &FunctionBody) -> VisitResult {
        self.line(id, format_args!("FunctionBody"))
    }

    fn visit_var_decl(&mut self, id: NodeId, node: &VarDecl) -> VisitResult {
        let scope = match node.scope {
            VarScope::Global => "global",
            VarScope::Local => "local",
            VarScope::Arg => "arg",
        };
        self.line(
            id,
            format_args!("VarDecl {} {}: {}", scope, node.name()?, node.type_name()?),
        )
    }

    fn visit_literal(&mut self, id: NodeId, node: &Literal) -> VisitResult {
        let text = literal_text(&node.value)?;
        self.line(id, format_args!("Literal {}", text))
    }

    fn visit_identifier(&mut self, id: NodeId, node: &Identifier) -> VisitResult {
        self.line(id, format_args!("Identifier {}", node.name()?))
    }

    fn visit_binary_op(&mut self, id: NodeId, node: &BinaryOp) -> VisitResult {
        self.line(id, format_args!("BinaryOp {}", node.op))
    }

    fn visit_unary_op(&mut self, id: NodeId, node: &UnaryOp) -> VisitResult {
        self.line(id, format_args!("UnaryOp {}", node.op))
    }

    fn visit_call(&mut self, id: NodeId, node: &Call) -> VisitResult {
        self.line(id, format_args!("Call {}", node.name()?))
    }

    fn visit_assign(&mut self, id: NodeId, node: &Assign) -> VisitResult {
        self.line(id, format_args!("Assign {}", node.name()?))
    }

    fn visit_return(&mut self, id: NodeId, _: &Return) -> VisitResult {
        self.line(id, format_args!("Return"))
    }

    fn visit_if(&mut self, id: NodeId, node: &If) -> VisitResult {
        self.line(
            id,
            format_args!(
                "If then={} else={}",
                node.then_branch.len(),
                node.else_branch.len()
            ),
        )
    }

    fn visit_while(&mut self, id: NodeId, _: &While) -> VisitResult {
        self.line(id, format_args!("While"))
    }

    fn visit_break(&mut self, id: NodeId, _: &Break) -> VisitResult {
        self.line(id, format_args!("Break"))
    }

    fn visit_continue(&mut self, id: NodeId, _: &Continue) -> VisitResult {
        self.line(id, format_args!("Continue"))
    }

    fn visit_expr_statement(&mut self, id: NodeId, _: &ExprStatement) -> VisitResult {
        self.line(id, format_args!("ExprStatement"))
    }
}
