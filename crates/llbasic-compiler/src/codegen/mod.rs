//! C++ code generation.
//!
//! [`CppBackend`] is the last pass of the pipeline. It lowers a resolved
//! program to a single C++ translation unit in three sweeps over all
//! modules, so that every function is declared before any body uses it:
//!
//! ```text
//! // auto generated by llbasic compiler
//! #include "llb_runtime.h"
//!
//! // decls from '<module>'      one per module with functions
//! extern|static <ret> <name>(<type> <arg>, ...);
//!
//! // globals from '<module>'    one per module with globals
//! static <type> <name>;
//!
//! static <ret> <name>(...) {    one per function with a body
//!   <hoisted locals>
//!   <statements>
//! }
//! ```
//!
//! Functions without a body are `extern` (provided by the runtime); the rest
//! are `static`. The text is buffered in a [`SourceWriter`] and written to
//! the configured path only once lowering has fully succeeded.

mod writer;

use std::fs;

use log::{debug, info};

use llbasic_core::{Fail, FailResult, TokenKind};
use llbasic_ir::visitor::{VisitResult, Visitor};
use llbasic_ir::{
    Annotations, Assign, Ast, BinaryOp, BinaryOperator, Break, Call, Continue, ExprStatement,
    FunctionBody, FunctionDecl, Identifier, If, Literal, Module, NodeId, NodeKind, Program,
    Return, UnaryOp, VarDecl, VarScope, While,
};

pub use writer::SourceWriter;

use crate::config::CompilerOptions;
use crate::context::CompilationContext;
use crate::passes::{Pass, PassId};

/// First line of every generated file.
pub const GENERATED_BANNER: &str = "// auto generated by llbasic compiler";

/// The C++ backend pass.
#[derive(Debug, Default)]
pub struct CppBackend;

impl CppBackend {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Pass for CppBackend {
    fn id(&self) -> PassId {
        PassId::CODEGEN_CPP
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()> {
        debug!("lowering {} modules to C++", ctx.program.index());
        let text = CppEmitter::new(ctx.program.ast(), &ctx.annotations, &ctx.options)
            .emit(&ctx.program)?;

        if ctx.options.write_output {
            let path = &ctx.options.output_path;
            fs::write(path, &text).map_err(|err| Fail::io(path, &err))?;
            info!("wrote {} bytes of C++ to {}", text.len(), path.display());
        }

        ctx.artifact = Some(text);
        Ok(())
    }
}

/// Which part of the file the module walk is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Declarations,
    Globals,
    Bodies,
}

/// Visitor rendering the IR as C++.
pub struct CppEmitter<'a> {
    ast: &'a Ast,
    annotations: &'a Annotations,
    options: &'a CompilerOptions,
    out: SourceWriter,
    sweep: Sweep,
}

impl<'a> CppEmitter<'a> {
    /// An emitter reading resolved `annotations`, formatting per `options`.
    pub fn new(ast: &'a Ast, annotations: &'a Annotations, options: &'a CompilerOptions) -> Self {
        Self {
            ast,
            annotations,
            options,
            out: SourceWriter::new(options.indent_width),
            sweep: Sweep::Declarations,
        }
    }

    /// Render the whole translation unit.
    pub fn emit(mut self, program: &Program) -> FailResult<String> {
        self.emit_header();
        for sweep in [Sweep::Declarations, Sweep::Globals, Sweep::Bodies] {
            self.sweep = sweep;
            program.visit(&mut self)?;
        }
        Ok(self.out.into_string())
    }

    fn emit_header(&mut self) {
        self.out.println(GENERATED_BANNER);
        self.out
            .println(&format!("#include \"{}\"", self.options.runtime_header));
        self.out.new_line();
    }

    fn wrong_sweep(&self, what: &str, id: NodeId) -> Fail {
        Fail::internal(format!(
            "{} {} reached during the {:?} sweep",
            what, id, self.sweep
        ))
    }

    /// `extern|static <ret> <name>(<type> <arg>, ...)`
    fn emit_signature(&mut self, decl: &FunctionDecl) -> FailResult<()> {
        let ast = self.ast;
        self.out
            .print(if decl.has_body() { "static " } else { "extern " });
        self.out.print(decl.return_type()?);
        self.out.put_char(' ');
        self.out.print(decl.name()?);
        self.out.put_char('(');
        for (index, &arg) in decl.args.iter().enumerate() {
            if index > 0 {
                self.out.print(", ");
            }
            let arg = ast.expect::<VarDecl>(arg)?;
            self.out.print(arg.type_name()?);
            self.out.put_char(' ');
            self.out.print(arg.name()?);
        }
        self.out.put_char(')');
        Ok(())
    }

    fn function(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        self.visit_function_decl(id, ast.expect::<FunctionDecl>(id)?)
    }

    fn global(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        self.visit_var_decl(id, ast.expect::<VarDecl>(id)?)
    }

    fn statements(&mut self, ids: &[NodeId]) -> VisitResult {
        for &id in ids {
            self.statement(id)?;
        }
        Ok(())
    }

    /// Emit one statement; each statement handler owns its whole line(s).
    fn statement(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        let node = ast.node(id)?;
        match node.kind() {
            NodeKind::VarDecl
            | NodeKind::Assign
            | NodeKind::Return
            | NodeKind::If
            | NodeKind::While
            | NodeKind::Break
            | NodeKind::Continue
            | NodeKind::ExprStatement => node.accept(id, self),
            kind => Err(Fail::internal_at(
                format!("{} cannot appear as a statement", kind),
                node.location(),
            )),
        }
    }

    /// Emit one expression inline.
    fn expression(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        let node = ast.node(id)?;
        match node.kind() {
            NodeKind::Literal
            | NodeKind::Identifier
            | NodeKind::BinaryOp
            | NodeKind::UnaryOp
            | NodeKind::Call => node.accept(id, self),
            kind => Err(Fail::internal_at(
                format!("{} cannot appear in an expression", kind),
                node.location(),
            )),
        }
    }

    /// `(<cond>)` for `if`/`while`, reusing the brackets of operator nodes.
    fn condition(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        let brackets_itself = match ast.get_as::<BinaryOp>(id) {
            Some(binary) => binary.op != BinaryOperator::Assign,
            None => ast.is::<UnaryOp>(id),
        };
        if brackets_itself {
            return self.expression(id);
        }
        self.out.put_char('(');
        self.expression(id)?;
        self.out.put_char(')');
        Ok(())
    }

    /// `<indent><text>;` for single-line statements.
    fn simple_statement(&mut self, text: &str) {
        self.out.fill_indent();
        self.out.print(text);
        self.out.println(";");
    }

    fn nested(&mut self, ids: &[NodeId]) -> VisitResult {
        self.out.indent();
        let result = self.statements(ids);
        self.out.dedent();
        result
    }
}

impl Visitor for CppEmitter<'_> {
    fn visit_module(&mut self, _: NodeId, node: &Module) -> VisitResult {
        match self.sweep {
            Sweep::Declarations => {
                if node.functions.is_empty() {
                    return Ok(());
                }
                self.out
                    .println(&format!("// decls from '{}'", node.name));
                for &function in &node.functions {
                    self.function(function)?;
                }
                self.out.new_line();
            }
            Sweep::Globals => {
                if node.globals.is_empty() {
                    return Ok(());
                }
                self.out
                    .println(&format!("// globals from '{}'", node.name));
                for &global in &node.globals {
                    self.global(global)?;
                }
                self.out.new_line();
            }
            Sweep::Bodies => {
                for &function in &node.functions {
                    self.function(function)?;
                }
            }
        }
        Ok(())
    }

    fn visit_function_decl(&mut self, id: NodeId, node: &FunctionDecl) -> VisitResult {
        match self.sweep {
            Sweep::Declarations => {
                self.emit_signature(node)?;
                self.out.println(";");
                Ok(())
            }
            Sweep::Bodies => {
                let Some(body) = node.body else {
                    return Ok(());
                };
                self.emit_signature(node)?;
                self.out.println(" {");
                let ast = self.ast;
                self.visit_function_body(body, ast.expect::<FunctionBody>(body)?)?;
                self.out.println("}");
                self.out.new_line();
                Ok(())
            }
            Sweep::Globals => Err(self.wrong_sweep("function", id)),
        }
    }

    fn visit_function_body(&mut self, id: NodeId, node: &FunctionBody) -> VisitResult {
        let ast = self.ast;
        self.out.indent();
        for &local in self.annotations.locals.require(id)? {
            let var = ast.expect::<VarDecl>(local)?;
            self.out.fill_indent();
            self.out.print(var.type_name()?);
            self.out.put_char(' ');
            self.out.print(var.name()?);
            self.out.println(";");
        }
        let result = self.statements(&node.statements);
        self.out.dedent();
        result
    }

    fn visit_var_decl(&mut self, id: NodeId, node: &VarDecl) -> VisitResult {
        match (node.scope, self.sweep) {
            (VarScope::Global, Sweep::Globals) => {
                let line = format!("static {} {}", node.type_name()?, node.name()?);
                self.simple_statement(&line);
                Ok(())
            }
            // Declared with the hoisted locals; only the initialization is left here.
            (VarScope::Local, Sweep::Bodies) => {
                let Some(init) = node.init else {
                    return Ok(());
                };
                self.out.fill_indent();
                self.out.print(node.name()?);
                self.out.put_char('=');
                self.expression(init)?;
                self.out.println(";");
                Ok(())
            }
            _ => Err(self.wrong_sweep("variable", id)),
        }
    }

    fn visit_literal(&mut self, _: NodeId, node: &Literal) -> VisitResult {
        let token = &node.value;
        match token.kind {
            TokenKind::FloatLiteral => {
                let value = token.get_float()?;
                if !value.is_finite() {
                    return Err(Fail::internal_at(
                        format!("float literal {} is not finite", value),
                        token.location,
                    ));
                }
                // `{:?}` always keeps a decimal point or exponent.
                self.out.print(&format!("{:?}f", value));
            }
            TokenKind::IntLiteral => self.out.print(&token.get_int()?.to_string()),
            TokenKind::StringLiteral => self.out.print(token.get_text()?),
            other => {
                return Err(Fail::internal_at(
                    format!("cannot emit a {} token as a literal", other),
                    token.location,
                ));
            }
        }
        Ok(())
    }

    fn visit_identifier(&mut self, _: NodeId, node: &Identifier) -> VisitResult {
        self.out.print(node.name()?);
        Ok(())
    }

    fn visit_binary_op(&mut self, _: NodeId, node: &BinaryOp) -> VisitResult {
        let bracket = node.op != BinaryOperator::Assign;
        if bracket {
            self.out.put_char('(');
        }
        self.expression(node.lhs)?;
        self.out.print(node.op.symbol());
        self.expression(node.rhs)?;
        if bracket {
            self.out.put_char(')');
        }
        Ok(())
    }

    fn visit_unary_op(&mut self, _: NodeId, node: &UnaryOp) -> VisitResult {
        self.out.put_char('(');
        self.out.print(node.op.symbol());
        self.expression(node.operand)?;
        self.out.put_char(')');
        Ok(())
    }

    fn visit_call(&mut self, _: NodeId, node: &Call) -> VisitResult {
        self.out.print(node.name()?);
        self.out.put_char('(');
        for (index, &arg) in node.args.iter().enumerate() {
            if index > 0 {
                self.out.print(", ");
            }
            self.expression(arg)?;
        }
        self.out.put_char(')');
        Ok(())
    }

    fn visit_assign(&mut self, _: NodeId, node: &Assign) -> VisitResult {
        self.out.fill_indent();
        self.out.print(node.name()?);
        self.out.put_char('=');
        self.expression(node.value)?;
        self.out.println(";");
        Ok(())
    }

    fn visit_return(&mut self, _: NodeId, node: &Return) -> VisitResult {
        self.out.fill_indent();
        self.out.print("return");
        if let Some(value) = node.value {
            self.out.put_char(' ');
            self.expression(value)?;
        }
        self.out.println(";");
        Ok(())
    }

    fn visit_if(&mut self, _: NodeId, node: &If) -> VisitResult {
        self.out.fill_indent();
        self.out.print("if ");
        self.condition(node.condition)?;
        self.out.println(" {");
        self.nested(&node.then_branch)?;
        if !node.else_branch.is_empty() {
            self.out.fill_indent();
            self.out.println("} else {");
            self.nested(&node.else_branch)?;
        }
        self.out.fill_indent();
        self.out.println("}");
        Ok(())
    }

    fn visit_while(&mut self, _: NodeId, node: &While) -> VisitResult {
        self.out.fill_indent();
        self.out.print("while ");
        self.condition(node.condition)?;
        self.out.println(" {");
        self.nested(&node.body)?;
        self.out.fill_indent();
        self.out.println("}");
        Ok(())
    }

    fn visit_break(&mut self, _: NodeId, _: &Break) -> VisitResult {
        self.simple_statement("break");
        Ok(())
    }

    fn visit_continue(&mut self, _: NodeId, _: &Continue) -> VisitResult {
        self.simple_statement("continue");
        Ok(())
    }

    fn visit_expr_statement(&mut self, _: NodeId, node: &ExprStatement) -> VisitResult {
        self.out.fill_indent();
        self.expression(node.expr)?;
        self.out.println(";");
        Ok(())
    }
}
