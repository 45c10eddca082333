//! Name resolution.
//!
//! Fills every side table the backend reads:
//!
//! | table                | filled for                                     |
//! |----------------------|------------------------------------------------|
//! | `value_types`        | functions, variables, every expression         |
//! | `declarations`       | `Identifier`, `Assign`, `Call`                 |
//! | `enclosing_loops`    | `Break`, `Continue`                            |
//! | `enclosing_functions`| `Return`                                       |
//! | `locals`             | `FunctionBody` (every local, declaration order)|
//!
//! Resolution runs in two steps. Registration records every function and
//! global of every module first, so calls and global references may appear
//! before the declaration. The walk then resolves bodies and local initializers
//! with block-scoped locals.
//!
//! Reported as located source failures:
//!
//! - unknown names, unknown type names and `void` variables
//! - duplicate declarations, and parameters or locals reusing the name of a
//!   module-level function or global (locals are hoisted, so they would
//!   capture every use of that name in the body)
//! - global initializers
//! - `break`/`continue` outside a loop
//! - call arity mismatches
//! - a return value in a `void` function, or a bare `return` in a function
//!   that has a return type
//!
//! Expression types are inferred for the side table but argument and
//! assignment types are not compared.

use log::debug;
use rustc_hash::FxHashMap;

use llbasic_core::{Fail, FailResult, Location, Token, TokenKind};
use llbasic_ir::visitor::{VisitResult, Visitor, walk_children};
use llbasic_ir::{
    Annotations, Assign, Ast, BinaryOp, BinaryOperator, Break, Call, Continue, ExprStatement,
    FunctionBody, FunctionDecl, Identifier, If, Literal, Module, NodeId, Return, UnaryOp,
    UnaryOperator, ValueType, VarDecl, VarScope, While, verify_ownership,
};

use super::{Pass, PassId, Scheduler};
use crate::context::CompilationContext;
use crate::loops::LoopStack;
use crate::scope::LocalScope;

/// The resolution pass. Schedules the C++ backend when it succeeds.
#[derive(Debug, Default)]
pub struct ResolvePass;

impl ResolvePass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }
}

impl Pass for ResolvePass {
    fn id(&self) -> PassId {
        PassId::RESOLVE
    }

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()> {
        let reachable = verify_ownership(&ctx.program)?;

        let mut resolver = Resolver::new(ctx.program.ast(), &mut ctx.annotations);
        resolver.register(ctx.program.modules())?;
        ctx.program.visit(&mut resolver)?;

        debug!(
            "resolved {} modules ({} nodes, {} globals)",
            ctx.program.index(),
            reachable,
            resolver.globals.len()
        );
        Ok(())
    }

    fn dependent_passes(&self, scheduler: &mut Scheduler) {
        scheduler.schedule(PassId::CODEGEN_CPP);
    }
}

/// A module-level name.
#[derive(Debug, Clone, Copy)]
enum Symbol {
    Function {
        decl: NodeId,
        return_type: ValueType,
        arity: usize,
    },
    Global {
        decl: NodeId,
        value_type: ValueType,
    },
}

/// Visitor performing the walk.
struct Resolver<'a> {
    ast: &'a Ast,
    annotations: &'a mut Annotations,
    /// Functions and globals of every module
    globals: FxHashMap<String, Symbol>,
    /// Parameters and locals of the current function
    scope: LocalScope,
    loops: LoopStack,
    /// Function whose body is being resolved
    function: Option<NodeId>,
    return_type: ValueType,
    /// Locals collected for the current body
    locals: Vec<NodeId>,
}

fn type_of(token: &Token) -> FailResult<ValueType> {
    let name = token.get_text()?;
    ValueType::from_name(name).ok_or_else(|| token.fail(format!("unknown type '{}'", name)))
}

fn variable_type_of(decl: &VarDecl) -> FailResult<ValueType> {
    let ty = type_of(&decl.ty)?;
    if ty == ValueType::Void {
        return Err(decl
            .ty
            .fail(format!("variable '{}' cannot have type void", decl.name()?)));
    }
    Ok(ty)
}

impl<'a> Resolver<'a> {
    fn new(ast: &'a Ast, annotations: &'a mut Annotations) -> Self {
        Self {
            ast,
            annotations,
            globals: FxHashMap::default(),
            scope: LocalScope::new(),
            loops: LoopStack::new(),
            function: None,
            return_type: ValueType::Void,
            locals: Vec::new(),
        }
    }

    fn visit(&mut self, id: NodeId) -> VisitResult {
        let ast = self.ast;
        ast.accept(id, self)
    }

    fn visit_all(&mut self, ids: &[NodeId]) -> VisitResult {
        let ast = self.ast;
        ast.accept_all(ids, self)
    }

    /// Record every function and global before any body is resolved.
    fn register(&mut self, modules: &[NodeId]) -> FailResult<()> {
        let ast = self.ast;
        for &module in modules {
            let module = ast.expect::<Module>(module)?;

            for &id in &module.functions {
                let decl = ast.expect::<FunctionDecl>(id)?;
                let return_type = type_of(&decl.return_type)?;
                let symbol = Symbol::Function {
                    decl: id,
                    return_type,
                    arity: decl.args.len(),
                };
                self.declare_global(&decl.name, symbol)?;
                self.annotations.value_types.set(id, return_type)?;
            }

            for &id in &module.globals {
                let decl = ast.expect::<VarDecl>(id)?;
                if decl.scope != VarScope::Global {
                    return Err(Fail::internal_at(
                        format!("module global '{}' is not global-scoped", decl.name()?),
                        decl.name.location,
                    ));
                }
                if decl.init.is_some() {
                    return Err(decl.name.fail("global initializers are not supported"));
                }
                let value_type = variable_type_of(decl)?;
                self.declare_global(&decl.name, Symbol::Global { decl: id, value_type })?;
                self.annotations.value_types.set(id, value_type)?;
            }
        }
        Ok(())
    }

    fn declare_global(&mut self, name: &Token, symbol: Symbol) -> FailResult<()> {
        let text = name.get_text()?;
        if self.globals.contains_key(text) {
            return Err(name.fail(format!("'{}' is already declared", text)));
        }
        self.globals.insert(text.to_string(), symbol);
        Ok(())
    }

    /// Parameters and locals may not take a module-level name.
    fn check_not_module_level(&self, decl: &VarDecl) -> FailResult<()> {
        let name = decl.name()?;
        if self.globals.contains_key(name) {
            return Err(decl.name.fail(format!(
                "'{}' is already declared at module level",
                name
            )));
        }
        Ok(())
    }

    /// Resolve a variable reference: locals first, then globals.
    fn lookup_variable(&self, name: &Token) -> FailResult<(NodeId, ValueType)> {
        let text = name.get_text()?;
        if let Some(var) = self.scope.lookup(text) {
            return Ok((var.decl, var.value_type));
        }
        match self.globals.get(text) {
            Some(Symbol::Global { decl, value_type }) => Ok((*decl, *value_type)),
            Some(Symbol::Function { .. }) => {
                Err(name.fail(format!("'{}' is a function, not a variable", text)))
            }
            None => Err(name.fail(format!("unknown identifier '{}'", text))),
        }
    }

    fn current_function(&self, location: Location) -> FailResult<NodeId> {
        self.function
            .ok_or_else(|| Fail::internal_at("statement outside of a function", location))
    }

    fn block(&mut self, statements: &[NodeId]) -> VisitResult {
        self.scope.push_scope();
        let result = self.visit_all(statements);
        self.scope.pop_scope();
        result
    }
}

impl Visitor for Resolver<'_> {
    fn visit_module(&mut self, id: NodeId, _: &Module) -> VisitResult {
        walk_children(self.ast, id, self)
    }

    fn visit_function_decl(&mut self, id: NodeId, node: &FunctionDecl) -> VisitResult {
        self.function = Some(id);
        self.return_type = *self.annotations.value_types.require(id)?;
        self.scope = LocalScope::new();

        let result = walk_children(self.ast, id, self);

        self.function = None;
        self.scope = LocalScope::new();
        debug!("resolved function '{}'", node.name()?);
        result
    }

    fn visit_function_body(&mut self, id: NodeId, node: &FunctionBody) -> VisitResult {
        self.locals.clear();
        self.block(&node.statements)?;
        let locals = std::mem::take(&mut self.locals);
        self.annotations.locals.set(id, locals)
    }

    fn visit_var_decl(&mut self, id: NodeId, node: &VarDecl) -> VisitResult {
        match node.scope {
            // Registered up front.
            VarScope::Global => Ok(()),
            VarScope::Arg => {
                self.current_function(node.name.location)?;
                self.check_not_module_level(node)?;
                let value_type = variable_type_of(node)?;
                self.scope
                    .declare(node.name()?, id, value_type, node.name.location)?;
                self.annotations.value_types.set(id, value_type)
            }
            VarScope::Local => {
                self.current_function(node.name.location)?;
                self.check_not_module_level(node)?;
                // The initializer cannot see the variable it initializes.
                if let Some(init) = node.init {
                    self.visit(init)?;
                }
                let value_type = variable_type_of(node)?;
                self.scope
                    .declare(node.name()?, id, value_type, node.name.location)?;
                self.locals.push(id);
                self.annotations.value_types.set(id, value_type)
            }
        }
    }

    fn visit_literal(&mut self, id: NodeId, node: &Literal) -> VisitResult {
        let value_type = match node.value.kind {
            TokenKind::IntLiteral => ValueType::Int,
            TokenKind::FloatLiteral => ValueType::Float,
            TokenKind::StringLiteral => ValueType::String,
            other => {
                return Err(Fail::internal_at(
                    format!("literal holds a {} token", other),
                    node.value.location,
                ));
            }
        };
        self.annotations.value_types.set(id, value_type)
    }

    fn visit_identifier(&mut self, id: NodeId, node: &Identifier) -> VisitResult {
        let (decl, value_type) = self.lookup_variable(&node.name)?;
        self.annotations.declarations.set(id, decl)?;
        self.annotations.value_types.set(id, value_type)
    }

    fn visit_binary_op(&mut self, id: NodeId, node: &BinaryOp) -> VisitResult {
        if node.op.is_assignment() && !self.ast.is::<Identifier>(node.lhs) {
            return Err(Fail::at(
                "left side of '=' must be a variable",
                node.location,
            ));
        }
        self.visit(node.lhs)?;
        self.visit(node.rhs)?;

        let lhs = *self.annotations.value_types.require(node.lhs)?;
        let rhs = *self.annotations.value_types.require(node.rhs)?;
        let value_type = match node.op {
            BinaryOperator::Assign => lhs,
            op if op.is_comparison() => ValueType::Bool,
            _ if lhs == ValueType::Float || rhs == ValueType::Float => ValueType::Float,
            _ => lhs,
        };
        self.annotations.value_types.set(id, value_type)
    }

    fn visit_unary_op(&mut self, id: NodeId, node: &UnaryOp) -> VisitResult {
        self.visit(node.operand)?;
        let value_type = match node.op {
            UnaryOperator::Neg => *self.annotations.value_types.require(node.operand)?,
            UnaryOperator::LogicalNot => ValueType::Bool,
        };
        self.annotations.value_types.set(id, value_type)
    }

    fn visit_call(&mut self, id: NodeId, node: &Call) -> VisitResult {
        self.visit_all(&node.args)?;

        let name = node.name()?;
        match self.globals.get(name).copied() {
            Some(Symbol::Function {
                decl,
                return_type,
                arity,
            }) => {
                if arity != node.args.len() {
                    return Err(node.name.fail(format!(
                        "'{}' takes {} argument(s) but {} were given",
                        name,
                        arity,
                        node.args.len()
                    )));
                }
                self.annotations.declarations.set(id, decl)?;
                self.annotations.value_types.set(id, return_type)
            }
            Some(Symbol::Global { .. }) => {
                Err(node.name.fail(format!("'{}' is not a function", name)))
            }
            None => Err(node.name.fail(format!("unknown function '{}'", name))),
        }
    }

    fn visit_assign(&mut self, id: NodeId, node: &Assign) -> VisitResult {
        self.visit(node.value)?;
        let (decl, _) = self.lookup_variable(&node.name)?;
        self.annotations.declarations.set(id, decl)
    }

    fn visit_return(&mut self, id: NodeId, node: &Return) -> VisitResult {
        let function = self.current_function(node.location)?;
        self.annotations.enclosing_functions.set(id, function)?;

        match (node.value, self.return_type) {
            (Some(_), ValueType::Void) => Err(Fail::at(
                "a void function cannot return a value",
                node.location,
            )),
            (Some(value), _) => self.visit(value),
            (None, ValueType::Void) => Ok(()),
            (None, expected) => Err(Fail::at(
                format!("missing return value of type {}", expected.name()),
                node.location,
            )),
        }
    }

    fn visit_if(&mut self, _: NodeId, node: &If) -> VisitResult {
        self.visit(node.condition)?;
        self.block(&node.then_branch)?;
        self.block(&node.else_branch)
    }

    fn visit_while(&mut self, id: NodeId, node: &While) -> VisitResult {
        self.visit(node.condition)?;
        self.loops.enter_loop(id);
        let result = self.block(&node.body);
        self.loops.exit_loop();
        result
    }

    fn visit_break(&mut self, id: NodeId, node: &Break) -> VisitResult {
        let target = self
            .loops
            .innermost()
            .ok_or_else(|| Fail::at("'break' outside of a loop", node.location))?;
        self.annotations.enclosing_loops.set(id, target)
    }

    fn visit_continue(&mut self, id: NodeId, node: &Continue) -> VisitResult {
        let target = self
            .loops
            .innermost()
            .ok_or_else(|| Fail::at("'continue' outside of a loop", node.location))?;
        self.annotations.enclosing_loops.set(id, target)
    }

    fn visit_expr_statement(&mut self, _: NodeId, node: &ExprStatement) -> VisitResult {
        self.visit(node.expr)
    }
}
