//! Convenience constructors for populating a [`Program`].
//!
//! The parser, tests and benchmarks all build IR through [`Builder`]. Every
//! method allocates one node into the program's arena and returns its id;
//! nodes created by a builder carry the location last set with
//! [`Builder::at`].

use llbasic_core::{FailResult, Location, Token};

use crate::decl::{FunctionBody, FunctionDecl, Module, VarDecl, VarScope};
use crate::expr::{BinaryOp, Call, Identifier, Literal, UnaryOp};
use crate::node::{Node, NodeId};
use crate::ops::{BinaryOperator, UnaryOperator};
use crate::program::Program;
use crate::stmt::{Assign, Break, Continue, ExprStatement, If, Return, While};

/// Allocates nodes into a [`Program`].
pub struct Builder<'a> {
    program: &'a mut Program,
    location: Location,
}

impl<'a> Builder<'a> {
    /// Builder positioned at `1:1`.
    pub fn new(program: &'a mut Program) -> Self {
        Self {
            program,
            location: Location::new(1, 1),
        }
    }

    /// Set the location given to subsequently built nodes.
    pub fn at(&mut self, line: u32, column: u32) -> &mut Self {
        self.location = Location::new(line, column);
        self
    }

    /// The location new nodes receive.
    pub fn location(&self) -> Location {
        self.location
    }

    fn alloc(&mut self, node: impl Into<Node>) -> NodeId {
        self.program.ast_mut().alloc(node)
    }

    fn name(&self, text: &str) -> Token {
        Token::identifier(text, self.location)
    }

    // === Declarations ===

    /// Build a module and append it to the program.
    pub fn module(
        &mut self,
        name: &str,
        functions: Vec<NodeId>,
        globals: Vec<NodeId>,
    ) -> FailResult<NodeId> {
        let id = self.alloc(Module {
            name: name.to_string(),
            functions,
            globals,
            location: self.location,
        });
        self.program.push(id)?;
        Ok(id)
    }

    /// Build a function declaration; `body: None` declares an external
    /// function.
    pub fn function(
        &mut self,
        name: &str,
        return_type: &str,
        args: Vec<NodeId>,
        body: Option<NodeId>,
    ) -> NodeId {
        let mut decl = FunctionDecl::new(self.name(name), self.name(return_type));
        decl.args = args;
        decl.body = body;
        self.alloc(decl)
    }

    /// Build a function body.
    pub fn body(&mut self, statements: Vec<NodeId>) -> NodeId {
        let location = self.location;
        self.alloc(FunctionBody {
            statements,
            location,
        })
    }

    fn var(&mut self, scope: VarScope, name: &str, ty: &str, init: Option<NodeId>) -> NodeId {
        let mut decl = VarDecl::new(scope, self.name(name), self.name(ty));
        decl.init = init;
        self.alloc(decl)
    }

    /// Build a module-level variable.
    pub fn global(&mut self, name: &str, ty: &str, init: Option<NodeId>) -> NodeId {
        self.var(VarScope::Global, name, ty, init)
    }

    /// Build a local variable declaration statement.
    pub fn local(&mut self, name: &str, ty: &str, init: Option<NodeId>) -> NodeId {
        self.var(VarScope::Local, name, ty, init)
    }

    /// Build a function parameter.
    pub fn arg(&mut self, name: &str, ty: &str) -> NodeId {
        self.var(VarScope::Arg, name, ty, None)
    }

    // === Expressions ===

    /// Build a literal from an arbitrary token.
    pub fn literal(&mut self, value: Token) -> NodeId {
        self.alloc(Literal::new(value))
    }

    /// Build an integer literal.
    pub fn int(&mut self, value: i32) -> NodeId {
        let token = Token::int(value, self.location);
        self.literal(token)
    }

    /// Build a float literal.
    pub fn float(&mut self, value: f32) -> NodeId {
        let token = Token::float(value, self.location);
        self.literal(token)
    }

    /// Build a string literal; `text` is the raw source spelling.
    pub fn string(&mut self, text: &str) -> NodeId {
        let token = Token::string(text, self.location);
        self.literal(token)
    }

    /// Build a variable reference.
    pub fn ident(&mut self, name: &str) -> NodeId {
        let token = self.name(name);
        self.alloc(Identifier::new(token))
    }

    /// Build a binary operation.
    pub fn binary(&mut self, op: BinaryOperator, lhs: NodeId, rhs: NodeId) -> NodeId {
        let location = self.location;
        self.alloc(BinaryOp {
            op,
            lhs,
            rhs,
            location,
        })
    }

    /// Build a prefix operation.
    pub fn unary(&mut self, op: UnaryOperator, operand: NodeId) -> NodeId {
        let location = self.location;
        self.alloc(UnaryOp {
            op,
            operand,
            location,
        })
    }

    /// Build a call.
    pub fn call(&mut self, name: &str, args: Vec<NodeId>) -> NodeId {
        let mut call = Call::new(self.name(name));
        call.args = args;
        self.alloc(call)
    }

    // === Statements ===

    /// Build `name = value`.
    pub fn assign(&mut self, name: &str, value: NodeId) -> NodeId {
        let name = self.name(name);
        self.alloc(Assign { name, value })
    }

    /// Build a return statement.
    pub fn return_stmt(&mut self, value: Option<NodeId>) -> NodeId {
        let location = self.location;
        self.alloc(Return { value, location })
    }

    /// Build an if statement; an empty `else_branch` means no else.
    pub fn if_stmt(
        &mut self,
        condition: NodeId,
        then_branch: Vec<NodeId>,
        else_branch: Vec<NodeId>,
    ) -> NodeId {
        let location = self.location;
        self.alloc(If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// Build a while loop.
    pub fn while_loop(&mut self, condition: NodeId, body: Vec<NodeId>) -> NodeId {
        let location = self.location;
        self.alloc(While {
            condition,
            body,
            location,
        })
    }

    /// Build a break statement.
    pub fn break_stmt(&mut self) -> NodeId {
        let location = self.location;
        self.alloc(Break { location })
    }

    /// Build a continue statement.
    pub fn continue_stmt(&mut self) -> NodeId {
        let location = self.location;
        self.alloc(Continue { location })
    }

    /// Build an expression statement.
    pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
        let location = self.location;
        self.alloc(ExprStatement { expr, location })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeKind;

    #[test]
    fn builds_a_function_tree() {
        let mut program = Program::new();
        let mut b = program.builder();
        let x = b.arg("x", "int");
        let one = b.int(1);
        let xs = b.ident("x");
        let sum = b.binary(BinaryOperator::Add, xs, one);
        let ret = b.return_stmt(Some(sum));
        let body = b.body(vec![ret]);
        let f = b.function("inc", "int", vec![x], Some(body));
        let m = b.module("main", vec![f], vec![]).unwrap();

        let ast = program.ast();
        assert_eq!(program.modules(), &[m]);
        let decl = ast.expect::<FunctionDecl>(f).unwrap();
        assert_eq!(decl.name().unwrap(), "inc");
        assert_eq!(decl.return_type().unwrap(), "int");
        assert_eq!(decl.args, vec![x]);
        assert_eq!(ast.expect::<VarDecl>(x).unwrap().scope, VarScope::Arg);
        assert_eq!(ast.kind(sum), Some(NodeKind::BinaryOp));
    }

    #[test]
    fn at_sets_locations() {
        let mut program = Program::new();
        let mut b = program.builder();
        b.at(4, 9);
        let brk = b.break_stmt();
        let name = b.ident("y");
        assert_eq!(b.location(), Location::new(4, 9));
        let ast = program.ast();
        assert_eq!(ast.node(brk).unwrap().location(), Location::new(4, 9));
        assert_eq!(ast.node(name).unwrap().location(), Location::new(4, 9));
    }

    #[test]
    fn literal_tokens_keep_their_kind() {
        let mut program = Program::new();
        let mut b = program.builder();
        let f = b.float(2.5);
        let s = b.string("\"hi\"");
        let ast = program.ast();
        let f = ast.expect::<Literal>(f).unwrap();
        assert_eq!(f.value.get_float().unwrap(), 2.5);
        let s = ast.expect::<Literal>(s).unwrap();
        assert_eq!(s.value.get_text().unwrap(), "\"hi\"");
    }
}
