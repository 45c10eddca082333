//! Declaration nodes: modules, functions, function bodies and variables.

use llbasic_core::{FailResult, Location, Token};

use crate::NodeId;

/// A compilation unit: the functions and globals of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Module name, printed in the banners of the generated code.
    pub name: String,
    /// `FunctionDecl` nodes in declaration order.
    pub functions: Vec<NodeId>,
    /// Global `VarDecl` nodes in declaration order.
    pub globals: Vec<NodeId>,
    /// Source location
    pub location: Location,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            globals: Vec::new(),
            location: Location::default(),
        }
    }

    /// Append a function declaration.
    pub fn add_function(&mut self, function: NodeId) {
        self.functions.push(function);
    }

    /// Append a global variable declaration.
    pub fn add_global(&mut self, global: NodeId) {
        self.globals.push(global);
    }
}

/// A function declaration, with or without a body.
///
/// Functions without a body are implemented outside the program (by the
/// runtime) and are only declared.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// Function name (identifier token)
    pub name: Token,
    /// Return type name (identifier token)
    pub return_type: Token,
    /// Parameter `VarDecl` nodes with [`VarScope::Arg`]
    pub args: Vec<NodeId>,
    /// The `FunctionBody` node, if the function is implemented here
    pub body: Option<NodeId>,
}

impl FunctionDecl {
    /// Create a declaration without parameters or body.
    pub fn new(name: Token, return_type: Token) -> Self {
        Self {
            name,
            return_type,
            args: Vec::new(),
            body: None,
        }
    }

    /// The function name.
    pub fn name(&self) -> FailResult<&str> {
        self.name.get_text()
    }

    /// The return type name.
    pub fn return_type(&self) -> FailResult<&str> {
        self.return_type.get_text()
    }

    /// Append a parameter.
    pub fn add_arg(&mut self, arg: NodeId) {
        self.args.push(arg);
    }

    /// Whether the function is implemented in this program.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// The statement list of a function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionBody {
    /// Statements in source order
    pub statements: Vec<NodeId>,
    /// Source location
    pub location: Location,
}

impl FunctionBody {
    /// Append a statement.
    pub fn add_stmt(&mut self, stmt: NodeId) {
        self.statements.push(stmt);
    }
}

/// Where a variable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarScope {
    /// Module-level variable
    Global,
    /// Variable declared inside a function body
    Local,
    /// Function parameter
    Arg,
}

/// A variable declaration.
///
/// Examples:
/// - `var count: int`
/// - `var ratio: float = 0.5`
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// Storage class
    pub scope: VarScope,
    /// Variable name (identifier token)
    pub name: Token,
    /// Type name (identifier token)
    pub ty: Token,
    /// Optional initializer expression
    pub init: Option<NodeId>,
}

impl VarDecl {
    /// Create a declaration without initializer.
    pub fn new(scope: VarScope, name: Token, ty: Token) -> Self {
        Self {
            scope,
            name,
            ty,
            init: None,
        }
    }

    /// The variable name.
    pub fn name(&self) -> FailResult<&str> {
        self.name.get_text()
    }

    /// The type name.
    pub fn type_name(&self) -> FailResult<&str> {
        self.ty.get_text()
    }
}
