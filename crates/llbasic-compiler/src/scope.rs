//! Local scope management for name resolution.
//!
//! Tracks the parameters and locals of the function being resolved:
//! - block nesting (if/while bodies), with block-local visibility
//! - one name per function: every local is hoisted to the top of the
//!   generated function, so a name may not be declared twice anywhere in it

use llbasic_core::{Fail, FailResult, Location};
use llbasic_ir::{NodeId, ValueType};
use rustc_hash::{FxHashMap, FxHashSet};

/// A parameter or local visible in the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVar {
    /// The declaring `VarDecl`
    pub decl: NodeId,
    /// Declared type
    pub value_type: ValueType,
    /// Block depth at the declaration (0 = parameters)
    pub depth: u32,
}

/// Scope chain of one function.
#[derive(Debug, Default)]
pub struct LocalScope {
    /// Visible variables by name
    variables: FxHashMap<String, LocalVar>,
    /// Every name declared so far in the function
    declared: FxHashSet<String>,
    /// Current block depth
    depth: u32,
}

impl LocalScope {
    /// An empty scope at parameter depth.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a nested block.
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave the current block, hiding the variables declared in it.
    pub fn pop_scope(&mut self) {
        let depth = self.depth;
        self.variables.retain(|_, var| var.depth < depth);
        self.depth = self.depth.saturating_sub(1);
    }

    /// Declare a variable in the current block.
    pub fn declare(
        &mut self,
        name: &str,
        decl: NodeId,
        value_type: ValueType,
        location: Location,
    ) -> FailResult<()> {
        if !self.declared.insert(name.to_string()) {
            return Err(Fail::at(
                format!("'{}' is already declared in this function", name),
                location,
            ));
        }
        self.variables.insert(
            name.to_string(),
            LocalVar {
                decl,
                value_type,
                depth: self.depth,
            },
        );
        Ok(())
    }

    /// Find a visible variable.
    pub fn lookup(&self, name: &str) -> Option<&LocalVar> {
        self.variables.get(name)
    }
}
