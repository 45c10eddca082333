//! Pass results attached to nodes.
//!
//! Analyses do not change node shapes. Each analysis owns one [`SideTable`]
//! keyed by [`NodeId`]; the pass that computes it writes every entry exactly
//! once and later passes only read. Entries that point at other nodes are
//! non-owning back-references.

use rustc_hash::FxHashMap;

use llbasic_core::{Fail, FailResult};

use crate::NodeId;

/// Primitive value types of llbasic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// No value (`void` functions)
    Void,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
}

impl ValueType {
    /// Look up a type by its source spelling.
    pub fn from_name(name: &str) -> Option<ValueType> {
        Some(match name {
            "void" => ValueType::Void,
            "bool" => ValueType::Bool,
            "int" => ValueType::Int,
            "float" => ValueType::Float,
            "string" => ValueType::String,
            _ => return None,
        })
    }

    /// Source spelling of the type.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Void => "void",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
        }
    }
}

/// A write-once annotation table.
#[derive(Debug, Clone)]
pub struct SideTable<T> {
    name: &'static str,
    entries: FxHashMap<NodeId, T>,
}

impl<T> SideTable<T> {
    /// Create an empty table; `name` appears in failure messages.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: FxHashMap::default(),
        }
    }

    /// Record the annotation for `id`.
    ///
    /// Recording twice for the same node is an internal failure.
    pub fn set(&mut self, id: NodeId, value: T) -> FailResult<()> {
        if self.entries.contains_key(&id) {
            return Err(Fail::internal(format!(
                "{} already recorded for node {}",
                self.name, id
            )));
        }
        self.entries.insert(id, value);
        Ok(())
    }

    /// Read the annotation for `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.entries.get(&id)
    }

    /// Read an annotation a previous pass must have recorded.
    pub fn require(&self, id: NodeId) -> FailResult<&T> {
        self.get(id)
            .ok_or_else(|| Fail::internal(format!("no {} recorded for node {}", self.name, id)))
    }

    /// Whether `id` has an annotation.
    pub fn contains(&self, id: NodeId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table name used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// All side tables produced by name resolution.
#[derive(Debug, Clone)]
pub struct Annotations {
    /// Value type of expressions, variables and functions (return type).
    pub value_types: SideTable<ValueType>,
    /// Declaration an `Identifier`, `Assign` or `Call` refers to.
    pub declarations: SideTable<NodeId>,
    /// `While` loop a `Break` or `Continue` leaves.
    pub enclosing_loops: SideTable<NodeId>,
    /// `FunctionDecl` a `Return` belongs to.
    pub enclosing_functions: SideTable<NodeId>,
    /// Local `VarDecl`s of a `FunctionBody`, in declaration order.
    pub locals: SideTable<Vec<NodeId>>,
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            value_types: SideTable::new("value type"),
            declarations: SideTable::new("declaration"),
            enclosing_loops: SideTable::new("enclosing loop"),
            enclosing_functions: SideTable::new("enclosing function"),
            locals: SideTable::new("local list"),
        }
    }
}

impl Annotations {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_table_is_write_once() {
        let mut table = SideTable::new("declaration");
        let id = NodeId(3);
        table.set(id, NodeId(1)).unwrap();
        let err = table.set(id, NodeId(2)).unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.message(), "declaration already recorded for node #3");
        assert_eq!(table.get(id), Some(&NodeId(1)));
    }

    #[test]
    fn require_reports_missing_entry() {
        let table: SideTable<ValueType> = SideTable::new("value type");
        let err = table.require(NodeId(0)).unwrap_err();
        assert!(err.is_internal());
        assert!(table.is_empty());
    }

    #[test]
    fn value_type_names() {
        for ty in [
            ValueType::Void,
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::String,
        ] {
            assert_eq!(ValueType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(ValueType::from_name("double"), None);
    }

    #[test]
    fn annotations_start_empty() {
        let ann = Annotations::new();
        assert!(ann.locals.is_empty());
        assert_eq!(ann.enclosing_loops.name(), "enclosing loop");
    }
}
