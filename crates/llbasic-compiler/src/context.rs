//! CompilationContext - the state every pass reads and extends.

use llbasic_ir::{Annotations, Program};

use crate::config::CompilerOptions;

/// The program under compilation plus everything passes have produced.
///
/// Passes borrow the context mutably one at a time. The program itself is
/// only read; results go into [`Annotations`] or [`artifact`](Self::artifact).
#[derive(Debug, Clone)]
pub struct CompilationContext {
    /// The program being compiled.
    pub program: Program,
    /// Side tables filled by analysis passes.
    pub annotations: Annotations,
    /// Compiler settings.
    pub options: CompilerOptions,
    /// Generated C++ source, once the backend has run.
    pub artifact: Option<String>,
}

impl CompilationContext {
    /// A fresh context: empty side tables, no artifact yet.
    pub fn new(program: Program, options: CompilerOptions) -> Self {
        Self {
            program,
            annotations: Annotations::new(),
            options,
            artifact: None,
        }
    }
}
