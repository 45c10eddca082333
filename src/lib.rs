//! llbasic: IR, pass pipeline and C++ backend.
//!
//! This crate re-exports the workspace crates and offers [`compile`], which
//! runs the standard pipeline (name resolution, then C++ generation) over a
//! program built by a front end.
//!
//! ```no_run
//! use llbasic::{compile, CompilerOptions, Program};
//!
//! let mut program = Program::new();
//! let mut b = program.builder();
//! let hello = b.string("\"hello\"");
//! let call = b.call("print", vec![hello]);
//! let stmt = b.expr_stmt(call);
//! let body = b.body(vec![stmt]);
//! let text = b.arg("text", "string");
//! let print = b.function("print", "void", vec![text], None);
//! let main = b.function("main", "void", vec![], Some(body));
//! b.module("main", vec![print, main], vec![]).unwrap();
//!
//! let ctx = compile(program, CompilerOptions::default()).unwrap();
//! assert!(ctx.artifact.unwrap().contains("print(\"hello\");"));
//! ```

use log::debug;

pub use llbasic_compiler::{
    CompilationContext, CompilerOptions, CppBackend, CppEmitter, Pass, PassId, PassManager,
    ResolvePass, Scheduler, SourceWriter,
};
pub use llbasic_core::{Fail, FailResult, Location, Token, TokenKind, TokenList};
pub use llbasic_ir::{
    Annotations, Ast, BinaryOperator, Builder, Node, NodeId, NodeKind, Program, TreePrinter,
    UnaryOperator, ValueType, Variant, verify_ownership,
};

/// IR node payloads and the visitor protocol.
pub mod ir {
    pub use llbasic_ir::*;
}

/// Run the default pipeline over `program`.
///
/// On success the returned context holds the side tables and the generated
/// C++ text; the text has also been written to `options.output_path` unless
/// the options are in-memory only.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn compile(program: Program, options: CompilerOptions) -> Result<CompilationContext, Fail> {
    let mut ctx = CompilationContext::new(program, options);
    let mut manager = PassManager::default_pipeline();
    manager.run(&mut ctx)?;
    debug!("pipeline finished: {:?}", manager.executed());
    Ok(ctx)
}
