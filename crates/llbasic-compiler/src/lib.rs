//! llbasic Compiler
//!
//! Turns a populated [`Program`](llbasic_ir::Program) into C++ source.
//!
//! ## Architecture
//!
//! - **Resolve**: bind names, link `break`/`continue` and `return` to their
//!   targets, collect the locals of every body, assign value types
//! - **Codegen**: lower the resolved program to one C++ translation unit
//!
//! Passes run under a [`PassManager`], which starts from an entry pass and
//! follows the dependents each finished pass requests.
//!
//! ## Modules
//!
//! - [`config`]: compiler options
//! - [`context`]: the state shared by all passes
//! - [`passes`]: pass trait, pass manager, name resolution
//! - [`codegen`]: the C++ backend
//! - [`scope`], [`loops`]: bookkeeping used during resolution

pub mod codegen;
pub mod config;
pub mod context;
pub mod loops;
pub mod passes;
pub mod scope;

pub use codegen::{CppBackend, CppEmitter, SourceWriter};
pub use config::CompilerOptions;
pub use context::CompilationContext;
pub use loops::LoopStack;
pub use passes::{Pass, PassId, PassManager, ResolvePass, Scheduler};
pub use scope::{LocalScope, LocalVar};
