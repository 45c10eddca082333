//! Compiler passes.
//!
//! - [`manager`]: dependency-driven scheduling and fail-fast execution
//! - [`resolve`]: name resolution, fills the side tables
//! - the C++ backend lives in [`crate::codegen`]

use std::fmt;

use llbasic_core::FailResult;

use crate::context::CompilationContext;

pub mod manager;
pub mod resolve;

pub use manager::{PassManager, Scheduler};
pub use resolve::ResolvePass;

/// Identity of a pass kind. Two instances with the same id are the same pass
/// as far as scheduling is concerned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(&'static str);

impl PassId {
    /// Name resolution.
    pub const RESOLVE: PassId = PassId("resolve");
    /// C++ code generation.
    pub const CODEGEN_CPP: PassId = PassId("codegen-cpp");

    /// An id for a pass defined outside this crate.
    pub const fn new(name: &'static str) -> Self {
        PassId(name)
    }

    /// The pass name.
    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PassId({})", self.0)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A unit of work over the compilation context.
pub trait Pass {
    /// Scheduling identity.
    fn id(&self) -> PassId;

    /// Execute the pass.
    ///
    /// Returning a failure stops the pipeline; no later pass runs.
    fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()>;

    /// Request the passes that must run after this one.
    ///
    /// Called once, after a successful [`run`](Self::run).
    fn dependent_passes(&self, _scheduler: &mut Scheduler) {}
}
