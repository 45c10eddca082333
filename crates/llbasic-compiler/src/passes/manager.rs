//! PassManager - runs passes in dependency order.
//!
//! Passes are not listed up front. The manager is seeded with one entry
//! pass; every pass that completes names its dependents through a
//! [`Scheduler`], and the manager drains that work queue first-in first-out.
//!
//! # Scheduling rules
//!
//! - an id that already executed is ignored
//! - an id that is queued but not yet executed moves to the back of the
//!   queue, so it still runs after every pass that asked for it
//! - anything else is appended
//!
//! Each pass therefore runs at most once per [`PassManager::run`].

use std::collections::VecDeque;

use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};

use llbasic_core::{Fail, FailResult};

use super::{Pass, PassId, ResolvePass};
use crate::codegen::CppBackend;
use crate::context::CompilationContext;

/// Work queue handed to passes so they can request their dependents.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<PassId>,
    executed: FxHashSet<PassId>,
}

impl Scheduler {
    /// Request that `id` runs after the current pass.
    pub fn schedule(&mut self, id: PassId) {
        if self.has_executed(id) {
            trace!("pass '{}' already executed, not rescheduled", id);
            return;
        }
        if let Some(position) = self.queue.iter().position(|&queued| queued == id) {
            trace!("pass '{}' already queued, moved to the back", id);
            self.queue.remove(position);
        } else {
            trace!("pass '{}' scheduled", id);
        }
        self.queue.push_back(id);
    }

    /// Passes waiting to run, in run order.
    pub fn pending(&self) -> impl Iterator<Item = PassId> + '_ {
        self.queue.iter().copied()
    }

    /// Whether `id` has already run.
    pub fn has_executed(&self, id: PassId) -> bool {
        self.executed.contains(&id)
    }
}

/// Owns the registered passes and executes them on a context.
pub struct PassManager {
    passes: FxHashMap<PassId, Box<dyn Pass>>,
    scheduler: Scheduler,
    order: Vec<PassId>,
}

impl PassManager {
    /// A manager whose queue is seeded with `entry`.
    pub fn new(entry: PassId) -> Self {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(entry);
        Self {
            passes: FxHashMap::default(),
            scheduler,
            order: Vec::new(),
        }
    }

    /// The standard pipeline: resolution, then C++ generation.
    pub fn default_pipeline() -> Self {
        let mut manager = Self::new(PassId::RESOLVE);
        manager.register(ResolvePass::new());
        manager.register(CppBackend::new());
        manager
    }

    /// Register a pass instance under its id, replacing any earlier one.
    pub fn register<P: Pass + 'static>(&mut self, pass: P) {
        let id = pass.id();
        if self.passes.insert(id, Box::new(pass)).is_some() {
            debug!("pass '{}' re-registered", id);
        }
    }

    /// Whether a pass with this id is registered.
    pub fn is_registered(&self, id: PassId) -> bool {
        self.passes.contains_key(&id)
    }

    /// Ids of the passes that have run, in execution order.
    pub fn executed(&self) -> &[PassId] {
        &self.order
    }

    /// Passes still queued.
    pub fn pending(&self) -> Vec<PassId> {
        self.scheduler.pending().collect()
    }

    /// Drain the work queue, running each pass on `ctx`.
    ///
    /// The first failure stops the pipeline and is returned unchanged. A
    /// queued id without a registered pass is an internal failure.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&mut self, ctx: &mut CompilationContext) -> FailResult<()> {
        while let Some(id) = self.scheduler.queue.pop_front() {
            let pass = self.passes.get_mut(&id).ok_or_else(|| {
                Fail::internal(format!("pass '{}' was scheduled but is not registered", id))
            })?;

            debug!("running pass '{}'", id);
            if let Err(fail) = pass.run(ctx) {
                debug!("pass '{}' failed: {}", id, fail);
                return Err(fail);
            }
            debug!("pass '{}' finished", id);

            self.scheduler.executed.insert(id);
            self.order.push(id);
            pass.dependent_passes(&mut self.scheduler);
        }
        Ok(())
    }
}
