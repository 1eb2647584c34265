use crate::error::MemResult;
use crate::pool::Pool;

/// Outcome of one module invocation, telling the host how to continue with
/// the current phase-space point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Carry on with the next module.
    Ok,
    /// Skip the remaining modules of the current looping block.
    Next,
    /// Discard the current phase-space point.
    Abort,
}

/// A unit of computation invoked once per phase-space point.
///
/// Modules read their inputs from the pool through input tags resolved at
/// construction, and write into the output slots they produced.
pub trait Module: Send + Sync {
    /// Instance name, also the namespace of the module's outputs.
    fn name(&self) -> &str;

    fn work(&self, pool: &mut Pool) -> MemResult<Status>;

    /// Number of unit-hypercube coordinates this module consumes.
    fn dimensions(&self) -> usize {
        0
    }
}
