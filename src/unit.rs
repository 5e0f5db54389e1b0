//! The capability surface every runnable program unit implements.
//!
//! A program unit is a self-contained piece of behavior the menu can launch.
//! Units are constructed fresh for every invocation by the factory stored in
//! their catalog descriptor, run to completion, and then dropped.

use anyhow::Result;

/// A self-contained runnable program.
///
/// # Contract
///
/// - `run()` takes no inputs beyond the unit's own state and returns no value
///   the caller consumes beyond success/failure.
/// - Side effects (console output, disk writes) are the unit's private
///   responsibility.
/// - An error propagates to the caller unchanged; the contract defines no
///   recovery. The menu driver reports the failure and keeps the loop alive.
pub trait ProgramUnit {
    /// Run the unit to completion.
    fn run(&mut self) -> Result<()>;
}
