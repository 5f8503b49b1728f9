#![forbid(unsafe_code)]

//! Synchronous tick loop.
//!
//! Stands in for a frame scheduler: ticks the engine until the layout
//! settles and hands every intermediate snapshot to a sink.

use beeswarm_layout::SimulationStatus;

use crate::engine::Engine;
use crate::snapshot::Snapshot;

/// Tick `engine` until it settles, calling `sink` after each tick.
///
/// Returns the number of ticks run. An already settled engine returns 0
/// without calling `sink`.
pub fn run_until_settled<F>(engine: &mut Engine, mut sink: F) -> u32
where
    F: FnMut(&Snapshot),
{
    let start = engine.simulation().tick_count();
    while engine.status() == SimulationStatus::Running {
        let snapshot = engine.tick();
        sink(&snapshot);
    }
    engine.simulation().tick_count() - start
}
