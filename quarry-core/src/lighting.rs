//! Notifications from the block simulation to the light engine.
//!
//! The simulation does not propagate light itself. It reports every cell it
//! changes so the light engine can relight it later.

use std::mem;

use quarry_utils::{BlockId, BlockPos};
use rustc_hash::FxHashMap;

/// Receives block changes that may affect lighting.
pub trait LightingListener {
    /// Called after the cell at `pos` was set to `id`.
    fn on_block_set(&mut self, pos: BlockPos, id: BlockId);
}

/// Ignores all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLighting;

impl LightingListener for NoLighting {
    fn on_block_set(&mut self, _pos: BlockPos, _id: BlockId) {}
}

/// Collects changed cells for a light engine running after the simulation step.
///
/// A cell changed several times before the next drain is queued once, with
/// the id it was set to last, at the position of its first change.
#[derive(Debug, Default)]
pub struct PendingLightUpdates {
    queue: Vec<(BlockPos, BlockId)>,
    queued: FxHashMap<BlockPos, usize>,
}

impl PendingLightUpdates {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of queued cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns whether `pos` is waiting for relighting.
    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.queued.contains_key(&pos)
    }

    /// Takes every queued change in the order they first happened.
    pub fn drain(&mut self) -> Vec<(BlockPos, BlockId)> {
        self.queued.clear();
        mem::take(&mut self.queue)
    }
}

impl LightingListener for PendingLightUpdates {
    fn on_block_set(&mut self, pos: BlockPos, id: BlockId) {
        if let Some(&index) = self.queued.get(&pos) {
            self.queue[index].1 = id;
            return;
        }
        self.queued.insert(pos, self.queue.len());
        self.queue.push((pos, id));
    }
}
