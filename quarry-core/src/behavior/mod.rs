//! Behaviour hooks invoked by the block simulation.
//!
//! The engine decides *when* a block type reacts (a neighbour changed, the
//! random sampler hit it, its scheduled pass is due), the behaviour layer
//! decides *what* happens. Every hook receives the [`Level`] so it can read
//! and mutate the world it is running in.

mod hooks;

pub use hooks::{
    BlockHooks, BlocksTickHook, BrokenHook, HookContext, HookTable, UpdateHook, WorldTickHook,
};

use quarry_utils::BlockPos;
use uuid::Uuid;

use crate::content::BlockDefinition;
use crate::level::Level;

/// Per block type behaviour, dispatched by the engine.
///
/// The engine only calls a hook when the definition carries the matching
/// [`crate::content::BlockFuncs`] flag, so implementations do not need to
/// filter. All methods default to doing nothing.
pub trait BlockBehaviour {
    /// The block at `pos` was broken, by `actor` if a player caused it.
    ///
    /// The cell is already air when this runs.
    fn on_block_broken(
        &mut self,
        level: &mut Level<'_>,
        actor: Option<Uuid>,
        def: &BlockDefinition,
        pos: BlockPos,
    ) {
        let _ = (level, actor, def, pos);
    }

    /// A neighbour of the block at `pos` changed.
    fn on_block_update(&mut self, level: &mut Level<'_>, def: &BlockDefinition, pos: BlockPos) {
        let _ = (level, def, pos);
    }

    /// The scheduled pass for the block type is due.
    ///
    /// `tps` is how often per second this hook runs for the block type.
    fn on_blocks_tick(&mut self, level: &mut Level<'_>, def: &BlockDefinition, tps: f32) {
        let _ = (level, def, tps);
    }

    /// The random sampler picked the block at `pos`.
    fn on_random_update(&mut self, level: &mut Level<'_>, def: &BlockDefinition, pos: BlockPos) {
        let _ = (level, def, pos);
    }

    /// A world tick passed.
    fn on_world_tick(&mut self, level: &mut Level<'_>) {
        let _ = level;
    }
}

/// Behaviour that ignores every hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBehaviour;

impl BlockBehaviour for NoBehaviour {}
