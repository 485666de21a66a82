//! Callback table implementation of [`BlockBehaviour`].

use std::fmt::{self, Debug};
use std::sync::Arc;

use quarry_utils::{BlockId, BlockPos};
use uuid::Uuid;

use super::BlockBehaviour;
use crate::content::{BlockDefinition, BlockFuncs};
use crate::level::Level;

/// What a hook gets to work with: the level and the behaviour running it.
///
/// Keeping the behaviour around lets hooks cascade, e.g. break a neighbour
/// whose own `on_broken` hook then runs as well.
pub struct HookContext<'a, 'w> {
    /// The level the hook runs in.
    pub level: &'a mut Level<'w>,
    behaviour: &'a mut dyn BlockBehaviour,
}

impl HookContext<'_, '_> {
    /// Breaks the block at `pos`, see [`Level::break_block`].
    pub fn break_block(&mut self, actor: Option<Uuid>, def: &BlockDefinition, pos: BlockPos) {
        self.level.break_block(&mut *self.behaviour, actor, def, pos);
    }

    /// Re-evaluates the block at `pos`, see [`Level::update_block`].
    pub fn update_block(&mut self, pos: BlockPos) {
        self.level.update_block(&mut *self.behaviour, pos);
    }

    /// Sets a block and updates its neighbours, see [`Level::place_block`].
    pub fn place_block(&mut self, pos: BlockPos, id: BlockId, states: u8) {
        self.level.place_block(&mut *self.behaviour, pos, id, states);
    }
}

/// Hook run after a block was broken.
pub type BrokenHook =
    Arc<dyn Fn(&mut HookContext<'_, '_>, Option<Uuid>, &BlockDefinition, BlockPos) + Send + Sync>;
/// Hook run for neighbour and random updates.
pub type UpdateHook = Arc<dyn Fn(&mut HookContext<'_, '_>, &BlockDefinition, BlockPos) + Send + Sync>;
/// Hook run by the scheduled block type pass.
pub type BlocksTickHook = Arc<dyn Fn(&mut HookContext<'_, '_>, &BlockDefinition, f32) + Send + Sync>;
/// Hook run once per world tick.
pub type WorldTickHook = Arc<dyn Fn(&mut HookContext<'_, '_>) + Send + Sync>;

/// The hooks of one block type. Absent hooks are `None`.
#[derive(Default, Clone)]
pub struct BlockHooks {
    /// See [`BlockBehaviour::on_block_broken`].
    pub on_broken: Option<BrokenHook>,
    /// See [`BlockBehaviour::on_block_update`].
    pub on_update: Option<UpdateHook>,
    /// See [`BlockBehaviour::on_random_update`].
    pub on_random_update: Option<UpdateHook>,
    /// See [`BlockBehaviour::on_blocks_tick`].
    pub on_blocks_tick: Option<BlocksTickHook>,
    /// See [`BlockBehaviour::on_world_tick`].
    pub on_world_tick: Option<WorldTickHook>,
}

impl BlockHooks {
    /// The capability flags matching the hooks that are set.
    #[must_use]
    pub fn funcs(&self) -> BlockFuncs {
        let mut funcs = BlockFuncs::empty();
        funcs.set(BlockFuncs::ON_BROKEN, self.on_broken.is_some());
        funcs.set(BlockFuncs::UPDATE, self.on_update.is_some());
        funcs.set(BlockFuncs::RANDOM_UPDATE, self.on_random_update.is_some());
        funcs.set(BlockFuncs::BLOCKS_TICK, self.on_blocks_tick.is_some());
        funcs.set(BlockFuncs::WORLD_TICK, self.on_world_tick.is_some());
        funcs
    }
}

impl Debug for BlockHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockHooks").field(&self.funcs()).finish()
    }
}

/// Behaviour made of closures registered per block id.
///
/// Register hooks, then pass the table to [`crate::content::BlockRegistry::apply_hooks`]
/// so the definitions advertise them.
#[derive(Debug, Default, Clone)]
pub struct HookTable {
    blocks: Vec<BlockHooks>,
}

impl HookTable {
    /// Creates a table without hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: BlockId) -> &mut BlockHooks {
        let index = usize::from(id.0);
        if self.blocks.len() <= index {
            self.blocks.resize_with(index + 1, BlockHooks::default);
        }
        &mut self.blocks[index]
    }

    /// Gets the hooks of a block type.
    #[must_use]
    pub fn hooks(&self, id: BlockId) -> Option<&BlockHooks> {
        self.blocks.get(usize::from(id.0))
    }

    /// The capability flags of a block type.
    #[must_use]
    pub fn funcs_for(&self, id: BlockId) -> BlockFuncs {
        self.hooks(id).map_or(BlockFuncs::empty(), BlockHooks::funcs)
    }

    /// Sets the hook run after blocks of type `id` are broken.
    pub fn set_on_broken<F>(&mut self, id: BlockId, hook: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, '_>, Option<Uuid>, &BlockDefinition, BlockPos)
            + Send
            + Sync
            + 'static,
    {
        self.entry(id).on_broken = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run when a neighbour of a block of type `id` changes.
    pub fn set_on_update<F>(&mut self, id: BlockId, hook: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, '_>, &BlockDefinition, BlockPos) + Send + Sync + 'static,
    {
        self.entry(id).on_update = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run when the random sampler picks a block of type `id`.
    pub fn set_on_random_update<F>(&mut self, id: BlockId, hook: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, '_>, &BlockDefinition, BlockPos) + Send + Sync + 'static,
    {
        self.entry(id).on_random_update = Some(Arc::new(hook));
        self
    }

    /// Sets the scheduled hook of block type `id`.
    pub fn set_on_blocks_tick<F>(&mut self, id: BlockId, hook: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, '_>, &BlockDefinition, f32) + Send + Sync + 'static,
    {
        self.entry(id).on_blocks_tick = Some(Arc::new(hook));
        self
    }

    /// Sets a world tick hook owned by block type `id`.
    pub fn set_on_world_tick<F>(&mut self, id: BlockId, hook: F) -> &mut Self
    where
        F: Fn(&mut HookContext<'_, '_>) + Send + Sync + 'static,
    {
        self.entry(id).on_world_tick = Some(Arc::new(hook));
        self
    }
}

// Hooks are cloned out of the table before they run, so a hook can hand the
// table back to the level as the behaviour for cascaded calls.
impl BlockBehaviour for HookTable {
    fn on_block_broken(
        &mut self,
        level: &mut Level<'_>,
        actor: Option<Uuid>,
        def: &BlockDefinition,
        pos: BlockPos,
    ) {
        let Some(hook) = self.hooks(def.id).and_then(|hooks| hooks.on_broken.clone()) else {
            return;
        };
        hook(&mut HookContext { level, behaviour: self }, actor, def, pos);
    }

    fn on_block_update(&mut self, level: &mut Level<'_>, def: &BlockDefinition, pos: BlockPos) {
        let Some(hook) = self.hooks(def.id).and_then(|hooks| hooks.on_update.clone()) else {
            return;
        };
        hook(&mut HookContext { level, behaviour: self }, def, pos);
    }

    fn on_blocks_tick(&mut self, level: &mut Level<'_>, def: &BlockDefinition, tps: f32) {
        let Some(hook) = self.hooks(def.id).and_then(|hooks| hooks.on_blocks_tick.clone()) else {
            return;
        };
        hook(&mut HookContext { level, behaviour: self }, def, tps);
    }

    fn on_random_update(&mut self, level: &mut Level<'_>, def: &BlockDefinition, pos: BlockPos) {
        let Some(hook) = self
            .hooks(def.id)
            .and_then(|hooks| hooks.on_random_update.clone())
        else {
            return;
        };
        hook(&mut HookContext { level, behaviour: self }, def, pos);
    }

    fn on_world_tick(&mut self, level: &mut Level<'_>) {
        let hooks: Vec<WorldTickHook> = self
            .blocks
            .iter()
            .filter_map(|hooks| hooks.on_world_tick.clone())
            .collect();
        let mut ctx = HookContext {
            level,
            behaviour: self,
        };
        for hook in hooks {
            hook(&mut ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::test_support::TestWorld;

    #[test]
    fn test_funcs_follow_registered_hooks() {
        let mut table = HookTable::new();
        table
            .set_on_broken(BlockId(2), |_, _, _, _| {})
            .set_on_random_update(BlockId(2), |_, _, _| {})
            .set_on_blocks_tick(BlockId(5), |_, _, _| {});

        assert_eq!(
            table.funcs_for(BlockId(2)),
            BlockFuncs::ON_BROKEN | BlockFuncs::RANDOM_UPDATE
        );
        assert_eq!(table.funcs_for(BlockId(5)), BlockFuncs::BLOCKS_TICK);
        assert_eq!(table.funcs_for(BlockId(3)), BlockFuncs::empty());
        assert_eq!(table.funcs_for(BlockId(400)), BlockFuncs::empty());
    }

    #[test]
    fn test_world_tick_runs_every_hook() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut table = HookTable::new();
        for id in [1, 4] {
            let counter = counter.clone();
            table.set_on_world_tick(BlockId(id), move |_| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }

        let mut world = TestWorld::flat();
        table.on_world_tick(&mut world.level());
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }
}
