//! Block type definitions.

use bitflags::bitflags;
use quarry_utils::BlockId;
use serde::Deserialize;

bitflags! {
    /// The behaviour hooks a block type provides.
    ///
    /// The engine checks these flags before dispatching, so block types without
    /// a hook never reach the behaviour layer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlockFuncs: u8 {
        /// Called after the block was broken.
        const ON_BROKEN = 1 << 0;
        /// Called when a neighbour changed.
        const UPDATE = 1 << 1;
        /// Called when the random sampler picked the block.
        const RANDOM_UPDATE = 1 << 2;
        /// Called once per block type on the scheduled block type pass.
        const BLOCKS_TICK = 1 << 3;
        /// The block type listens to the world tick.
        const WORLD_TICK = 1 << 4;
    }
}

const fn default_tick_interval() -> u32 {
    1
}

const fn default_obstacle() -> bool {
    true
}

/// Static description of a block type.
///
/// Definitions are read-only once the content index is built; the only runtime
/// data is `funcs`, filled in from the behaviour hooks.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    /// Index of the block type in the content index.
    #[serde(skip)]
    pub id: BlockId,
    /// Namespaced name, e.g. `core:air`.
    pub name: String,
    /// The block type pass only fires the hook every `tick_interval` ticks.
    #[serde(default = "default_tick_interval")]
    pub tick_interval: u32,
    /// Slot count of the inventory created for this block, 0 for none.
    #[serde(default)]
    pub inventory_size: u32,
    /// The block breaks when the cell below is not solid.
    #[serde(default)]
    pub grounded: bool,
    /// The block is solid and supports grounded blocks above it.
    #[serde(default = "default_obstacle")]
    pub obstacle: bool,
    /// Hooks available for this block type.
    #[serde(skip)]
    pub funcs: BlockFuncs,
}

impl BlockDefinition {
    /// Creates a solid, hookless block type with no inventory.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BlockId::AIR,
            name: name.into(),
            tick_interval: default_tick_interval(),
            inventory_size: 0,
            grounded: false,
            obstacle: default_obstacle(),
            funcs: BlockFuncs::empty(),
        }
    }

    /// Sets whether the block needs solid support below.
    #[must_use]
    pub fn with_grounded(mut self, grounded: bool) -> Self {
        self.grounded = grounded;
        self
    }

    /// Sets whether the block is solid.
    #[must_use]
    pub fn with_obstacle(mut self, obstacle: bool) -> Self {
        self.obstacle = obstacle;
        self
    }

    /// Sets the block type tick interval.
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: u32) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Sets the size of the inventory attached to placed blocks.
    #[must_use]
    pub fn with_inventory_size(mut self, inventory_size: u32) -> Self {
        self.inventory_size = inventory_size;
        self
    }

    /// Sets the hook flags directly.
    #[must_use]
    pub fn with_funcs(mut self, funcs: BlockFuncs) -> Self {
        self.funcs = funcs;
        self
    }

    /// Returns `true` if every flag in `funcs` is set.
    #[must_use]
    pub fn has(&self, funcs: BlockFuncs) -> bool {
        self.funcs.contains(funcs)
    }
}
