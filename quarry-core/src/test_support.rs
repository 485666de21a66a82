//! A small world and a recording behaviour shared by the unit tests.

use std::sync::Arc;

use quarry_utils::{BlockId, BlockPos, CHUNK_H, ChunkPos, Voxel};
use rustc_hash::FxHashSet;
use uuid::Uuid;

use crate::behavior::BlockBehaviour;
use crate::chunk::{ChunkAccess, ChunkGrid, LevelChunk};
use crate::content::{BlockDefinition, BlockFuncs, BlockRegistry, ContentIndex};
use crate::inventory::Inventories;
use crate::level::Level;
use crate::lighting::PendingLightUpdates;

pub struct TestWorld {
    pub registry: Arc<BlockRegistry>,
    pub grid: ChunkGrid,
    pub lighting: PendingLightUpdates,
    pub inventories: Inventories,
    pub stone: BlockId,
    pub sand: BlockId,
    pub marker: BlockId,
    pub chest: BlockId,
    pub slow: BlockId,
}

impl TestWorld {
    /// First air layer above the stone floor.
    pub const GROUND: i32 = 4;
    pub const SLOW_INTERVAL: u32 = 4;

    /// A 2x2 chunk world starting at chunk (0, 0).
    pub fn flat() -> Self {
        Self::grid(2, 2)
    }

    /// A `width x depth` world of lit chunks with a stone floor.
    pub fn grid(width: usize, depth: usize) -> Self {
        let all_hooks = BlockFuncs::ON_BROKEN
            | BlockFuncs::UPDATE
            | BlockFuncs::RANDOM_UPDATE
            | BlockFuncs::BLOCKS_TICK;
        let mut registry = BlockRegistry::new();
        let stone = registry
            .register(BlockDefinition::new("test:stone"))
            .expect("stone registers");
        let sand = registry
            .register(
                BlockDefinition::new("test:sand")
                    .with_grounded(true)
                    .with_funcs(BlockFuncs::ON_BROKEN),
            )
            .expect("sand registers");
        let marker = registry
            .register(BlockDefinition::new("test:marker").with_funcs(all_hooks))
            .expect("marker registers");
        let chest = registry
            .register(BlockDefinition::new("test:chest").with_inventory_size(27))
            .expect("chest registers");
        let slow = registry
            .register(
                BlockDefinition::new("test:slow")
                    .with_tick_interval(Self::SLOW_INTERVAL)
                    .with_funcs(BlockFuncs::BLOCKS_TICK),
            )
            .expect("slow registers");
        let registry = Arc::new(registry);

        let mut grid = ChunkGrid::new(registry.clone(), ChunkPos::new(0, 0), width, depth);
        for z in 0..depth {
            for x in 0..width {
                let mut chunk = LevelChunk::new(ChunkPos::new(x as i32, z as i32));
                chunk.fill_layers(0, Self::GROUND as usize, Voxel::new(stone, 0));
                chunk.set_lighted(true);
                grid.insert(chunk).expect("chunk is inside the grid");
            }
        }

        Self {
            registry,
            grid,
            lighting: PendingLightUpdates::new(),
            inventories: Inventories::new(),
            stone,
            sand,
            marker,
            chest,
            slow,
        }
    }

    pub fn level(&mut self) -> Level<'_> {
        Level::new(
            &mut self.grid,
            &mut self.lighting,
            &*self.registry,
            &mut self.inventories,
        )
    }

    pub fn set(&mut self, pos: BlockPos, id: BlockId) {
        self.grid.set_voxel(pos, id, 0);
    }

    pub fn def(&self, id: BlockId) -> BlockDefinition {
        self.registry.block(id).expect("block is registered").clone()
    }

    /// Replaces every voxel of every chunk.
    pub fn fill_all(&mut self, id: BlockId) {
        let positions: Vec<ChunkPos> = self.grid.chunks().map(LevelChunk::pos).collect();
        for pos in positions {
            if let Some(chunk) = self.grid.chunk_mut(pos) {
                chunk.fill_layers(0, CHUNK_H, Voxel::new(id, 0));
            }
        }
    }

    pub fn unlight(&mut self, pos: ChunkPos) {
        if let Some(chunk) = self.grid.chunk_mut(pos) {
            chunk.set_lighted(false);
        }
    }

    /// Ids of the block types with a scheduled hook.
    pub fn ticking_ids(&self) -> FxHashSet<BlockId> {
        (0..self.registry.block_count())
            .filter_map(|index| self.registry.block(BlockId(index as u16)))
            .filter(|def| def.has(BlockFuncs::BLOCKS_TICK))
            .map(|def| def.id)
            .collect()
    }
}

/// Records every hook call.
#[derive(Default)]
pub struct Recorder {
    pub broken: Vec<(Option<Uuid>, BlockPos)>,
    pub air_when_broken: Vec<bool>,
    pub updated: Vec<BlockPos>,
    pub random: Vec<BlockPos>,
    pub blocks_ticks: Vec<(BlockId, f32)>,
    pub world_ticks: u32,
    /// Unlights the sampled chunk on every random update.
    pub unlight_on_random: bool,
}

impl BlockBehaviour for Recorder {
    fn on_block_broken(
        &mut self,
        level: &mut Level<'_>,
        actor: Option<Uuid>,
        _def: &BlockDefinition,
        pos: BlockPos,
    ) {
        self.broken.push((actor, pos));
        self.air_when_broken
            .push(level.get_voxel(pos) == Some(Voxel::EMPTY));
    }

    fn on_block_update(&mut self, _level: &mut Level<'_>, _def: &BlockDefinition, pos: BlockPos) {
        self.updated.push(pos);
    }

    fn on_blocks_tick(&mut self, _level: &mut Level<'_>, def: &BlockDefinition, tps: f32) {
        self.blocks_ticks.push((def.id, tps));
    }

    fn on_random_update(&mut self, level: &mut Level<'_>, _def: &BlockDefinition, pos: BlockPos) {
        self.random.push(pos);
        if self.unlight_on_random
            && let Some(chunk) = level.chunks_mut().chunk_by_voxel_mut(pos)
        {
            chunk.set_lighted(false);
        }
    }

    fn on_world_tick(&mut self, _level: &mut Level<'_>) {
        self.world_ticks += 1;
    }
}
