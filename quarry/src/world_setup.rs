//! The demo world the host binary simulates.
//!
//! Sand pillars stand on scaffolds spread over a grass field. Every few world
//! ticks a scaffold is removed and the pillar on top of it collapses, taking
//! the chest on its top down with it. Grass under solid blocks turns to dirt
//! and regrows once the cell above is free again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, anyhow};
use quarry_core::behavior::HookTable;
use quarry_core::chunk::{ChunkAccess, ChunkGrid, LevelChunk};
use quarry_core::content::{BlockDefinition, BlockRegistry};
use quarry_core::inventory::{Inventories, ItemId, ItemStack};
use quarry_core::lighting::PendingLightUpdates;
use quarry_core::{BlockUpdateEngine, Level};
use quarry_utils::locks::SyncMutex;
use quarry_utils::{BlockId, BlockPos, CHUNK_D, CHUNK_W, ChunkPos, Voxel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WorldConfig;

const STONE: &str = "demo:stone";
const DIRT: &str = "demo:dirt";
const GRASS: &str = "demo:grass";
const SAND: &str = "demo:sand";
const SCAFFOLD: &str = "demo:scaffold";
const CHEST: &str = "demo:chest";
const SPRINKLER: &str = "demo:sprinkler";

/// Counters bumped by the demo hooks.
#[derive(Debug, Default)]
pub struct DemoStats {
    pub random_updates: AtomicU64,
    pub grass_changes: AtomicU64,
    pub sand_broken: AtomicU64,
    pub chests_broken: AtomicU64,
    pub sprinkler_ticks: AtomicU64,
    pub world_ticks: AtomicU64,
    pub scaffolds_broken: AtomicU64,
    pub relit_cells: AtomicU64,
}

impl DemoStats {
    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    fn bump(counter: &AtomicU64) -> u64 {
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Debug, Clone, Copy)]
struct DemoBlocks {
    stone: BlockId,
    dirt: BlockId,
    grass: BlockId,
    sand: BlockId,
    scaffold: BlockId,
    chest: BlockId,
    sprinkler: BlockId,
}

impl DemoBlocks {
    fn resolve(registry: &BlockRegistry) -> anyhow::Result<Self> {
        let id = |name: &str| {
            registry
                .id_of(name)
                .with_context(|| format!("block type `{name}` is missing from the config"))
        };
        Ok(Self {
            stone: id(STONE)?,
            dirt: id(DIRT)?,
            grass: id(GRASS)?,
            sand: id(SAND)?,
            scaffold: id(SCAFFOLD)?,
            chest: id(CHEST)?,
            sprinkler: id(SPRINKLER)?,
        })
    }
}

pub struct DemoWorld {
    registry: Arc<BlockRegistry>,
    grid: ChunkGrid,
    lighting: PendingLightUpdates,
    inventories: Inventories,
    hooks: HookTable,
    stats: Arc<DemoStats>,
}

impl DemoWorld {
    pub fn build(config: &WorldConfig, blocks: &[BlockDefinition], seed: u64) -> anyhow::Result<Self> {
        let mut registry = BlockRegistry::new();
        registry
            .register_all(blocks.iter().cloned())
            .context("invalid block list")?;
        let ids = DemoBlocks::resolve(&registry)?;

        let stats = Arc::new(DemoStats::default());
        let scaffolds = Arc::new(SyncMutex::new(Vec::new()));
        let hooks = register_hooks(ids, &stats, &scaffolds, config.collapse_interval);
        registry.apply_hooks(&hooks);
        let registry = Arc::new(registry);

        let mut grid = ChunkGrid::new(registry.clone(), ChunkPos::new(0, 0), config.width, config.depth);
        for z in 0..config.depth {
            for x in 0..config.width {
                let mut chunk = LevelChunk::new(ChunkPos::new(x as i32, z as i32));
                chunk.fill_layers(0, config.ground_height - 1, Voxel::new(ids.stone, 0));
                chunk.fill_layers(
                    config.ground_height - 1,
                    config.ground_height,
                    Voxel::new(ids.grass, 0),
                );
                chunk.set_lighted(true);
                grid.insert(chunk)
                    .map_err(|chunk| anyhow!("chunk {} is outside the world", chunk.pos()))?;
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let ground = config.ground_height as i32;
        let pillar_height = config.pillar_height as i32;
        let (size_x, size_z) = ((config.width * CHUNK_W) as i32, (config.depth * CHUNK_D) as i32);
        let mut pillars = Vec::with_capacity(config.pillars);
        for _ in 0..config.pillars {
            let base = BlockPos::new(rng.random_range(0..size_x), ground, rng.random_range(0..size_z));
            grid.set_voxel(base, ids.scaffold, 0);
            for dy in 1..=pillar_height {
                grid.set_voxel(base.offset(0, dy, 0), ids.sand, 0);
            }
            pillars.push(base);
        }

        let mut lighting = PendingLightUpdates::new();
        let mut inventories = Inventories::new();
        let mut level = Level::new(&mut grid, &mut lighting, &*registry, &mut inventories);
        for base in pillars.iter().take(config.chests) {
            let pos = base.offset(0, pillar_height + 1, 0);
            level.set_block(pos, ids.chest, 0);
            let Some(id) = level.create_block_inventory(pos) else {
                continue;
            };
            if let Some(inventory) = level.block_inventory(pos)
                && inventory.lock().set_item(0, ItemStack::new(ItemId(1), 64)).is_err()
            {
                log::warn!("Chest {id} at {pos} has no slots");
            }
            log::debug!("Placed chest {id} at {pos}");
        }
        // Setup is lit already.
        lighting.drain();

        // Popped from the back: the chest pillars collapse last.
        scaffolds.lock().extend(pillars);
        log::info!(
            "Built a {}x{} chunk world with {} block types",
            config.width,
            config.depth,
            registry.names().count()
        );

        Ok(Self {
            registry,
            grid,
            lighting,
            inventories,
            hooks,
            stats,
        })
    }

    /// Runs one frame of the block engine.
    pub fn step(&mut self, engine: &mut BlockUpdateEngine, delta: f32) {
        let mut level = Level::new(
            &mut self.grid,
            &mut self.lighting,
            &*self.registry,
            &mut self.inventories,
        );
        engine.step(&mut level, &mut self.hooks, delta);
    }

    /// Hands the changed cells to the light engine. Returns how many there were.
    pub fn relight(&mut self) -> usize {
        let relit = self.lighting.drain().len();
        self.stats
            .relit_cells
            .fetch_add(relit as u64, Ordering::Relaxed);
        relit
    }

    pub fn stats(&self) -> &DemoStats {
        &self.stats
    }

    /// Number of inventories still bound to a block.
    pub fn bound_inventories(&self) -> usize {
        self.grid
            .chunks()
            .map(|chunk| chunk.block_inventories().count())
            .sum()
    }

    pub fn inventories(&self) -> &Inventories {
        &self.inventories
    }
}

fn register_hooks(
    ids: DemoBlocks,
    stats: &Arc<DemoStats>,
    scaffolds: &Arc<SyncMutex<Vec<BlockPos>>>,
    collapse_interval: u64,
) -> HookTable {
    let mut hooks = HookTable::new();

    let counter = stats.clone();
    hooks.set_on_random_update(ids.grass, move |ctx, _, pos| {
        DemoStats::bump(&counter.random_updates);
        if ctx
            .level
            .get_block(pos.above())
            .is_some_and(|above| above.obstacle)
        {
            ctx.level.set_block(pos, ids.dirt, 0);
            DemoStats::bump(&counter.grass_changes);
        }
    });

    let counter = stats.clone();
    hooks.set_on_random_update(ids.dirt, move |ctx, _, pos| {
        DemoStats::bump(&counter.random_updates);
        if ctx
            .level
            .get_block(pos.above())
            .is_some_and(|above| !above.obstacle)
        {
            ctx.level.set_block(pos, ids.grass, 0);
            DemoStats::bump(&counter.grass_changes);
        }
    });

    let counter = stats.clone();
    hooks.set_on_broken(ids.sand, move |_, _, _, _| {
        DemoStats::bump(&counter.sand_broken);
    });

    let counter = stats.clone();
    hooks.set_on_broken(ids.chest, move |ctx, _, _, pos| {
        DemoStats::bump(&counter.chests_broken);
        if let Err(err) = ctx.level.unbind_inventory(pos) {
            log::warn!("Failed to unbind the inventory of the chest at {pos}: {err}");
        }
    });

    let counter = stats.clone();
    hooks.set_on_blocks_tick(ids.sprinkler, move |_, def, tps| {
        DemoStats::bump(&counter.sprinkler_ticks);
        log::trace!("{} ticked ({tps} per second)", def.name);
    });

    let counter = stats.clone();
    let scaffolds = scaffolds.clone();
    hooks.set_on_world_tick(ids.scaffold, move |ctx| {
        let tick = DemoStats::bump(&counter.world_ticks);
        if tick % collapse_interval != 0 {
            return;
        }
        let Some(pos) = scaffolds.lock().pop() else {
            return;
        };
        // Two pillars may share a base.
        let Some(def) = ctx.level.get_block(pos).filter(|def| def.id == ids.scaffold) else {
            return;
        };
        log::debug!("Removing the scaffold at {pos}");
        DemoStats::bump(&counter.scaffolds_broken);
        ctx.break_block(None, def, pos);
    });

    hooks
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::EngineConfig;

    fn config() -> WorldConfig {
        WorldConfig {
            width: 4,
            depth: 4,
            ground_height: 8,
            pillars: 3,
            pillar_height: 4,
            chests: 1,
            collapse_interval: 10,
        }
    }

    fn blocks() -> Vec<BlockDefinition> {
        vec![
            BlockDefinition::new(STONE),
            BlockDefinition::new(DIRT),
            BlockDefinition::new(GRASS),
            BlockDefinition::new(SAND).with_grounded(true),
            BlockDefinition::new(SCAFFOLD),
            BlockDefinition::new(CHEST)
                .with_grounded(true)
                .with_inventory_size(9),
            BlockDefinition::new(SPRINKLER)
                .with_tick_interval(5)
                .with_obstacle(false),
        ]
    }

    #[test]
    fn test_missing_block_type_is_an_error() {
        let mut blocks = blocks();
        blocks.retain(|block| block.name != SAND);
        assert!(DemoWorld::build(&config(), &blocks, 1).is_err());
    }

    #[test]
    fn test_pillars_collapse() {
        let mut world = DemoWorld::build(&config(), &blocks(), 7).expect("world builds");
        assert_eq!(world.bound_inventories(), 1);

        let mut engine = BlockUpdateEngine::new(&EngineConfig {
            seed: Some(7),
            ..EngineConfig::default()
        })
        .expect("default config is valid");
        // 3 collapses every 10 world ticks need 1.5 seconds.
        for _ in 0..180 {
            world.step(&mut engine, 1.0 / 60.0);
            world.relight();
        }

        let stats = world.stats();
        let collapsed = DemoStats::get(&stats.scaffolds_broken);
        assert!(collapsed >= 1);
        assert_eq!(DemoStats::get(&stats.sand_broken), collapsed * 4);
        assert!(DemoStats::get(&stats.world_ticks) >= 30);
        assert!(DemoStats::get(&stats.sprinkler_ticks) >= 1);
        assert!(DemoStats::get(&stats.relit_cells) >= collapsed * 5);
        assert_eq!(DemoStats::get(&stats.chests_broken), 1);
        assert_eq!(world.bound_inventories(), 0);
        assert_eq!(world.inventories().len(), 1);
    }
}
