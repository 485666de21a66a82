//! This module contains the `BlockUpdateEngine`, which drives the periodic
//! block passes of a world.
//!
//! Three passes run at a fixed tick rate:
//! - the random pass samples a few voxels of every lit chunk and runs their
//!   random update hook. It is split into parts so only a slice of the chunks
//!   is visited per frame.
//! - the block type pass runs the scheduled hook of every block type that has
//!   one, honouring each type's tick interval.
//! - the world pass runs the world tick hook.

use quarry_utils::{BlockId, BlockPos, CHUNK_D, CHUNK_H, CHUNK_W, LocalPos};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::behavior::BlockBehaviour;
use crate::chunk::LevelChunk;
use crate::content::{BlockDefinition, BlockFuncs};
use crate::error::BlockError;
use crate::inventory::InventoryId;
use crate::level::Level;
use crate::ticks::{ClockError, TickClock};

/// Number of vertical segments a chunk is split into for random sampling.
pub const RANDOM_SEGMENTS: usize = 4;
/// Samples drawn per segment.
pub const SAMPLES_PER_SEGMENT: usize = 4;

/// Tuning of the [`BlockUpdateEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logical ticks per second of all three passes.
    pub tick_rate: u32,
    /// Parts the random pass is split into.
    pub random_tick_parts: u32,
    /// Parts the block type pass is split into.
    pub blocks_tick_parts: u32,
    /// Chunks at each edge of the loaded area the random pass leaves alone.
    pub padding: usize,
    /// Seed of the random sampler. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: 20,
            random_tick_parts: 3,
            blocks_tick_parts: 1,
            padding: 1,
            seed: None,
        }
    }
}

/// Schedules the block passes of one world.
#[derive(Debug)]
pub struct BlockUpdateEngine {
    random_tick_clock: TickClock,
    blocks_tick_clock: TickClock,
    world_tick_clock: TickClock,
    padding: usize,
    rng: StdRng,
}

impl BlockUpdateEngine {
    /// Creates an engine from its config.
    pub fn new(config: &EngineConfig) -> Result<Self, ClockError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates an engine that samples with the given generator.
    pub fn with_rng(config: &EngineConfig, rng: StdRng) -> Result<Self, ClockError> {
        Ok(Self {
            random_tick_clock: TickClock::new(config.tick_rate, config.random_tick_parts)?,
            blocks_tick_clock: TickClock::new(config.tick_rate, config.blocks_tick_parts)?,
            world_tick_clock: TickClock::new(config.tick_rate, 1)?,
            padding: config.padding,
            rng,
        })
    }

    /// Advances the clocks by `delta` seconds and runs the passes that are due.
    ///
    /// Passes run in the order random, block types, world.
    pub fn step(&mut self, level: &mut Level<'_>, behaviour: &mut dyn BlockBehaviour, delta: f32) {
        if self.random_tick_clock.update(delta) {
            let (part, parts) = (self.random_tick_clock.part(), self.random_tick_clock.parts());
            self.random_tick(level, behaviour, part, parts);
        }
        if self.blocks_tick_clock.update(delta) {
            let (part, parts) = (self.blocks_tick_clock.part(), self.blocks_tick_clock.parts());
            self.blocks_tick(level, behaviour, part, parts);
        }
        if self.world_tick_clock.update(delta) {
            behaviour.on_world_tick(level);
        }
    }

    /// Runs the scheduled hook of the block types in shard `part` of `parts`.
    ///
    /// Over `parts` consecutive calls with `part` going `0..parts` every block
    /// type is visited exactly once. Zero `parts` visits nothing.
    pub fn blocks_tick(
        &mut self,
        level: &mut Level<'_>,
        behaviour: &mut dyn BlockBehaviour,
        part: u32,
        parts: u32,
    ) {
        if parts == 0 {
            return;
        }
        let content = level.content();
        let tick_rate = self.blocks_tick_clock.tick_rate();
        let cycle = self.blocks_tick_clock.tick_id() / u64::from(parts);

        for index in 0..content.block_count() {
            if (index + part as usize) % parts as usize != 0 {
                continue;
            }
            let Some(def) = u16::try_from(index)
                .ok()
                .and_then(|raw| content.block(BlockId(raw)))
            else {
                continue;
            };
            if !def.has(BlockFuncs::BLOCKS_TICK)
                || cycle.checked_rem(u64::from(def.tick_interval)) != Some(0)
            {
                continue;
            }
            behaviour.on_blocks_tick(level, def, tick_rate as f32 / def.tick_interval as f32);
        }
    }

    /// Samples random voxels of the lit chunks in shard `part` of `parts` and
    /// runs their random update hook.
    ///
    /// Chunks within `padding` slots of the edge of the loaded area are
    /// skipped, and so is everything when `parts` is zero. Each chunk is split into [`RANDOM_SEGMENTS`] vertical segments
    /// with [`SAMPLES_PER_SEGMENT`] samples each.
    pub fn random_tick(
        &mut self,
        level: &mut Level<'_>,
        behaviour: &mut dyn BlockBehaviour,
        part: u32,
        parts: u32,
    ) {
        if parts == 0 {
            return;
        }
        let content = level.content();
        let (width, depth) = (level.chunks().width(), level.chunks().depth());
        let segment_height = CHUNK_H / RANDOM_SEGMENTS;
        let padding = self.padding;

        for z in padding..depth.saturating_sub(padding) {
            for x in padding..width.saturating_sub(padding) {
                if (z * width + x + part as usize) % parts as usize != 0 {
                    continue;
                }
                if !level.chunks().chunk_at(x, z).is_some_and(LevelChunk::is_lighted) {
                    continue;
                }
                'samples: for segment in 0..RANDOM_SEGMENTS {
                    for _ in 0..SAMPLES_PER_SEGMENT {
                        let local = LocalPos::new(
                            self.rng.random_range(0..CHUNK_W),
                            self.rng.random_range(0..segment_height) + segment * segment_height,
                            self.rng.random_range(0..CHUNK_D),
                        );
                        // Hooks may unload or unlight the chunk, look it up for every sample.
                        let Some(chunk) = level.chunks().chunk_at(x, z) else {
                            break 'samples;
                        };
                        if !chunk.is_lighted() {
                            break 'samples;
                        }
                        let pos = chunk.pos().block_at(local);
                        let Some(def) = content.block(chunk.voxel(local).id) else {
                            continue;
                        };
                        if def.has(BlockFuncs::RANDOM_UPDATE) {
                            behaviour.on_random_update(level, def, pos);
                        }
                    }
                }
            }
        }
    }

    /// See [`Level::break_block`].
    pub fn break_block(
        &mut self,
        level: &mut Level<'_>,
        behaviour: &mut dyn BlockBehaviour,
        actor: Option<Uuid>,
        def: &BlockDefinition,
        pos: BlockPos,
    ) {
        level.break_block(behaviour, actor, def, pos);
    }

    /// See [`Level::update_block`].
    pub fn update_block(
        &mut self,
        level: &mut Level<'_>,
        behaviour: &mut dyn BlockBehaviour,
        pos: BlockPos,
    ) {
        level.update_block(behaviour, pos);
    }

    /// See [`Level::create_block_inventory`].
    pub fn create_block_inventory(
        &mut self,
        level: &mut Level<'_>,
        pos: BlockPos,
    ) -> Option<InventoryId> {
        level.create_block_inventory(pos)
    }

    /// See [`Level::bind_inventory`].
    pub fn bind_inventory(
        &mut self,
        level: &mut Level<'_>,
        id: InventoryId,
        pos: BlockPos,
    ) -> Result<(), BlockError> {
        level.bind_inventory(id, pos)
    }

    /// See [`Level::unbind_inventory`].
    pub fn unbind_inventory(
        &mut self,
        level: &mut Level<'_>,
        pos: BlockPos,
    ) -> Result<(), BlockError> {
        level.unbind_inventory(pos)
    }

    /// The clock of the random pass.
    #[must_use]
    pub fn random_clock(&self) -> &TickClock {
        &self.random_tick_clock
    }

    /// The clock of the block type pass.
    #[must_use]
    pub fn blocks_clock(&self) -> &TickClock {
        &self.blocks_tick_clock
    }

    /// The clock of the world pass.
    #[must_use]
    pub fn world_clock(&self) -> &TickClock {
        &self.world_tick_clock
    }

    /// Chunks at each edge the random pass skips.
    #[must_use]
    pub fn padding(&self) -> usize {
        self.padding
    }
}

#[cfg(test)]
mod tests {
    use quarry_utils::ChunkPos;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::test_support::{Recorder, TestWorld};

    fn engine(seed: u64) -> BlockUpdateEngine {
        BlockUpdateEngine::new(&EngineConfig {
            seed: Some(seed),
            ..EngineConfig::default()
        })
        .expect("default config is valid")
    }

    #[test]
    fn test_rejects_zero_rate() {
        let config = EngineConfig {
            tick_rate: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            BlockUpdateEngine::new(&config).map(|_| ()),
            Err(ClockError::ZeroTickRate)
        );
    }

    #[test]
    fn test_zero_parts_visit_nothing() {
        let mut world = TestWorld::grid(3, 3);
        world.fill_all(world.marker);
        let mut engine = engine(2);
        let mut recorder = Recorder::default();

        engine.blocks_tick(&mut world.level(), &mut recorder, 0, 0);
        engine.random_tick(&mut world.level(), &mut recorder, 0, 0);

        assert!(recorder.blocks_ticks.is_empty());
        assert!(recorder.random.is_empty());
    }

    #[test]
    fn test_block_type_shards_cover_every_id_once() {
        let mut world = TestWorld::flat();
        let mut engine = engine(1);
        let parts = 3;
        let mut recorder = Recorder::default();

        for part in 0..parts {
            engine.blocks_tick(&mut world.level(), &mut recorder, part, parts);
        }

        let ticked: Vec<BlockId> = recorder.blocks_ticks.iter().map(|(id, _)| *id).collect();
        let unique: FxHashSet<BlockId> = ticked.iter().copied().collect();
        assert_eq!(ticked.len(), unique.len());
        assert_eq!(unique, world.ticking_ids());
    }

    #[test]
    fn test_block_type_pass_reports_rate() {
        let mut world = TestWorld::flat();
        let mut engine = engine(1);
        let mut recorder = Recorder::default();

        engine.blocks_tick(&mut world.level(), &mut recorder, 0, 1);

        // Tick 0 is a multiple of every interval.
        assert!(recorder.blocks_ticks.contains(&(world.marker, 20.0)));
        assert!(recorder.blocks_ticks.contains(&(world.slow, 5.0)));
    }

    #[test]
    fn test_block_type_interval_gates_on_tick_id() {
        let mut world = TestWorld::flat();
        let mut engine = engine(1);
        let mut recorder = Recorder::default();

        // 2 seconds at 20 ticks per second.
        for _ in 0..160 {
            engine.step(&mut world.level(), &mut recorder, 1.0 / 80.0);
        }
        let ticks = engine.blocks_clock().tick_id();
        assert!((38..=40).contains(&ticks));
        let marker = recorder
            .blocks_ticks
            .iter()
            .filter(|(id, _)| *id == world.marker)
            .count() as u64;
        let slow: Vec<f32> = recorder
            .blocks_ticks
            .iter()
            .filter(|(id, _)| *id == world.slow)
            .map(|(_, tps)| *tps)
            .collect();

        assert_eq!(marker, ticks);
        assert_eq!(slow.len() as u64, ticks / u64::from(TestWorld::SLOW_INTERVAL));
        assert!(slow.iter().all(|tps| (*tps - 5.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_random_tick_respects_padding_and_lighting() {
        let mut world = TestWorld::grid(5, 4);
        world.fill_all(world.marker);
        world.unlight(ChunkPos::new(2, 1));
        let mut engine = engine(7);
        let mut recorder = Recorder::default();

        for _ in 0..50 {
            for part in 0..3 {
                engine.random_tick(&mut world.level(), &mut recorder, part, 3);
            }
        }

        assert!(!recorder.random.is_empty());
        let padding = engine.padding() as i32;
        for pos in &recorder.random {
            let chunk = pos.chunk_pos();
            assert!((padding..5 - padding).contains(&chunk.x()), "{pos}");
            assert!((padding..4 - padding).contains(&chunk.z()), "{pos}");
            assert_ne!(chunk, ChunkPos::new(2, 1));
        }
    }

    #[test]
    fn test_random_tick_samples_at_most_sixteen_per_chunk() {
        let mut world = TestWorld::grid(3, 3);
        world.fill_all(world.marker);
        let mut engine = engine(3);
        let mut recorder = Recorder::default();

        engine.random_tick(&mut world.level(), &mut recorder, 0, 1);

        // Only the center chunk is inside the padding, and every voxel has the hook.
        assert_eq!(recorder.random.len(), RANDOM_SEGMENTS * SAMPLES_PER_SEGMENT);
        for (index, pos) in recorder.random.iter().enumerate() {
            let segment = index / SAMPLES_PER_SEGMENT;
            let height = (CHUNK_H / RANDOM_SEGMENTS) as i32;
            assert!((segment as i32 * height..(segment as i32 + 1) * height).contains(&pos.y()));
            assert_eq!(pos.chunk_pos(), ChunkPos::new(1, 1));
        }
    }

    #[test]
    fn test_random_tick_shards_chunks() {
        let mut world = TestWorld::grid(5, 5);
        world.fill_all(world.marker);
        let mut engine = BlockUpdateEngine::new(&EngineConfig {
            padding: 0,
            seed: Some(11),
            ..EngineConfig::default()
        })
        .expect("config is valid");

        let mut seen = Vec::new();
        for part in 0..3 {
            let mut recorder = Recorder::default();
            engine.random_tick(&mut world.level(), &mut recorder, part, 3);
            let chunks: FxHashSet<ChunkPos> =
                recorder.random.iter().map(|pos| pos.chunk_pos()).collect();
            seen.push(chunks);
        }

        let total: usize = seen.iter().map(FxHashSet::len).sum();
        assert_eq!(total, 25);
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            assert!(seen[a].is_disjoint(&seen[b]));
        }
    }

    #[test]
    fn test_random_tick_refetches_after_hooks() {
        let mut world = TestWorld::grid(3, 3);
        world.fill_all(world.marker);
        let mut engine = engine(5);
        let mut recorder = Recorder {
            unlight_on_random: true,
            ..Recorder::default()
        };

        engine.random_tick(&mut world.level(), &mut recorder, 0, 1);
        assert_eq!(recorder.random.len(), 1);
    }

    #[test]
    fn test_step_runs_passes_at_rate() {
        let mut world = TestWorld::grid(3, 3);
        world.fill_all(world.marker);
        let mut engine = engine(9);
        let mut recorder = Recorder::default();

        for _ in 0..60 {
            engine.step(&mut world.level(), &mut recorder, 1.0 / 60.0);
        }

        let ticks = engine.world_clock().tick_id();
        assert!((19..=20).contains(&ticks));
        assert_eq!(u64::from(recorder.world_ticks), ticks);
        assert_eq!(engine.random_clock().parts(), 3);
        assert_eq!(engine.blocks_clock().parts(), 1);
        // One chunk inside the padding, one sample set per completed logical tick.
        let random_ticks = engine.random_clock().tick_id();
        assert!(recorder.random.len() as u64 <= 16 * random_ticks);
        assert!(!recorder.random.is_empty());
    }

    #[test]
    fn test_engine_delegates_inventory_operations() {
        let mut world = TestWorld::flat();
        let mut engine = engine(2);
        let pos = BlockPos::new(6, TestWorld::GROUND, 6);
        world.set(pos, world.chest);

        let mut level = world.level();
        let id = engine
            .create_block_inventory(&mut level, pos)
            .expect("chest has an inventory");
        engine
            .unbind_inventory(&mut level, pos)
            .expect("chunk is loaded");
        engine
            .bind_inventory(&mut level, id, pos)
            .expect("inventory exists");
        assert!(level.block_inventory(pos).is_some());
        assert!(level.chunks().chunk_by_voxel(pos).is_some());
    }
}
