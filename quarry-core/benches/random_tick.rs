#![allow(missing_docs)]
//! Benchmarks for the periodic block passes.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use quarry_core::chunk::{ChunkGrid, LevelChunk};
use quarry_core::content::{BlockDefinition, BlockFuncs, BlockRegistry};
use quarry_core::inventory::Inventories;
use quarry_core::lighting::NoLighting;
use quarry_core::{BlockUpdateEngine, EngineConfig, Level, NoBehaviour};
use quarry_utils::{CHUNK_H, ChunkPos, Voxel};

const SEED: u64 = 12345;

/// Builds a lit `size x size` world whose lower half has random update hooks.
fn create_world(size: usize) -> (Arc<BlockRegistry>, ChunkGrid) {
    let mut registry = BlockRegistry::new();
    let grass = registry
        .register(BlockDefinition::new("bench:grass").with_funcs(BlockFuncs::RANDOM_UPDATE))
        .expect("grass registers");
    let registry = Arc::new(registry);

    let mut grid = ChunkGrid::new(registry.clone(), ChunkPos::new(0, 0), size, size);
    for z in 0..size {
        for x in 0..size {
            let mut chunk = LevelChunk::new(ChunkPos::new(x as i32, z as i32));
            chunk.fill_layers(0, CHUNK_H / 2, Voxel::new(grass, 0));
            chunk.set_lighted(true);
            grid.insert(chunk).expect("chunk is inside the grid");
        }
    }
    (registry, grid)
}

fn bench_random_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_tick");

    for size in [8, 16, 32] {
        let (registry, mut grid) = create_world(size);
        let mut lighting = NoLighting;
        let mut inventories = Inventories::new();
        let mut engine = BlockUpdateEngine::new(&EngineConfig {
            seed: Some(SEED),
            ..EngineConfig::default()
        })
        .expect("default config is valid");

        group.bench_with_input(BenchmarkId::new("chunks", size * size), &size, |b, _| {
            b.iter(|| {
                let mut level =
                    Level::new(&mut grid, &mut lighting, &*registry, &mut inventories);
                for part in 0..3 {
                    engine.random_tick(&mut level, &mut NoBehaviour, black_box(part), 3);
                }
            });
        });
    }

    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let (registry, mut grid) = create_world(16);
    let mut lighting = NoLighting;
    let mut inventories = Inventories::new();
    let mut engine = BlockUpdateEngine::new(&EngineConfig {
        seed: Some(SEED),
        ..EngineConfig::default()
    })
    .expect("default config is valid");

    c.bench_function("step_60fps_one_second", |b| {
        b.iter(|| {
            let mut level = Level::new(&mut grid, &mut lighting, &*registry, &mut inventories);
            for _ in 0..60 {
                engine.step(&mut level, &mut NoBehaviour, black_box(1.0 / 60.0));
            }
        });
    });
}

criterion_group!(benches, bench_random_tick, bench_step);
criterion_main!(benches);
