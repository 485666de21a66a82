//! # Quarry
//!
//! Runs the block simulation on a demo world for a configured amount of time
//! and reports what happened.

use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use quarry_core::BlockUpdateEngine;

use crate::config::{DEFAULT_CONFIG_PATH, QuarryConfig};
use crate::world_setup::{DemoStats, DemoWorld};

mod config;
mod logger;
mod world_setup;

fn main() -> anyhow::Result<()> {
    let path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = QuarryConfig::load_or_create(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    logger::init(&config.log)?;

    tracing::info!("Starting quarry with config {}", path.display());
    let seed = config.engine.seed.unwrap_or_else(rand::random);
    let mut world = DemoWorld::build(&config.world, &config.blocks, seed)?;
    let mut engine = BlockUpdateEngine::new(&config.engine)?;

    let delta = 1.0 / config.frame_rate as f32;
    let frame_time = Duration::from_secs_f32(delta);
    let frames = config.frame_count();
    let started = Instant::now();

    for frame in 0..frames {
        let frame_start = Instant::now();
        world.step(&mut engine, delta);
        let relit = world.relight();
        if relit > 0 {
            tracing::trace!(frame, relit, "Relit changed cells");
        }

        if config.realtime
            && let Some(remaining) = frame_time.checked_sub(frame_start.elapsed())
        {
            thread::sleep(remaining);
        }
    }

    let stats = world.stats();
    tracing::info!(
        "Simulated {:.1}s in {} frames ({:.2?} wall time)",
        config.run_seconds,
        frames,
        started.elapsed()
    );
    tracing::info!(
        "Ticks: random {} (part {} of {}), block types {}, world {}",
        engine.random_clock().tick_id(),
        engine.random_clock().part(),
        engine.random_clock().parts(),
        engine.blocks_clock().tick_id(),
        engine.world_clock().tick_id()
    );
    tracing::info!(
        "Hooks: {} random updates ({} grass changes), {} block type ticks, {} world ticks",
        DemoStats::get(&stats.random_updates),
        DemoStats::get(&stats.grass_changes),
        DemoStats::get(&stats.sprinkler_ticks),
        DemoStats::get(&stats.world_ticks)
    );
    tracing::info!(
        "Broken: {} scaffolds, {} sand, {} chests; {} cells relit; {} of {} inventories still bound",
        DemoStats::get(&stats.scaffolds_broken),
        DemoStats::get(&stats.sand_broken),
        DemoStats::get(&stats.chests_broken),
        DemoStats::get(&stats.relit_cells),
        world.bound_inventories(),
        world.inventories().len()
    );
    Ok(())
}
