use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quarry_core::EngineConfig;
use quarry_core::content::BlockDefinition;
use quarry_utils::CHUNK_H;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/quarry_config.json5");

/// Where the config lives when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "quarry_config.json5";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json5::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub depth: usize,
    pub ground_height: usize,
    pub pillars: usize,
    pub pillar_height: usize,
    pub chests: usize,
    pub collapse_interval: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuarryConfig {
    pub run_seconds: f32,
    pub frame_rate: u32,
    pub realtime: bool,
    pub log: LogConfig,
    pub engine: EngineConfig,
    pub world: WorldConfig,
    pub blocks: Vec<BlockDefinition>,
}

impl QuarryConfig {
    /// Reads the config at `path`, writing the default one there first if it
    /// does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        let config_str = if path.exists() {
            fs::read_to_string(path).map_err(io_error)?
        } else {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
            fs::write(path, DEFAULT_CONFIG).map_err(io_error)?;
            log::info!("Wrote default config to {}", path.display());
            DEFAULT_CONFIG.to_owned()
        };

        let config: Self = serde_json5::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.run_seconds.is_finite() || self.run_seconds <= 0.0 {
            return Err(ConfigError::Invalid("run_seconds must be a positive number"));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be at least 1"));
        }
        if self.engine.tick_rate == 0 {
            return Err(ConfigError::Invalid("engine.tick_rate must be at least 1"));
        }
        if self.engine.random_tick_parts == 0 || self.engine.blocks_tick_parts == 0 {
            return Err(ConfigError::Invalid("engine tick parts must be at least 1"));
        }
        if self.world.width == 0 || self.world.depth == 0 {
            return Err(ConfigError::Invalid("the world needs at least one chunk"));
        }
        if !(1..CHUNK_H / 2).contains(&self.world.ground_height) {
            return Err(ConfigError::Invalid(
                "world.ground_height must be below half the chunk height",
            ));
        }
        if self.world.ground_height + self.world.pillar_height + 1 >= CHUNK_H {
            return Err(ConfigError::Invalid("pillars must fit into the chunk height"));
        }
        if self.world.collapse_interval == 0 {
            return Err(ConfigError::Invalid("world.collapse_interval must be at least 1"));
        }
        Ok(())
    }

    /// Number of frames the run lasts.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        (self.run_seconds * self.frame_rate as f32).round() as u64
    }
}
