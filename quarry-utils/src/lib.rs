//! # Quarry Utils
//!
//! Value types shared by every quarry crate: world and chunk positions, voxel
//! ids, the six block directions and the chunk dimensions.

pub mod direction;
pub mod locks;
pub mod math;
mod types;

pub use direction::Direction;
pub use types::{
    BlockId, BlockPos, CHUNK_D, CHUNK_H, CHUNK_VOLUME, CHUNK_W, ChunkPos, LocalPos, Voxel,
};
