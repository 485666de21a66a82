//! A fixed rectangle of chunk slots around an origin chunk.

use std::sync::Arc;

use quarry_utils::{BlockPos, ChunkPos};

use super::{ChunkAccess, LevelChunk};
use crate::content::{BlockRegistry, ContentIndex};

/// The loaded area of a world, stored as `width * depth` chunk slots.
///
/// Slot `(x, z)` holds the chunk at `origin + (x, z)`, at flat index
/// `z * width + x`.
#[derive(Debug)]
pub struct ChunkGrid {
    registry: Arc<BlockRegistry>,
    origin: ChunkPos,
    width: usize,
    depth: usize,
    slots: Box<[Option<LevelChunk>]>,
}

impl ChunkGrid {
    /// Creates an empty grid of `width * depth` slots starting at `origin`.
    ///
    /// `registry` decides which block types are solid.
    #[must_use]
    pub fn new(registry: Arc<BlockRegistry>, origin: ChunkPos, width: usize, depth: usize) -> Self {
        Self {
            registry,
            origin,
            width,
            depth,
            slots: (0..width * depth).map(|_| None).collect(),
        }
    }

    /// The chunk position of slot `(0, 0)`.
    #[must_use]
    pub fn origin(&self) -> ChunkPos {
        self.origin
    }

    /// Flat slot index of a chunk position, `None` outside the grid.
    #[must_use]
    pub fn slot_index(&self, pos: ChunkPos) -> Option<usize> {
        let x = usize::try_from(pos.x() - self.origin.x()).ok()?;
        let z = usize::try_from(pos.z() - self.origin.z()).ok()?;
        (x < self.width && z < self.depth).then_some(z * self.width + x)
    }

    /// Puts a chunk into its slot.
    ///
    /// Returns the chunk back if it lies outside the grid, otherwise the chunk it replaced.
    pub fn insert(&mut self, chunk: LevelChunk) -> Result<Option<LevelChunk>, LevelChunk> {
        let Some(index) = self.slot_index(chunk.pos()) else {
            log::warn!("Chunk {} is outside of the loaded area", chunk.pos());
            return Err(chunk);
        };
        Ok(self.slots[index].replace(chunk))
    }

    /// Takes a chunk out of the grid.
    pub fn remove(&mut self, pos: ChunkPos) -> Option<LevelChunk> {
        let index = self.slot_index(pos)?;
        self.slots[index].take()
    }

    /// Gets a loaded chunk by chunk position.
    #[must_use]
    pub fn chunk(&self, pos: ChunkPos) -> Option<&LevelChunk> {
        let index = self.slot_index(pos)?;
        self.slots[index].as_ref()
    }

    /// Gets a loaded chunk by chunk position mutably.
    pub fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut LevelChunk> {
        let index = self.slot_index(pos)?;
        self.slots[index].as_mut()
    }

    /// Iterates over the loaded chunks in slot order.
    pub fn chunks(&self) -> impl Iterator<Item = &LevelChunk> {
        self.slots.iter().flatten()
    }

    /// Returns the number of loaded chunks.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.chunks().count()
    }
}

impl ChunkAccess for ChunkGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn chunk_at(&self, x: usize, z: usize) -> Option<&LevelChunk> {
        if x >= self.width || z >= self.depth {
            return None;
        }
        self.slots[z * self.width + x].as_ref()
    }

    fn chunk_by_voxel(&self, pos: BlockPos) -> Option<&LevelChunk> {
        pos.local_pos()?;
        self.chunk(pos.chunk_pos())
    }

    fn chunk_by_voxel_mut(&mut self, pos: BlockPos) -> Option<&mut LevelChunk> {
        pos.local_pos()?;
        self.chunk_mut(pos.chunk_pos())
    }

    fn is_solid_block(&self, pos: BlockPos) -> bool {
        self.get_voxel(pos)
            .and_then(|voxel| self.registry.block(voxel.id))
            .is_some_and(|block| block.obstacle)
    }
}
