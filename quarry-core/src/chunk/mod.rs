//! This module contains the chunk storage the block simulation runs on.

mod chunk_grid;
mod level_chunk;

pub use chunk_grid::ChunkGrid;
pub use level_chunk::LevelChunk;

use quarry_utils::{BlockId, BlockPos, Voxel};

/// Voxel level access to the loaded part of a world.
///
/// The loaded area is a `width() x depth()` rectangle of chunk slots; a slot
/// may be empty while its chunk is not loaded. All lookups are live: a voxel
/// written through `set_voxel` is visible to the next `get_voxel`.
pub trait ChunkAccess {
    /// Number of chunk slots along x.
    fn width(&self) -> usize;

    /// Number of chunk slots along z.
    fn depth(&self) -> usize;

    /// Gets the chunk in slot `(x, z)` of the loaded area.
    fn chunk_at(&self, x: usize, z: usize) -> Option<&LevelChunk>;

    /// Gets the chunk holding a world position.
    ///
    /// Returns `None` if the chunk is not loaded or `y` is outside the world height.
    fn chunk_by_voxel(&self, pos: BlockPos) -> Option<&LevelChunk>;

    /// Mutable variant of [`ChunkAccess::chunk_by_voxel`].
    fn chunk_by_voxel_mut(&mut self, pos: BlockPos) -> Option<&mut LevelChunk>;

    /// Returns whether the block at `pos` is solid. Unloaded cells are not solid.
    fn is_solid_block(&self, pos: BlockPos) -> bool;

    /// Gets the voxel at a world position, `None` when it is not loaded.
    fn get_voxel(&self, pos: BlockPos) -> Option<Voxel> {
        let local = pos.local_pos()?;
        self.chunk_by_voxel(pos).map(|chunk| chunk.voxel(local))
    }

    /// Sets the voxel at a world position. Unloaded positions are ignored.
    fn set_voxel(&mut self, pos: BlockPos, id: BlockId, states: u8) {
        let Some(local) = pos.local_pos() else {
            return;
        };
        if let Some(chunk) = self.chunk_by_voxel_mut(pos) {
            chunk.set_voxel(local, Voxel::new(id, states));
        }
    }
}
