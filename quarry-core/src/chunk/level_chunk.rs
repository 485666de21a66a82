//! This module contains the `LevelChunk` struct, a loaded column of voxels.

use quarry_utils::{CHUNK_D, CHUNK_VOLUME, CHUNK_W, ChunkPos, LocalPos, Voxel};
use rustc_hash::FxHashMap;

use crate::inventory::SharedInventory;

/// A loaded chunk: a full-height column of voxels plus the inventories bound
/// to some of its cells.
#[derive(Debug)]
pub struct LevelChunk {
    /// The position of the chunk.
    pos: ChunkPos,
    voxels: Box<[Voxel]>,
    /// Block inventories keyed by local voxel index.
    inventories: FxHashMap<usize, SharedInventory>,
    /// Whether lighting finished for this chunk. Random ticks skip it until then.
    lighted: bool,
    /// Whether the chunk has been modified since last save.
    dirty: bool,
}

impl LevelChunk {
    /// Creates an empty, unlit chunk.
    #[must_use]
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            voxels: vec![Voxel::EMPTY; CHUNK_VOLUME].into_boxed_slice(),
            inventories: FxHashMap::default(),
            lighted: false,
            dirty: false,
        }
    }

    /// The position of the chunk.
    #[must_use]
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Gets a voxel at a local position.
    #[must_use]
    pub fn voxel(&self, local: LocalPos) -> Voxel {
        self.voxels[local.index()]
    }

    /// Sets a voxel at a local position.
    pub fn set_voxel(&mut self, local: LocalPos, voxel: Voxel) {
        self.voxels[local.index()] = voxel;
        self.dirty = true;
    }

    /// Fills the layers `from_y..to_y` with one voxel.
    pub fn fill_layers(&mut self, from_y: usize, to_y: usize, voxel: Voxel) {
        let layer = CHUNK_W * CHUNK_D;
        let end = (to_y * layer).min(self.voxels.len());
        let start = (from_y * layer).min(end);
        self.voxels[start..end].fill(voxel);
        self.dirty = true;
    }

    /// Returns whether lighting is done for this chunk.
    #[must_use]
    pub fn is_lighted(&self) -> bool {
        self.lighted
    }

    /// Marks lighting as done (or pending again).
    pub fn set_lighted(&mut self, lighted: bool) {
        self.lighted = lighted;
    }

    /// Returns whether the chunk changed since the last [`LevelChunk::clear_dirty`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, typically after the chunk was saved.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Gets the inventory bound to a cell.
    #[must_use]
    pub fn block_inventory(&self, local: LocalPos) -> Option<&SharedInventory> {
        self.inventories.get(&local.index())
    }

    /// Binds an inventory to a cell, replacing any previous one.
    pub fn add_block_inventory(&mut self, inventory: SharedInventory, local: LocalPos) {
        self.inventories.insert(local.index(), inventory);
        self.dirty = true;
    }

    /// Unbinds the inventory of a cell, if any.
    pub fn remove_block_inventory(&mut self, local: LocalPos) -> Option<SharedInventory> {
        let removed = self.inventories.remove(&local.index());
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Iterates over bound inventories and the cells they belong to.
    pub fn block_inventories(&self) -> impl Iterator<Item = (LocalPos, &SharedInventory)> {
        self.inventories
            .iter()
            .map(|(index, inventory)| (LocalPos::from_index(*index), inventory))
    }
}
