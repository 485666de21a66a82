//! This module contains the `Level` struct, the view of the world the block
//! simulation mutates.

use quarry_utils::{BlockId, BlockPos, Direction, Voxel};
use uuid::Uuid;

use crate::behavior::BlockBehaviour;
use crate::chunk::ChunkAccess;
use crate::content::{BlockDefinition, BlockFuncs, ContentIndex};
use crate::error::BlockError;
use crate::inventory::{InventoryId, InventoryStore, SharedInventory};
use crate::lighting::LightingListener;

/// Borrowed access to the collaborators of the block simulation.
///
/// A `Level` is cheap to build and is usually created right before a frame
/// step. Every mutation goes straight to the chunk storage, so hooks always
/// observe the current state of the world.
pub struct Level<'w> {
    chunks: &'w mut dyn ChunkAccess,
    lighting: &'w mut dyn LightingListener,
    content: &'w dyn ContentIndex,
    inventories: &'w mut dyn InventoryStore,
}

impl<'w> Level<'w> {
    /// Creates a new level over the given collaborators.
    pub fn new(
        chunks: &'w mut dyn ChunkAccess,
        lighting: &'w mut dyn LightingListener,
        content: &'w dyn ContentIndex,
        inventories: &'w mut dyn InventoryStore,
    ) -> Self {
        Self {
            chunks,
            lighting,
            content,
            inventories,
        }
    }

    /// The loaded chunks.
    #[must_use]
    pub fn chunks(&self) -> &dyn ChunkAccess {
        &*self.chunks
    }

    /// The loaded chunks, mutably. Writes made here bypass lighting notifications.
    pub fn chunks_mut(&mut self) -> &mut dyn ChunkAccess {
        &mut *self.chunks
    }

    /// The block types of the world.
    #[must_use]
    pub fn content(&self) -> &'w dyn ContentIndex {
        self.content
    }

    /// Gets the voxel at `pos`, `None` if it is not loaded.
    #[must_use]
    pub fn get_voxel(&self, pos: BlockPos) -> Option<Voxel> {
        self.chunks.get_voxel(pos)
    }

    /// Gets the definition of the block at `pos`.
    #[must_use]
    pub fn get_block(&self, pos: BlockPos) -> Option<&'w BlockDefinition> {
        let content = self.content;
        self.chunks
            .get_voxel(pos)
            .and_then(|voxel| content.block(voxel.id))
    }

    /// Sets the block at `pos` without updating anything around it.
    ///
    /// Lighting is still notified.
    pub fn set_block(&mut self, pos: BlockPos, id: BlockId, states: u8) {
        if self.chunks.chunk_by_voxel(pos).is_none() {
            return;
        }
        self.chunks.set_voxel(pos, id, states);
        self.lighting.on_block_set(pos, id);
    }

    /// Sets the block at `pos`, then re-evaluates it and its six neighbours.
    pub fn place_block(
        &mut self,
        behaviour: &mut dyn BlockBehaviour,
        pos: BlockPos,
        id: BlockId,
        states: u8,
    ) {
        self.set_block(pos, id, states);
        self.update_block(behaviour, pos);
        self.update_sides(behaviour, pos);
    }

    /// Replaces the block at `pos` with air.
    ///
    /// Runs the `on_broken` hook of `def` if it has one, then updates all six
    /// neighbours. Breaking can cascade: a neighbour that loses its support
    /// breaks in turn.
    pub fn break_block(
        &mut self,
        behaviour: &mut dyn BlockBehaviour,
        actor: Option<Uuid>,
        def: &BlockDefinition,
        pos: BlockPos,
    ) {
        self.chunks.set_voxel(pos, BlockId::AIR, 0);
        self.lighting.on_block_set(pos, BlockId::AIR);

        if def.has(BlockFuncs::ON_BROKEN) {
            behaviour.on_block_broken(self, actor, def, pos);
        }
        self.update_sides(behaviour, pos);
    }

    /// Calls [`Level::update_block`] on the six neighbours of `pos`.
    pub fn update_sides(&mut self, behaviour: &mut dyn BlockBehaviour, pos: BlockPos) {
        for direction in Direction::ALL {
            self.update_block(behaviour, direction.relative(pos));
        }
    }

    /// Re-evaluates the block at `pos` after something around it changed.
    ///
    /// A grounded block without solid support below breaks. Any other block
    /// with an update hook gets it called.
    pub fn update_block(&mut self, behaviour: &mut dyn BlockBehaviour, pos: BlockPos) {
        let Some(voxel) = self.chunks.get_voxel(pos) else {
            return;
        };
        let content = self.content;
        let Some(def) = content.block(voxel.id) else {
            log::warn!("Unknown block id {} at {pos}", voxel.id);
            return;
        };

        if def.grounded && !self.chunks.is_solid_block(pos.below()) {
            self.break_block(behaviour, None, def, pos);
        } else if def.has(BlockFuncs::UPDATE) {
            behaviour.on_block_update(self, def, pos);
        }
    }

    /// Gets the inventory bound to the block at `pos`, creating it if the
    /// block type has one.
    ///
    /// Returns `None` if the chunk is not loaded or the block type has no inventory.
    pub fn create_block_inventory(&mut self, pos: BlockPos) -> Option<InventoryId> {
        let local = pos.local_pos()?;
        let content = self.content;
        let chunk = self.chunks.chunk_by_voxel_mut(pos)?;
        if let Some(existing) = chunk.block_inventory(local) {
            return Some(existing.lock().id());
        }

        let def = content.block(chunk.voxel(local).id)?;
        if def.inventory_size == 0 {
            return None;
        }
        let inventory = self.inventories.create(def.inventory_size as usize);
        let id = inventory.lock().id();
        chunk.add_block_inventory(inventory, local);
        Some(id)
    }

    /// Binds an existing world inventory to the block at `pos`, replacing any
    /// inventory bound there.
    pub fn bind_inventory(&mut self, id: InventoryId, pos: BlockPos) -> Result<(), BlockError> {
        let (Some(local), Some(chunk)) = (pos.local_pos(), self.chunks.chunk_by_voxel_mut(pos))
        else {
            return Err(BlockError::ChunkNotLoaded(pos));
        };
        if id.is_virtual() {
            return Err(BlockError::VirtualInventory(id));
        }
        let inventory = self
            .inventories
            .get(id)
            .ok_or(BlockError::InventoryNotFound(id))?;
        chunk.add_block_inventory(inventory, local);
        Ok(())
    }

    /// Unbinds the inventory of the block at `pos`. Does nothing if there is none.
    pub fn unbind_inventory(&mut self, pos: BlockPos) -> Result<(), BlockError> {
        let (Some(local), Some(chunk)) = (pos.local_pos(), self.chunks.chunk_by_voxel_mut(pos))
        else {
            return Err(BlockError::ChunkNotLoaded(pos));
        };
        chunk.remove_block_inventory(local);
        Ok(())
    }

    /// Gets the inventory bound to the block at `pos`.
    #[must_use]
    pub fn block_inventory(&self, pos: BlockPos) -> Option<SharedInventory> {
        let local = pos.local_pos()?;
        self.chunks
            .chunk_by_voxel(pos)
            .and_then(|chunk| chunk.block_inventory(local))
            .cloned()
    }
}
