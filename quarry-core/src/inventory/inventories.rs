//! In-memory inventory store.

use std::sync::Arc;

use quarry_utils::locks::SyncMutex;
use rustc_hash::FxHashMap;

use super::{Inventory, InventoryId, InventoryStore, SharedInventory};

/// Keeps every live inventory of a world, indexed by id.
///
/// World inventories get ids `1, 2, 3, ..`; virtual ones `-1, -2, ..`.
#[derive(Debug)]
pub struct Inventories {
    map: FxHashMap<InventoryId, SharedInventory>,
    next_id: i64,
    next_virtual_id: i64,
}

impl Inventories {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            next_id: 1,
            next_virtual_id: -1,
        }
    }

    /// Creates a virtual inventory. Virtual inventories cannot be bound to blocks.
    pub fn create_virtual(&mut self, size: usize) -> SharedInventory {
        let id = InventoryId(self.next_virtual_id);
        self.next_virtual_id -= 1;
        self.insert(Inventory::new(id, size))
    }

    /// Forgets an inventory. Chunks still holding it keep their handle.
    pub fn remove(&mut self, id: InventoryId) -> Option<SharedInventory> {
        self.map.remove(&id)
    }

    /// Returns the number of live inventories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the store holds no inventory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn insert(&mut self, inventory: Inventory) -> SharedInventory {
        let id = inventory.id();
        let shared = Arc::new(SyncMutex::new(inventory));
        self.map.insert(id, shared.clone());
        shared
    }
}

impl Default for Inventories {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore for Inventories {
    fn create(&mut self, size: usize) -> SharedInventory {
        let id = InventoryId(self.next_id);
        self.next_id += 1;
        log::trace!("Created inventory {id} with {size} slots");
        self.insert(Inventory::new(id, size))
    }

    fn get(&self, id: InventoryId) -> Option<SharedInventory> {
        self.map.get(&id).cloned()
    }
}
