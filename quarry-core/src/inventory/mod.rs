//! Block inventories and the store that owns them.

mod container;
mod inventories;
mod item_stack;

pub use container::Inventory;
pub use inventories::Inventories;
pub use item_stack::{ItemId, ItemStack};

use std::fmt::{self, Display};
use std::sync::Arc;

use quarry_utils::locks::SyncMutex;

/// Shared handle to an inventory. The store and the chunk attachment point at the same object.
pub type SharedInventory = Arc<SyncMutex<Inventory>>;

/// Identifier of an inventory.
///
/// Positive ids belong to world inventories that can be bound to blocks,
/// negative ids to virtual inventories (crafting grids, previews...). Id 0 is
/// never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InventoryId(pub i64);

impl InventoryId {
    /// Returns `true` for ids that can never be bound to a block.
    #[must_use]
    pub const fn is_virtual(self) -> bool {
        self.0 <= 0
    }
}

impl Display for InventoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates and resolves inventories by id.
pub trait InventoryStore {
    /// Creates a new world inventory with `size` slots.
    fn create(&mut self, size: usize) -> SharedInventory;

    /// Gets an inventory by id.
    fn get(&self, id: InventoryId) -> Option<SharedInventory>;
}
