//! A fixed-size inventory backed by a Vec.

use std::mem;

use super::{InventoryId, ItemStack};

/// A fixed-size list of item slots.
#[derive(Debug)]
pub struct Inventory {
    id: InventoryId,
    items: Vec<ItemStack>,
    changed: bool,
}

impl Inventory {
    /// Creates a new inventory with the given number of slots.
    #[must_use]
    pub fn new(id: InventoryId, size: usize) -> Self {
        Self {
            id,
            items: vec![ItemStack::empty(); size],
            changed: false,
        }
    }

    /// The id the inventory store knows this inventory by.
    #[must_use]
    pub fn id(&self) -> InventoryId {
        self.id
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// Returns true if all slots are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.iter().all(ItemStack::is_empty)
    }

    /// Gets the item in the given slot, `None` past the last slot.
    #[must_use]
    pub fn get_item(&self, slot: usize) -> Option<&ItemStack> {
        self.items.get(slot)
    }

    /// Sets the item in the given slot.
    ///
    /// Returns the previous stack, or gives `item` back if the slot does not exist.
    pub fn set_item(&mut self, slot: usize, item: ItemStack) -> Result<ItemStack, ItemStack> {
        let Some(current) = self.items.get_mut(slot) else {
            return Err(item);
        };
        let previous = mem::replace(current, item);
        self.changed = true;
        Ok(previous)
    }

    /// Removes up to `count` items from the given slot and returns them.
    pub fn remove_item(&mut self, slot: usize, count: u32) -> ItemStack {
        let Some(item) = self.items.get_mut(slot) else {
            return ItemStack::empty();
        };
        let result = item.split(count);
        if !result.is_empty() {
            self.changed = true;
        }
        result
    }

    /// Clears all items.
    pub fn clear(&mut self) {
        for item in &mut self.items {
            *item = ItemStack::empty();
        }
        self.changed = true;
    }

    /// Returns whether the inventory has been modified since the last check.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Clears the changed flag.
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }
}
