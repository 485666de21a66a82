//! Item stacks stored in inventory slots.

/// A raw item type id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The empty item.
    pub const EMPTY: Self = Self(0);
}

/// An amount of one item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemStack {
    /// The item type.
    pub item: ItemId,
    /// How many items the stack holds.
    pub count: u32,
}

impl ItemStack {
    /// Creates a stack; a zero count yields the empty stack.
    #[must_use]
    pub const fn new(item: ItemId, count: u32) -> Self {
        if count == 0 || item.0 == ItemId::EMPTY.0 {
            return Self::empty();
        }
        Self { item, count }
    }

    /// The empty stack.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            item: ItemId::EMPTY,
            count: 0,
        }
    }

    /// Returns `true` if the stack holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0 || self.item.0 == ItemId::EMPTY.0
    }

    /// Takes up to `count` items off this stack.
    pub fn split(&mut self, count: u32) -> Self {
        let taken = count.min(self.count);
        let result = Self::new(self.item, taken);
        self.count -= taken;
        if self.count == 0 {
            *self = Self::empty();
        }
        result
    }
}
