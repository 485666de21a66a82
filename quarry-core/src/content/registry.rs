//! In-memory content index for block types.

use quarry_utils::BlockId;
use rustc_hash::FxHashMap;

use super::{BlockDefinition, ContentIndex};
use crate::behavior::HookTable;

/// Name of the block type every registry reserves id 0 for.
pub const AIR_NAME: &str = "core:air";

/// Errors raised while registering block types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Another block type already uses this name.
    #[error("block `{0}` is already registered")]
    DuplicateName(String),
    /// The block type pass divides by the interval.
    #[error("block `{0}` has a tick interval of 0")]
    ZeroTickInterval(String),
    /// Block ids are 16 bit.
    #[error("no block ids left for `{0}`")]
    Full(String),
}

/// Block types indexed by their id.
///
/// Id 0 is always [`AIR_NAME`], a non-solid block without hooks.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    blocks: Vec<BlockDefinition>,
    by_name: FxHashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Creates a registry holding only air.
    #[must_use]
    pub fn new() -> Self {
        let air = BlockDefinition::new(AIR_NAME).with_obstacle(false);
        let mut by_name = FxHashMap::default();
        by_name.insert(air.name.clone(), BlockId::AIR);
        Self {
            blocks: vec![air],
            by_name,
        }
    }

    /// Registers a block type and returns the id it was given.
    ///
    /// Ids are handed out sequentially in registration order.
    pub fn register(&mut self, mut definition: BlockDefinition) -> Result<BlockId, RegistryError> {
        if self.by_name.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateName(definition.name));
        }
        if definition.tick_interval == 0 {
            return Err(RegistryError::ZeroTickInterval(definition.name));
        }
        let Ok(raw) = u16::try_from(self.blocks.len()) else {
            return Err(RegistryError::Full(definition.name));
        };

        let id = BlockId(raw);
        definition.id = id;
        self.by_name.insert(definition.name.clone(), id);
        self.blocks.push(definition);
        Ok(id)
    }

    /// Registers several block types, stopping at the first error.
    pub fn register_all(
        &mut self,
        definitions: impl IntoIterator<Item = BlockDefinition>,
    ) -> Result<(), RegistryError> {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    /// Looks a block type up by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&BlockDefinition> {
        self.by_name
            .get(name)
            .and_then(|id| self.blocks.get(usize::from(id.0)))
    }

    /// Resolves a name to its id.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Block names in id order, the layout of the world's index file.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.name.as_str())
    }

    /// Overwrites every block type's hook flags with what `hooks` provides.
    ///
    /// Has to run before the registry is shared with the chunk grid.
    pub fn apply_hooks(&mut self, hooks: &HookTable) {
        for block in &mut self.blocks {
            block.funcs = hooks.funcs_for(block.id);
        }
        let hooked = self
            .blocks
            .iter()
            .filter(|block| !block.funcs.is_empty())
            .count();
        log::debug!("Bound behaviour hooks to {hooked} of {} block types", self.blocks.len());
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentIndex for BlockRegistry {
    fn block(&self, id: BlockId) -> Option<&BlockDefinition> {
        self.blocks.get(usize::from(id.0))
    }

    fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_is_reserved() {
        let registry = BlockRegistry::new();
        let air = registry.block(BlockId::AIR).expect("air is registered");
        assert_eq!(air.name, AIR_NAME);
        assert!(!air.obstacle);
        assert_eq!(registry.block_count(), 1);
    }

    #[test]
    fn test_sequential_ids() {
        let mut registry = BlockRegistry::new();
        let stone = registry
            .register(BlockDefinition::new("core:stone"))
            .expect("stone registers");
        let sand = registry
            .register(BlockDefinition::new("core:sand").with_grounded(true))
            .expect("sand registers");

        assert_eq!(stone, BlockId(1));
        assert_eq!(sand, BlockId(2));
        assert_eq!(registry.id_of("core:sand"), Some(sand));
        assert!(registry.by_name("core:sand").expect("sand").grounded);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["core:air", "core:stone", "core:sand"]
        );
    }

    #[test]
    fn test_rejects_duplicates_and_zero_interval() {
        let mut registry = BlockRegistry::new();
        assert_eq!(
            registry.register(BlockDefinition::new(AIR_NAME)),
            Err(RegistryError::DuplicateName(AIR_NAME.to_owned()))
        );
        assert_eq!(
            registry.register(BlockDefinition::new("core:clock").with_tick_interval(0)),
            Err(RegistryError::ZeroTickInterval("core:clock".to_owned()))
        );
        assert_eq!(registry.block_count(), 1);
    }
}
