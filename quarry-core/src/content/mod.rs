//! Block type content: definitions, capability flags and the content index.

mod block;
mod registry;

pub use block::{BlockDefinition, BlockFuncs};
pub use registry::{AIR_NAME, BlockRegistry, RegistryError};

use quarry_utils::BlockId;

/// Read access to the block types known to the world.
///
/// Ids are dense: every id in `0..block_count()` resolves to a definition.
pub trait ContentIndex {
    /// Gets the definition of a block type.
    fn block(&self, id: BlockId) -> Option<&BlockDefinition>;

    /// Returns the number of registered block types.
    fn block_count(&self) -> usize;
}
