//! Errors returned by block level operations.

use quarry_utils::BlockPos;
use thiserror::Error;

use crate::inventory::InventoryId;

/// Coarse classification of a [`BlockError`], for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The target chunk or inventory does not exist.
    NotFound,
    /// The request can never succeed with these arguments.
    InvalidArgument,
}

/// Error type for inventory binding on block cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// No loaded chunk holds the cell.
    #[error("chunk holding {0} is not loaded")]
    ChunkNotLoaded(BlockPos),
    /// The store does not know the inventory.
    #[error("inventory {0} does not exist")]
    InventoryNotFound(InventoryId),
    /// Only positive ids can be bound.
    #[error("inventory {0} is virtual and cannot be bound to a block")]
    VirtualInventory(InventoryId),
}

impl BlockError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ChunkNotLoaded(_) | Self::InventoryNotFound(_) => ErrorKind::NotFound,
            Self::VirtualInventory(_) => ErrorKind::InvalidArgument,
        }
    }
}
