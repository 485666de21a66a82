//! Face neighbours of a block.

use crate::BlockPos;

/// One of the six faces of a block, named by axis and sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// -X
    NegX,
    /// +X
    PosX,
    /// -Y
    NegY,
    /// +Y
    PosY,
    /// -Z
    NegZ,
    /// +Z
    PosZ,
}

impl Direction {
    /// The faces in the order neighbour updates visit them: axis by axis,
    /// negative side first.
    pub const ALL: [Self; 6] = [
        Self::NegX,
        Self::PosX,
        Self::NegY,
        Self::PosY,
        Self::NegZ,
        Self::PosZ,
    ];

    /// Returns the neighbour of `pos` across this face.
    #[must_use]
    pub const fn relative(self, pos: BlockPos) -> BlockPos {
        match self {
            Self::NegX => pos.offset(-1, 0, 0),
            Self::PosX => pos.offset(1, 0, 0),
            Self::NegY => pos.offset(0, -1, 0),
            Self::PosY => pos.offset(0, 1, 0),
            Self::NegZ => pos.offset(0, 0, -1),
            Self::PosZ => pos.offset(0, 0, 1),
        }
    }
}
