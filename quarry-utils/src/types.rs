// Wrapper types making it harder to accidentaly mix up block ids, world positions and chunk positions.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::math::{Vector2, Vector3};

/// Chunk width (x axis) in voxels.
pub const CHUNK_W: usize = 16;
/// Chunk height (y axis) in voxels. The y axis is not split into chunks.
pub const CHUNK_H: usize = 256;
/// Chunk depth (z axis) in voxels.
pub const CHUNK_D: usize = 16;
/// Number of voxels stored in one chunk.
pub const CHUNK_VOLUME: usize = CHUNK_W * CHUNK_H * CHUNK_D;

// A raw block type id. The content index turns it into a block definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    /// The sentinel id of an empty cell.
    pub const AIR: Self = Self(0);

    /// Returns `true` for the empty sentinel.
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.0 == Self::AIR.0
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single cell of the grid: a block id plus opaque per-cell state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Voxel {
    /// The block type stored in the cell.
    pub id: BlockId,
    /// Block specific state bits (rotation, growth stage...). The core never interprets them.
    pub states: u8,
}

impl Voxel {
    /// An empty cell with cleared states.
    pub const EMPTY: Self = Self {
        id: BlockId::AIR,
        states: 0,
    };

    /// Creates a new voxel.
    #[must_use]
    pub const fn new(id: BlockId, states: u8) -> Self {
        Self { id, states }
    }
}

// A chunk position, in chunk units. `y` of the inner vector is the z axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos(pub Vector2<i32>);

impl ChunkPos {
    /// Creates a chunk position from chunk coordinates.
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self(Vector2::new(x, z))
    }

    /// The chunk x coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0.x
    }

    /// The chunk z coordinate.
    #[must_use]
    pub const fn z(self) -> i32 {
        self.0.y
    }

    /// Converts a local position inside this chunk back to a world position.
    #[must_use]
    pub fn block_at(self, local: LocalPos) -> BlockPos {
        BlockPos::new(
            self.x() * CHUNK_W as i32 + local.x as i32,
            local.y as i32,
            self.z() * CHUNK_D as i32 + local.z as i32,
        )
    }
}

impl Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x(), self.z())
    }
}

// A block position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    /// Creates a block position from world coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The x coordinate.
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0.x
    }

    /// The y coordinate.
    #[must_use]
    pub const fn y(self) -> i32 {
        self.0.y
    }

    /// The z coordinate.
    #[must_use]
    pub const fn z(self) -> i32 {
        self.0.z
    }

    /// Returns the position moved by the given amounts.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.0.x + dx, self.0.y + dy, self.0.z + dz)
    }

    /// The position directly below.
    #[must_use]
    pub const fn below(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The position directly above.
    #[must_use]
    pub const fn above(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// The chunk containing this position, regardless of height.
    #[must_use]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos::new(
            self.0.x.div_euclid(CHUNK_W as i32),
            self.0.z.div_euclid(CHUNK_D as i32),
        )
    }

    /// The position relative to its chunk.
    ///
    /// Returns `None` when `y` lies outside `0..CHUNK_H`.
    #[must_use]
    pub fn local_pos(self) -> Option<LocalPos> {
        let y = usize::try_from(self.0.y).ok().filter(|y| *y < CHUNK_H)?;
        Some(LocalPos {
            x: self.0.x.rem_euclid(CHUNK_W as i32) as usize,
            y,
            z: self.0.z.rem_euclid(CHUNK_D as i32) as usize,
        })
    }
}

impl Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

/// A position inside a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// `0..CHUNK_W`
    pub x: usize,
    /// `0..CHUNK_H`
    pub y: usize,
    /// `0..CHUNK_D`
    pub z: usize,
}

impl LocalPos {
    /// Creates a local position.
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        debug_assert!(x < CHUNK_W && y < CHUNK_H && z < CHUNK_D);
        Self { x, y, z }
    }

    /// Index of the voxel inside a chunk's flat voxel array (y-major, then z, then x).
    #[must_use]
    pub const fn index(self) -> usize {
        (self.y * CHUNK_D + self.z) * CHUNK_W + self.x
    }

    /// Inverse of [`LocalPos::index`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: index % CHUNK_W,
            y: index / (CHUNK_W * CHUNK_D),
            z: (index / CHUNK_W) % CHUNK_D,
        }
    }
}
