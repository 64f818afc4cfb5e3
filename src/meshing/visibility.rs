//! # Visibility Module
//!
//! Per-prism neighbor presence, including cross-chunk lookups and the
//! height-field estimate for neighbors that do not exist yet.

use crate::hexgrid::HexSide;
use crate::settings::ChunkSettings;
use crate::terrain;
use crate::voxels::block;
use crate::voxels::block_map::BlockMap;

/// Read-only views of the four horizontally adjacent chunks' block maps.
///
/// `None` means that neighbor has not been generated yet; presence queries
/// that cross into it fall back to evaluating the height field at the
/// extended local coordinate, which by construction agrees with what the
/// neighbor will eventually contain.
pub struct NeighborMaps<'a> {
    /// The chunk at `(world_x, world_z + 1)`.
    pub forward: Option<&'a BlockMap>,
    /// The chunk at `(world_x, world_z - 1)`.
    pub back: Option<&'a BlockMap>,
    /// The chunk at `(world_x + 1, world_z)`.
    pub right: Option<&'a BlockMap>,
    /// The chunk at `(world_x - 1, world_z)`.
    pub left: Option<&'a BlockMap>,
}

impl NeighborMaps<'_> {
    /// A neighborhood with no generated neighbors at all.
    pub const NONE: NeighborMaps<'static> = NeighborMaps {
        forward: None,
        back: None,
        right: None,
        left: None,
    };
}

/// Decides whether a block occupies the (possibly out-of-chunk) local
/// coordinate, for occlusion purposes.
///
/// - Below the chunk is always present: the bedrock floor is never drawn
///   but blocks the face above it.
/// - At or above the chunk's height is always absent (open sky).
/// - Past a horizontal border, the generated neighbor's map is consulted at
///   the translated coordinate; with no generated neighbor, presence is
///   estimated from the height field using this chunk's own settings.
/// - In range, the chunk's own map answers.
pub fn block_present(
    x: i32,
    y: i32,
    z: i32,
    settings: &ChunkSettings,
    own: &BlockMap,
    neighbors: &NeighborMaps,
) -> bool {
    if y < 0 {
        return true;
    }
    if y >= settings.height {
        return false;
    }
    if x < 0 {
        return match neighbors.left {
            Some(map) => map.get(settings.width + x, y, z) != block::EMPTY,
            None => (y as f32) < terrain::height(x, y, z, settings),
        };
    }
    if x >= settings.width {
        return match neighbors.right {
            Some(map) => map.get(x - settings.width, y, z) != block::EMPTY,
            None => (y as f32) < terrain::height(x, y, z, settings),
        };
    }
    if z < 0 {
        return match neighbors.back {
            Some(map) => map.get(x, y, settings.width + z) != block::EMPTY,
            None => (y as f32) < terrain::height(x, y, z, settings),
        };
    }
    if z >= settings.width {
        return match neighbors.forward {
            Some(map) => map.get(x, y, z - settings.width) != block::EMPTY,
            None => (y as f32) < terrain::height(x, y, z, settings),
        };
    }
    own.get(x, y, z) != block::EMPTY
}

/// Computes the eight directional presence flags for the prism at
/// `(x, y, z)`, in [`HexSide`] order.
///
/// A face is emitted exactly where its flag is false.
pub fn neighbor_flags(
    x: i32,
    y: i32,
    z: i32,
    settings: &ChunkSettings,
    own: &BlockMap,
    neighbors: &NeighborMaps,
) -> [bool; 8] {
    let even_column = x % 2 == 0;
    let mut flags = [false; 8];
    for side in HexSide::all() {
        let (dx, dy, dz) = side.offset(even_column);
        flags[side as usize] = block_present(x + dx, y + dy, z + dz, settings, own, neighbors);
    }
    flags
}
