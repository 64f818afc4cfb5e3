//! # Terrain Module
//!
//! The deterministic height field and the stratification rule that turns
//! heights into block types.
//!
//! ## Continuity Across Chunks
//!
//! Each chunk samples the noise field at its prisms' world-space hex
//! centers: the chunk's local center plus a world offset derived from its
//! column/row. Because that offset is exactly one chunk width of prism
//! spacing per chunk, a prism just past a chunk's border samples the very
//! same point its neighbor will sample once generated. The mesh builder
//! leans on this to estimate a not-yet-generated neighbor's blocks without
//! ever producing a seam.
//!
//! ## Purity
//!
//! `height` is a pure function of its arguments. The seeded noise source
//! rides inside [`ChunkSettings`], so any number of worker threads can
//! evaluate the field concurrently with no synchronization.

use cgmath::Vector2;

use crate::hexgrid::{self, SQRT_3};
use crate::settings::ChunkSettings;
use crate::voxels::block::{self, BlockId};
use crate::voxels::block_map::BlockMap;

/// Evaluates the terrain surface height above the prism at the given local
/// index.
///
/// A prism is solid iff its layer index is below this value. Indexes outside
/// the chunk's bounds are fine: that is exactly how neighbor estimation
/// samples one column past the border.
///
/// # Arguments
/// * `x`, `y`, `z` - Local prism index (possibly outside the chunk)
/// * `settings` - The chunk whose noise window to sample
pub fn height(x: i32, y: i32, z: i32, settings: &ChunkSettings) -> f32 {
    let center = hexgrid::hex_center(x, y, z);
    let offset = Vector2::new(
        settings.width as f32 * settings.world_x as f32 * 0.75,
        settings.width as f32 * settings.world_z as f32 * SQRT_3 / 2.0,
    ) * settings.scale
        + Vector2::new(settings.seed as f32, settings.seed as f32);
    let world = Vector2::new(center.x, center.z) * settings.scale + offset;
    settings.sample_noise(world.x, world.y) * settings.z_scale as f32 + 1.0
}

/// Assigns a block type to a solid prism from its layer index.
///
/// The top half of the terrain's vertical scale is soil, the two bottom
/// layers are the base stratum, and everything between is stone.
pub fn stratify(y: i32, z_scale: i32) -> BlockId {
    if y as f32 > z_scale as f32 * 0.5 {
        block::SOIL
    } else if y < 2 {
        block::BASE
    } else {
        block::STONE
    }
}

/// Densely fills a fresh block map for the chunk described by `settings`.
///
/// Every cell of `[0, width) x [0, height) x [0, width)` gets an explicit
/// entry, solid or empty, in (x, y, z) iteration order.
pub fn fill_block_map(settings: &ChunkSettings) -> BlockMap {
    let mut map = BlockMap::new(settings.width, settings.height);
    for x in 0..settings.width {
        for y in 0..settings.height {
            for z in 0..settings.width {
                if (y as f32) < height(x, y, z, settings) {
                    map.set(x, y, z, stratify(y, settings.z_scale));
                } else {
                    map.set(x, y, z, block::EMPTY);
                }
            }
        }
    }
    map
}
