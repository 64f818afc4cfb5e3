//! # Chunk Module
//!
//! Chunk addressing and the record that owns a chunk's generated data.
//!
//! Chunks are addressed by an integer column/row pair; at the scale this
//! world runs at, a plain hash map over those keys is all the spatial
//! indexing needed. Records are created the first time a chunk is scheduled
//! and live until process shutdown: going out of draw range only clears the
//! `active` flag.

use cgmath::Point3;

use crate::core::MtResource;
use crate::hexgrid;
use crate::meshing::buffers::MeshBuffers;
use crate::voxels::block_map::BlockMap;

/// Integer pair uniquely identifying a chunk.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ChunkKey {
    /// The chunk's world column.
    pub x: i32,
    /// The chunk's world row.
    pub z: i32,
}

impl ChunkKey {
    /// Creates a key for the chunk at the given column and row.
    pub fn new(x: i32, z: i32) -> Self {
        ChunkKey { x, z }
    }

    /// The world-space position of this chunk's local origin.
    pub fn origin(&self, width: i32) -> Point3<f32> {
        hexgrid::chunk_origin(self.x, self.z, width)
    }
}

/// Owns everything the world keeps per chunk: the block map, lifecycle
/// flags, and the most recently produced mesh.
pub struct ChunkRecord {
    /// The chunk's address.
    pub key: ChunkKey,
    /// The chunk's block data, shared read-only with in-flight jobs.
    pub block_map: MtResource<BlockMap>,
    /// Whether a mesh has been built for this chunk at least once. Until
    /// then the block map's contents are not meaningful and neighbors fall
    /// back to height-field estimation.
    pub generated: bool,
    /// Whether the chunk is currently enabled for rendering/collision.
    pub active: bool,
    /// The persistent mesh geometry last produced for this chunk.
    pub mesh: MeshBuffers,
}

impl ChunkRecord {
    /// Creates a fresh, ungenerated record for the given key.
    pub fn new(key: ChunkKey, width: i32, height: i32) -> Self {
        ChunkRecord {
            key,
            block_map: MtResource::new(BlockMap::new(width, height)),
            generated: false,
            active: true,
            mesh: MeshBuffers::new(),
        }
    }
}
