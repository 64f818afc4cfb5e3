//! # Hex Mesh Module
//!
//! The fixed local geometry of a single hexagonal prism and the face
//! emission tables.
//!
//! Every solid prism contributes the same 12 vertices: its lower hex ring
//! at the prism's center height and its upper ring half a unit above.
//! Faces are subsets of those 12 indices, so which faces end up visible
//! changes only the index buffer, never the vertex layout. That is what
//! keeps the running vertex offset a simple multiple of 12.

use crate::hexgrid::{self, HexSide, SQRT_3};
use crate::meshing::buffers::MeshBuffers;
use crate::voxels::block::{self, BlockId};

/// Vertices contributed by every solid prism.
pub const VERTICES_PER_HEX: u32 = 12;

/// Planar offsets of the six ring corners around a hex center, starting at
/// +x and winding through the -z side.
const RING: [(f32, f32); 6] = [
    (0.5, 0.0),
    (0.25, -SQRT_3 / 4.0),
    (-0.25, -SQRT_3 / 4.0),
    (-0.5, 0.0),
    (-0.25, SQRT_3 / 4.0),
    (0.25, SQRT_3 / 4.0),
];

/// Two triangles per belt face, one table per [`HexSide`] belt direction.
/// Entries index the prism's 12 local vertices (0..5 lower ring, 6..11
/// upper ring).
const BELT_FACES: [[u32; 6]; 6] = [
    [0, 11, 5, 0, 6, 11],
    [0, 1, 7, 0, 7, 6],
    [7, 1, 2, 8, 7, 2],
    [9, 8, 2, 9, 2, 3],
    [10, 9, 3, 10, 3, 4],
    [11, 10, 4, 11, 4, 5],
];

/// Four triangles closing the upper hexagon.
const UP_CAP: [u32; 12] = [8, 6, 7, 9, 6, 8, 11, 6, 9, 11, 9, 10];

/// Four triangles closing the lower hexagon.
const DOWN_CAP: [u32; 12] = [0, 2, 1, 0, 3, 2, 0, 5, 3, 3, 5, 4];

/// Emits one solid prism's geometry into the buffers.
///
/// All 12 vertices and texture coordinates are pushed unconditionally; the
/// prism's triangle list covers exactly the face groups whose presence flag
/// is false.
///
/// # Arguments
/// * `buffers` - The chunk's growing geometry buffers
/// * `x`, `y`, `z` - The prism's local index
/// * `id` - The prism's nonzero block type, selecting the atlas column
/// * `vertex_offset` - Vertices already emitted for earlier prisms
/// * `flags` - The eight neighbor presence flags in [`HexSide`] order
pub fn emit_hex(
    buffers: &mut MeshBuffers,
    x: i32,
    y: i32,
    z: i32,
    id: BlockId,
    vertex_offset: u32,
    flags: &[bool; 8],
) {
    let center = hexgrid::hex_center(x, y, z);

    for (dx, dz) in RING {
        buffers.positions.push([center.x + dx, center.y, center.z + dz]);
    }
    for (dx, dz) in RING {
        buffers
            .positions
            .push([center.x + dx, center.y + 0.5, center.z + dz]);
    }

    let u = block::atlas_column_u(id);
    for _ in 0..6 {
        buffers.uvs.push([u, block::ATLAS_V_LOWER]);
    }
    for _ in 0..6 {
        buffers.uvs.push([u, block::ATLAS_V_UPPER]);
    }

    for (side, face) in BELT_FACES.iter().enumerate() {
        if !flags[side] {
            buffers
                .indices
                .extend(face.iter().map(|index| index + vertex_offset));
        }
    }
    if !flags[HexSide::Up as usize] {
        buffers
            .indices
            .extend(UP_CAP.iter().map(|index| index + vertex_offset));
    }
    if !flags[HexSide::Down as usize] {
        buffers
            .indices
            .extend(DOWN_CAP.iter().map(|index| index + vertex_offset));
    }
}

/// The number of indices [`emit_hex`] will produce for a given flag set:
/// six per open belt face, twelve per open cap.
pub fn indices_for_flags(flags: &[bool; 8]) -> usize {
    let belt = flags[0..6].iter().filter(|present| !**present).count() * 6;
    let caps = flags[6..8].iter().filter(|present| !**present).count() * 12;
    belt + caps
}
