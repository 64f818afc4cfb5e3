//! # Meshing Module
//!
//! Builds a chunk's renderable surface from its block map: a visibility
//! pass decides, per prism, which of the eight neighboring prisms exist
//! (consulting up to four adjacent chunks, or the height field for
//! neighbors that do not exist yet), and only the faces bordering empty
//! space are emitted.
//!
//! This is a culling pass, not a merging one: neighboring coplanar faces
//! stay separate quads. Output is fully deterministic in iteration order,
//! so the same seed and edit history always produce byte-identical buffers.

pub mod buffers;
pub mod hex_mesh;
pub mod visibility;

use crate::settings::ChunkSettings;
use crate::voxels::block;
use crate::voxels::block_map::BlockMap;

use buffers::MeshBuffers;
use visibility::NeighborMaps;

/// Builds the surface mesh for a whole chunk.
///
/// Iterates the chunk in (x outer, y middle, z inner) order; every solid
/// prism contributes its 12 vertices and the triangles of its unoccluded
/// faces, while empty cells contribute nothing and do not advance the
/// vertex offset.
///
/// # Arguments
/// * `settings` - The chunk being meshed
/// * `own` - The chunk's block map
/// * `neighbors` - Views of the generated adjacent chunks' maps
pub fn build_mesh(
    settings: &ChunkSettings,
    own: &BlockMap,
    neighbors: &NeighborMaps,
) -> MeshBuffers {
    let mut mesh = MeshBuffers::for_chunk(settings.width, settings.height);
    let mut vertex_offset = 0u32;
    for x in 0..settings.width {
        for y in 0..settings.height {
            for z in 0..settings.width {
                let id = own.get(x, y, z);
                if id == block::EMPTY {
                    continue;
                }
                let flags = visibility::neighbor_flags(x, y, z, settings, own, neighbors);
                hex_mesh::emit_hex(&mut mesh, x, y, z, id, vertex_offset, &flags);
                vertex_offset += hex_mesh::VERTICES_PER_HEX;
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexgrid::HexSide;
    use crate::settings::WorldSettings;
    use crate::terrain;

    fn settings_at(world_x: i32, world_z: i32) -> ChunkSettings {
        WorldSettings::default().chunk_settings(world_x, world_z)
    }

    fn generated_chunk(world_x: i32, world_z: i32) -> (ChunkSettings, BlockMap) {
        let settings = settings_at(world_x, world_z);
        let map = terrain::fill_block_map(&settings);
        (settings, map)
    }

    #[test]
    fn output_is_deterministic() {
        let (settings, map) = generated_chunk(0, 0);
        let first = build_mesh(&settings, &map, &NeighborMaps::NONE);
        let second = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert_eq!(first.position_bytes(), second.position_bytes());
        assert_eq!(first.uv_bytes(), second.uv_bytes());
        assert_eq!(first.index_bytes(), second.index_bytes());
    }

    #[test]
    fn vertex_offset_tracks_solid_prisms_only() {
        let (settings, map) = generated_chunk(0, 0);
        let mesh = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert_eq!(mesh.positions.len(), 12 * map.solid_count());
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
    }

    #[test]
    fn empty_chunk_emits_nothing() {
        let settings = settings_at(0, 0);
        let map = BlockMap::new(settings.width, settings.height);
        let mesh = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert!(mesh.is_empty());
    }

    #[test]
    fn face_count_matches_presence_flags() {
        let (settings, map) = generated_chunk(0, 0);
        let mesh = build_mesh(&settings, &map, &NeighborMaps::NONE);

        let mut expected_indices = 0;
        for x in 0..settings.width {
            for y in 0..settings.height {
                for z in 0..settings.width {
                    if map.get(x, y, z) == block::EMPTY {
                        continue;
                    }
                    let flags =
                        visibility::neighbor_flags(x, y, z, &settings, &map, &NeighborMaps::NONE);
                    expected_indices += hex_mesh::indices_for_flags(&flags);
                }
            }
        }
        assert_eq!(mesh.indices.len(), expected_indices);
    }

    #[test]
    fn border_decision_agrees_with_later_neighbor() {
        // Visibility at the right border, estimated before the neighbor
        // exists, must match the decision made once the neighbor's actual
        // map is available.
        let (settings, map) = generated_chunk(0, 0);
        let (_, right_map) = generated_chunk(1, 0);

        let with_neighbor = NeighborMaps {
            right: Some(&right_map),
            ..NeighborMaps::NONE
        };
        for y in 0..settings.height {
            for z in 0..settings.width {
                let estimated = visibility::block_present(
                    settings.width,
                    y,
                    z,
                    &settings,
                    &map,
                    &NeighborMaps::NONE,
                );
                let looked_up = visibility::block_present(
                    settings.width,
                    y,
                    z,
                    &settings,
                    &map,
                    &with_neighbor,
                );
                assert_eq!(estimated, looked_up, "seam at (y={y}, z={z})");
            }
        }
        // Note this covers the rows the neighbor actually generates; the
        // diagonal corner one past both borders belongs to neither map and
        // stays an estimate.
    }

    #[test]
    fn edit_round_trip_restores_the_mesh() {
        let (settings, mut map) = generated_chunk(0, 0);
        let original = build_mesh(&settings, &map, &NeighborMaps::NONE);

        // Remove the topmost block of an interior column, then put the same
        // type back.
        let (x, z) = (4, 4);
        let top = (0..settings.height)
            .rev()
            .find(|y| map.get(x, *y, z) != block::EMPTY)
            .expect("column should not be empty");
        let removed = map.get(x, top, z);
        map.set(x, top, z, block::EMPTY);
        let holed = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert_ne!(original.index_bytes(), holed.index_bytes());

        map.set(x, top, z, removed);
        let restored = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert_eq!(original.position_bytes(), restored.position_bytes());
        assert_eq!(original.uv_bytes(), restored.uv_bytes());
        assert_eq!(original.index_bytes(), restored.index_bytes());
    }

    #[test]
    fn removing_the_top_block_opens_the_cap_below() {
        let (settings, mut map) = generated_chunk(0, 0);

        // Find the topmost solid prism of an interior column with at least
        // two solid layers.
        let (x, z) = (4, 4);
        let top = (0..settings.height)
            .rev()
            .find(|y| map.get(x, *y, z) != block::EMPTY)
            .expect("column should not be empty");
        assert!(top >= 1, "need a block underneath the top one");

        let before = visibility::neighbor_flags(x, top - 1, z, &settings, &map, &NeighborMaps::NONE);
        assert!(before[HexSide::Up as usize]);

        map.set(x, top, z, block::EMPTY);
        let after = visibility::neighbor_flags(x, top - 1, z, &settings, &map, &NeighborMaps::NONE);
        assert!(!after[HexSide::Up as usize]);

        // The rebuilt mesh now carries an up cap for the prism below.
        let mesh = build_mesh(&settings, &map, &NeighborMaps::NONE);
        assert!(!mesh.is_empty());
    }
}
