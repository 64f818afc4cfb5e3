//! # Edit Module
//!
//! Maps a world-space hit point to a voxel index and applies block
//! placements and removals.
//!
//! Resolving a hit is the fiddly part of the whole system, because of:
//! - the interlocking nature of a hex grid: one planar coordinate can fall
//!   between two different rows depending on column parity, so the floored
//!   index is only a starting guess and the true prism is the candidate
//!   with the closest center
//! - placements that land past a chunk border, which belong to the
//!   neighboring chunk and are redirected there (one hop at most, so two
//!   chunks disagreeing about a shared border cell can never bounce the
//!   edit back and forth forever)
//! - placements that would trap the player inside the new block
//!
//! Removals are silent no-ops when they miss; the edit collaborator gets no
//! return value and observes the effect through the rebuilt mesh.

use cgmath::{MetricSpace, Point2, Point3, Vector3};

use crate::hexgrid;
use crate::voxels::block::{self, BlockId};
use crate::voxels::block_map::BlockMap;
use crate::voxels::chunk::ChunkKey;
use crate::world::World;

/// The player's axis-aligned collision volume, supplied by the edit
/// collaborator so placements cannot bury the player.
pub struct PlayerVolume {
    /// Center of the volume.
    pub position: Point3<f32>,
    /// Half extents along each axis.
    pub half_extents: Vector3<f32>,
}

impl PlayerVolume {
    /// Creates a volume centered at `position`.
    pub fn new(position: Point3<f32>, half_extents: Vector3<f32>) -> Self {
        PlayerVolume {
            position,
            half_extents,
        }
    }

    /// Whether the point lies inside the volume.
    pub fn contains(&self, point: Point3<f32>) -> bool {
        (point.x - self.position.x).abs() <= self.half_extents.x
            && (point.y - self.position.y).abs() <= self.half_extents.y
            && (point.z - self.position.z).abs() <= self.half_extents.z
    }
}

impl World {
    /// Places or removes a block at the prism nearest to a world-space hit
    /// point.
    ///
    /// The edited chunk's rebuild is forced to completion before this
    /// returns, so there is never a frame showing stale geometry under the
    /// player's crosshair. Bordering neighbors affected by the edit get
    /// asynchronous rebuilds queued instead.
    ///
    /// Out-of-range hits, hits into the top or bottom guard layers, and
    /// placements overlapping the player are silently ignored.
    ///
    /// # Arguments
    /// * `hit_point` - World-space point on or in the targeted prism
    /// * `chunk_key` - The chunk the hit landed in
    /// * `block_type` - The id to write; [`block::EMPTY`] removes
    /// * `player` - The player's collision volume
    pub fn set_block(
        &mut self,
        hit_point: Point3<f32>,
        chunk_key: ChunkKey,
        block_type: BlockId,
        player: &PlayerVolume,
    ) {
        self.set_block_inner(hit_point, chunk_key, block_type, player, false);
    }

    fn set_block_inner(
        &mut self,
        hit_point: Point3<f32>,
        chunk_key: ChunkKey,
        block_type: BlockId,
        player: &PlayerVolume,
        redirect: bool,
    ) {
        // Cheap pre-check: placing into the player's own volume can only
        // bury them.
        if block_type > block::EMPTY && player.contains(hit_point) {
            return;
        }

        let width = self.settings.chunk_width;
        let height = self.settings.chunk_height;

        let Some(record) = self.chunks.get(&chunk_key) else {
            return;
        };
        let resolved = {
            let map = record.block_map.get();
            resolve_hex_index(&map, chunk_key, hit_point, block_type, width)
        };

        // Keep the floor and the very top layer untouchable.
        if resolved.y == 0 || resolved.y == height {
            return;
        }

        let (mut x, y, mut z) = (resolved.x, resolved.y, resolved.z);

        if x < 0 || x >= width || z < 0 || z >= width {
            // The action targets a neighboring chunk's cell.
            if block_type > block::EMPTY && !redirect {
                let mut neighbor_x = chunk_key.x;
                let mut neighbor_z = chunk_key.z;
                if x < 0 {
                    neighbor_x -= 1;
                } else if x >= width {
                    neighbor_x += 1;
                }
                if z < 0 {
                    neighbor_z -= 1;
                } else if z >= width {
                    neighbor_z += 1;
                }

                let neighbor = ChunkKey::new(neighbor_x, neighbor_z);
                if self.chunks.contains_key(&neighbor) {
                    self.set_block_inner(hit_point, neighbor, block_type, player, true);
                }
                return;
            }
            x = x.clamp(0, width - 1);
            z = z.clamp(0, width - 1);
        }

        // Final overlap check: resolve the player's middle, head, and feet
        // the same way the hit was resolved, and refuse to fill any column
        // they occupy.
        if block_type > block::EMPTY {
            let record = &self.chunks[&chunk_key];
            let map = record.block_map.get();
            let target = Point2::new(x as f32, z as f32);
            let samples = [
                player.position,
                player.position + Vector3::unit_y() * 0.5,
                player.position - Vector3::unit_y() * 0.5,
            ];
            for sample in samples {
                let player_index = resolve_hex_index(&map, chunk_key, sample, block::SOIL, width);
                let planar = Point2::new(player_index.x as f32, player_index.z as f32);
                if planar.distance(target) < 1.0 {
                    return;
                }
            }
        }

        if let Some(record) = self.chunks.get(&chunk_key) {
            record.block_map.get_mut().set(x, y, z, block_type);
        }
        self.build_chunk_now(chunk_key.x, chunk_key.z);

        // An edit on a border face changes what the neighbor can see of us.
        if x == 0 {
            self.queue_chunk(chunk_key.x - 1, chunk_key.z);
        }
        if x == width - 1 {
            self.queue_chunk(chunk_key.x + 1, chunk_key.z);
        }
        if z == 0 {
            self.queue_chunk(chunk_key.x, chunk_key.z - 1);
        }
        if z == width - 1 {
            self.queue_chunk(chunk_key.x, chunk_key.z + 1);
        }
    }
}

/// Resolves a world-space position to a local prism index inside `key`'s
/// chunk.
///
/// The floored index is only a first guess: the hexes of adjacent columns
/// interlock, so the candidate minimizing planar distance to the hit among
/// the 3x3 neighborhood wins, restricted to candidates on which the
/// requested action is valid (placing wants an empty cell, removing wants
/// an occupied one). When no candidate qualifies, the floored index is
/// returned unchanged and the caller's own validity handling takes over.
///
/// The returned x and z may lie one step outside `[0, width)`; the caller
/// decides between redirecting to a neighbor chunk and clamping.
fn resolve_hex_index(
    map: &BlockMap,
    key: ChunkKey,
    position: Point3<f32>,
    block_type: BlockId,
    width: i32,
) -> Point3<i32> {
    let chunk_world_x = key.x as f32 * width as f32 * 0.75;
    let chunk_world_z = key.z as f32 * width as f32 * hexgrid::SQRT_3 / 2.0;

    let hit_x = position.x - chunk_world_x;
    let hit_z = position.z - chunk_world_z;

    let index_x = (((hit_x / 0.75).floor()) as i32).clamp(0, width);
    let index_y = (position.y / 0.5).floor() as i32;
    let index_z = ((((hit_z + (index_x % 2) as f32 * (hexgrid::SQRT_3 / 4.0))
        / (hexgrid::SQRT_3 / 2.0))
        .floor()) as i32)
        .clamp(0, width);

    let mut closest_x = index_x;
    let mut closest_z = index_z;
    let hit = Point2::new(hit_x, hit_z);
    let mut closest_distance = f32::INFINITY;

    for check_x in (index_x - 1)..=(index_x + 1) {
        for check_z in (index_z - 1)..=(index_z + 1) {
            let check_distance = hit.distance(hexgrid::index_to_planar(check_x, check_z));
            if check_distance < closest_distance {
                let cell = map.get(check_x, index_y, check_z);
                let satisfies = (block_type > block::EMPTY && cell == block::EMPTY)
                    || (block_type == block::EMPTY && cell != block::EMPTY);
                if satisfies {
                    closest_x = check_x;
                    closest_z = check_z;
                    closest_distance = check_distance;
                }
            }
        }
    }

    Point3::new(closest_x, index_y, closest_z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexgrid::hex_center;
    use crate::settings::WorldSettings;
    use crate::world::World;

    fn far_player() -> PlayerVolume {
        PlayerVolume::new(
            Point3::new(100.0, 50.0, 100.0),
            Vector3::new(0.4, 0.9, 0.4),
        )
    }

    fn world_with_chunk() -> World {
        let mut world = World::with_workers(WorldSettings::default(), 1);
        world.build_chunk_now(0, 0);
        world
    }

    fn topmost_solid(world: &World, key: ChunkKey, x: i32, z: i32) -> i32 {
        let record = world.chunk(key).unwrap();
        let map = record.block_map.get();
        (0..world.settings().chunk_height)
            .rev()
            .find(|y| map.get(x, *y, z) != block::EMPTY)
            .expect("column should hold terrain")
    }

    #[test]
    fn resolver_snaps_to_the_nearest_center() {
        let map = BlockMap::new(8, 30);
        let hit = hex_center(3, 12, 5);
        let index = resolve_hex_index(&map, ChunkKey::new(0, 0), hit, block::SOIL, 8);
        assert_eq!(index, Point3::new(3, 12, 5));
    }

    #[test]
    fn resolver_falls_back_to_the_floored_index() {
        // Removing from an entirely empty map can satisfy no candidate;
        // the initial guess comes back unchanged.
        let map = BlockMap::new(8, 30);
        let hit = hex_center(4, 10, 4);
        let index = resolve_hex_index(&map, ChunkKey::new(0, 0), hit, block::EMPTY, 8);
        assert_eq!(index, Point3::new(4, 10, 4));
    }

    #[test]
    fn resolver_avoids_occupied_cells_when_placing() {
        let mut map = BlockMap::new(8, 30);
        map.set(3, 12, 5, block::STONE);
        let hit = hex_center(3, 12, 5);
        let index = resolve_hex_index(&map, ChunkKey::new(0, 0), hit, block::SOIL, 8);
        // Snapped to a free cell adjacent to the occupied one.
        assert_ne!((index.x, index.z), (3, 5));
        assert_eq!(index.y, 12);
        assert_eq!(map.get(index.x, index.y, index.z), block::EMPTY);
    }

    #[test]
    fn removal_clears_the_target_prism() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        let top = topmost_solid(&world, key, 4, 4);
        let baseline = world.chunk(key).unwrap().mesh.indices.clone();

        world.set_block(hex_center(4, top, 4), key, block::EMPTY, &far_player());

        let record = world.chunk(key).unwrap();
        assert_eq!(record.block_map.get().get(4, top, 4), block::EMPTY);
        assert_ne!(record.mesh.indices, baseline, "mesh must rebuild in place");
        assert_eq!(world.pending_jobs(), 0, "interior edit queues no neighbors");
    }

    #[test]
    fn remove_then_replace_restores_the_mesh() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        let top = topmost_solid(&world, key, 4, 4);
        let kind = world.chunk(key).unwrap().block_map.get().get(4, top, 4);
        let baseline = world.chunk(key).unwrap().mesh.indices.clone();
        let hit = hex_center(4, top, 4);

        world.set_block(hit, key, block::EMPTY, &far_player());
        world.set_block(hit, key, kind, &far_player());

        let record = world.chunk(key).unwrap();
        assert_eq!(record.block_map.get().get(4, top, 4), kind);
        assert_eq!(record.mesh.indices, baseline);
    }

    #[test]
    fn bottom_layer_is_guarded() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        world.set_block(hex_center(4, 0, 4), key, block::EMPTY, &far_player());
        assert_ne!(
            world.chunk(key).unwrap().block_map.get().get(4, 0, 4),
            block::EMPTY,
            "the floor must not be removable"
        );
    }

    #[test]
    fn placement_inside_the_player_is_rejected() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        let hit = hex_center(4, 20, 4);

        // Player standing slightly above the target cell, same column. The
        // hit itself is outside their volume, but their column samples
        // resolve next to it.
        let player = PlayerVolume::new(
            hit + Vector3::unit_y() * 0.6,
            Vector3::new(0.3, 0.3, 0.3),
        );
        world.set_block(hit, key, block::SOIL, &player);
        assert_eq!(
            world.chunk(key).unwrap().block_map.get().get(4, 20, 4),
            block::EMPTY
        );
    }

    #[test]
    fn placement_directly_into_the_player_volume_is_rejected() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        let hit = hex_center(4, 20, 4);
        let player = PlayerVolume::new(hit, Vector3::new(0.4, 0.9, 0.4));
        world.set_block(hit, key, block::SOIL, &player);
        assert_eq!(
            world.chunk(key).unwrap().block_map.get().get(4, 20, 4),
            block::EMPTY
        );
    }

    #[test]
    fn border_removal_queues_the_adjacent_rebuild() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);
        let top = topmost_solid(&world, key, 7, 4);

        world.set_block(hex_center(7, top, 4), key, block::EMPTY, &far_player());

        assert_eq!(world.pending_jobs(), 1);
        assert!(world.has_pending_job(ChunkKey::new(1, 0)));
        assert!(!world.has_pending_job(ChunkKey::new(-1, 0)));
        assert!(!world.has_pending_job(ChunkKey::new(0, 1)));
        assert!(!world.has_pending_job(ChunkKey::new(0, -1)));
    }

    #[test]
    fn placement_past_the_border_redirects_to_the_neighbor() {
        let mut world = world_with_chunk();
        world.build_chunk_now(1, 0);
        let origin = ChunkKey::new(0, 0);

        // A hit one full column past chunk (0, 0)'s right border resolves
        // to local x == width and belongs to chunk (1, 0).
        let hit = Point3::new(8.0 * 0.75, 10.0, 3.0 * hexgrid::SQRT_3 / 2.0);
        world.set_block(hit, origin, block::SOIL, &far_player());

        let neighbor = world.chunk(ChunkKey::new(1, 0)).unwrap();
        assert_eq!(neighbor.block_map.get().get(0, 20, 3), block::SOIL);
        // The neighbor's own border edit queues a rebuild for the original
        // chunk in turn.
        assert!(world.has_pending_job(origin));
    }

    #[test]
    fn removal_past_the_border_clamps_back_into_the_chunk() {
        let mut world = world_with_chunk();
        let key = ChunkKey::new(0, 0);

        // Aim at open air past the right border. No candidate can satisfy
        // a removal there, so the floored index (x == width) comes back
        // as-is; removals never redirect, they clamp into this chunk and
        // apply locally, which still counts as a border edit.
        let hit = Point3::new(6.05, 10.0, 4.0 * hexgrid::SQRT_3 / 2.0);
        world.set_block(hit, key, block::EMPTY, &far_player());

        assert_eq!(
            world.chunk(key).unwrap().block_map.get().get(7, 20, 4),
            block::EMPTY
        );
        assert!(world.has_pending_job(ChunkKey::new(1, 0)));
    }
}
