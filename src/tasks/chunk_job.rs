//! # Chunk Job Module
//!
//! The unit of parallel work: fill a chunk's block map (first build) or
//! reuse the existing one (rebuild), then run the mesh builder over it.

use crate::core::MtResource;
use crate::meshing::{self, visibility::NeighborMaps};
use crate::settings::ChunkSettings;
use crate::tasks::handle::JobOutput;
use crate::terrain;
use crate::voxels::block_map::BlockMap;
use crate::voxels::chunk::ChunkKey;

/// One schedulable chunk build.
///
/// A job owns everything it needs: the target chunk's settings (including
/// the seeded noise source), a handle to the chunk's block map, and handles
/// to the generated neighbors' maps. It never mutates another chunk's data,
/// cannot be cancelled, and always runs to completion.
///
/// The two historical variants, "generate then mesh" and "mesh only",
/// collapse into the single `first_build` flag.
pub struct ChunkJob {
    settings: ChunkSettings,
    block_map: MtResource<BlockMap>,
    forward: Option<MtResource<BlockMap>>,
    back: Option<MtResource<BlockMap>>,
    right: Option<MtResource<BlockMap>>,
    left: Option<MtResource<BlockMap>>,
    first_build: bool,
}

impl ChunkJob {
    /// Creates a job for the chunk described by `settings`.
    ///
    /// # Arguments
    /// * `settings` - The target chunk's settings bundle
    /// * `block_map` - The target chunk's map; read during a rebuild,
    ///   untouched during a first build (the fresh map rides back in the
    ///   job's output instead)
    /// * `forward`, `back`, `right`, `left` - Maps of the generated
    ///   adjacent chunks, `None` where no generated neighbor exists
    /// * `first_build` - Whether to fill the map from the height field
    ///   before meshing
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        settings: ChunkSettings,
        block_map: MtResource<BlockMap>,
        forward: Option<MtResource<BlockMap>>,
        back: Option<MtResource<BlockMap>>,
        right: Option<MtResource<BlockMap>>,
        left: Option<MtResource<BlockMap>>,
        first_build: bool,
    ) -> Self {
        ChunkJob {
            settings,
            block_map,
            forward,
            back,
            right,
            left,
            first_build,
        }
    }

    /// The chunk this job targets.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.settings.world_x, self.settings.world_z)
    }

    /// Whether this job fills the block map before meshing.
    pub fn is_first_build(&self) -> bool {
        self.first_build
    }

    /// Runs the job to completion on the current thread.
    ///
    /// Neighbor maps are read-locked once for the whole run, so the job
    /// observes a consistent snapshot of each.
    pub fn run(self) -> JobOutput {
        let key = self.key();

        let forward = self.forward.as_ref().map(|map| map.get());
        let back = self.back.as_ref().map(|map| map.get());
        let right = self.right.as_ref().map(|map| map.get());
        let left = self.left.as_ref().map(|map| map.get());
        let neighbors = NeighborMaps {
            forward: forward.as_deref(),
            back: back.as_deref(),
            right: right.as_deref(),
            left: left.as_deref(),
        };

        if self.first_build {
            let map = terrain::fill_block_map(&self.settings);
            let buffers = meshing::build_mesh(&self.settings, &map, &neighbors);
            JobOutput {
                key,
                rebuild: false,
                buffers,
                block_map: Some(map),
            }
        } else {
            let own = self.block_map.get();
            let buffers = meshing::build_mesh(&self.settings, &own, &neighbors);
            JobOutput {
                key,
                rebuild: true,
                buffers,
                block_map: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldSettings;
    use crate::voxels::block;

    fn first_build_job(world_x: i32, world_z: i32) -> ChunkJob {
        let settings = WorldSettings::default().chunk_settings(world_x, world_z);
        ChunkJob::new(
            settings.clone(),
            MtResource::new(BlockMap::new(settings.width, settings.height)),
            None,
            None,
            None,
            None,
            true,
        )
    }

    #[test]
    fn first_build_returns_a_filled_map() {
        let output = first_build_job(0, 0).run();
        assert_eq!(output.key, ChunkKey::new(0, 0));
        assert!(!output.rebuild);
        let map = output.block_map.expect("first build must return its map");
        assert!(map.solid_count() > 0);
        assert_eq!(output.buffers.positions.len(), 12 * map.solid_count());
    }

    #[test]
    fn rebuild_reuses_the_supplied_map() {
        let settings = WorldSettings::default().chunk_settings(0, 0);
        let shared = MtResource::new(terrain::fill_block_map(&settings));
        shared.get_mut().set(4, 2, 4, block::EMPTY);

        let job = ChunkJob::new(settings.clone(), shared.clone(), None, None, None, None, false);
        let output = job.run();
        assert!(output.rebuild);
        assert!(output.block_map.is_none());

        let expected = meshing::build_mesh(
            &settings,
            &shared.get(),
            &NeighborMaps::NONE,
        );
        assert_eq!(output.buffers.index_bytes(), expected.index_bytes());
    }

    #[test]
    fn job_matches_direct_generation() {
        let settings = WorldSettings::default().chunk_settings(2, 1);
        let output = first_build_job(2, 1).run();
        let reference_map = terrain::fill_block_map(&settings);
        let reference = meshing::build_mesh(&settings, &reference_map, &NeighborMaps::NONE);
        assert_eq!(output.buffers.position_bytes(), reference.position_bytes());
        assert_eq!(output.buffers.index_bytes(), reference.index_bytes());
    }
}
