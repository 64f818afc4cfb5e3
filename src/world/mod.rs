//! # World Module
//!
//! The chunk registry and the two drivers that consume chunk jobs.
//!
//! ## Architecture
//!
//! The world owns every [`ChunkRecord`], the worker pool, and the list of
//! outstanding job handles. The driving thread never does chunk work
//! itself: all it ever does is dispatch jobs, poll them, or block on
//! exactly one of them.
//!
//! Two drivers consume handles:
//! * the **streaming driver** ([`World::process_running_jobs`]) completes at
//!   most one finished job per tick, so freshly generated chunks trickle in
//!   without ever stalling the caller
//! * the **edit driver** (inside [`World::set_block`]) forces the edited
//!   chunk's rebuild to completion on the spot, trading a bounded wait for
//!   an edit that is visible the same frame it happened
//!
//! ## Scheduling Invariant
//!
//! At most one job is in flight per chunk key. [`World::queue_chunk`]
//! refuses to double-schedule, and the edit path drains any outstanding job
//! for its key before scheduling the forced rebuild. A rebuild therefore
//! always observes the block map exactly as it was when the job was
//! scheduled.

mod edit;

pub use edit::PlayerVolume;

use std::collections::HashMap;

use cgmath::Point3;

use crate::core::MtResource;
use crate::hexgrid;
use crate::settings::WorldSettings;
use crate::tasks::chunk_job::ChunkJob;
use crate::tasks::handle::{ChunkJobHandle, JobOutput};
use crate::tasks::JobPool;
use crate::voxels::block_map::BlockMap;
use crate::voxels::chunk::{ChunkKey, ChunkRecord};

/// The voxel world: chunk records, the worker pool, and the outstanding
/// jobs connecting them.
pub struct World {
    settings: WorldSettings,
    pool: JobPool,
    chunks: HashMap<ChunkKey, ChunkRecord>,
    pending: Vec<ChunkJobHandle>,
}

impl World {
    /// Creates an empty world with a worker pool sized to the machine.
    pub fn new(settings: WorldSettings) -> Self {
        Self::with_pool(settings, JobPool::with_default_workers())
    }

    /// Creates an empty world with an explicit worker count.
    pub fn with_workers(settings: WorldSettings, num_workers: usize) -> Self {
        Self::with_pool(settings, JobPool::new(num_workers))
    }

    fn with_pool(settings: WorldSettings, pool: JobPool) -> Self {
        World {
            settings,
            pool,
            chunks: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// The world's configuration.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Looks up the chunk record at the given key.
    pub fn chunk(&self, key: ChunkKey) -> Option<&ChunkRecord> {
        self.chunks.get(&key)
    }

    /// The number of chunk records that exist (generated or not).
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The keys of every chunk record that exists.
    pub fn chunk_keys(&self) -> Vec<ChunkKey> {
        self.chunks.keys().copied().collect()
    }

    /// The number of outstanding chunk jobs.
    pub fn pending_jobs(&self) -> usize {
        self.pending.len()
    }

    /// Whether a job for the given key is already in flight.
    pub fn has_pending_job(&self, key: ChunkKey) -> bool {
        self.pending.iter().any(|handle| handle.key() == key)
    }

    /// Schedules a background build for the chunk at `(x, z)`, creating its
    /// record on first contact.
    ///
    /// Returns false without scheduling when a job for that key is already
    /// in flight, upholding the one-job-per-chunk invariant.
    pub fn queue_chunk(&mut self, x: i32, z: i32) -> bool {
        if self.has_pending_job(ChunkKey::new(x, z)) {
            return false;
        }
        let handle = self.schedule_chunk_job(x, z);
        self.pending.push(handle);
        true
    }

    /// Activates or schedules every chunk within the draw distance of the
    /// given position.
    ///
    /// Existing chunks are re-enabled; missing ones get a first build
    /// queued. Call this whenever the player crosses into a new chunk.
    pub fn queue_view(&mut self, player_position: Point3<f32>) {
        let (player_x, player_z) = hexgrid::chunk_coordinates(
            player_position.x,
            player_position.z,
            self.settings.chunk_width,
        );
        let draw = self.settings.draw_distance;
        for x in (player_x - draw)..(player_x + draw) {
            for z in (player_z - draw)..(player_z + draw) {
                if let Some(record) = self.chunks.get_mut(&ChunkKey::new(x, z)) {
                    record.active = true;
                } else {
                    self.queue_chunk(x, z);
                }
            }
        }
    }

    /// Deactivates chunks more than 1.5 draw distances from the given
    /// position. Records are kept; only their `active` flag drops.
    pub fn disable_far_chunks(&mut self, player_position: Point3<f32>) {
        let (player_x, player_z) = hexgrid::chunk_coordinates(
            player_position.x,
            player_position.z,
            self.settings.chunk_width,
        );
        let limit = self.settings.draw_distance as f32 * 1.5;
        for record in self.chunks.values_mut() {
            if ((record.key.x - player_x).abs() as f32) > limit
                || ((record.key.z - player_z).abs() as f32) > limit
            {
                record.active = false;
            }
        }
    }

    /// The streaming driver: completes at most one finished job, applies
    /// its result, and releases its transient buffers.
    ///
    /// Unfinished handles are left for future ticks. Returns whether a job
    /// was consumed, so callers can idle when nothing landed.
    pub fn process_running_jobs(&mut self) -> bool {
        let mut finished = None;
        for (index, handle) in self.pending.iter_mut().enumerate() {
            if handle.is_finished() {
                finished = Some(index);
                break;
            }
        }
        let Some(index) = finished else {
            return false;
        };
        let handle = self.pending.swap_remove(index);
        let output = handle.complete();
        self.apply_job_output(output);
        true
    }

    /// Builds or rebuilds one chunk synchronously: schedule, block until
    /// the job finishes, apply. Any job already in flight for the key is
    /// drained first.
    pub fn build_chunk_now(&mut self, x: i32, z: i32) {
        self.drain_pending_job(ChunkKey::new(x, z));
        let handle = self.schedule_chunk_job(x, z);
        let output = handle.complete();
        self.apply_job_output(output);
    }

    /// Force-completes and applies the outstanding job for `key`, if any.
    fn drain_pending_job(&mut self, key: ChunkKey) {
        if let Some(index) = self.pending.iter().position(|handle| handle.key() == key) {
            let handle = self.pending.swap_remove(index);
            let output = handle.complete();
            self.apply_job_output(output);
        }
    }

    /// Dispatches a job for the chunk at `(x, z)`, creating the record if
    /// this is the chunk's first contact.
    ///
    /// Whether the job fills the block map first is decided by the record's
    /// `generated` flag; neighbors are passed along only when they have
    /// block data worth reading.
    fn schedule_chunk_job(&mut self, x: i32, z: i32) -> ChunkJobHandle {
        let key = ChunkKey::new(x, z);
        let width = self.settings.chunk_width;
        let height = self.settings.chunk_height;
        if !self.chunks.contains_key(&key) {
            log::info!("Creating chunk record for {key:?}");
            self.chunks.insert(key, ChunkRecord::new(key, width, height));
        }

        let record = &self.chunks[&key];
        let first_build = !record.generated;
        let block_map = record.block_map.clone();

        let job = ChunkJob::new(
            self.settings.chunk_settings(x, z),
            block_map,
            self.generated_map(x, z + 1),
            self.generated_map(x, z - 1),
            self.generated_map(x + 1, z),
            self.generated_map(x - 1, z),
            first_build,
        );
        self.pool.dispatch(job)
    }

    /// The block map of the chunk at `(x, z)`, if that chunk has been
    /// generated.
    fn generated_map(&self, x: i32, z: i32) -> Option<MtResource<BlockMap>> {
        self.chunks
            .get(&ChunkKey::new(x, z))
            .filter(|record| record.generated)
            .map(|record| record.block_map.clone())
    }

    /// Transfers a finished job's results into its chunk record.
    ///
    /// If the record no longer exists the result is dropped, buffers and
    /// all, with a logged diagnostic; nothing propagates to the caller.
    fn apply_job_output(&mut self, output: JobOutput) {
        match self.chunks.get_mut(&output.key) {
            Some(record) => {
                if let Some(map) = output.block_map {
                    *record.block_map.get_mut() = map;
                }
                record.mesh = output.buffers;
                record.generated = true;
            }
            None => {
                log::error!(
                    "Completed chunk job for {:?} has no chunk record; dropping its buffers",
                    output.key
                );
            }
        }
    }
}
