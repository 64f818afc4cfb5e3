//! # Job Handle Module
//!
//! Tracking objects for in-flight chunk jobs and the data they hand back.

use std::sync::mpsc::Receiver;

use crate::meshing::buffers::MeshBuffers;
use crate::voxels::block_map::BlockMap;
use crate::voxels::chunk::ChunkKey;

/// Everything a finished chunk job hands back to the driving thread.
pub struct JobOutput {
    /// The chunk the geometry belongs to.
    pub key: ChunkKey,
    /// Whether this was a rebuild of an already generated chunk.
    pub rebuild: bool,
    /// The finished geometry, ready to move into the chunk record.
    pub buffers: MeshBuffers,
    /// The freshly filled block map, present for first builds only. It
    /// becomes the chunk record's map; rebuilds leave the existing map in
    /// place and carry `None`.
    pub block_map: Option<BlockMap>,
}

/// Wrapper around one scheduled chunk job.
///
/// A handle is either polled each tick by the streaming driver
/// ([`is_finished`](Self::is_finished)) or forced to completion by the edit
/// driver ([`complete`](Self::complete), the one blocking call in the
/// system). Completing consumes the handle; the output's buffers are then
/// owned by the caller and released exactly once wherever they end up.
pub struct ChunkJobHandle {
    key: ChunkKey,
    rebuild: bool,
    receiver: Receiver<JobOutput>,
    finished: Option<JobOutput>,
}

impl ChunkJobHandle {
    pub(crate) fn new(key: ChunkKey, rebuild: bool, receiver: Receiver<JobOutput>) -> Self {
        ChunkJobHandle {
            key,
            rebuild,
            receiver,
            finished: None,
        }
    }

    /// The chunk this handle's job targets.
    pub fn key(&self) -> ChunkKey {
        self.key
    }

    /// Whether the job is a rebuild rather than a first build.
    pub fn is_rebuild(&self) -> bool {
        self.rebuild
    }

    /// Polls the job without blocking, stashing the output internally once
    /// the worker delivers it.
    pub fn is_finished(&mut self) -> bool {
        if self.finished.is_none() {
            if let Ok(output) = self.receiver.try_recv() {
                self.finished = Some(output);
            }
        }
        self.finished.is_some()
    }

    /// Blocks until the job completes and returns its output.
    ///
    /// The wait is bounded by one chunk's worth of generation and meshing;
    /// jobs never block on other jobs or perform I/O.
    ///
    /// # Panics
    /// Panics if the worker thread died before delivering a result, which
    /// can only happen through a bug in the job itself.
    pub fn complete(mut self) -> JobOutput {
        match self.finished.take() {
            Some(output) => output,
            None => self
                .receiver
                .recv()
                .expect("chunk job worker disconnected before sending its result"),
        }
    }
}
