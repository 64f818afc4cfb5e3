//! # Tasks Module
//!
//! The worker pool that executes chunk jobs off the driving thread.
//!
//! ## Architecture
//!
//! The pool owns a fixed set of worker threads, each fed by its own
//! channel; jobs are dealt out round-robin. Every dispatched job carries
//! the sending half of a dedicated result channel, and the returned
//! [`ChunkJobHandle`] holds the receiving half, so completion flows
//! straight back to whoever scheduled the job rather than through a shared
//! queue.
//!
//! ## Job Lifecycle
//!
//! 1. The world driver builds a [`ChunkJob`] and calls
//!    [`JobPool::dispatch`]
//! 2. A worker picks the job up and runs it to completion
//! 3. The driver either polls the handle each tick (streaming) or blocks on
//!    it (edits)
//! 4. Consuming the handle transfers the finished buffers to the driver
//!
//! Workers are plain OS threads looping on their channel; dropping the pool
//! closes the channels and lets the workers wind down.

pub mod chunk_job;
pub mod handle;

use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};

use chunk_job::ChunkJob;
use handle::{ChunkJobHandle, JobOutput};

/// A job paired with the channel its result travels back through.
struct QueuedJob {
    job: ChunkJob,
    result_sender: Sender<JobOutput>,
}

/// One worker thread and the sending half of its job channel.
struct WorkerChannel {
    job_sender: Sender<QueuedJob>,
    _worker: JoinHandle<()>,
}

/// A fixed pool of worker threads executing chunk jobs.
pub struct JobPool {
    channels: Vec<WorkerChannel>,
    current_channel: usize,
}

impl JobPool {
    /// Creates a pool with the given number of worker threads.
    ///
    /// # Panics
    /// Panics if thread creation fails.
    pub fn new(num_workers: usize) -> Self {
        let mut channels = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (job_tx, job_rx) = channel::<QueuedJob>();

            let worker = thread::spawn(move || {
                while let Ok(queued) = job_rx.recv() {
                    let output = queued.job.run();
                    // The handle may have been dropped; the job ran to
                    // completion either way.
                    let _ = queued.result_sender.send(output);
                }
            });

            channels.push(WorkerChannel {
                job_sender: job_tx,
                _worker: worker,
            });
        }

        log::info!("Chunk job pool started with {} workers", num_workers);

        JobPool {
            channels,
            current_channel: 0,
        }
    }

    /// Creates a pool sized to the machine's available parallelism.
    pub fn with_default_workers() -> Self {
        let workers = thread::available_parallelism()
            .map(|count| count.get())
            .unwrap_or(4);
        Self::new(workers)
    }

    /// The number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.channels.len()
    }

    /// Sends a job to the next worker in round-robin order and returns the
    /// handle tracking it.
    ///
    /// Dispatch never blocks; a busy worker's channel simply queues the job
    /// until the worker gets to it.
    ///
    /// # Panics
    /// Panics if the target worker thread has died, which can only happen
    /// through a bug in the job itself.
    pub fn dispatch(&mut self, job: ChunkJob) -> ChunkJobHandle {
        let key = job.key();
        let rebuild = !job.is_first_build();
        let (result_tx, result_rx) = channel();

        self.channels[self.current_channel]
            .job_sender
            .send(QueuedJob {
                job,
                result_sender: result_tx,
            })
            .expect("chunk job worker disconnected");
        self.current_channel = (self.current_channel + 1) % self.channels.len();

        ChunkJobHandle::new(key, rebuild, result_rx)
    }
}
