#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Hexworld
//!
//! A procedural hexagonal-prism voxel terrain generator with incremental
//! editing and background chunk meshing.
//!
//! The world is a grid of fixed-size chunks, each a `width x height x width`
//! field of flat-top hexagonal prisms. Chunks are generated and meshed on a
//! pool of worker threads; only faces bordering empty space are emitted, so
//! the resulting buffers are ready for direct consumption by a renderer or
//! collision system.
//!
//! ## Key Modules
//!
//! * `hexgrid` - The offset hex coordinate system shared by generation,
//!   meshing, and editing
//! * `terrain` - The deterministic height field and block stratification
//! * `voxels` - Per-chunk block storage and chunk records
//! * `meshing` - Face visibility (occlusion) and geometry buffer emission
//! * `tasks` - The chunk job, worker pool, and job handle lifecycle
//! * `world` - The chunk registry, streaming and edit drivers
//! * `settings` - World configuration and seed derivation
//!
//! ## Architecture
//!
//! All heavy work happens inside a `ChunkJob` running on a worker thread:
//! filling a chunk's block map from the height field (first build) and
//! emitting visible faces into growing geometry buffers. The driving thread
//! only dispatches jobs, polls them for completion, and transfers finished
//! buffers into chunk records. Player edits take the one deliberately
//! blocking path in the system: the edited chunk's rebuild is forced to
//! completion so the visual update lands on the same frame as the edit.
//!
//! ## Usage
//!
//! ```rust
//! use cgmath::Point3;
//! use hexworld::settings::WorldSettings;
//! use hexworld::world::World;
//!
//! let mut settings = WorldSettings::default();
//! settings.draw_distance = 1;
//! let mut world = World::new(settings);
//! world.queue_view(Point3::new(0.0, 15.0, 0.0));
//! while world.pending_jobs() > 0 {
//!     world.process_running_jobs();
//! }
//! ```

use cgmath::{Point3, Vector3};
use log::info;

use crate::settings::WorldSettings;
use crate::voxels::chunk::ChunkKey;
use crate::world::{PlayerVolume, World};

pub mod core;
pub mod hexgrid;
pub mod meshing;
pub mod settings;
pub mod tasks;
pub mod terrain;
pub mod voxels;
pub mod world;

/// Generates a demonstration world on the current thread pool and performs
/// one block edit, logging progress along the way.
///
/// This is the entry point used by the `hexworld` binary. It stands in for
/// the streaming/input collaborators of a real game loop: it queues the
/// initial view square around a spawn point, drains the job pool, and then
/// removes the topmost block of the spawn column through the synchronous
/// edit path.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut settings = WorldSettings::default();
    settings.randomize_seed();
    info!("Generating world with seed {}", settings.seed);

    let spawn = Point3::new(0.0, settings.chunk_height as f32 * 0.5, 0.0);
    let mut world = World::new(settings);

    world.queue_view(spawn);
    while world.pending_jobs() > 0 {
        if !world.process_running_jobs() {
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
    }

    let vertex_total: usize = world
        .chunk_keys()
        .iter()
        .filter_map(|key| world.chunk(*key))
        .map(|record| record.mesh.positions.len())
        .sum();
    info!(
        "Initial view ready: {} chunks, {} vertices",
        world.chunk_count(),
        vertex_total
    );

    // Knock the top off the spawn column to exercise the edit path.
    let player = PlayerVolume::new(spawn, Vector3::new(0.4, 0.9, 0.4));
    let key = ChunkKey::new(0, 0);
    let half = world.settings().chunk_width / 2;
    let target = world.chunk(key).and_then(|record| {
        let map = record.block_map.get();
        (1..world.settings().chunk_height)
            .rev()
            .find(|y| map.get(half, *y, half) != voxels::block::EMPTY)
    });
    if let Some(y) = target {
        let hit = hexgrid::hex_center(half, y, half);
        world.set_block(hit, key, voxels::block::EMPTY, &player);
        info!("Removed block at ({half}, {y}, {half}) in chunk (0, 0)");
    }
}
