//! # Settings Module
//!
//! World configuration and the per-chunk settings bundle that travels into
//! chunk jobs.
//!
//! Configuration is in-process: the menu/config-file collaborator validates
//! and supplies a [`WorldSettings`] before the core is invoked. The structs
//! derive serde traits so that collaborator can round-trip them however it
//! likes.

use std::hash::{DefaultHasher, Hash, Hasher};

use noise::Perlin;
use serde::{Deserialize, Serialize};

/// Tunable parameters of a generated world.
///
/// # Examples
///
/// ```
/// use hexworld::settings::WorldSettings;
///
/// let mut settings = WorldSettings::default();
/// settings.seed_from_text("rolling hills");
/// assert!(settings.seed >= 0 && settings.seed < 1000);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSettings {
    /// Chunk extent in prisms along x and z.
    pub chunk_width: i32,
    /// Chunk extent in layers along y.
    pub chunk_height: i32,
    /// Chunks inside this range of the player are generated; chunks beyond
    /// 1.5x this range are deactivated.
    pub draw_distance: i32,
    /// How quickly the terrain changes horizontally.
    pub map_zoom: f32,
    /// Vertical exaggeration of the terrain's hills.
    pub z_scale: i32,
    /// Offset of the noise field's origin. Derived from a user string or
    /// randomized at startup.
    pub seed: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            chunk_width: 8,
            chunk_height: 30,
            draw_distance: 5,
            map_zoom: 0.1,
            z_scale: 10,
            seed: 0,
        }
    }
}

impl WorldSettings {
    /// Derives the world seed from a user-supplied string.
    ///
    /// The same string always yields the same seed, across runs.
    pub fn seed_from_text(&mut self, text: &str) {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        self.seed = (hasher.finish() % 1000) as i32;
    }

    /// Picks a random world seed.
    pub fn randomize_seed(&mut self) {
        self.seed = fastrand::i32(0..10_000) % 1000;
    }

    /// Builds the settings bundle for the chunk at the given world
    /// coordinates, including the seeded noise source.
    pub fn chunk_settings(&self, world_x: i32, world_z: i32) -> ChunkSettings {
        ChunkSettings {
            width: self.chunk_width,
            height: self.chunk_height,
            world_x,
            world_z,
            scale: self.map_zoom,
            z_scale: self.z_scale,
            seed: self.seed,
            noise: Perlin::new(self.seed as u32),
        }
    }
}

/// Context bundle containing everything a chunk job needs to know about its
/// target chunk, so the generation and meshing functions don't take a dozen
/// parameters each.
///
/// Carries the seeded noise source explicitly: there is no process-wide
/// noise state, which is what makes the height field safe to evaluate from
/// any number of worker threads at once.
#[derive(Clone)]
pub struct ChunkSettings {
    /// Chunk extent in prisms along x and z.
    pub width: i32,
    /// Chunk extent in layers along y.
    pub height: i32,
    /// The chunk's world column.
    pub world_x: i32,
    /// The chunk's world row.
    pub world_z: i32,
    /// Horizontal noise scale (the world's `map_zoom`).
    pub scale: f32,
    /// Vertical exaggeration.
    pub z_scale: i32,
    /// World seed, folded into the noise sampling offset.
    pub seed: i32,
    noise: Perlin,
}

impl ChunkSettings {
    /// Samples the 2D noise field at the given point, normalized to `[0, 1]`.
    pub fn sample_noise(&self, x: f32, y: f32) -> f32 {
        use noise::NoiseFn;
        let raw = self.noise.get([x as f64, y as f64]) as f32;
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
