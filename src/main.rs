//! # Hexworld Demo Entry Point
//!
//! Generates a small hex-prism voxel world, waits for the background chunk
//! jobs to finish, and performs a single block edit. See the library's
//! `run()` for the actual loop.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    hexworld::run();
}
