//! # Voxels Module
//!
//! Block type ids, per-chunk block storage, and the chunk records that own
//! generated data.

pub mod block;
pub mod block_map;
pub mod chunk;
