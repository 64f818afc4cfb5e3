//! # Block Module
//!
//! Block type ids and their texture-atlas mapping.
//!
//! Block types are stored as small integers in the block map; the enum view
//! exists for code that wants to match on terrain strata rather than compare
//! raw ids.

use num_derive::FromPrimitive;

/// The integer type used to store block types in a chunk's block map.
pub type BlockId = u8;

/// No block. An absent map entry reads as this value.
pub const EMPTY: BlockId = 0;
/// Surface soil, above half the terrain's vertical scale.
pub const SOIL: BlockId = 1;
/// Stone, between the base layer and the soil line.
pub const STONE: BlockId = 2;
/// The indestructible-looking base layer filling the two bottom strata.
pub const BASE: BlockId = 10;

/// Enumerates the block types the terrain generator produces.
///
/// The discriminants match the raw ids stored in block maps, so conversion
/// from an id is a plain primitive cast via `FromPrimitive`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// No block.
    Empty = 0,

    /// Surface soil.
    Soil = 1,

    /// Stone below the soil line.
    Stone = 2,

    /// The bottom strata of every chunk.
    Base = 10,
}

impl BlockKind {
    /// Converts a raw block id to its enum view.
    ///
    /// Returns `None` for ids the generator never produces.
    pub fn from_id(id: BlockId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }
}

/// The v coordinate of the lower hex ring's atlas row.
pub const ATLAS_V_LOWER: f32 = 0.81;
/// The v coordinate of the upper hex ring's atlas row.
pub const ATLAS_V_UPPER: f32 = 0.91;

/// Returns the u coordinate of a block type's atlas column.
///
/// The atlas is a single strip of 0.1-wide columns; a block's texture is
/// resolved purely from its integer id with no orientation-dependent
/// mapping.
///
/// # Arguments
/// * `id` - A nonzero block id
pub fn atlas_column_u(id: BlockId) -> f32 {
    debug_assert_ne!(id, EMPTY);
    0.05 + f32::from(id - 1) * 0.1
}
