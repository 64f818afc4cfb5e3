//! # Hex Grid Module
//!
//! The offset hex coordinate system shared by terrain sampling, mesh vertex
//! placement, and edit resolution.
//!
//! Columns of flat-top hexagonal prisms are indexed by integer `x` (column),
//! `z` (row), and `y` (vertical layer). Odd columns are shifted half a row
//! along z, which is why horizontal adjacency depends on column parity.
//!
//! The index-to-center transform lives here in exactly one place because the
//! terrain noise sampler and the mesh builder must agree bit-for-bit: a
//! visibility decision made from a noise estimate has to match the geometry
//! that is eventually generated, or chunk borders pop when their neighbors
//! materialize.

use cgmath::{Point2, Point3};

/// `sqrt(3)`, the height of a unit flat-top hexagon relative to its width.
pub const SQRT_3: f32 = 1.732_050_8;

/// Identifies one of the eight directions in which a neighboring prism can
/// occlude a face of a hex prism.
///
/// The first six form the hexagonal belt; `Up` and `Down` are the caps.
/// The discriminants index the presence-flag array produced by the mesh
/// builder's visibility pass.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum HexSide {
    /// The +x side face toward the next row up (in the offset sense).
    TopRight = 0,

    /// The +x side face toward the previous row.
    BottomRight = 1,

    /// The -z side face.
    Front = 2,

    /// The -x side face toward the previous row.
    BottomLeft = 3,

    /// The -x side face toward the next row up.
    TopLeft = 4,

    /// The +z side face.
    Back = 5,

    /// The +y hexagonal cap.
    Up = 6,

    /// The -y hexagonal cap.
    Down = 7,
}

impl HexSide {
    /// Returns all eight sides in presence-flag order.
    pub fn all() -> [HexSide; 8] {
        [
            HexSide::TopRight,
            HexSide::BottomRight,
            HexSide::Front,
            HexSide::BottomLeft,
            HexSide::TopLeft,
            HexSide::Back,
            HexSide::Up,
            HexSide::Down,
        ]
    }

    /// Returns the `(dx, dy, dz)` index offset of the neighboring prism in
    /// this direction.
    ///
    /// The diagonal belt sides depend on the parity of the prism's own
    /// column: odd columns sit half a row further along z, so their
    /// diagonal neighbors land one row higher than an even column's.
    ///
    /// # Arguments
    /// * `even_column` - Whether the prism's x index is even
    pub fn offset(self, even_column: bool) -> (i32, i32, i32) {
        match self {
            HexSide::TopRight => {
                if even_column {
                    (1, 0, 0)
                } else {
                    (1, 0, 1)
                }
            }
            HexSide::BottomRight => {
                if even_column {
                    (1, 0, -1)
                } else {
                    (1, 0, 0)
                }
            }
            HexSide::Front => (0, 0, -1),
            HexSide::BottomLeft => {
                if even_column {
                    (-1, 0, -1)
                } else {
                    (-1, 0, 0)
                }
            }
            HexSide::TopLeft => {
                if even_column {
                    (-1, 0, 0)
                } else {
                    (-1, 0, 1)
                }
            }
            HexSide::Back => (0, 0, 1),
            HexSide::Up => (0, 1, 0),
            HexSide::Down => (0, -1, 0),
        }
    }
}

/// Converts a local hex index to the continuous center of the prism's lower
/// hexagon.
///
/// Both the terrain height field and the mesh builder call this; it is the
/// single source of truth for where a prism sits in space.
///
/// # Arguments
/// * `x` - Column index
/// * `y` - Vertical layer index
/// * `z` - Row index
pub fn hex_center(x: i32, y: i32, z: i32) -> Point3<f32> {
    Point3::new(
        x as f32 * 0.75,
        y as f32 * 0.5,
        z as f32 * SQRT_3 / 2.0 + (x % 2).abs() as f32 * SQRT_3 / 4.0,
    )
}

/// Converts a column/row index pair to its planar center, as used by the
/// edit path's closest-center search.
///
/// Unlike [`hex_center`], the parity term here is signed: a candidate index
/// at `x = -1` is offset in the negative z direction. The closest-center
/// search depends on this exact arithmetic.
pub fn index_to_planar(x: i32, z: i32) -> Point2<f32> {
    Point2::new(
        x as f32 * 0.75,
        z as f32 * SQRT_3 / 2.0 + (x % 2) as f32 * SQRT_3 / 4.0,
    )
}

/// Returns the world-space position at which a chunk's local origin sits.
///
/// The rendering collaborator places a chunk's mesh at this point; mesh
/// vertices are emitted in chunk-local space.
///
/// # Arguments
/// * `world_x` - Chunk column
/// * `world_z` - Chunk row
/// * `width` - Chunk x/z extent in prisms
pub fn chunk_origin(world_x: i32, world_z: i32, width: i32) -> Point3<f32> {
    Point3::new(
        (width * world_x) as f32 * 0.75,
        0.0,
        (width * world_z) as f32 * SQRT_3 / 2.0
            + ((world_x % 2) * (width % 2)) as f32 * SQRT_3 / 4.0,
    )
}

/// Maps a world-space position to the chunk column/row containing it.
///
/// Used by the streaming driver to turn the player position into the center
/// of the view square. The cast truncates toward zero.
pub fn chunk_coordinates(x: f32, z: f32, width: i32) -> (i32, i32) {
    (
        (x / (width as f32 * 0.75)) as i32,
        (z / (width as f32 * SQRT_3 / 2.0)) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_origin_prism() {
        let center = hex_center(0, 0, 0);
        assert_eq!(center, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn odd_columns_are_shifted_half_a_row() {
        let even = hex_center(0, 0, 1);
        let odd = hex_center(1, 0, 1);
        assert_eq!(even.z, SQRT_3 / 2.0);
        assert_eq!(odd.z, SQRT_3 / 2.0 + SQRT_3 / 4.0);
        assert_eq!(odd.x, 0.75);
    }

    #[test]
    fn vertical_layers_are_half_units() {
        assert_eq!(hex_center(0, 3, 0).y, 1.5);
    }

    #[test]
    fn even_column_adjacency() {
        let offsets: Vec<(i32, i32, i32)> = HexSide::all()
            .into_iter()
            .map(|side| side.offset(true))
            .collect();
        assert_eq!(
            offsets,
            vec![
                (1, 0, 0),
                (1, 0, -1),
                (0, 0, -1),
                (-1, 0, -1),
                (-1, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, -1, 0),
            ]
        );
    }

    #[test]
    fn odd_column_adjacency() {
        let offsets: Vec<(i32, i32, i32)> = HexSide::all()
            .into_iter()
            .map(|side| side.offset(false))
            .collect();
        assert_eq!(
            offsets,
            vec![
                (1, 0, 1),
                (1, 0, 0),
                (0, 0, -1),
                (-1, 0, 0),
                (-1, 0, 1),
                (0, 0, 1),
                (0, 1, 0),
                (0, -1, 0),
            ]
        );
    }

    #[test]
    fn planar_parity_term_is_signed() {
        // A candidate one column to the left of the chunk keeps the raw
        // remainder sign, shifting it backwards along z.
        let planar = index_to_planar(-1, 0);
        assert_eq!(planar.x, -0.75);
        assert_eq!(planar.y, -SQRT_3 / 4.0);
    }

    #[test]
    fn chunk_coordinates_truncate_toward_zero() {
        assert_eq!(chunk_coordinates(5.9, 0.0, 8), (0, 0));
        assert_eq!(chunk_coordinates(6.1, 0.0, 8), (1, 0));
        assert_eq!(chunk_coordinates(-5.9, 0.0, 8), (0, 0));
    }

    #[test]
    fn chunk_origin_spacing_matches_prism_spacing() {
        // Chunk (1, 0) starts exactly one chunk width of prisms to the right.
        let origin = chunk_origin(1, 0, 8);
        assert_eq!(origin.x, 8.0 * 0.75);
        assert_eq!(origin.z, 0.0);
    }
}
