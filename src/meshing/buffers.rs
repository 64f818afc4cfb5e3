//! # Mesh Buffers Module
//!
//! The growable geometry sequences a chunk job fills and a chunk record
//! eventually owns.

/// Vertex positions, texture coordinates, and triangle indices for one
/// chunk's surface.
///
/// A set of buffers is exclusively owned by its in-flight job until the job
/// completes; ownership then moves into the target chunk's record (or the
/// buffers are dropped whole if that record is gone). There is no separate
/// disposal step to forget.
pub struct MeshBuffers {
    /// Vertex positions in chunk-local space.
    pub positions: Vec<[f32; 3]>,
    /// One texture coordinate per vertex.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices into `positions`/`uvs`.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Creates empty buffers.
    pub fn new() -> Self {
        MeshBuffers {
            positions: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Creates buffers pre-sized for a full chunk's worst case: 12 vertices
    /// and up to 60 indices per prism.
    pub fn for_chunk(width: i32, height: i32) -> Self {
        let prisms = (width * width * height) as usize;
        MeshBuffers {
            positions: Vec::with_capacity(12 * prisms),
            uvs: Vec::with_capacity(12 * prisms),
            indices: Vec::with_capacity(60 * prisms),
        }
    }

    /// The number of vertices emitted so far.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    /// The position data as raw bytes, for upload by the rendering
    /// collaborator.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// The texture coordinate data as raw bytes.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// The triangle index data as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self::new()
    }
}
