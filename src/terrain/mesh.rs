//! CPU-side terrain mesh data
//!
//! One vertex per grid node, two triangles per cell. Buffers are laid out
//! for direct upload; the upload itself belongs to the renderer.

use bytemuck::{Pod, Zeroable};

use super::heightmap::Terrain;
use super::surface::SurfaceTable;

/// Terrain vertex with position, normal, surface color and UV
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex and index buffers for a whole terrain
#[derive(Debug, Clone, Default)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Raw vertex bytes for a GPU buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for a GPU buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Build mesh buffers from the terrain's current grid
pub fn build_mesh(terrain: &Terrain, surfaces: &SurfaceTable) -> TerrainMesh {
    let (w, d) = (terrain.width(), terrain.depth());
    if w < 2 || d < 2 {
        return TerrainMesh::default();
    }

    let mut vertices = Vec::with_capacity((w * d) as usize);
    for z in 0..d {
        for x in 0..w {
            let p = terrain.grid_to_world(x, z);
            let n = terrain.normal_at(x, z);
            let color = surfaces.properties_of(terrain.surface_at(x, z)).color;
            vertices.push(TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color,
                uv: [x as f32 / (w - 1) as f32, z as f32 / (d - 1) as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(((w - 1) * (d - 1) * 6) as usize);
    for z in 0..d - 1 {
        for x in 0..w - 1 {
            let tl = (z * w + x) as u32;
            let tr = tl + 1;
            let bl = ((z + 1) * w + x) as u32;
            let br = bl + 1;
            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }

    TerrainMesh { vertices, indices }
}
