//! Course terrain
//!
//! Heightmap and surface grid queried by the ball physics every tick,
//! plus the surface coefficient table and CPU mesh generation.

pub mod heightmap;
pub mod mesh;
pub mod surface;

pub use heightmap::{Terrain, TerrainError, TerrainGrid};
pub use mesh::{TerrainMesh, TerrainVertex, build_mesh};
pub use surface::{SurfaceCategory, SurfaceProperties, SurfaceTable};
