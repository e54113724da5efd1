//! Heightmap terrain with a parallel surface grid
//!
//! Grid node `(x, z)` sits at world position
//! `((x - width/2) * cell_size, height, (z - depth/2) * cell_size)`.
//! All grid queries clamp their indices, so every lookup is total.
//!
//! The only mutator replaces the whole grid at once. Editors (the course
//! stamper) take a [`TerrainGrid`] snapshot, modify it, and hand it back.

use glam::Vec3;
use thiserror::Error;

use super::surface::SurfaceCategory;

/// Fractional grid coordinates this close to an integer are snapped to it
const GRID_SNAP_EPS: f32 = 1e-4;

/// Malformed terrain data (a bug in course data, not a runtime condition)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TerrainError {
    #[error("terrain must be at least 2x2 cells, got {width}x{depth}")]
    InvalidDimensions { width: i32, depth: i32 },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("{grid} grid has {found} entries, expected {expected}")]
    GridLengthMismatch {
        grid: &'static str,
        found: usize,
        expected: usize,
    },
}

/// Owned copy of a terrain's grid data
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    pub width: i32,
    pub depth: i32,
    pub cell_size: f32,
    pub heights: Vec<f32>,
    pub surfaces: Vec<SurfaceCategory>,
}

impl TerrainGrid {
    /// Row-major index for an in-range node
    #[inline]
    pub fn index(&self, x: i32, z: i32) -> usize {
        (z * self.width + x) as usize
    }

    /// World XZ position of a grid node
    #[inline]
    pub fn node_world_xz(&self, x: i32, z: i32) -> (f32, f32) {
        (
            (x as f32 - self.width as f32 / 2.0) * self.cell_size,
            (z as f32 - self.depth as f32 / 2.0) * self.cell_size,
        )
    }

    fn validate(&self) -> Result<(), TerrainError> {
        if self.width < 2 || self.depth < 2 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                depth: self.depth,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(TerrainError::InvalidCellSize(self.cell_size));
        }
        let expected = self.width as usize * self.depth as usize;
        if self.heights.len() != expected {
            return Err(TerrainError::GridLengthMismatch {
                grid: "height",
                found: self.heights.len(),
                expected,
            });
        }
        if self.surfaces.len() != expected {
            return Err(TerrainError::GridLengthMismatch {
                grid: "surface",
                found: self.surfaces.len(),
                expected,
            });
        }
        Ok(())
    }
}

/// Heightmap-based course terrain
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    width: i32,
    depth: i32,
    cell_size: f32,
    heights: Vec<f32>,
    surfaces: Vec<SurfaceCategory>,
}

impl Terrain {
    /// Empty terrain; populate it with `replace_grid_data`
    pub fn new() -> Self {
        Self {
            cell_size: 1.0,
            ..Self::default()
        }
    }

    /// Uniform terrain at a single height and surface
    pub fn flat(width: i32, depth: i32, cell_size: f32, height: f32, surface: SurfaceCategory) -> Self {
        let count = width.max(0) as usize * depth.max(0) as usize;
        let mut terrain = Self::new();
        terrain.replace_grid_data(width, depth, cell_size, vec![height; count], vec![surface; count]);
        terrain
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// True until grid data has been supplied
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn surfaces(&self) -> &[SurfaceCategory] {
        &self.surfaces
    }

    /// Swap in a whole new grid, panicking on malformed data
    pub fn replace_grid_data(
        &mut self,
        width: i32,
        depth: i32,
        cell_size: f32,
        heights: Vec<f32>,
        surfaces: Vec<SurfaceCategory>,
    ) {
        if let Err(err) = self.try_replace_grid_data(width, depth, cell_size, heights, surfaces) {
            panic!("invalid terrain data: {err}");
        }
    }

    /// Swap in a whole new grid; the terrain is untouched on error
    pub fn try_replace_grid_data(
        &mut self,
        width: i32,
        depth: i32,
        cell_size: f32,
        heights: Vec<f32>,
        surfaces: Vec<SurfaceCategory>,
    ) -> Result<(), TerrainError> {
        self.replace_grid(TerrainGrid {
            width,
            depth,
            cell_size,
            heights,
            surfaces,
        })
    }

    /// Swap in a snapshot produced by `snapshot()` (or built by hand)
    pub fn replace_grid(&mut self, grid: TerrainGrid) -> Result<(), TerrainError> {
        grid.validate()?;
        let TerrainGrid {
            width,
            depth,
            cell_size,
            heights,
            surfaces,
        } = grid;
        *self = Self {
            width,
            depth,
            cell_size,
            heights,
            surfaces,
        };
        Ok(())
    }

    /// Owned copy of the current grid
    pub fn snapshot(&self) -> TerrainGrid {
        TerrainGrid {
            width: self.width,
            depth: self.depth,
            cell_size: self.cell_size,
            heights: self.heights.clone(),
            surfaces: self.surfaces.clone(),
        }
    }

    #[inline]
    fn clamped_index(&self, x: i32, z: i32) -> usize {
        debug_assert!(!self.is_empty(), "terrain queried before grid data was supplied");
        let x = x.clamp(0, self.width - 1);
        let z = z.clamp(0, self.depth - 1);
        (z * self.width + x) as usize
    }

    /// Height at grid coordinates (clamped)
    pub fn height_at(&self, x: i32, z: i32) -> f32 {
        self.heights[self.clamped_index(x, z)]
    }

    /// Surface at grid coordinates (clamped)
    pub fn surface_at(&self, x: i32, z: i32) -> SurfaceCategory {
        self.surfaces[self.clamped_index(x, z)]
    }

    /// Fractional grid coordinates of a world XZ position
    pub fn world_to_grid(&self, wx: f32, wz: f32) -> (f32, f32) {
        let snap = |g: f32| {
            let r = g.round();
            if (g - r).abs() < GRID_SNAP_EPS { r } else { g }
        };
        (
            snap(wx / self.cell_size + self.width as f32 / 2.0),
            snap(wz / self.cell_size + self.depth as f32 / 2.0),
        )
    }

    /// World position of a grid node, at its stored height
    pub fn grid_to_world(&self, x: i32, z: i32) -> Vec3 {
        Vec3::new(
            (x as f32 - self.width as f32 / 2.0) * self.cell_size,
            self.height_at(x, z),
            (z as f32 - self.depth as f32 / 2.0) * self.cell_size,
        )
    }

    /// Nearest grid node to a world XZ position
    fn nearest_node(&self, wx: f32, wz: f32) -> (i32, i32) {
        let (gx, gz) = self.world_to_grid(wx, wz);
        (gx.round() as i32, gz.round() as i32)
    }

    /// Height at world coordinates (bilinear interpolation)
    pub fn height_at_world(&self, wx: f32, wz: f32) -> f32 {
        let (gx, gz) = self.world_to_grid(wx, wz);

        let x0f = gx.floor();
        let z0f = gz.floor();
        let fx = gx - x0f;
        let fz = gz - z0f;
        let x0 = x0f as i32;
        let z0 = z0f as i32;

        let h00 = self.height_at(x0, z0);
        // Far-off coordinates saturate at i32::MAX; neighbours must not wrap
        let x1 = x0.saturating_add(1);
        let z1 = z0.saturating_add(1);

        let h10 = self.height_at(x1, z0);
        let h01 = self.height_at(x0, z1);
        let h11 = self.height_at(x1, z1);

        let h0 = h00 + (h10 - h00) * fx;
        let h1 = h01 + (h11 - h01) * fx;
        h0 + (h1 - h0) * fz
    }

    /// Surface at world coordinates (nearest node, categorical)
    pub fn surface_at_world(&self, wx: f32, wz: f32) -> SurfaceCategory {
        let (x, z) = self.nearest_node(wx, wz);
        self.surface_at(x, z)
    }

    /// Unit normal at a grid node from central differences
    pub fn normal_at(&self, x: i32, z: i32) -> Vec3 {
        let h_left = self.height_at(x.saturating_sub(1), z);
        let h_right = self.height_at(x.saturating_add(1), z);
        let h_down = self.height_at(x, z.saturating_sub(1));
        let h_up = self.height_at(x, z.saturating_add(1));
        Vec3::new(h_left - h_right, 2.0 * self.cell_size, h_down - h_up).normalize_or(Vec3::Y)
    }

    /// Unit normal at world coordinates (nearest node, not interpolated)
    pub fn normal_at_world(&self, wx: f32, wz: f32) -> Vec3 {
        let (x, z) = self.nearest_node(wx, wz);
        self.normal_at(x, z)
    }
}
