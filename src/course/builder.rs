//! Procedural base terrain and hole stamping
//!
//! Every stamp follows the same cycle: snapshot the whole grid, paint into
//! the copy, hand the copy back through `Terrain::replace_grid`. Painting
//! is splat based: circles are rasterized inside a clamped bounding box and
//! later writes win.

use std::f32::consts::PI;

use super::CourseError;
use super::hole::{Bunker, GreenDef, Hole, TeeDef, WaterHazard};
use crate::lerp;
use crate::settings::TerrainSettings;
use crate::terrain::{SurfaceCategory, Terrain, TerrainGrid};

/// Distance between fairway splats along a segment
const FAIRWAY_STEP: f32 = 0.5;
/// Peak depression of the fairway centerline
const FAIRWAY_DEPRESSION: f32 = -0.05;
/// Extra radius of the rough border around the fairway
const ROUGH_BORDER: f32 = 5.0;
/// Tee pads sit slightly proud of the terrain
const TEE_RAISE: f32 = 0.1;
/// Water surfaces sit below the surrounding terrain
const WATER_DEPTH: f32 = 0.5;
/// Green tilts smaller than this (radians) are ignored
const MIN_GREEN_SLOPE: f32 = 0.01;

/// How a circular paint treats heights
#[derive(Debug, Clone, Copy, PartialEq)]
enum HeightMode {
    /// Add `offset * (1 - dist/radius)`
    Falloff(f32),
    /// Blend toward `original + offset`, fully at the center, not at the rim
    Flatten(f32),
}

/// Inclusive grid bounds of the cells that may lie within a circle
fn circle_bounds(grid: &TerrainGrid, cx: f32, cz: f32, radius: f32) -> (i32, i32, i32, i32) {
    let to_grid = |w: f32, extent: i32| (w / grid.cell_size + extent as f32 / 2.0).floor() as i32;
    let x0 = to_grid(cx - radius, grid.width).max(0);
    let z0 = to_grid(cz - radius, grid.depth).max(0);
    let x1 = to_grid(cx + radius, grid.width).min(grid.width - 1);
    let z1 = to_grid(cz + radius, grid.depth).min(grid.depth - 1);
    (x0, z0, x1, z1)
}

/// Visit every node within `radius` of `(cx, cz)` with its offset from the center
fn for_each_in_circle(
    grid: &TerrainGrid,
    cx: f32,
    cz: f32,
    radius: f32,
    mut visit: impl FnMut(i32, i32, f32, f32, f32),
) {
    if radius.is_nan() || radius <= 0.0 {
        return;
    }
    let (x0, z0, x1, z1) = circle_bounds(grid, cx, cz, radius);
    for z in z0..=z1 {
        for x in x0..=x1 {
            let (wx, wz) = grid.node_world_xz(x, z);
            let (dx, dz) = (wx - cx, wz - cz);
            let dist = (dx * dx + dz * dz).sqrt();
            if dist <= radius {
                visit(x, z, dx, dz, dist);
            }
        }
    }
}

/// Paint a circular patch of surface into `grid`, reading pre-stamp heights from `original`
fn paint_circle(
    original: &Terrain,
    grid: &mut TerrainGrid,
    cx: f32,
    cz: f32,
    radius: f32,
    surface: SurfaceCategory,
    mode: HeightMode,
) {
    let mut cells = Vec::new();
    for_each_in_circle(grid, cx, cz, radius, |x, z, _, _, dist| cells.push((x, z, dist)));

    for (x, z, dist) in cells {
        let idx = grid.index(x, z);
        grid.surfaces[idx] = surface;
        match mode {
            HeightMode::Flatten(offset) => {
                let blend = dist / radius;
                let target = original.height_at(x, z) + offset;
                grid.heights[idx] = grid.heights[idx] * blend + target * (1.0 - blend);
            }
            HeightMode::Falloff(offset) if offset != 0.0 => {
                grid.heights[idx] += offset * (1.0 - dist / radius);
            }
            HeightMode::Falloff(_) => {}
        }
    }
}

/// Evenly spaced splat centers and widths along the fairway centerline
fn fairway_samples(hole: &Hole) -> Vec<(f32, f32, f32)> {
    let mut samples = Vec::new();
    for pair in hole.fairway.windows(2) {
        let (p0, p1) = (&pair[0], &pair[1]);
        let len = p0.position.distance(p1.position);
        let steps = (len / FAIRWAY_STEP) as i32 + 1;
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let pos = p0.position.lerp(p1.position, t);
            samples.push((pos.x, pos.z, lerp(p0.width, p1.width, t)));
        }
    }
    samples
}

/// Builds course terrain
pub struct CourseBuilder;

impl CourseBuilder {
    /// Fill the terrain with deterministic rolling hills, all Rough
    pub fn generate_base(terrain: &mut Terrain, width: i32, depth: i32, cell_size: f32) -> Result<(), CourseError> {
        let count = width.max(0) as usize * depth.max(0) as usize;
        let mut heights = vec![0.0; count];
        let surfaces = vec![SurfaceCategory::Rough; count];

        for z in 0..depth {
            for x in 0..width {
                let u = x as f32 / width as f32;
                let v = z as f32 / depth as f32;

                let mut h = 0.0;
                // Large rolling hills
                h += (u * PI * 2.0).sin() * 0.8;
                h += (v * PI * 3.0).cos() * 0.5;
                // Medium bumps
                h += (u * 7.0 + v * 5.0).sin() * 0.3;
                h += (u * 11.0 - v * 3.0).cos() * 0.2;
                // Fine detail
                h += (u * 23.0 + v * 17.0).sin() * 0.05;

                heights[(z * width + x) as usize] = h;
            }
        }

        terrain.try_replace_grid_data(width, depth, cell_size, heights, surfaces)?;
        log::info!("Generated base terrain {}x{} (cell {})", width, depth, cell_size);
        Ok(())
    }

    /// Generate the base terrain and stamp every hole onto it
    pub fn build_course(settings: &TerrainSettings, holes: &[Hole]) -> Result<Terrain, CourseError> {
        let mut terrain = Terrain::new();
        Self::generate_base(&mut terrain, settings.width, settings.depth, settings.cell_size)?;
        for hole in holes {
            Self::stamp_hole(&mut terrain, hole)?;
        }
        log::info!("Course built with {} holes", holes.len());
        Ok(terrain)
    }

    /// Stamp fairway, tee, green, bunkers, then water
    pub fn stamp_hole(terrain: &mut Terrain, hole: &Hole) -> Result<(), CourseError> {
        hole.validate()?;
        Self::stamp_fairway(terrain, hole)?;
        Self::stamp_tee(terrain, &hole.tee)?;
        Self::stamp_green(terrain, &hole.green)?;
        for bunker in &hole.bunkers {
            Self::stamp_bunker(terrain, bunker)?;
        }
        if let Some(water) = &hole.water {
            Self::stamp_water(terrain, water)?;
        }
        log::debug!(
            "Stamped hole {} (par {}, {} bunkers, water: {})",
            hole.number,
            hole.par,
            hole.bunkers.len(),
            hole.water.is_some()
        );
        Ok(())
    }

    /// Fairway strip with a rough border, following the control points
    pub fn stamp_fairway(terrain: &mut Terrain, hole: &Hole) -> Result<(), CourseError> {
        let mut grid = terrain.snapshot();
        let samples = fairway_samples(hole);

        for &(x, z, width) in &samples {
            let half = width * 0.5;
            paint_circle(
                terrain,
                &mut grid,
                x,
                z,
                half,
                SurfaceCategory::Fairway,
                HeightMode::Falloff(FAIRWAY_DEPRESSION),
            );
            paint_circle(
                terrain,
                &mut grid,
                x,
                z,
                half + ROUGH_BORDER,
                SurfaceCategory::Rough,
                HeightMode::Falloff(0.0),
            );
        }

        // The border pass overwrote the centerline at every later splat
        for &(x, z, width) in &samples {
            paint_circle(
                terrain,
                &mut grid,
                x,
                z,
                width * 0.5,
                SurfaceCategory::Fairway,
                HeightMode::Falloff(0.0),
            );
        }

        terrain.replace_grid(grid)?;
        Ok(())
    }

    pub fn stamp_tee(terrain: &mut Terrain, tee: &TeeDef) -> Result<(), CourseError> {
        let mut grid = terrain.snapshot();
        paint_circle(
            terrain,
            &mut grid,
            tee.position.x,
            tee.position.z,
            tee.pad_radius(),
            SurfaceCategory::Tee,
            HeightMode::Flatten(TEE_RAISE),
        );
        terrain.replace_grid(grid)?;
        Ok(())
    }

    /// Flattened green, then a planar tilt along `slope_dir`
    pub fn stamp_green(terrain: &mut Terrain, green: &GreenDef) -> Result<(), CourseError> {
        let mut grid = terrain.snapshot();
        let (cx, cz) = (green.center.x, green.center.z);
        paint_circle(
            terrain,
            &mut grid,
            cx,
            cz,
            green.radius,
            SurfaceCategory::Green,
            HeightMode::Flatten(0.0),
        );

        if green.slope_angle > MIN_GREEN_SLOPE {
            let rise = green.slope_angle.tan();
            let (sdx, sdz) = (green.slope_dir.cos() * rise, green.slope_dir.sin() * rise);

            let mut tilts = Vec::new();
            for_each_in_circle(&grid, cx, cz, green.radius, |x, z, dx, dz, _| {
                tilts.push((x, z, dx * sdx + dz * sdz));
            });
            for (x, z, delta) in tilts {
                let idx = grid.index(x, z);
                grid.heights[idx] += delta;
            }
        }

        terrain.replace_grid(grid)?;
        Ok(())
    }

    pub fn stamp_bunker(terrain: &mut Terrain, bunker: &Bunker) -> Result<(), CourseError> {
        let mut grid = terrain.snapshot();
        paint_circle(
            terrain,
            &mut grid,
            bunker.center.x,
            bunker.center.z,
            bunker.radius,
            SurfaceCategory::Sand,
            HeightMode::Flatten(-bunker.depth),
        );
        terrain.replace_grid(grid)?;
        Ok(())
    }

    pub fn stamp_water(terrain: &mut Terrain, water: &WaterHazard) -> Result<(), CourseError> {
        let mut grid = terrain.snapshot();
        paint_circle(
            terrain,
            &mut grid,
            water.center.x,
            water.center.z,
            water.radius,
            SurfaceCategory::Water,
            HeightMode::Flatten(-WATER_DEPTH),
        );
        terrain.replace_grid(grid)?;
        Ok(())
    }
}
