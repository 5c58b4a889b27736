//! viewport culling & tile‑sprite streaming
//!
//! Terrain is never stored: the culler works out which grid cells the camera
//! can see and asks the resolver about each cell's centre. The bevy side keeps
//! a pool of tile sprites and only touches the stripes of cells that enter or
//! leave the view.

use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::biome::{world_to_cell, TerrainKind};
use crate::camera::CameraView;
use crate::components::TileSprite;
use crate::world::Overworld;
use crate::zones::{Terrain, TerrainQuery, WorldBounds};

/// Grid‑cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    /// world‑space centre of the cell
    #[inline]
    pub fn center(&self, cell_size: f32) -> Vec2 {
        Vec2::new(
            self.x as f32 * cell_size + cell_size * 0.5,
            self.y as f32 * cell_size + cell_size * 0.5,
        )
    }

    #[inline]
    pub fn origin(&self, cell_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * cell_size, self.y as f32 * cell_size)
    }
}

/// Inclusive rectangle of grid cells.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl CellRange {
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        (self.min_x..=self.max_x).contains(&c.x) && (self.min_y..=self.max_y).contains(&c.y)
    }

    pub fn len(&self) -> usize {
        let w = (self.max_x - self.min_x + 1).max(0) as usize;
        let h = (self.max_y - self.min_y + 1).max(0) as usize;
        w * h
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// row‑major walk
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Cell { x, y }))
    }
}

/// Cells touched by the camera rectangle once it is clamped to the world.
pub fn visible_cells(camera: &CameraView, bounds: &WorldBounds, cell_size: f32) -> CellRange {
    let left = camera.pos.x.max(0.0);
    let right = (camera.pos.x + camera.size.x).min(bounds.width);
    let top = camera.pos.y.max(0.0);
    let bottom = (camera.pos.y + camera.size.y).min(bounds.height);
    CellRange {
        min_x: world_to_cell(left, cell_size),
        max_x: world_to_cell(right, cell_size),
        min_y: world_to_cell(top, cell_size),
        max_y: world_to_cell(bottom, cell_size),
    }
}

/// Category of a cell, sampled at its centre so drawing agrees with
/// collision queries made inside the cell.
#[inline]
pub fn cell_kind(terrain: &impl TerrainQuery, cell: Cell) -> TerrainKind {
    let c = cell.center(terrain.cell_size());
    terrain.resolve(c.x, c.y)
}

/// Every drawable `(cell, kind)` in view.
pub fn visible_terrain(
    camera: &CameraView,
    bounds: &WorldBounds,
    terrain: &impl TerrainQuery,
) -> Vec<(Cell, TerrainKind)> {
    let range = visible_cells(camera, bounds, terrain.cell_size());
    range
        .cells()
        .map(|cell| (cell, cell_kind(terrain, cell)))
        .filter(|(_, kind)| kind.is_drawable())
        .collect()
}

/* ===========================================================
   bevy side: sprite pool
   =========================================================== */

/// range the sprites currently reflect
#[derive(Resource, Default)]
pub struct LastCells(pub Option<CellRange>);

#[derive(Resource, Default)]
pub struct TileSprites {
    live: HashMap<Cell, Entity>,
    free: Vec<Entity>,
}

impl TileSprites {
    pub fn live(&self) -> usize {
        self.live.len()
    }
}

fn tile_color(kind: TerrainKind) -> Color {
    match kind {
        TerrainKind::Tree => Color::WHITE,
        TerrainKind::Rock => Color::srgb_u8(0x66, 0x66, 0x66),
        TerrainKind::TallGrass => Color::srgb_u8(0x1a, 0x33, 0x00),
        TerrainKind::None => Color::NONE,
    }
}

/// trees & rocks sit a little inside their cell, grass fills it
fn tile_size(kind: TerrainKind, cell_size: f32) -> Vec2 {
    match kind {
        TerrainKind::TallGrass => Vec2::splat(cell_size),
        _ => Vec2::splat(cell_size - 8.0),
    }
}

fn tile_transform(cell: Cell, kind: TerrainKind, cell_size: f32) -> Transform {
    let c = cell.center(cell_size);
    let z = if kind == TerrainKind::TallGrass { 0.0 } else { 0.5 };
    Transform::from_xyz(c.x, -c.y, z)
}

#[inline]
fn ensure_sprite(commands: &mut Commands, pool: &mut TileSprites, terrain: &Terrain, cell: Cell) {
    if pool.live.contains_key(&cell) {
        return;
    }
    let kind = cell_kind(terrain, cell);
    if !kind.is_drawable() {
        return; // bare ground never gets a sprite
    }

    let cs = terrain.cell_size();
    let sprite = Sprite {
        color: tile_color(kind),
        custom_size: Some(tile_size(kind, cs)),
        ..default()
    };
    let transform = tile_transform(cell, kind, cs);
    let tag = TileSprite { x: cell.x, y: cell.y };

    let entity = if let Some(e) = pool.free.pop() {
        commands.entity(e).insert((Visibility::Visible, sprite, transform, tag));
        e
    } else {
        commands.spawn((sprite, transform, tag)).id()
    };
    pool.live.insert(cell, entity);
}

#[inline]
fn release_sprite(commands: &mut Commands, pool: &mut TileSprites, cell: Cell) {
    if let Some(e) = pool.live.remove(&cell) {
        commands.entity(e).insert(Visibility::Hidden);
        pool.free.push(e);
    }
}

/// Track the visible range after the camera moved.
pub fn update_active_cells_system(
    world: Res<Overworld>,
    terrain: Res<Terrain>,
    rect: Option<ResMut<CellRange>>,
    mut commands: Commands,
) {
    let new = visible_cells(&world.camera, &world.bounds, terrain.cell_size());
    match rect {
        Some(mut r) if *r != new => *r = new,
        None => commands.insert_resource(new),
        _ => {}
    }
}

/* ===========================================================
   stream_tiles_system – stripe differencing + pooling
   =========================================================== */
pub fn stream_tiles_system(
    mut commands: Commands,
    mut pool: ResMut<TileSprites>,
    terrain: Res<Terrain>,
    rect: Option<Res<CellRange>>,
    mut last: ResMut<LastCells>,
) {
    let Some(rect) = rect else { return };
    let new = *rect;
    if last.0 == Some(new) {
        return;
    }

    /* initial fill ------------------------------------------------------- */
    let Some(prev) = last.0 else {
        for cell in new.cells() {
            ensure_sprite(&mut commands, &mut pool, &terrain, cell);
        }
        last.0 = Some(new);
        return;
    };

    /* stripes entering view ---------------------------------------------- */
    for cell in new.cells().filter(|c| !prev.contains(*c)) {
        ensure_sprite(&mut commands, &mut pool, &terrain, cell);
    }

    /* stripes leaving view (re‑pool) ------------------------------------- */
    for cell in prev.cells().filter(|c| !new.contains(*c)) {
        release_sprite(&mut commands, &mut pool, cell);
    }

    last.0 = Some(new);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: WorldBounds = WorldBounds { width: 10_000.0, height: 10_000.0 };

    struct Checker;

    impl TerrainQuery for Checker {
        fn resolve(&self, x: f32, y: f32) -> TerrainKind {
            let (gx, gy) = (world_to_cell(x, 32.0), world_to_cell(y, 32.0));
            if (gx + gy) % 2 == 0 { TerrainKind::Rock } else { TerrainKind::None }
        }
        fn cell_size(&self) -> f32 {
            32.0
        }
    }

    #[test]
    fn range_from_camera() {
        let cam = CameraView { pos: Vec2::new(100.0, 64.0), size: Vec2::new(320.0, 160.0) };
        let r = visible_cells(&cam, &WORLD, 32.0);
        assert_eq!(r, CellRange { min_x: 3, max_x: 13, min_y: 2, max_y: 7 });
        assert_eq!(r.len(), 11 * 6);
    }

    #[test]
    fn range_is_clamped_to_world() {
        let cam = CameraView { pos: Vec2::new(-50.0, 9_900.0), size: Vec2::new(200.0, 300.0) };
        let r = visible_cells(&cam, &WORLD, 32.0);
        assert_eq!(r.min_x, 0);
        assert_eq!(r.min_y, 309);
        assert_eq!(r.max_y, 312); // 10000 / 32 = 312.5
    }

    #[test]
    fn terrain_sampled_at_cell_centre() {
        let cam = CameraView { pos: Vec2::ZERO, size: Vec2::new(64.0, 32.0) };
        let tiles = visible_terrain(&cam, &WORLD, &Checker);
        // cells (0..=2, 0..=1); rock where x + y is even
        let cells: Vec<Cell> = tiles.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            cells,
            vec![
                Cell { x: 0, y: 0 },
                Cell { x: 2, y: 0 },
                Cell { x: 1, y: 1 },
            ]
        );
        assert!(tiles.iter().all(|(_, k)| *k == TerrainKind::Rock));
    }

    #[test]
    fn cell_centre() {
        assert_eq!(Cell { x: 2, y: 3 }.center(32.0), Vec2::new(80.0, 112.0));
    }
}
