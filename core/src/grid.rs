//! Pixel and tile geometry shared by the world, systems and adapters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Width of the arena window measured in pixels.
pub const SCREEN_WIDTH: u32 = 800;

/// Height of the arena window measured in pixels.
pub const SCREEN_HEIGHT: u32 = 600;

/// Side length of a single square tile measured in pixels.
pub const TILE_SIZE: u32 = 64;

/// Location of a single tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Inclusive rectangle of tiles, used to confine wandering enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    min: TileCoord,
    max: TileCoord,
}

impl TileRect {
    /// Creates a rectangle spanning the inclusive column and row ranges.
    ///
    /// Bounds provided in reverse order are swapped so the rectangle is never empty.
    #[must_use]
    pub fn new(min_column: u32, max_column: u32, min_row: u32, max_row: u32) -> Self {
        Self {
            min: TileCoord::new(min_column.min(max_column), min_row.min(max_row)),
            max: TileCoord::new(min_column.max(max_column), min_row.max(max_row)),
        }
    }

    /// Upper-left tile of the rectangle.
    #[must_use]
    pub const fn min(&self) -> TileCoord {
        self.min
    }

    /// Lower-right tile of the rectangle.
    #[must_use]
    pub const fn max(&self) -> TileCoord {
        self.max
    }

    /// Reports whether the tile lies inside the rectangle, bounds included.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        tile.column >= self.min.column
            && tile.column <= self.max.column
            && tile.row >= self.min.row
            && tile.row <= self.max.row
    }
}

/// Describes the discrete tile layout laid over the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
}

impl TileGrid {
    /// Creates a new tile grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_length: f32) -> Self {
        Self {
            columns,
            rows,
            tile_length,
        }
    }

    /// Grid covering the arena window with whole tiles only.
    ///
    /// Partial tiles along the right and bottom edges are not part of the grid.
    #[must_use]
    pub const fn arena() -> Self {
        Self::new(
            SCREEN_WIDTH / TILE_SIZE,
            SCREEN_HEIGHT / TILE_SIZE,
            TILE_SIZE as f32,
        )
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile in pixels.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Reports whether the tile lies within the grid bounds.
    #[must_use]
    pub const fn contains(&self, tile: TileCoord) -> bool {
        tile.column < self.columns && tile.row < self.rows
    }

    /// Pixel position of the center of the provided tile.
    #[must_use]
    pub fn tile_center(&self, tile: TileCoord) -> Vec2 {
        let half = self.tile_length / 2.0;
        Vec2::new(
            tile.column as f32 * self.tile_length + half,
            tile.row as f32 * self.tile_length + half,
        )
    }

    /// Raw tile indices containing the pixel, without any bounds check.
    #[must_use]
    pub fn tile_indices(&self, point: Vec2) -> (i32, i32) {
        if self.tile_length <= f32::EPSILON {
            return (i32::MIN, i32::MIN);
        }

        (
            (point.x / self.tile_length).floor() as i32,
            (point.y / self.tile_length).floor() as i32,
        )
    }

    /// Tile containing the pixel, or `None` when the pixel falls outside the grid.
    #[must_use]
    pub fn tile_at(&self, point: Vec2) -> Option<TileCoord> {
        let (column, row) = self.tile_indices(point);
        let column = u32::try_from(column).ok()?;
        let row = u32::try_from(row).ok()?;
        let tile = TileCoord::new(column, row);
        self.contains(tile).then_some(tile)
    }
}

/// Converts a tile into the pixel position of its center using [`TILE_SIZE`].
#[must_use]
pub fn tile_to_pixel_center(tile: TileCoord) -> Vec2 {
    TileGrid::arena().tile_center(tile)
}

/// Converts a pixel position into tile indices by floor division with [`TILE_SIZE`].
///
/// The result is not bounds-checked; callers compare it against the grid.
#[must_use]
pub fn pixel_to_tile(point: Vec2) -> (i32, i32) {
    TileGrid::arena().tile_indices(point)
}

/// Axis-aligned rectangle expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    min: Vec2,
    max: Vec2,
}

impl PixelRect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Creates a rectangle of the provided size centered on `center`.
    #[must_use]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        Self::from_origin_and_size(center - size * 0.5, size)
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Lower-right corner of the rectangle.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Width and height of the rectangle.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Reports whether the two rectangles share interior area.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Reports whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges exclusive.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_grid_covers_whole_tiles_only() {
        let grid = TileGrid::arena();
        assert_eq!(grid.columns(), 12);
        assert_eq!(grid.rows(), 9);
    }

    #[test]
    fn tile_center_offsets_by_half_a_tile() {
        assert_eq!(
            tile_to_pixel_center(TileCoord::new(3, 2)),
            Vec2::new(224.0, 160.0)
        );
        assert_eq!(
            tile_to_pixel_center(TileCoord::new(0, 0)),
            Vec2::new(32.0, 32.0)
        );
    }

    #[test]
    fn pixel_to_tile_floors_towards_negative_infinity() {
        assert_eq!(pixel_to_tile(Vec2::new(799.0, 599.0)), (12, 9));
        assert_eq!(pixel_to_tile(Vec2::new(63.9, 64.0)), (0, 1));
        assert_eq!(pixel_to_tile(Vec2::new(-1.0, 10.0)), (-1, 0));
    }

    #[test]
    fn tile_at_rejects_partial_edge_tiles() {
        let grid = TileGrid::arena();
        assert_eq!(grid.tile_at(Vec2::new(799.0, 599.0)), None);
        assert_eq!(grid.tile_at(Vec2::new(-0.5, 20.0)), None);
        assert_eq!(
            grid.tile_at(Vec2::new(767.0, 575.0)),
            Some(TileCoord::new(11, 8))
        );
    }

    #[test]
    fn tile_rect_bounds_are_inclusive() {
        let region = TileRect::new(1, 3, 1, 3);
        assert!(region.contains(TileCoord::new(1, 1)));
        assert!(region.contains(TileCoord::new(3, 3)));
        assert!(!region.contains(TileCoord::new(4, 2)));
        assert!(!region.contains(TileCoord::new(0, 2)));
    }

    #[test]
    fn tile_rect_normalises_reversed_bounds() {
        let region = TileRect::new(5, 2, 7, 4);
        assert_eq!(region.min(), TileCoord::new(2, 4));
        assert_eq!(region.max(), TileCoord::new(5, 7));
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let left = PixelRect::centered(Vec2::new(24.0, 24.0), Vec2::splat(48.0));
        let right = PixelRect::centered(Vec2::new(72.0, 24.0), Vec2::splat(48.0));
        assert!(!left.overlaps(&right));

        let nudged = PixelRect::centered(Vec2::new(71.5, 24.0), Vec2::splat(48.0));
        assert!(left.overlaps(&nudged));
        assert!(nudged.overlaps(&left));
    }

    #[test]
    fn contains_is_half_open() {
        let rect = PixelRect::from_origin_and_size(Vec2::new(300.0, 270.0), Vec2::new(200.0, 60.0));
        assert!(rect.contains(Vec2::new(300.0, 270.0)));
        assert!(rect.contains(Vec2::new(499.9, 329.9)));
        assert!(!rect.contains(Vec2::new(500.0, 300.0)));
        assert!(!rect.contains(Vec2::new(400.0, 330.0)));
    }
}
