//! Axis-aligned playfield bounds and canonical cell enumeration.

use crate::point::Point;

/// A rectangular playfield of `width * height` cells.
///
/// `Grid` answers bounds questions and enumerates its cells in a fixed
/// row-major order. That ordering is the determinism anchor for anything
/// that picks a cell by index (food respawn draws an index into the
/// free-cell enumeration), so two calls on equal grids always yield the
/// same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// A `width * height` playfield. Zero-sized grids are inert but legal;
    /// the environment configs reject them before one is built.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A `size * size` playfield.
    pub const fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Playfield width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Playfield height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `point` lies on the playfield.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.width as i32
            && point.y < self.height as i32
    }

    /// All cells in row-major order: `(0,0), (1,0), ..., (w-1,h-1)`.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }
}
