//! Integer cell coordinates.

use std::fmt;
use warren_core::Action;

/// A cell coordinate on a 2-D grid.
///
/// The origin is the top-left corner: x grows rightwards, y grows
/// downwards. Coordinates are signed so that one step past any edge is
/// representable; whether such a point is on the playfield is a
/// [`Grid`](crate::Grid) question, not a `Point` one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Column, 0 at the left edge.
    pub x: i32,
    /// Row, 0 at the top edge.
    pub y: i32,
}

impl Point {
    /// Construct a point from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `action`'s direction.
    pub fn step(self, action: Action) -> Point {
        let (dx, dy) = action.delta();
        self.offset(dx, dy)
    }

    /// The cell displaced by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
