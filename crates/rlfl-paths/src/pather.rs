use rlfl_core::{CellFlags, FlagGrid, Point, distance};

use crate::traits::{AstarPather, Pather, WeightedPather};

/// Neighbor order used by A*: N, W, E, S, then the diagonals NW, NE, SW, SE.
pub const ASTAR_DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

/// Neighbor order used by path maps: N, S, W, E, NW, SW, NE, SE.
pub const MAP_DIRS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, -1),
    Point::new(-1, 1),
    Point::new(1, -1),
    Point::new(1, 1),
];

/// A [`Pather`] over a [`FlagGrid`]: a cell can be entered when it carries
/// any bit of `passable`. Diagonal moves cost `1 + diagonal_cost`.
#[derive(Clone, Copy, Debug)]
pub struct FlagPather<'a> {
    pub grid: &'a FlagGrid,
    pub passable: CellFlags,
    pub diagonal_cost: f32,
    /// Allow diagonal moves between two blocked orthogonal cells.
    pub cut_corners: bool,
    pub dirs: &'static [Point; 8],
}

impl<'a> FlagPather<'a> {
    /// Walkable cells are `OPEN` or `WALK`; corners may be cut.
    pub fn walker(grid: &'a FlagGrid, diagonal_cost: f32) -> Self {
        Self {
            grid,
            passable: CellFlags::OPEN | CellFlags::WALK,
            diagonal_cost,
            cut_corners: true,
            dirs: &ASTAR_DIRS,
        }
    }

    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.grid.has(p, self.passable)
    }
}

impl Pather for FlagPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for &d in self.dirs {
            let q = p + d;
            if !self.passable(q) {
                continue;
            }
            if !self.cut_corners
                && d.x != 0
                && d.y != 0
                && !(self.passable(p.shift(d.x, 0)) && self.passable(p.shift(0, d.y)))
            {
                continue;
            }
            buf.push(q);
        }
    }
}

impl WeightedPather for FlagPather<'_> {
    fn cost(&self, from: Point, to: Point) -> f32 {
        if from.is_diagonal_to(to) {
            1.0 + self.diagonal_cost
        } else {
            1.0
        }
    }
}

impl AstarPather for FlagPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        distance(from, to)
    }
}
