use rlfl_core::{CellFlags, Error, FlagGrid, Point, Result};

use crate::dijkstra::DistanceField;
use crate::pather::{FlagPather, MAP_DIRS};

/// A precomputed per-cell cost field used for greedy stepping.
///
/// Values are rounded distances to the nearest goal, or escape values for
/// safety maps. Impassable and unreachable cells hold [`PathMap::BLOCKED`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMap {
    width: i32,
    height: i32,
    costs: Vec<i32>,
}

impl PathMap {
    pub const BLOCKED: i32 = -1;

    /// Build a map from a scanned field. With `escape`, distances are negated
    /// so that larger values are safer.
    pub fn from_field(field: &DistanceField, escape: bool) -> Self {
        let costs = field
            .iter()
            .map(|(_, d)| match d {
                Some(d) if escape => (-d).round() as i32,
                Some(d) => d.round() as i32,
                None => Self::BLOCKED,
            })
            .collect();
        Self {
            width: field.width(),
            height: field.height(),
            costs,
        }
    }

    /// Distances to `origin` over `OPEN | WALK` cells.
    ///
    /// An impassable origin seeds nothing and every cell is blocked.
    pub fn towards(grid: &FlagGrid, origin: Point, diagonal_cost: f32) -> Result<Self> {
        grid.check(origin)?;
        let pather = map_pather(grid, CellFlags::OPEN | CellFlags::WALK, diagonal_cost);
        let mut field = origin_field(grid, origin);
        field.scan(&pather);
        Ok(Self::from_field(&field, false))
    }

    /// Escape values relative to `origin`: stepping uphill with
    /// [`step`](Self::step) and `away` flees the origin.
    pub fn safety(grid: &FlagGrid, origin: Point, diagonal_cost: f32) -> Result<Self> {
        grid.check(origin)?;
        let pather = map_pather(grid, CellFlags::OPEN | CellFlags::WALK, diagonal_cost);
        let mut field = origin_field(grid, origin);
        field.scan(&pather);
        field.remap_safety();
        field.scan(&pather);
        Ok(Self::from_field(&field, true))
    }

    /// Distances to the nearest passable cell carrying `goal_flag`.
    pub fn custom(grid: &FlagGrid, goal_flag: CellFlags, diagonal_cost: f32) -> Result<Self> {
        let passable = CellFlags::OPEN | CellFlags::WALK;
        Self::seeded(grid, passable, diagonal_cost, |f| {
            f.intersects(passable) && f.intersects(goal_flag)
        })
    }

    /// Distances to the nearest explorable cell lacking `known_flag`.
    ///
    /// Cells with `OPEN`, `WALK` or `PASS` are explorable.
    pub fn autoexplore(grid: &FlagGrid, known_flag: CellFlags, diagonal_cost: f32) -> Result<Self> {
        let passable = CellFlags::OPEN | CellFlags::WALK | CellFlags::PASS;
        Self::seeded(grid, passable, diagonal_cost, |f| {
            f.intersects(passable) && !f.intersects(known_flag)
        })
    }

    fn seeded(
        grid: &FlagGrid,
        passable: CellFlags,
        diagonal_cost: f32,
        is_goal: impl Fn(CellFlags) -> bool,
    ) -> Result<Self> {
        let mut field = DistanceField::new(grid.width(), grid.height());
        for (p, f) in grid.iter() {
            if is_goal(f) {
                field.add_goal(p, 0.0);
            }
        }
        if field.reached() == 0 {
            return Err(Error::Generic("path map has no goal cell"));
        }
        field.scan(&map_pather(grid, passable, diagonal_cost));
        Ok(Self::from_field(&field, false))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Stored value at `p`; [`BLOCKED`](Self::BLOCKED) when outside.
    pub fn get(&self, p: Point) -> i32 {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return Self::BLOCKED;
        }
        self.costs[p.y as usize * self.width as usize + p.x as usize]
    }

    /// Best neighbour of `p`: the lowest value, or the highest with `away`.
    ///
    /// Neighbours are examined N, S, W, E, NW, SW, NE, SE; blocked ones are
    /// skipped and the first strict improvement over the running best wins.
    /// The value of `p` itself plays no part, so a goal or a local extremum
    /// still yields a neighbour. `None` when every neighbour is blocked.
    pub fn step(&self, p: Point, away: bool) -> Option<Point> {
        let mut best = if away { i32::MIN } else { i32::MAX };
        let mut choice = None;
        for d in MAP_DIRS {
            let q = p + d;
            let v = self.get(q);
            if v == Self::BLOCKED {
                continue;
            }
            let better = if away { v > best } else { v < best };
            if better {
                best = v;
                choice = Some(q);
            }
        }
        choice
    }

    /// Follow [`step`](Self::step) while it strictly improves on the current
    /// cell, at most `limit` moves. The start is not included.
    pub fn walk(&self, from: Point, away: bool, limit: usize) -> Vec<Point> {
        let mut steps = Vec::new();
        let mut p = from;
        while steps.len() < limit {
            let Some(q) = self.step(p, away) else {
                break;
            };
            let (here, next) = (self.get(p), self.get(q));
            let improves = match here {
                Self::BLOCKED => true,
                _ if away => next > here,
                _ => next < here,
            };
            if !improves {
                break;
            }
            steps.push(q);
            p = q;
        }
        steps
    }
}

/// A field seeded at `origin` when it is passable for path maps.
fn origin_field(grid: &FlagGrid, origin: Point) -> DistanceField {
    let mut field = DistanceField::new(grid.width(), grid.height());
    if grid.has(origin, CellFlags::OPEN | CellFlags::WALK) {
        field.add_goal(origin, 0.0);
    }
    field
}

fn map_pather(grid: &FlagGrid, passable: CellFlags, diagonal_cost: f32) -> FlagPather<'_> {
    FlagPather {
        grid,
        passable,
        diagonal_cost,
        cut_corners: false,
        dirs: &MAP_DIRS,
    }
}
