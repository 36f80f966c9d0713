use rlfl_core::{CellFlags, Error, FlagGrid, Point, ProjectFlags, Result};

use crate::astar::astar_path;
use crate::line::trace_line;
use crate::pather::FlagPather;

/// How a single path is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathKind {
    /// Straight projection line, stopping at obstacles.
    Basic,
    /// Shortest walkable route.
    AStar,
}

impl PathKind {
    /// Small integer used by foreign bindings.
    pub const fn code(self) -> u32 {
        match self {
            PathKind::Basic => 1,
            PathKind::AStar => 2,
        }
    }
}

impl TryFrom<u32> for PathKind {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        match code {
            1 => Ok(PathKind::Basic),
            2 => Ok(PathKind::AStar),
            _ => Err(Error::Generic("unknown path algorithm")),
        }
    }
}

/// A computed path. Steps exclude the origin and end at the destination, or
/// at the cell that stopped a basic trace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    origin: Point,
    dest: Point,
    kind: PathKind,
    steps: Vec<Point>,
}

impl Path {
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn dest(&self) -> Point {
        self.dest
    }

    #[inline]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The `i`-th step, counting from the cell next to the origin.
    pub fn step(&self, i: usize) -> Option<Point> {
        self.steps.get(i).copied()
    }

    pub fn steps(&self) -> &[Point] {
        &self.steps
    }
}

/// Options for [`find_path`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathOptions {
    pub kind: PathKind,
    /// Maximum travelled distance of a basic trace.
    pub range: u32,
    /// Projection flags steering a basic trace.
    pub flags: ProjectFlags,
    /// Surcharge added to diagonal moves of an A* search.
    pub diagonal_cost: f32,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            kind: PathKind::AStar,
            range: 60,
            flags: ProjectFlags::NONE,
            diagonal_cost: 0.0,
        }
    }
}

/// Compute a path from `origin` to `dest` and mark its steps with `PATH`.
///
/// `PATH` is cleared from the whole grid first, but only once a path exists:
/// on error the grid is left untouched.
pub fn find_path(
    grid: &mut FlagGrid,
    origin: Point,
    dest: Point,
    opts: PathOptions,
) -> Result<Path> {
    grid.check(origin)?;
    grid.check(dest)?;
    let steps = if origin == dest {
        Vec::new()
    } else {
        match opts.kind {
            PathKind::Basic => trace_line(grid, origin, dest, opts.range, opts.flags),
            PathKind::AStar => {
                let pather = FlagPather::walker(grid, opts.diagonal_cost);
                let mut full = astar_path(&pather, grid.bounds(), origin, dest)
                    .ok_or(Error::NoPathFound)?;
                full.remove(0);
                full
            }
        }
    };

    grid.clear(CellFlags::PATH);
    for &p in &steps {
        grid.insert(p, CellFlags::PATH);
    }
    log::trace!("{:?} path {origin} -> {dest}: {} steps", opts.kind, steps.len());
    Ok(Path {
        origin,
        dest,
        kind: opts.kind,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn astar(dcost: f32) -> PathOptions {
        PathOptions {
            diagonal_cost: dcost,
            ..PathOptions::default()
        }
    }

    #[test]
    fn test_kind_codes() {
        for kind in [PathKind::Basic, PathKind::AStar] {
            assert_eq!(PathKind::try_from(kind.code()), Ok(kind));
        }
        assert!(PathKind::try_from(0).is_err());
    }

    #[test]
    fn test_step_order_starts_next_to_origin() {
        let mut g = FlagGrid::from_ascii(&["..........", "..........", ".........."]);
        let o = Point::new(1, 1);
        let d = Point::new(8, 1);
        let path = find_path(&mut g, o, d, astar(0.0)).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.step(0), Some(Point::new(2, 1)));
        assert_eq!(path.step(6), Some(d));
        assert_eq!(path.step(7), None);
        assert!(!g.has(o, CellFlags::PATH));
        assert_eq!(g.count(CellFlags::PATH), 7);
    }

    #[test]
    fn test_new_path_clears_old_marks() {
        let mut g = FlagGrid::from_ascii(&["......", "......"]);
        find_path(&mut g, Point::new(0, 0), Point::new(5, 0), astar(0.0)).unwrap();
        find_path(&mut g, Point::new(0, 1), Point::new(2, 1), astar(0.0)).unwrap();
        assert_eq!(g.count(CellFlags::PATH), 2);
        assert!(!g.has(Point::new(5, 0), CellFlags::PATH));
    }

    #[test]
    fn test_walled_off_destination() {
        let mut g = FlagGrid::from_ascii(&[
            ".....", //
            "..###",
            "..#..",
            "..###",
        ]);
        g.insert(Point::new(0, 0), CellFlags::PATH);
        let err = find_path(&mut g, Point::new(0, 0), Point::new(3, 2), astar(0.0));
        assert_eq!(err, Err(Error::NoPathFound));
        assert!(g.has(Point::new(0, 0), CellFlags::PATH), "grid untouched on error");
    }

    #[test]
    fn test_validation() {
        let mut g = FlagGrid::from_ascii(&["...."]);
        let o = Point::new(0, 0);
        assert_eq!(
            find_path(&mut g, o, Point::new(4, 0), astar(0.0)),
            Err(Error::OutOfBounds(Point::new(4, 0)))
        );
        let same = find_path(&mut g, o, o, astar(0.0)).unwrap();
        assert!(same.is_empty());
    }

    #[test]
    fn test_basic_stops_at_wall() {
        let mut g = FlagGrid::from_ascii(&["...#.."]);
        let opts = PathOptions {
            kind: PathKind::Basic,
            ..PathOptions::default()
        };
        let path = find_path(&mut g, Point::new(0, 0), Point::new(5, 0), opts).unwrap();
        assert_eq!(path.steps(), &[Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]);
        assert_eq!(path.kind(), PathKind::Basic);
    }
}
