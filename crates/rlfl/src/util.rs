use rand::{Rng, RngExt};
use rlfl_core::{CellFlags, Error, FlagGrid, Point, ProjectFlags, Result, distance};
use rlfl_paths::trace_line;

use crate::{GridId, Rlfl};

/// Attempts made by [`Rlfl::scatter`] before giving up.
const SCATTER_TRIES: usize = 5000;

fn line_of_sight(grid: &FlagGrid, a: Point, b: Point) -> bool {
    a == b || trace_line(grid, a, b, u32::MAX, ProjectFlags::NONE).last() == Some(&b)
}

impl Rlfl {
    /// Whether a projection line from `a` reaches `b`. The end cell itself
    /// may be a wall.
    pub fn los(&self, id: GridId, a: Point, b: Point) -> Result<bool> {
        let grid = &self.entry(id)?.grid;
        grid.check(a)?;
        grid.check(b)?;
        Ok(line_of_sight(grid, a, b))
    }

    /// A random cell near `origin`.
    ///
    /// Candidates are drawn within `range` on each axis and must lie inside
    /// the grid, within [`distance`] `range` when `range > 1`, in line of
    /// sight when `need_los` is set, and carry some bit of `flag` unless it
    /// is empty.
    pub fn scatter(
        &self,
        id: GridId,
        origin: Point,
        range: u32,
        flag: CellFlags,
        need_los: bool,
        rng: &mut impl Rng,
    ) -> Result<Point> {
        let grid = &self.entry(id)?.grid;
        grid.check(origin)?;
        // Offsets past the larger grid side can never land inside it.
        let span = grid.width().max(grid.height()) as u32;
        let r = range.min(span) as i32;
        for _ in 0..SCATTER_TRIES {
            let p = origin.shift(rng.random_range(-r..=r), rng.random_range(-r..=r));
            if !grid.contains(p) {
                continue;
            }
            if range > 1 && distance(origin, p) as u32 > range {
                continue;
            }
            if need_los && !line_of_sight(grid, origin, p) {
                continue;
            }
            if !flag.is_empty() && !grid.has(p, flag) {
                continue;
            }
            return Ok(p);
        }
        log::warn!("no scatter point within {range} of {origin} after {SCATTER_TRIES} tries");
        Err(Error::Generic("no scatter point found"))
    }
}
