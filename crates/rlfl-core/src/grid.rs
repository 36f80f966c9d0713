//! A rectangular grid of [`CellFlags`].
//!
//! [`FlagGrid`] is the map representation every engine of the library reads
//! and writes. Cells are stored row-major; out-of-range reads report an empty
//! mask instead of panicking so algorithms can probe past the edges freely.

use crate::error::{Error, Result};
use crate::flags::CellFlags;
use crate::geom::{Point, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagGrid {
    width: i32,
    height: i32,
    cells: Vec<CellFlags>,
}

impl FlagGrid {
    /// Create a grid with every cell cleared. Negative sizes are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![CellFlags::NONE; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the bounding range of the grid.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Fails with [`Error::OutOfBounds`] when `p` is outside the grid.
    #[inline]
    pub fn check(&self, p: Point) -> Result<()> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(Error::OutOfBounds(p))
        }
    }

    /// Row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Coordinate of a row-major index, or `None` past the last cell.
    #[inline]
    pub fn point(&self, idx: usize) -> Option<Point> {
        if idx >= self.cells.len() {
            return None;
        }
        let w = self.width as usize;
        Some(Point::new((idx % w) as i32, (idx / w) as i32))
    }

    /// Flags at `p`; empty outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> CellFlags {
        match self.index(p) {
            Some(i) => self.cells[i],
            None => CellFlags::NONE,
        }
    }

    /// Whether the cell has at least one bit of `flags`. False outside the grid.
    #[inline]
    pub fn has(&self, p: Point, flags: CellFlags) -> bool {
        self.at(p).intersects(flags)
    }

    /// Whether light passes through `p`. False outside the grid.
    #[inline]
    pub fn is_open(&self, p: Point) -> bool {
        self.has(p, CellFlags::OPEN)
    }

    /// OR `flags` into the cell. Does nothing outside the grid.
    #[inline]
    pub fn insert(&mut self, p: Point, flags: CellFlags) {
        if let Some(i) = self.index(p) {
            self.cells[i] |= flags;
        }
    }

    /// Clear `flags` from the cell. Does nothing outside the grid.
    #[inline]
    pub fn remove(&mut self, p: Point, flags: CellFlags) {
        if let Some(i) = self.index(p) {
            self.cells[i] &= !flags;
        }
    }

    /// OR `flags` into every cell.
    pub fn fill(&mut self, flags: CellFlags) {
        for c in &mut self.cells {
            *c |= flags;
        }
    }

    /// Clear `flags` from every cell.
    pub fn clear(&mut self, flags: CellFlags) {
        let keep = !flags;
        for c in &mut self.cells {
            *c &= keep;
        }
    }

    /// Number of cells having at least one bit of `flags`.
    pub fn count(&self, flags: CellFlags) -> usize {
        self.cells.iter().filter(|c| c.intersects(flags)).count()
    }

    /// Iterate over `(point, flags)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellFlags)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Build a grid from an ASCII picture: `#` is a wall, anything else is
    /// open and walkable floor.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.insert(
                        Point::new(x as i32, y as i32),
                        CellFlags::OPEN | CellFlags::WALK,
                    );
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_cleared() {
        let g = FlagGrid::new(4, 3);
        assert_eq!(g.bounds(), Range::new(0, 0, 4, 3));
        assert_eq!(g.count(CellFlags::MASK), 0);
    }

    #[test]
    fn test_index_math_on_wide_grid() {
        let g = FlagGrid::new(40_000, 3);
        let last = Point::new(39_999, 2);
        assert_eq!(g.index(last), Some(119_999));
        assert_eq!(g.point(119_999), Some(last));
        assert_eq!(g.point(120_000), None);
    }

    #[test]
    fn test_insert_remove_and_has() {
        let mut g = FlagGrid::new(5, 5);
        let p = Point::new(2, 3);
        g.insert(p, CellFlags::OPEN | CellFlags::WALK);
        assert!(g.has(p, CellFlags::WALK));
        assert!(g.is_open(p));
        g.remove(p, CellFlags::OPEN);
        assert!(!g.is_open(p));
        assert_eq!(g.at(p), CellFlags::WALK);
    }

    #[test]
    fn test_out_of_bounds_access_is_harmless() {
        let mut g = FlagGrid::new(3, 3);
        let outside = Point::new(3, 0);
        g.insert(outside, CellFlags::OPEN);
        assert_eq!(g.at(outside), CellFlags::NONE);
        assert!(!g.has(Point::new(-1, 1), CellFlags::MASK));
        assert_eq!(g.check(outside), Err(Error::OutOfBounds(outside)));
        assert_eq!(g.count(CellFlags::OPEN), 0);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut g = FlagGrid::new(4, 4);
        g.fill(CellFlags::OPEN | CellFlags::SEEN);
        assert_eq!(g.count(CellFlags::SEEN), 16);
        g.clear(CellFlags::SEEN);
        assert_eq!(g.count(CellFlags::SEEN), 0);
        assert_eq!(g.count(CellFlags::OPEN), 16);
    }

    #[test]
    fn test_index_point_translation() {
        let g = FlagGrid::new(7, 3);
        let p = Point::new(5, 2);
        let idx = g.index(p).unwrap();
        assert_eq!(idx, 19);
        assert_eq!(g.point(idx), Some(p));
        assert_eq!(g.point(21), None);
    }

    #[test]
    fn test_from_ascii() {
        let g = FlagGrid::from_ascii(&["#.#", "..."]);
        assert_eq!((g.width(), g.height()), (3, 2));
        assert!(!g.is_open(Point::new(0, 0)));
        assert!(g.is_open(Point::new(1, 0)));
        assert_eq!(g.count(CellFlags::WALK), 4);
    }
}
