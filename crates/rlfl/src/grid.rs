use rlfl_core::{CellFlags, Error, FlagGrid, Point, Result, SlotTable};

use crate::{GridEntry, GridId, Rlfl, warn_full};

impl Rlfl {
    /// Create a `width × height` grid with every cell cleared.
    ///
    /// Fails with [`Error::SizeError`] for empty dimensions or dimensions
    /// reaching the configured ceiling.
    pub fn new_grid(&mut self, width: i32, height: i32) -> Result<GridId> {
        if width <= 0
            || height <= 0
            || width >= self.limits.max_width
            || height >= self.limits.max_height
        {
            return Err(Error::SizeError { width, height });
        }
        let entry = GridEntry {
            grid: FlagGrid::new(width, height),
            pathmaps: SlotTable::new("path map", self.limits.max_pathmaps),
        };
        let id = GridId(warn_full(self.grids.insert(entry))?);
        log::debug!("created {width}x{height} grid {}", id.index());
        Ok(id)
    }

    /// Destroy a grid together with its path maps.
    pub fn destroy_grid(&mut self, id: GridId) -> Result<()> {
        self.grids.remove(id.0).ok_or(Error::NoMap)?;
        log::debug!("destroyed grid {}", id.index());
        Ok(())
    }

    /// Destroy every grid.
    pub fn wipe_all(&mut self) {
        let n = self.grids.len();
        self.grids.clear();
        log::debug!("wiped {n} grids");
    }

    /// Whether `id` refers to a live grid.
    pub fn map_valid(&self, id: GridId) -> bool {
        self.grids.contains(id.0)
    }

    /// Whether `p` is a cell of a live grid.
    pub fn cell_valid(&self, id: GridId, p: Point) -> bool {
        self.entry(id).is_ok_and(|e| e.grid.contains(p))
    }

    pub fn map_size(&self, id: GridId) -> Result<(i32, i32)> {
        let g = &self.entry(id)?.grid;
        Ok((g.width(), g.height()))
    }

    /// Read access to the grid.
    pub fn grid(&self, id: GridId) -> Result<&FlagGrid> {
        Ok(&self.entry(id)?.grid)
    }

    /// Write access to the grid, for bulk terrain setup.
    pub fn grid_mut(&mut self, id: GridId) -> Result<&mut FlagGrid> {
        Ok(&mut self.entry_mut(id)?.grid)
    }

    fn cell_mut(&mut self, id: GridId, p: Point) -> Result<&mut FlagGrid> {
        let grid = &mut self.entry_mut(id)?.grid;
        grid.check(p)?;
        Ok(grid)
    }

    pub fn set_flag(&mut self, id: GridId, p: Point, flags: CellFlags) -> Result<()> {
        self.cell_mut(id, p)?.insert(p, flags);
        Ok(())
    }

    pub fn clear_flag(&mut self, id: GridId, p: Point, flags: CellFlags) -> Result<()> {
        self.cell_mut(id, p)?.remove(p, flags);
        Ok(())
    }

    /// Whether the cell has any bit of `flags`.
    pub fn has_flag(&self, id: GridId, p: Point, flags: CellFlags) -> Result<bool> {
        let grid = &self.entry(id)?.grid;
        grid.check(p)?;
        Ok(grid.has(p, flags))
    }

    pub fn get_flags(&self, id: GridId, p: Point) -> Result<CellFlags> {
        let grid = &self.entry(id)?.grid;
        grid.check(p)?;
        Ok(grid.at(p))
    }

    /// Set `flags` on every cell.
    pub fn fill_map(&mut self, id: GridId, flags: CellFlags) -> Result<()> {
        self.entry_mut(id)?.grid.fill(flags);
        Ok(())
    }

    /// Clear `flags` from every cell.
    pub fn clear_map(&mut self, id: GridId, flags: CellFlags) -> Result<()> {
        self.entry_mut(id)?.grid.clear(flags);
        Ok(())
    }

    /// Coordinates of the cell at row-major `index`.
    pub fn translate_xy(&self, id: GridId, index: usize) -> Result<Point> {
        let grid = &self.entry(id)?.grid;
        grid.point(index).ok_or(Error::Generic("cell index is outside the grid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlfl_core::Limits;

    #[test]
    fn test_grid_lifecycle() {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(10, 8).unwrap();
        assert!(rl.map_valid(id));
        assert_eq!(rl.map_size(id), Ok((10, 8)));
        rl.destroy_grid(id).unwrap();
        assert!(!rl.map_valid(id));
        assert_eq!(rl.map_size(id), Err(Error::NoMap));
        assert_eq!(rl.destroy_grid(id), Err(Error::NoMap));

        let reused = rl.new_grid(3, 3).unwrap();
        assert_eq!(reused.index(), id.index());
        assert!(!rl.map_valid(id), "old handle stays stale");
    }

    #[test]
    fn test_size_limits() {
        let mut rl = Rlfl::new();
        assert!(matches!(rl.new_grid(0, 5), Err(Error::SizeError { .. })));
        assert!(matches!(rl.new_grid(5000, 5), Err(Error::SizeError { .. })));
        assert!(rl.new_grid(4999, 1).is_ok());
    }

    #[test]
    fn test_registry_full() {
        let mut rl = Rlfl::with_limits(Limits {
            max_grids: 2,
            ..Limits::default()
        });
        rl.new_grid(2, 2).unwrap();
        let b = rl.new_grid(2, 2).unwrap();
        assert_eq!(rl.new_grid(2, 2), Err(Error::RegistryFull("grid")));
        rl.destroy_grid(b).unwrap();
        assert!(rl.new_grid(2, 2).is_ok());
        rl.wipe_all();
        assert!(rl.new_grid(2, 2).is_ok());
    }

    #[test]
    fn test_flags() {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(4, 4).unwrap();
        let p = Point::new(1, 2);
        rl.set_flag(id, p, CellFlags::OPEN | CellFlags::ROOM).unwrap();
        assert_eq!(rl.has_flag(id, p, CellFlags::ROOM), Ok(true));
        rl.clear_flag(id, p, CellFlags::ROOM).unwrap();
        assert_eq!(rl.get_flags(id, p), Ok(CellFlags::OPEN));
        let outside = Point::new(4, 0);
        assert_eq!(
            rl.set_flag(id, outside, CellFlags::OPEN),
            Err(Error::OutOfBounds(outside))
        );
        assert!(!rl.cell_valid(id, outside));

        rl.fill_map(id, CellFlags::LIT).unwrap();
        assert_eq!(rl.grid(id).unwrap().count(CellFlags::LIT), 16);
        rl.clear_map(id, CellFlags::LIT).unwrap();
        assert_eq!(rl.grid(id).unwrap().count(CellFlags::LIT), 0);
    }

    #[test]
    fn test_translate_xy() {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(5, 3).unwrap();
        assert_eq!(rl.translate_xy(id, 7), Ok(Point::new(2, 1)));
        assert!(rl.translate_xy(id, 15).is_err());
    }
}
