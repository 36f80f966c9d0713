use rlfl_core::{Point, Result};
use rlfl_fov::{Circular, Diamond, Digital, FovAlgorithm, FovKind, Permissive, Restrictive, Shadow};

use crate::{GridId, Rlfl};

impl Rlfl {
    /// Compute the field of view from `origin`, replacing the previous one.
    ///
    /// `SEEN` and `LIT` are cleared first; visible cells get `SEEN | MEMO`.
    /// A `radius` of 0 covers the whole grid.
    pub fn fov(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        kind: FovKind,
        light_walls: bool,
    ) -> Result<()> {
        let max_radius = self.limits.max_radius;
        let grid = &mut self.entry_mut(id)?.grid;
        rlfl_fov::compute_fov(grid, origin, radius, kind, light_walls, max_radius)
    }

    /// Run `algorithm` on top of the current flags, without clearing them.
    pub fn fov_with(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        algorithm: &dyn FovAlgorithm,
        light_walls: bool,
    ) -> Result<()> {
        let max_radius = self.limits.max_radius;
        let grid = &mut self.entry_mut(id)?.grid;
        rlfl_fov::run(grid, origin, radius, algorithm, light_walls, max_radius)
    }

    pub fn fov_circular(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Circular, light_walls)
    }

    pub fn fov_diamond(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Diamond, light_walls)
    }

    pub fn fov_shadow(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Shadow, light_walls)
    }

    pub fn fov_digital(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Digital, light_walls)
    }

    pub fn fov_restrictive(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Restrictive, light_walls)
    }

    pub fn fov_permissive(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        light_walls: bool,
    ) -> Result<()> {
        self.fov_with(id, origin, radius, &Permissive, light_walls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlfl_core::{CellFlags, Error};

    #[test]
    fn test_fov_validation_order() {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(10, 10).unwrap();
        assert_eq!(
            rl.fov(id, Point::new(10, 0), 3, FovKind::Shadow, false),
            Err(Error::OutOfBounds(Point::new(10, 0)))
        );
        assert_eq!(
            rl.fov(id, Point::new(1, 1), 60, FovKind::Shadow, false),
            Err(Error::InvalidRadius(60))
        );
        rl.destroy_grid(id).unwrap();
        assert_eq!(
            rl.fov(id, Point::new(1, 1), 3, FovKind::Shadow, false),
            Err(Error::NoMap)
        );
    }

    #[test]
    fn test_entry_points_accumulate() {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(20, 5).unwrap();
        rl.fill_map(id, CellFlags::OPEN).unwrap();
        rl.fov_circular(id, Point::new(2, 2), 2, false).unwrap();
        rl.fov_permissive(id, Point::new(17, 2), 2, false).unwrap();
        assert!(rl.has_flag(id, Point::new(2, 2), CellFlags::SEEN).unwrap());
        assert!(rl.has_flag(id, Point::new(17, 2), CellFlags::SEEN).unwrap());

        rl.fov(id, Point::new(17, 2), 2, FovKind::Digital, false).unwrap();
        assert!(!rl.has_flag(id, Point::new(2, 2), CellFlags::SEEN).unwrap());
        assert!(rl.has_flag(id, Point::new(2, 2), CellFlags::MEMO).unwrap());
    }
}
