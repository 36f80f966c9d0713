use rlfl_core::{Error, Point, ProjectFlags, Result};
use rlfl_project::{ProjectOptions, Projection, project};

use crate::{GridId, ProjectionId, Rlfl, warn_full};

impl Rlfl {
    /// Project from `origin` toward `target` and store the touched cells.
    ///
    /// `range` defaults to the configured maximum.
    pub fn project(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        radius: u32,
        range: Option<u32>,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions {
            radius,
            range: self.range_or_max(range),
            flags,
        };
        self.project_with(id, origin, target, opts)
    }

    /// Store a projection with explicit options.
    pub fn project_with(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        opts: ProjectOptions,
    ) -> Result<ProjectionId> {
        let grid = &self.entry(id)?.grid;
        grid.check(origin)?;
        grid.check(target)?;
        if opts.radius >= self.limits.max_radius {
            return Err(Error::InvalidRadius(opts.radius));
        }
        warn_full(self.projections.reserve())?;
        let projection = project(grid, origin, target, opts, self.limits.max_radius)?;
        let len = projection.len();
        let pid = ProjectionId(self.projections.insert(projection)?);
        log::debug!("created projection {} with {len} cells", pid.index());
        Ok(pid)
    }

    pub fn project_bolt(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        range: Option<u32>,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::bolt(self.range_or_max(range), flags);
        self.project_with(id, origin, target, opts)
    }

    pub fn project_beam(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        range: Option<u32>,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::beam(self.range_or_max(range), flags);
        self.project_with(id, origin, target, opts)
    }

    pub fn project_ball(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        radius: u32,
        range: Option<u32>,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::ball(radius, self.range_or_max(range), flags);
        self.project_with(id, origin, target, opts)
    }

    pub fn project_cone(
        &mut self,
        id: GridId,
        origin: Point,
        target: Point,
        radius: u32,
        range: Option<u32>,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::cone(radius, self.range_or_max(range), flags);
        self.project_with(id, origin, target, opts)
    }

    /// An expanding wave centered on `origin`.
    pub fn project_wave(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::ball(radius, self.limits.max_range, flags | ProjectFlags::WAVE);
        self.project_with(id, origin, origin, opts)
    }

    /// A cloud filling the area around `origin`.
    pub fn project_cloud(
        &mut self,
        id: GridId,
        origin: Point,
        radius: u32,
        flags: ProjectFlags,
    ) -> Result<ProjectionId> {
        let opts = ProjectOptions::ball(radius, self.limits.max_range, flags);
        self.project_with(id, origin, origin, opts)
    }

    pub fn projection(&self, pid: ProjectionId) -> Result<&Projection> {
        self.projections.get(pid.0).ok_or(Error::NoProjection)
    }

    pub fn project_size(&self, pid: ProjectionId) -> Result<usize> {
        Ok(self.projection(pid)?.len())
    }

    /// Cell `i` of the projection; cell 0 is the origin.
    pub fn project_step(&self, pid: ProjectionId, i: usize) -> Result<Point> {
        self.projection(pid)?
            .step(i)
            .ok_or(Error::Generic("projection step index out of range"))
    }

    /// Start index of every ring of the projection.
    pub fn project_rings(&self, pid: ProjectionId) -> Result<&[usize]> {
        Ok(self.projection(pid)?.rings())
    }

    pub fn delete_projection(&mut self, pid: ProjectionId) -> Result<()> {
        self.projections.remove(pid.0).ok_or(Error::NoProjection)?;
        log::debug!("deleted projection {}", pid.index());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlfl_core::{CellFlags, Limits};

    fn open_rl(w: i32, h: i32) -> (Rlfl, GridId) {
        let mut rl = Rlfl::new();
        let id = rl.new_grid(w, h).unwrap();
        rl.fill_map(id, CellFlags::OPEN | CellFlags::WALK).unwrap();
        (rl, id)
    }

    #[test]
    fn test_projection_roundtrip() {
        let (mut rl, id) = open_rl(10, 10);
        let pid = rl
            .project_ball(id, Point::new(1, 1), Point::new(6, 6), 1, None, ProjectFlags::NONE)
            .unwrap();
        assert_eq!(rl.project_step(pid, 0), Ok(Point::new(1, 1)));
        let n = rl.project_size(pid).unwrap();
        assert!(rl.project_step(pid, n).is_err());
        assert_eq!(rl.project_rings(pid).map(<[usize]>::len), Ok(2));
        rl.delete_projection(pid).unwrap();
        assert_eq!(rl.project_size(pid), Err(Error::NoProjection));
        assert_eq!(rl.delete_projection(pid), Err(Error::NoProjection));
    }

    #[test]
    fn test_wave_and_cloud_center_on_origin() {
        let (mut rl, id) = open_rl(9, 9);
        let c = Point::new(4, 4);
        let wave = rl.project_wave(id, c, 2, ProjectFlags::NONE).unwrap();
        let cloud = rl.project_cloud(id, c, 2, ProjectFlags::NONE).unwrap();
        assert_eq!(rl.project_size(wave), Ok(21));
        assert_eq!(rl.project_size(cloud), Ok(21));
        assert!(rl.projection(wave).unwrap().flags().contains(ProjectFlags::WAVE));
    }

    #[test]
    fn test_projection_errors() {
        let mut rl = Rlfl::with_limits(Limits {
            max_projections: 1,
            ..Limits::default()
        });
        let id = rl.new_grid(5, 5).unwrap();
        let o = Point::new(2, 2);
        assert_eq!(
            rl.project_ball(id, o, o, 60, None, ProjectFlags::NONE),
            Err(Error::InvalidRadius(60))
        );
        assert_eq!(
            rl.project_bolt(id, o, Point::new(-1, 0), None, ProjectFlags::NONE),
            Err(Error::OutOfBounds(Point::new(-1, 0)))
        );
        rl.project_cloud(id, o, 1, ProjectFlags::NONE).unwrap();
        assert_eq!(
            rl.project_cloud(id, o, 1, ProjectFlags::NONE),
            Err(Error::RegistryFull("projection"))
        );
    }
}
