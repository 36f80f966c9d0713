use rlfl_core::{CellFlags, Error, FlagGrid, Point, ProjectFlags, Result};
use rlfl_paths::{Path, PathKind, PathMap, PathOptions, find_path};

use crate::{GridId, PathId, PathMapId, Rlfl, warn_full};

impl Rlfl {
    /// Compute and store a path from `origin` to `dest`.
    ///
    /// `range` bounds basic traces and defaults to the configured maximum;
    /// `flags` steer basic traces; `diagonal_cost` is added to diagonal A*
    /// moves. The steps are marked with `PATH` after clearing it map-wide.
    #[allow(clippy::too_many_arguments)]
    pub fn create_path(
        &mut self,
        id: GridId,
        origin: Point,
        dest: Point,
        kind: PathKind,
        range: Option<u32>,
        flags: ProjectFlags,
        diagonal_cost: f32,
    ) -> Result<PathId> {
        let range = self.range_or_max(range);
        let grid = &self.entry(id)?.grid;
        grid.check(origin)?;
        grid.check(dest)?;
        warn_full(self.paths.reserve())?;

        let opts = PathOptions {
            kind,
            range,
            flags,
            diagonal_cost,
        };
        let path = find_path(&mut self.entry_mut(id)?.grid, origin, dest, opts)?;
        let len = path.len();
        let pid = PathId(self.paths.insert(path)?);
        log::debug!("created {kind:?} path {} with {len} steps", pid.index());
        Ok(pid)
    }

    pub fn path(&self, pid: PathId) -> Result<&Path> {
        self.paths.get(pid.0).ok_or(Error::NoPath)
    }

    pub fn path_size(&self, pid: PathId) -> Result<usize> {
        Ok(self.path(pid)?.len())
    }

    /// Step `i` of the path; step 0 is next to the origin.
    pub fn path_step(&self, pid: PathId, i: usize) -> Result<Point> {
        self.path(pid)?
            .step(i)
            .ok_or(Error::Generic("path step index out of range"))
    }

    pub fn delete_path(&mut self, pid: PathId) -> Result<()> {
        self.paths.remove(pid.0).ok_or(Error::NoPath)?;
        log::debug!("deleted path {}", pid.index());
        Ok(())
    }

    fn store_map(
        &mut self,
        id: GridId,
        build: impl FnOnce(&FlagGrid) -> Result<PathMap>,
    ) -> Result<PathMapId> {
        let entry = self.entry_mut(id)?;
        warn_full(entry.pathmaps.reserve())?;
        let map = build(&entry.grid)?;
        let handle = entry.pathmaps.insert(map)?;
        log::debug!("created path map {} on grid {}", handle.index(), id.index());
        Ok(PathMapId {
            grid: id,
            map: handle,
        })
    }

    /// Distance map toward `origin`, or with `safety` an escape map away
    /// from it. An impassable origin gives a map where every cell is blocked.
    pub fn path_fill_map(
        &mut self,
        id: GridId,
        origin: Point,
        diagonal_cost: f32,
        safety: bool,
    ) -> Result<PathMapId> {
        if safety {
            self.store_map(id, |g| PathMap::safety(g, origin, diagonal_cost))
        } else {
            self.store_map(id, |g| PathMap::towards(g, origin, diagonal_cost))
        }
    }

    /// Escape map away from `origin`; step it with `away = true` to flee.
    pub fn path_fill_safety_map(
        &mut self,
        id: GridId,
        origin: Point,
        diagonal_cost: f32,
    ) -> Result<PathMapId> {
        self.path_fill_map(id, origin, diagonal_cost, true)
    }

    /// Distance map toward every passable cell carrying `goal_flag`.
    pub fn path_fill_custom_map(
        &mut self,
        id: GridId,
        goal_flag: CellFlags,
        diagonal_cost: f32,
    ) -> Result<PathMapId> {
        self.store_map(id, |g| PathMap::custom(g, goal_flag, diagonal_cost))
    }

    /// Distance map toward the nearest explorable cell lacking `known_flag`.
    pub fn path_fill_autoexplore_map(
        &mut self,
        id: GridId,
        known_flag: CellFlags,
        diagonal_cost: f32,
    ) -> Result<PathMapId> {
        self.store_map(id, |g| PathMap::autoexplore(g, known_flag, diagonal_cost))
    }

    pub fn path_map(&self, mid: PathMapId) -> Result<&PathMap> {
        self.grids
            .get(mid.grid.0)
            .and_then(|e| e.pathmaps.get(mid.map))
            .ok_or(Error::NoPath)
    }

    /// Best neighbour of `p` on the map: downhill, or uphill with `away`.
    ///
    /// The value at `p` is ignored, so the goal itself still steps to a
    /// neighbour. Fails with `Generic` when every neighbour is blocked.
    pub fn path_step_map(&self, mid: PathMapId, p: Point, away: bool) -> Result<Point> {
        let map = self.path_map(mid)?;
        self.entry(mid.grid)?.grid.check(p)?;
        map.step(p, away)
            .ok_or(Error::Generic("no passable neighbour on the path map"))
    }

    pub fn path_wipe_map(&mut self, mid: PathMapId) -> Result<()> {
        self.grids
            .get_mut(mid.grid.0)
            .and_then(|e| e.pathmaps.remove(mid.map))
            .ok_or(Error::NoPath)?;
        log::debug!("wiped path map {}", mid.index());
        Ok(())
    }

    /// Wipe every path map of the grid.
    pub fn path_wipe_all_maps(&mut self, id: GridId) -> Result<()> {
        self.entry_mut(id)?.pathmaps.clear();
        Ok(())
    }
}
