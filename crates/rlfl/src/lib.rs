//! Roguelike grid algorithms: field of view, pathfinding, path maps and
//! area projections over a grid of per-cell flags.
//!
//! [`Rlfl`] owns every grid together with the bounded registries of paths,
//! path maps and projections computed on them, all addressed by small typed
//! handles. Stale handles are rejected, never reused silently.
//!
//! ```
//! use rlfl::{CellFlags, FovKind, Point, Rlfl};
//!
//! let mut rl = Rlfl::new();
//! let map = rl.new_grid(20, 10).unwrap();
//! rl.fill_map(map, CellFlags::OPEN | CellFlags::WALK).unwrap();
//! rl.fov(map, Point::new(5, 5), 4, FovKind::Shadow, false).unwrap();
//! assert!(rl.has_flag(map, Point::new(7, 5), CellFlags::SEEN).unwrap());
//! ```
//!
//! The engines are also usable directly through the re-exported crates.

mod fov;
mod grid;
mod handles;
mod path;
mod project;
mod util;

use rlfl_core::SlotTable;

pub use handles::{GridId, PathId, PathMapId, ProjectionId};
pub use rlfl_core::{
    CellFlags, Error, FlagGrid, Limits, Point, ProjectFlags, Range, Result, chebyshev, distance,
    manhattan,
};
pub use rlfl_fov::{FovAlgorithm, FovKind};
pub use rlfl_paths::{Path, PathKind, PathMap};
pub use rlfl_project::{ProjectOptions, Projection};

pub use {rlfl_core, rlfl_fov, rlfl_paths, rlfl_project};

struct GridEntry {
    grid: FlagGrid,
    pathmaps: SlotTable<PathMap>,
}

/// Owner of all grids and of the results computed on them.
pub struct Rlfl {
    limits: Limits,
    grids: SlotTable<GridEntry>,
    paths: SlotTable<Path>,
    projections: SlotTable<Projection>,
}

impl Default for Rlfl {
    fn default() -> Self {
        Self::new()
    }
}

impl Rlfl {
    /// A context with the default [`Limits`].
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            grids: SlotTable::new("grid", limits.max_grids),
            paths: SlotTable::new("path", limits.max_paths),
            projections: SlotTable::new("projection", limits.max_projections),
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    fn entry(&self, id: GridId) -> Result<&GridEntry> {
        self.grids.get(id.0).ok_or(Error::NoMap)
    }

    fn entry_mut(&mut self, id: GridId) -> Result<&mut GridEntry> {
        self.grids.get_mut(id.0).ok_or(Error::NoMap)
    }

    fn range_or_max(&self, range: Option<u32>) -> u32 {
        range.unwrap_or(self.limits.max_range)
    }
}

/// Log and pass through a registry-full error.
fn warn_full<T>(res: Result<T>) -> Result<T> {
    res.inspect_err(|e| {
        if let Error::RegistryFull(name) = e {
            log::warn!("{name} registry is full");
        }
    })
}
