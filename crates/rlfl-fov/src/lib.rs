//! Field-of-view algorithms over a [`FlagGrid`].
//!
//! Six interchangeable algorithms implement [`FovAlgorithm`]:
//!
//! | kind | algorithm | shape |
//! |---|---|---|
//! | [`FovKind::Circular`] | Bresenham rays to the perimeter of the bounding box | euclidean |
//! | [`FovKind::Diamond`] | diamond-wall raycasting with obscurity vectors | euclidean |
//! | [`FovKind::Shadow`] | recursive shadowcasting over eight octants | euclidean |
//! | [`FovKind::Digital`] | digital lines with convex-hull obstruction tracking | octagonal |
//! | [`FovKind::Restrictive`] | mingos' restrictive precise angle shadowcasting | euclidean |
//! | [`FovKind::Permissive`] | precise permissive FOV with shallow/steep views | euclidean |
//!
//! Every algorithm marks visible cells with [`CellFlags::FOV`]. Cells that
//! are not [`CellFlags::OPEN`] block light and are only marked themselves
//! when `light_walls` is set. The origin is always marked.

mod circular;
mod diamond;
mod digital;
mod finish;
mod permissive;
mod restrictive;
mod shadow;

use rlfl_core::{CellFlags, Error, FlagGrid, Point, Result};

pub use circular::Circular;
pub use diamond::Diamond;
pub use digital::Digital;
pub use permissive::Permissive;
pub use restrictive::Restrictive;
pub use shadow::Shadow;

/// A visibility algorithm.
///
/// Implementations may assume `origin` lies inside the grid and `radius` is
/// at least 1; use [`run`] or [`compute_fov`] to get those guarantees.
pub trait FovAlgorithm {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool);
}

/// Selector for the built-in algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FovKind {
    Circular,
    Diamond,
    Shadow,
    Digital,
    Restrictive,
    Permissive,
}

impl FovKind {
    pub const ALL: [FovKind; 6] = [
        FovKind::Circular,
        FovKind::Diamond,
        FovKind::Shadow,
        FovKind::Digital,
        FovKind::Restrictive,
        FovKind::Permissive,
    ];

    /// The algorithm implementing this kind.
    pub fn algorithm(self) -> &'static dyn FovAlgorithm {
        match self {
            FovKind::Circular => &Circular,
            FovKind::Diamond => &Diamond,
            FovKind::Shadow => &Shadow,
            FovKind::Digital => &Digital,
            FovKind::Restrictive => &Restrictive,
            FovKind::Permissive => &Permissive,
        }
    }

    /// Numeric code used by bindings.
    pub fn code(self) -> u32 {
        match self {
            FovKind::Circular => 1,
            FovKind::Diamond => 2,
            FovKind::Shadow => 3,
            FovKind::Digital => 4,
            FovKind::Restrictive => 5,
            FovKind::Permissive => 6,
        }
    }
}

impl TryFrom<u32> for FovKind {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        FovKind::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or(Error::Generic("unknown FOV algorithm"))
    }
}

/// Validate `origin` and `radius` and resolve a radius of 0 to one that
/// covers the whole grid.
pub fn resolve_radius(
    grid: &FlagGrid,
    origin: Point,
    radius: u32,
    max_radius: u32,
) -> Result<i32> {
    grid.check(origin)?;
    if radius >= max_radius {
        return Err(Error::InvalidRadius(radius));
    }
    if radius > 0 {
        return Ok(radius as i32);
    }
    let mx = (grid.width() - origin.x).max(origin.x) as f64;
    let my = (grid.height() - origin.y).max(origin.y) as f64;
    Ok((mx * mx + my * my).sqrt() as i32 + 1)
}

/// Run a single algorithm on top of the flags already present in the grid.
pub fn run(
    grid: &mut FlagGrid,
    origin: Point,
    radius: u32,
    algorithm: &dyn FovAlgorithm,
    light_walls: bool,
    max_radius: u32,
) -> Result<()> {
    let radius = resolve_radius(grid, origin, radius, max_radius)?;
    algorithm.compute(grid, origin, radius, light_walls);
    Ok(())
}

/// Clear the previous view and compute a fresh one with the chosen algorithm.
pub fn compute_fov(
    grid: &mut FlagGrid,
    origin: Point,
    radius: u32,
    kind: FovKind,
    light_walls: bool,
    max_radius: u32,
) -> Result<()> {
    let radius = resolve_radius(grid, origin, radius, max_radius)?;
    grid.clear(CellFlags::SEEN | CellFlags::LIT);
    kind.algorithm().compute(grid, origin, radius, light_walls);
    log::trace!(
        "{:?} fov from {} radius {}: {} cells seen",
        kind,
        origin,
        radius,
        grid.count(CellFlags::SEEN)
    );
    Ok(())
}

#[inline]
pub(crate) fn light(grid: &mut FlagGrid, p: Point) {
    grid.insert(p, CellFlags::FOV);
}

#[cfg(test)]
pub(crate) mod testutil {
    use rlfl_core::{CellFlags, FlagGrid, Point};

    pub fn open_grid(w: i32, h: i32) -> FlagGrid {
        let mut g = FlagGrid::new(w, h);
        g.fill(CellFlags::OPEN | CellFlags::WALK);
        g
    }

    pub fn seen(g: &FlagGrid) -> Vec<Point> {
        g.iter()
            .filter(|(_, f)| f.contains(CellFlags::SEEN))
            .map(|(p, _)| p)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::*;
    use super::*;

    const MAX_RADIUS: u32 = 60;

    #[test]
    fn test_codes_roundtrip() {
        for k in FovKind::ALL {
            assert_eq!(FovKind::try_from(k.code()), Ok(k));
        }
        assert!(FovKind::try_from(0).is_err());
        assert!(FovKind::try_from(7).is_err());
    }

    #[test]
    fn test_radius_validation() {
        let g = open_grid(10, 10);
        let o = Point::new(2, 2);
        assert_eq!(resolve_radius(&g, o, 5, MAX_RADIUS), Ok(5));
        assert_eq!(
            resolve_radius(&g, o, 60, MAX_RADIUS),
            Err(Error::InvalidRadius(60))
        );
        assert_eq!(
            resolve_radius(&g, Point::new(10, 0), 3, MAX_RADIUS),
            Err(Error::OutOfBounds(Point::new(10, 0)))
        );
        // mx = 8, my = 8 -> sqrt(128) = 11.3
        assert_eq!(resolve_radius(&g, o, 0, MAX_RADIUS), Ok(12));
    }

    #[test]
    fn test_open_grid_stays_within_radius() {
        let radius = 4;
        for kind in FovKind::ALL {
            let mut g = open_grid(21, 21);
            let o = Point::new(10, 10);
            compute_fov(&mut g, o, radius, kind, false, MAX_RADIUS).unwrap();
            let slack = if kind == FovKind::Digital { 1 } else { 0 };
            let r2 = (radius * radius) as i32 + slack;
            for p in seen(&g) {
                assert!(
                    (p - o).length_sq() <= r2,
                    "{kind:?}: {p} is outside radius {radius}"
                );
            }
            assert!(g.has(o, CellFlags::SEEN), "{kind:?}: origin not seen");
            assert!(g.has(o, CellFlags::MEMO), "{kind:?}: origin not remembered");
            for edge in [o.shift(4, 0), o.shift(-4, 0), o.shift(0, 4), o.shift(0, -4)] {
                assert!(g.has(edge, CellFlags::SEEN), "{kind:?}: {edge} not seen");
            }
            for beyond in [o.shift(5, 0), o.shift(0, -5)] {
                assert!(!g.has(beyond, CellFlags::SEEN), "{kind:?}: {beyond} seen");
            }
            assert!(g.has(o.shift(1, 1), CellFlags::SEEN), "{kind:?}: diagonal");
            assert!(g.has(o.shift(2, -3), CellFlags::SEEN), "{kind:?}: (2,-3)");
        }
    }

    #[test]
    fn test_wall_next_to_origin_blocks_cell_behind() {
        for kind in FovKind::ALL {
            for light_walls in [false, true] {
                let mut g = open_grid(11, 11);
                let o = Point::new(5, 5);
                let wall = Point::new(6, 5);
                g.remove(wall, CellFlags::OPEN | CellFlags::WALK);
                compute_fov(&mut g, o, 5, kind, light_walls, MAX_RADIUS).unwrap();
                assert!(
                    !g.has(Point::new(7, 5), CellFlags::SEEN),
                    "{kind:?} light_walls={light_walls}: cell behind wall seen"
                );
                assert_eq!(
                    g.has(wall, CellFlags::SEEN),
                    light_walls,
                    "{kind:?} light_walls={light_walls}: wall visibility"
                );
                assert!(g.has(Point::new(4, 5), CellFlags::SEEN), "{kind:?}: west");
            }
        }
    }

    #[test]
    fn test_compute_clears_previous_view() {
        let mut g = open_grid(30, 10);
        compute_fov(&mut g, Point::new(2, 5), 3, FovKind::Shadow, false, MAX_RADIUS).unwrap();
        assert!(g.has(Point::new(4, 5), CellFlags::SEEN));
        compute_fov(&mut g, Point::new(25, 5), 3, FovKind::Shadow, false, MAX_RADIUS).unwrap();
        assert!(!g.has(Point::new(4, 5), CellFlags::SEEN));
        assert!(g.has(Point::new(4, 5), CellFlags::MEMO), "memory is kept");
    }

    #[test]
    fn test_run_does_not_clear() {
        let mut g = open_grid(30, 10);
        run(&mut g, Point::new(2, 5), 3, &Circular, false, MAX_RADIUS).unwrap();
        run(&mut g, Point::new(25, 5), 3, &Circular, false, MAX_RADIUS).unwrap();
        assert!(g.has(Point::new(4, 5), CellFlags::SEEN));
        assert!(g.has(Point::new(23, 5), CellFlags::SEEN));
    }

    #[test]
    fn test_zero_radius_covers_small_room() {
        for kind in FovKind::ALL {
            let mut g = open_grid(8, 6);
            compute_fov(&mut g, Point::new(3, 2), 0, kind, false, MAX_RADIUS).unwrap();
            assert_eq!(g.count(CellFlags::SEEN), 48, "{kind:?}");
        }
    }
}
