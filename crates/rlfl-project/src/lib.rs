//! Area projections: bolts, beams, balls, cones and their relatives.
//!
//! A projection first traces a line from the origin toward the target (see
//! [`trace_line`]). The last cell reached is the epicenter of the blast, which
//! then grows ring by ring. Cones with a long enough beam instead widen along
//! the beam from the origin, like a breath.
//!
//! The result lists every touched cell once, origin first, followed by the
//! beam and then the rings. [`Projection::rings`] tells where each ring
//! starts so callers can apply falloff.

mod shape;

use rlfl_core::{Error, FlagGrid, Point, ProjectFlags, Result};
use rlfl_paths::trace_line;

use crate::shape::Blast;

/// Parameters of a projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectOptions {
    pub radius: u32,
    pub range: u32,
    pub flags: ProjectFlags,
}

impl ProjectOptions {
    /// A single-target missile stopping at the first occupant.
    pub fn bolt(range: u32, flags: ProjectFlags) -> Self {
        Self {
            radius: 0,
            range,
            flags: flags | ProjectFlags::STOP,
        }
    }

    /// A line hitting every cell on its way.
    pub fn beam(range: u32, flags: ProjectFlags) -> Self {
        Self {
            radius: 0,
            range,
            flags: flags | ProjectFlags::BEAM,
        }
    }

    pub fn ball(radius: u32, range: u32, flags: ProjectFlags) -> Self {
        Self {
            radius,
            range,
            flags,
        }
    }

    /// A breath widening from the origin to `radius` at the target.
    pub fn cone(radius: u32, range: u32, flags: ProjectFlags) -> Self {
        Self {
            radius,
            range,
            flags: flags | ProjectFlags::CONE,
        }
    }
}

/// The cells touched by a projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    steps: Vec<Point>,
    rings: Vec<usize>,
    flags: ProjectFlags,
}

impl Projection {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn step(&self, i: usize) -> Option<Point> {
        self.steps.get(i).copied()
    }

    #[inline]
    pub fn steps(&self) -> &[Point] {
        &self.steps
    }

    /// Start index in [`steps`](Self::steps) of every ring, innermost first.
    /// Rings may be empty, in which case the next ring starts at the same
    /// index.
    #[inline]
    pub fn rings(&self) -> &[usize] {
        &self.rings
    }

    #[inline]
    pub fn flags(&self) -> ProjectFlags {
        self.flags
    }

    /// Ring of the step at index `i`, `None` for the origin and beam cells
    /// preceding the first ring or when `i` is out of range.
    pub fn ring_of(&self, i: usize) -> Option<usize> {
        if i >= self.steps.len() {
            return None;
        }
        self.rings.partition_point(|&start| start <= i).checked_sub(1)
    }

    /// Cells of ring `k`.
    pub fn ring(&self, k: usize) -> &[Point] {
        let Some(&start) = self.rings.get(k) else {
            return &[];
        };
        let end = self.rings.get(k + 1).copied().unwrap_or(self.steps.len());
        &self.steps[start..end]
    }
}

/// Project from `origin` toward `target`.
///
/// Fails with `OutOfBounds` for cells outside the grid and `InvalidRadius`
/// when `radius >= max_radius`.
pub fn project(
    grid: &FlagGrid,
    origin: Point,
    target: Point,
    opts: ProjectOptions,
    max_radius: u32,
) -> Result<Projection> {
    grid.check(origin)?;
    grid.check(target)?;
    if opts.radius >= max_radius {
        return Err(Error::InvalidRadius(opts.radius));
    }
    let flags = opts.flags;
    let thru = flags.contains(ProjectFlags::THRU);
    let stop_at_target = !flags.intersects(ProjectFlags::PASS | ProjectFlags::BEAM);

    let mut blast = Blast::new(grid, flags);
    blast.push(origin);
    let mut beam = Vec::new();
    for p in trace_line(grid, origin, target, opts.range, flags) {
        if !thru && !grid.is_open(p) {
            break;
        }
        blast.push(p);
        beam.push(p);
        if stop_at_target && p == target {
            break;
        }
    }
    let epicenter = beam.last().copied().unwrap_or(origin);

    let mut radius = opts.radius as i32;
    let mut breath = flags.contains(ProjectFlags::CONE);
    if breath && beam.is_empty() {
        breath = false;
        radius = 1;
    }
    if breath && beam.len() as i32 > radius {
        blast.breath(origin, &beam, radius);
    } else {
        let start = if flags.contains(ProjectFlags::SHELL) {
            radius
        } else {
            0
        };
        blast.ball(epicenter, start, radius);
    }

    log::trace!(
        "projection {origin} -> {target}: beam {}, {} rings, {} cells",
        beam.len(),
        blast.rings.len(),
        blast.steps.len()
    );
    Ok(Projection {
        steps: blast.steps,
        rings: blast.rings,
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlfl_core::{CellFlags, distance};
    use std::collections::HashSet;

    const MAX_RADIUS: u32 = 60;

    fn open(w: i32, h: i32) -> FlagGrid {
        let mut g = FlagGrid::new(w, h);
        g.fill(CellFlags::OPEN | CellFlags::WALK);
        g
    }

    fn unique(p: &Projection) -> bool {
        p.steps().iter().collect::<HashSet<_>>().len() == p.len()
    }

    #[test]
    fn test_ball_of_radius_two() {
        let g = open(10, 10);
        let c = Point::new(5, 5);
        let proj = project(&g, c, c, ProjectOptions::ball(2, 60, ProjectFlags::NONE), MAX_RADIUS)
            .unwrap();
        let expected: HashSet<Point> = g.bounds().iter().filter(|&p| distance(c, p) <= 2).collect();
        assert_eq!(proj.len(), 21);
        assert_eq!(proj.len(), expected.len());
        assert!(unique(&proj));
        assert!(proj.steps().iter().all(|p| expected.contains(p)));
        assert_eq!(proj.step(0), Some(c));
        assert_eq!(proj.ring(1).len(), 8);
        assert_eq!(proj.ring(2).len(), 12);
    }

    #[test]
    fn test_bolt_stops_at_occupant() {
        let mut g = open(10, 3);
        g.insert(Point::new(4, 1), CellFlags::OCCUPIED);
        let proj = project(
            &g,
            Point::new(1, 1),
            Point::new(8, 1),
            ProjectOptions::bolt(60, ProjectFlags::NONE),
            MAX_RADIUS,
        )
        .unwrap();
        let last = proj.steps().last().copied();
        assert_eq!(last, Some(Point::new(4, 1)));
        assert_eq!(proj.len(), 4);
    }

    #[test]
    fn test_beam_runs_past_target() {
        let g = open(10, 3);
        let proj = project(
            &g,
            Point::new(1, 1),
            Point::new(4, 1),
            ProjectOptions::beam(60, ProjectFlags::NONE),
            MAX_RADIUS,
        )
        .unwrap();
        assert_eq!(proj.steps().last(), Some(&Point::new(9, 1)));
        assert_eq!(proj.ring_of(3), None, "beam cells precede the rings");
    }

    #[test]
    fn test_ball_explodes_before_wall() {
        let g = FlagGrid::from_ascii(&[
            ".........", //
            ".........",
            "......#..",
            ".........",
            ".........",
        ]);
        let proj = project(
            &g,
            Point::new(0, 2),
            Point::new(8, 2),
            ProjectOptions::ball(1, 60, ProjectFlags::NONE),
            MAX_RADIUS,
        )
        .unwrap();
        assert!(!proj.steps().contains(&Point::new(6, 2)));
        assert!(proj.steps().contains(&Point::new(5, 1)), "ring around the epicenter");
        assert_eq!(proj.ring(0), &[] as &[Point], "epicenter already on the beam");
        let thru = project(
            &g,
            Point::new(0, 2),
            Point::new(8, 2),
            ProjectOptions::ball(1, 60, ProjectFlags::THRU),
            MAX_RADIUS,
        )
        .unwrap();
        assert!(thru.steps().contains(&Point::new(6, 2)));
        assert!(thru.steps().contains(&Point::new(8, 3)));
    }

    #[test]
    fn test_shell_skips_interior() {
        let g = open(11, 11);
        let c = Point::new(5, 5);
        let proj = project(
            &g,
            c,
            c,
            ProjectOptions::ball(3, 60, ProjectFlags::SHELL),
            MAX_RADIUS,
        )
        .unwrap();
        assert_eq!(proj.rings().len(), 4);
        for (i, &p) in proj.steps().iter().enumerate().skip(1) {
            assert_eq!(distance(c, p), 3);
            assert_eq!(proj.ring_of(i), Some(3));
        }
    }

    #[test]
    fn test_cone_widens_toward_target() {
        let g = open(12, 11);
        let o = Point::new(2, 5);
        let t = Point::new(8, 5);
        let proj = project(&g, o, t, ProjectOptions::cone(3, 60, ProjectFlags::NONE), MAX_RADIUS)
            .unwrap();
        assert!(unique(&proj));
        assert!(proj.steps().contains(&t));
        assert!(proj.ring(2).is_empty(), "narrow near the origin");
        let far: HashSet<Point> = proj.ring(6).iter().copied().collect();
        let expected: HashSet<Point> = [(8, 4), (8, 6), (7, 3), (7, 7)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        assert_eq!(far, expected);
        assert!(proj.steps().iter().all(|&p| distance(o, p) <= 9));
    }

    #[test]
    fn test_cone_without_beam_is_small_ball() {
        let g = open(7, 7);
        let c = Point::new(3, 3);
        let proj = project(&g, c, c, ProjectOptions::cone(4, 60, ProjectFlags::NONE), MAX_RADIUS)
            .unwrap();
        assert_eq!(proj.len(), 9);
    }

    #[test]
    fn test_validation() {
        let g = open(5, 5);
        let o = Point::new(0, 0);
        assert_eq!(
            project(&g, o, Point::new(5, 0), ProjectOptions::ball(1, 60, ProjectFlags::NONE), 60),
            Err(Error::OutOfBounds(Point::new(5, 0)))
        );
        assert_eq!(
            project(&g, o, o, ProjectOptions::ball(60, 60, ProjectFlags::NONE), 60),
            Err(Error::InvalidRadius(60))
        );
    }
}
