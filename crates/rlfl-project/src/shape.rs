use std::collections::HashSet;

use rlfl_core::{CellFlags, FlagGrid, Point, ProjectFlags, Range, distance};

/// Accumulates the cells of a projection, skipping duplicates and recording
/// where each ring starts.
pub(crate) struct Blast<'a> {
    grid: &'a FlagGrid,
    flags: ProjectFlags,
    pub(crate) steps: Vec<Point>,
    pub(crate) rings: Vec<usize>,
    seen: HashSet<Point>,
}

impl<'a> Blast<'a> {
    pub(crate) fn new(grid: &'a FlagGrid, flags: ProjectFlags) -> Self {
        Self {
            grid,
            flags,
            steps: Vec::new(),
            rings: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub(crate) fn push(&mut self, p: Point) {
        if self.seen.insert(p) {
            self.steps.push(p);
        }
    }

    fn start_ring(&mut self) {
        self.rings.push(self.steps.len());
    }

    /// Ring cells are dropped outside the grid, and on walls unless `THRU`.
    fn push_ring_cell(&mut self, p: Point) {
        if !self.grid.contains(p) {
            return;
        }
        if !self.flags.contains(ProjectFlags::THRU) && !self.grid.is_open(p) {
            return;
        }
        self.push(p);
    }

    /// Rings around `center` from `start` to `radius`, one per distance.
    ///
    /// Rings below `start` are recorded empty so that ring indices always
    /// equal distances.
    pub(crate) fn ball(&mut self, center: Point, start: i32, radius: i32) {
        for _ in 0..start.min(radius + 1) {
            self.start_ring();
        }
        for d in start..=radius {
            self.start_ring();
            for p in Range::around(center, d) {
                if self.on_ring(center, p, d) {
                    self.push_ring_cell(p);
                }
            }
        }
    }

    fn on_ring(&self, center: Point, p: Point, d: i32) -> bool {
        let off = p - center;
        if self.flags.contains(ProjectFlags::SQUARE) {
            off.x.abs() == d || off.y.abs() == d
        } else if self.flags.contains(ProjectFlags::DIAMOND) && off.x != 0 && off.y != 0 {
            off.x.abs() + off.y.abs() == d
        } else {
            distance(center, p) == d
        }
    }

    /// Cone widening from `origin` along `beam` (the traced cells, without the
    /// origin) until it reaches `radius` at the end of the beam.
    ///
    /// Ring `k` holds the cells at distance `k` from the origin that lie
    /// within the current arc radius of the base point, which advances along
    /// the beam as the rings grow.
    pub(crate) fn breath(&mut self, origin: Point, beam: &[Point], radius: i32) {
        let dist = beam.len() as i32;
        let epicenter = beam.last().copied().unwrap_or(origin);
        let brev = radius * radius / dist;
        let max_dist = distance(origin, epicenter) + radius;
        let mut base = origin;
        let mut arc = 0;
        let mut travelled = 0;

        for ring in 0..=max_dist {
            if let Some(&next) = beam.get(travelled as usize) {
                if ring >= distance(next, origin) {
                    base = next;
                    travelled += 1;
                }
            }
            self.start_ring();
            for c in 0..=arc {
                for p in Range::around(base, c) {
                    if distance(origin, p) == ring && distance(base, p) == c {
                        self.push_ring_cell(p);
                    }
                }
            }
            arc = radius * (travelled + brev) / (dist + brev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(w: i32, h: i32) -> FlagGrid {
        let mut g = FlagGrid::new(w, h);
        g.fill(CellFlags::OPEN);
        g
    }

    #[test]
    fn test_ball_rings_follow_distance() {
        let g = open(11, 11);
        let c = Point::new(5, 5);
        let mut blast = Blast::new(&g, ProjectFlags::NONE);
        blast.ball(c, 0, 3);
        assert_eq!(blast.rings.len(), 4);
        for (k, w) in blast.rings.windows(2).enumerate() {
            for &p in &blast.steps[w[0]..w[1]] {
                assert_eq!(distance(c, p), k as i32);
            }
        }
    }

    #[test]
    fn test_square_and_diamond_rings() {
        let g = open(11, 11);
        let c = Point::new(5, 5);
        let mut square = Blast::new(&g, ProjectFlags::SQUARE);
        square.ball(c, 2, 2);
        assert_eq!(square.steps.len(), 16);
        assert_eq!(square.rings, vec![0, 0, 0]);

        let mut diamond = Blast::new(&g, ProjectFlags::DIAMOND);
        diamond.ball(c, 2, 2);
        // Four on-axis cells plus the four with |dx| = |dy| = 1.
        assert_eq!(diamond.steps.len(), 8);
        assert!(diamond.steps.contains(&Point::new(6, 6)));
        assert!(!diamond.steps.contains(&Point::new(7, 6)));
    }

    #[test]
    fn test_walls_and_edges() {
        let mut g = open(4, 4);
        g.remove(Point::new(1, 0), CellFlags::OPEN);
        let mut blast = Blast::new(&g, ProjectFlags::NONE);
        blast.ball(Point::new(0, 0), 0, 1);
        assert_eq!(blast.steps, vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)]);
        let mut thru = Blast::new(&g, ProjectFlags::THRU);
        thru.ball(Point::new(0, 0), 0, 1);
        assert_eq!(thru.steps.len(), 4);
    }

    #[test]
    fn test_duplicates_are_skipped() {
        let g = open(5, 5);
        let mut blast = Blast::new(&g, ProjectFlags::NONE);
        blast.push(Point::new(2, 2));
        blast.ball(Point::new(2, 2), 0, 1);
        assert_eq!(blast.steps.len(), 9);
        assert_eq!(blast.rings, vec![1, 1]);
    }
}
