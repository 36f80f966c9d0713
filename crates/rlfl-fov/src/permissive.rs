use rlfl_core::{FlagGrid, Point};

use crate::{FovAlgorithm, light};

/// Precise permissive field of view.
///
/// A cell is visible when some line joins a point of the origin cell to a
/// point of the target cell without crossing an opaque cell. Each quadrant
/// keeps a list of views bounded by a shallow and a steep line; opaque cells
/// bump those lines inward, split views in two, or close them.
#[derive(Copy, Clone, Debug, Default)]
pub struct Permissive;

impl FovAlgorithm for Permissive {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        light(grid, origin);
        let west = origin.x.min(radius);
        let east = (grid.width() - origin.x - 1).min(radius);
        let north = origin.y.min(radius);
        let south = (grid.height() - origin.y - 1).min(radius);

        let mut q = Quadrant {
            grid,
            origin,
            r2: radius * radius,
            light_walls,
            dir: Point::new(1, 1),
            views: Vec::new(),
            bumps: Vec::new(),
        };
        for (dir, extent) in [
            (Point::new(1, 1), Point::new(east, south)),
            (Point::new(1, -1), Point::new(east, north)),
            (Point::new(-1, -1), Point::new(west, north)),
            (Point::new(-1, 1), Point::new(west, south)),
        ] {
            q.dir = dir;
            q.check(extent);
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Line {
    i: Point,
    f: Point,
}

impl Line {
    const fn new(xi: i32, yi: i32, xf: i32, yf: i32) -> Self {
        Self {
            i: Point::new(xi, yi),
            f: Point::new(xf, yf),
        }
    }

    /// Positive when `p` lies below the line, negative above, zero on it.
    #[inline]
    fn relative_slope(&self, p: Point) -> i32 {
        (self.f.y - self.i.y) * (self.f.x - p.x) - (self.f.x - self.i.x) * (self.f.y - p.y)
    }

    fn below(&self, p: Point) -> bool {
        self.relative_slope(p) > 0
    }

    fn below_or_colinear(&self, p: Point) -> bool {
        self.relative_slope(p) >= 0
    }

    fn above(&self, p: Point) -> bool {
        self.relative_slope(p) < 0
    }

    fn above_or_colinear(&self, p: Point) -> bool {
        self.relative_slope(p) <= 0
    }

    fn colinear(&self, p: Point) -> bool {
        self.relative_slope(p) == 0
    }

    fn colinear_with(&self, other: &Line) -> bool {
        self.colinear(other.i) && self.colinear(other.f)
    }
}

#[derive(Copy, Clone, Debug)]
struct Bump {
    p: Point,
    parent: Option<usize>,
}

#[derive(Clone, Debug)]
struct View {
    shallow: Line,
    steep: Line,
    shallow_bump: Option<usize>,
    steep_bump: Option<usize>,
}

struct Quadrant<'a> {
    grid: &'a mut FlagGrid,
    origin: Point,
    r2: i32,
    light_walls: bool,
    dir: Point,
    views: Vec<View>,
    bumps: Vec<Bump>,
}

impl Quadrant<'_> {
    fn check(&mut self, extent: Point) {
        self.bumps.clear();
        self.views.clear();
        self.views.push(View {
            shallow: Line::new(0, 1, extent.x, 0),
            steep: Line::new(1, 0, 0, extent.y),
            shallow_bump: None,
            steep_bump: None,
        });
        let max_i = extent.x + extent.y;
        let mut i = 1;
        while i <= max_i && !self.views.is_empty() {
            let start_j = (i - extent.x).max(0);
            let max_j = i.min(extent.y);
            let mut cur = 0;
            let mut j = start_j;
            while j <= max_j && cur < self.views.len() {
                cur = self.visit(Point::new(i - j, j), cur);
                j += 1;
            }
            i += 1;
        }
    }

    /// Process one cell, returning the updated view cursor.
    fn visit(&mut self, p: Point, mut cur: usize) -> usize {
        let top_left = Point::new(p.x, p.y + 1);
        let bottom_right = Point::new(p.x + 1, p.y);

        while cur < self.views.len() && self.views[cur].steep.below_or_colinear(bottom_right) {
            cur += 1;
        }
        if cur >= self.views.len() || self.views[cur].shallow.above_or_colinear(top_left) {
            return cur;
        }

        let real = Point::new(
            self.origin.x + p.x * self.dir.x,
            self.origin.y + p.y * self.dir.y,
        );
        let open = self.grid.is_open(real);
        if (self.light_walls || open) && p.length_sq() <= self.r2 {
            light(self.grid, real);
        }
        if open {
            return cur;
        }

        let shallow_above = self.views[cur].shallow.above(bottom_right);
        let steep_below = self.views[cur].steep.below(top_left);
        match (shallow_above, steep_below) {
            (true, true) => {
                self.views.remove(cur);
            }
            (true, false) => {
                self.add_shallow_bump(top_left, cur);
                self.check_view(cur);
            }
            (false, true) => {
                self.add_steep_bump(bottom_right, cur);
                self.check_view(cur);
            }
            (false, false) => {
                let copy = self.views[cur].clone();
                self.views.insert(cur, copy);
                let shallower = cur;
                let mut steeper = cur + 1;
                self.add_steep_bump(bottom_right, shallower);
                if !self.check_view(shallower) {
                    steeper -= 1;
                }
                self.add_shallow_bump(top_left, steeper);
                self.check_view(steeper);
            }
        }
        cur
    }

    fn add_shallow_bump(&mut self, p: Point, v: usize) {
        let bump = self.bumps.len();
        let view = &mut self.views[v];
        view.shallow.f = p;
        self.bumps.push(Bump {
            p,
            parent: view.shallow_bump,
        });
        view.shallow_bump = Some(bump);
        let mut next = view.steep_bump;
        while let Some(b) = next {
            let b = self.bumps[b];
            if view.shallow.above(b.p) {
                view.shallow.i = b.p;
            }
            next = b.parent;
        }
    }

    fn add_steep_bump(&mut self, p: Point, v: usize) {
        let bump = self.bumps.len();
        let view = &mut self.views[v];
        view.steep.f = p;
        self.bumps.push(Bump {
            p,
            parent: view.steep_bump,
        });
        view.steep_bump = Some(bump);
        let mut next = view.shallow_bump;
        while let Some(b) = next {
            let b = self.bumps[b];
            if view.steep.below(b.p) {
                view.steep.i = b.p;
            }
            next = b.parent;
        }
    }

    /// Drop a view that has collapsed onto one of the quadrant's axes.
    fn check_view(&mut self, v: usize) -> bool {
        let view = &self.views[v];
        let degenerate = view.shallow.colinear_with(&view.steep)
            && (view.shallow.colinear(Point::new(0, 1)) || view.shallow.colinear(Point::new(1, 0)));
        if degenerate {
            self.views.remove(v);
        }
        !degenerate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::open_grid;
    use rlfl_core::CellFlags;

    #[test]
    fn test_line_predicates() {
        let l = Line::new(0, 0, 4, 4);
        assert!(l.below(Point::new(3, 1)));
        assert!(l.above(Point::new(1, 3)));
        assert!(l.colinear(Point::new(2, 2)));
        assert!(l.colinear_with(&Line::new(1, 1, 3, 3)));
    }

    #[test]
    fn test_open_grid_is_a_disc() {
        let mut g = open_grid(15, 15);
        let o = Point::new(7, 7);
        Permissive.compute(&mut g, o, 5, false);
        for (p, f) in g.iter() {
            let inside = (p - o).length_sq() <= 25;
            assert_eq!(f.contains(CellFlags::SEEN), inside, "{p}");
        }
    }

    #[test]
    fn test_permissive_sees_past_pillar_edge() {
        let mut g = open_grid(12, 7);
        let o = Point::new(1, 3);
        g.remove(Point::new(3, 3), CellFlags::OPEN);
        Permissive.compute(&mut g, o, 10, false);
        assert!(!g.has(Point::new(5, 3), CellFlags::SEEN), "directly behind");
        assert!(g.has(Point::new(5, 2), CellFlags::SEEN), "permissive edge");
        assert!(g.has(Point::new(5, 4), CellFlags::SEEN), "permissive edge");
    }
}
