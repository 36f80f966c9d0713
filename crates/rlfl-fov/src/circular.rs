use rlfl_core::{FlagGrid, Point, Range};

use crate::finish::finish;
use crate::{FovAlgorithm, light};

/// Basic raycasting: one Bresenham ray from the origin to every cell on the
/// perimeter of the radius box, clipped to a circle.
#[derive(Copy, Clone, Debug, Default)]
pub struct Circular;

impl FovAlgorithm for Circular {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        let area = Range::around(origin, radius).intersect(grid.bounds());
        let (lo, hi) = (area.min, area.max);
        let r2 = radius * radius;

        for x in lo.x..hi.x {
            cast_ray(grid, origin, Point::new(x, lo.y), r2, light_walls);
        }
        for y in lo.y + 1..hi.y {
            cast_ray(grid, origin, Point::new(hi.x - 1, y), r2, light_walls);
        }
        for x in (lo.x..hi.x - 1).rev() {
            cast_ray(grid, origin, Point::new(x, hi.y - 1), r2, light_walls);
        }
        for y in (lo.y + 1..hi.y - 1).rev() {
            cast_ray(grid, origin, Point::new(lo.x, y), r2, light_walls);
        }

        light(grid, origin);
        if light_walls {
            finish(grid, origin, area);
        }
    }
}

fn cast_ray(grid: &mut FlagGrid, origin: Point, dest: Point, r2: i32, light_walls: bool) {
    let mut entered = false;
    let mut blocked = false;
    for p in Bresenham::new(origin, dest) {
        if (p - origin).length_sq() > r2 {
            return;
        }
        if grid.contains(p) {
            entered = true;
            if !blocked && !grid.is_open(p) {
                blocked = true;
            } else if blocked {
                return;
            }
            if light_walls || !blocked {
                light(grid, p);
            }
        } else if entered {
            return;
        }
    }
}

/// Bresenham line walker yielding every cell after `from` up to `to`.
struct Bresenham {
    cur: Point,
    dest: Point,
    step: Point,
    delta: Point,
    e: i32,
}

impl Bresenham {
    fn new(from: Point, to: Point) -> Self {
        let d = to - from;
        let step = Point::new(d.x.signum(), d.y.signum());
        let (ax, ay) = (d.x.abs(), d.y.abs());
        Self {
            cur: from,
            dest: to,
            step,
            delta: Point::new(ax * 2, ay * 2),
            e: ax.max(ay),
        }
    }
}

impl Iterator for Bresenham {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.delta.x >= self.delta.y {
            if self.cur.x == self.dest.x {
                return None;
            }
            self.cur.x += self.step.x;
            self.e -= self.delta.y;
            if self.e < 0 {
                self.cur.y += self.step.y;
                self.e += self.delta.x;
            }
        } else {
            if self.cur.y == self.dest.y {
                return None;
            }
            self.cur.y += self.step.y;
            self.e -= self.delta.x;
            if self.e < 0 {
                self.cur.x += self.step.x;
                self.e += self.delta.y;
            }
        }
        Some(self.cur)
    }
}
