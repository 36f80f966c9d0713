use rlfl_core::{FlagGrid, Point};

use crate::{FovAlgorithm, light};

/// Digital field of view.
///
/// For each of the eight octants a family of digital lines of every slope
/// `h / radius` is traced. Obstacles met along the way grow a top and a
/// bottom convex hull; a cell is visible while it lies strictly between the
/// two hulls.
#[derive(Copy, Clone, Debug, Default)]
pub struct Digital;

impl FovAlgorithm for Digital {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        light(grid, origin);
        for dir in 0..8 {
            for h in 0..=radius {
                trace(grid, dir, radius, h, origin, light_walls);
            }
        }
    }
}

#[inline]
fn ccw(a: Point, b: Point, c: Point) -> i32 {
    a.x * b.y + b.x * c.y + c.x * a.y - a.x * c.y - b.x * a.y - c.x * b.y
}

fn draw(grid: &mut FlagGrid, c: Point, n: i32, origin: Point, light_walls: bool) {
    if !grid.contains(c) {
        return;
    }
    if (c - origin).length_sq() <= n * n + 1 && (light_walls || grid.is_open(c)) {
        light(grid, c);
    }
}

/// Octant transform: bit 0 mirrors x, bit 1 mirrors y, bit 2 swaps axes.
#[inline]
fn to_map(dir: i32, p: Point, origin: Point) -> Point {
    let mut x = if dir & 1 != 0 { -p.x } else { p.x };
    let mut y = if dir & 2 != 0 { -p.y } else { p.y };
    if dir & 4 != 0 {
        std::mem::swap(&mut x, &mut y);
    }
    Point::new(x + origin.x, y + origin.y)
}

fn trace(grid: &mut FlagGrid, dir: i32, n: i32, h: i32, origin: Point, light_walls: bool) {
    let size = (n + 2) as usize;
    let mut top = vec![Point::ZERO; size];
    let mut bot = vec![Point::ZERO; size];
    top[0] = Point::new(0, 1);
    let (mut curt, mut curb) = (0usize, 0usize);
    // s[0][0], s[1][0] index the bottom hull; s[0][1], s[1][1] the top hull.
    let mut s = [[0usize; 2]; 2];
    let mut ad2 = [0i32; 2];
    let mut eps = [0, n - 1];

    for ad1 in 1..=n {
        for i in 0..2 {
            eps[i] += h;
            if eps[i] >= n {
                eps[i] -= n;
                ad2[i] += 1;
            }
        }
        for i in 0..2 {
            let probe = Point::new(ad1, ad2[i] + i as i32);
            if ccw(top[s[1 - i][1]], bot[s[i][0]], probe) <= 0 {
                return;
            }
        }

        let cells = [
            to_map(dir, Point::new(ad1, ad2[0]), origin),
            to_map(dir, Point::new(ad1, ad2[1]), origin),
        ];
        for i in 0..2 {
            let probe = Point::new(ad1, ad2[i] + 1 - i as i32);
            if ccw(top[s[i][1]], bot[s[1 - i][0]], probe) > 0 {
                draw(grid, cells[i], n, origin, light_walls);
            }
        }

        if grid.contains(cells[0]) && !grid.is_open(cells[0]) {
            let q = Point::new(ad1, ad2[0] + 1);
            curb += 1;
            bot[curb] = q;
            if ccw(bot[s[0][0]], top[s[1][1]], q) >= 0 {
                return;
            }
            if ccw(top[s[0][1]], bot[s[1][0]], q) >= 0 {
                s[1][0] = curb;
                while s[0][1] < curt && ccw(top[s[0][1]], top[s[0][1] + 1], q) >= 0 {
                    s[0][1] += 1;
                }
            }
            while curb > 1 && ccw(bot[curb - 2], bot[curb - 1], q) >= 0 {
                if s[1][0] == curb {
                    s[1][0] -= 1;
                }
                curb -= 1;
                bot[curb] = bot[curb + 1];
            }
        }

        if grid.contains(cells[1]) && !grid.is_open(cells[1]) {
            let q = Point::new(ad1, ad2[1]);
            curt += 1;
            top[curt] = q;
            if ccw(bot[s[1][0]], top[s[0][1]], q) >= 0 {
                return;
            }
            if ccw(top[s[1][1]], bot[s[0][0]], q) >= 0 {
                s[1][1] = curt;
                while s[0][0] < curb && ccw(bot[s[0][0]], bot[s[0][0] + 1], q) <= 0 {
                    s[0][0] += 1;
                }
            }
            while curt > 1 && ccw(top[curt - 2], top[curt - 1], q) <= 0 {
                if s[1][1] == curt {
                    s[1][1] -= 1;
                }
                curt -= 1;
                top[curt] = top[curt + 1];
            }
        }
    }
}
