use rlfl_core::{FlagGrid, Point};

use crate::{FovAlgorithm, light};

/// Recursive shadowcasting over eight octants.
#[derive(Copy, Clone, Debug, Default)]
pub struct Shadow;

/// Octant multipliers: map `(dx, dy)` to `(dx*xx + dy*xy, dx*yx + dy*yy)`.
const MULT: [[i32; 8]; 4] = [
    [1, 0, 0, -1, -1, 0, 0, 1],
    [0, 1, -1, 0, 0, -1, 1, 0],
    [0, 1, 1, 0, 0, -1, -1, 0],
    [1, 0, 0, 1, -1, 0, 0, -1],
];

#[derive(Copy, Clone)]
struct Octant {
    xx: i32,
    xy: i32,
    yx: i32,
    yy: i32,
}

impl Octant {
    fn new(oct: usize) -> Self {
        Self {
            xx: MULT[0][oct],
            xy: MULT[1][oct],
            yx: MULT[2][oct],
            yy: MULT[3][oct],
        }
    }

    #[inline]
    fn to_map(self, origin: Point, dx: i32, dy: i32) -> Point {
        Point::new(
            origin.x + dx * self.xx + dy * self.xy,
            origin.y + dx * self.yx + dy * self.yy,
        )
    }
}

struct Scan<'a> {
    grid: &'a mut FlagGrid,
    origin: Point,
    radius: i32,
    light_walls: bool,
}

impl Scan<'_> {
    fn cast_light(&mut self, oct: Octant, row: i32, mut start: f32, end: f32) {
        if start < end {
            return;
        }
        let r2 = self.radius * self.radius;
        let mut new_start = 0.0f32;
        for j in row..=self.radius {
            let dy = -j;
            let mut blocked = false;
            for dx in -j..=0 {
                let p = oct.to_map(self.origin, dx, dy);
                if !self.grid.contains(p) {
                    continue;
                }
                let l_slope = (dx as f32 - 0.5) / (dy as f32 + 0.5);
                let r_slope = (dx as f32 + 0.5) / (dy as f32 - 0.5);
                if start < r_slope {
                    continue;
                } else if end > l_slope {
                    break;
                }
                let open = self.grid.is_open(p);
                if dx * dx + dy * dy <= r2 && (self.light_walls || open) {
                    light(self.grid, p);
                }
                if blocked {
                    if !open {
                        new_start = r_slope;
                        continue;
                    }
                    blocked = false;
                    start = new_start;
                } else if !open && j < self.radius {
                    blocked = true;
                    self.cast_light(oct, j + 1, start, l_slope);
                    new_start = r_slope;
                }
            }
            if blocked {
                break;
            }
        }
    }
}

impl FovAlgorithm for Shadow {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        let mut scan = Scan {
            grid,
            origin,
            radius,
            light_walls,
        };
        for oct in 0..8 {
            scan.cast_light(Octant::new(oct), 1, 1.0, 0.0);
        }
        light(scan.grid, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::open_grid;
    use rlfl_core::CellFlags;

    #[test]
    fn test_octants_cover_all_directions() {
        let mut seen = std::collections::HashSet::new();
        for oct in 0..8 {
            seen.insert(Octant::new(oct).to_map(Point::ZERO, -1, -2));
        }
        assert_eq!(seen.len(), 8, "each octant maps to a distinct cell");
    }

    #[test]
    fn test_open_grid_is_a_disc() {
        let mut g = open_grid(13, 13);
        let o = Point::new(6, 6);
        Shadow.compute(&mut g, o, 4, false);
        for (p, f) in g.iter() {
            let inside = (p - o).length_sq() <= 16;
            assert_eq!(f.contains(CellFlags::SEEN), inside, "{p}");
        }
    }

    #[test]
    fn test_room_through_doorway() {
        let mut g = FlagGrid::from_ascii(&[
            "#########", //
            "#.......#",
            "#.......#",
            "####.####",
            "#.......#",
            "#...@...#",
            "#########",
        ]);
        Shadow.compute(&mut g, Point::new(4, 5), 10, true);
        assert!(g.has(Point::new(4, 2), CellFlags::SEEN), "straight through the door");
        assert!(g.has(Point::new(4, 1), CellFlags::SEEN));
        assert!(!g.has(Point::new(1, 1), CellFlags::SEEN), "corner behind the wall");
        assert!(g.has(Point::new(3, 3), CellFlags::SEEN), "door frame is lit");
    }
}
