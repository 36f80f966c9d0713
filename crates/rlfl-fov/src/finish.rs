use rlfl_core::{CellFlags, FlagGrid, Point, Range};

use crate::light;

/// Light the blocking cells that border the visible floor of a quadrant.
///
/// Raycasters only mark the first wall a ray hits, which leaves gaps along
/// straight walls seen at a shallow angle. For every seen open cell in
/// `area`, its neighbours one step further from the origin along x, along y
/// and diagonally are marked when they block light and lie in `area`.
fn finish_quadrant(grid: &mut FlagGrid, area: Range, dx: i32, dy: i32) {
    for c in area {
        if !(grid.has(c, CellFlags::SEEN) && grid.is_open(c)) {
            continue;
        }
        let x2 = c.x + dx;
        let y2 = c.y + dy;
        let x_in = x2 >= area.min.x && x2 < area.max.x;
        let y_in = y2 >= area.min.y && y2 < area.max.y;
        if x_in {
            let p = Point::new(x2, c.y);
            if !grid.is_open(p) {
                light(grid, p);
            }
        }
        if y_in {
            let p = Point::new(c.x, y2);
            if !grid.is_open(p) {
                light(grid, p);
            }
        }
        if x_in && y_in {
            let p = Point::new(x2, y2);
            if !grid.is_open(p) {
                light(grid, p);
            }
        }
    }
}

/// Run the finisher over the four quadrants of `area` around `origin`.
/// Each quadrant includes the origin's row and column.
pub(crate) fn finish(grid: &mut FlagGrid, origin: Point, area: Range) {
    let (o, lo, hi) = (origin, area.min, area.max);
    finish_quadrant(grid, Range::new(lo.x, lo.y, o.x + 1, o.y + 1), -1, -1);
    finish_quadrant(grid, Range::new(o.x, lo.y, hi.x, o.y + 1), 1, -1);
    finish_quadrant(grid, Range::new(lo.x, o.y, o.x + 1, hi.y), -1, 1);
    finish_quadrant(grid, Range::new(o.x, o.y, hi.x, hi.y), 1, 1);
}
