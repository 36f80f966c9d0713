use rlfl_core::{CellFlags, FlagGrid, Point, ProjectFlags};

/// Traces a projection line from `origin` toward `dest`.
///
/// The line advances one step at a time along its major axis, spreading the
/// minor-axis moves evenly. Every cell entered is recorded, then the trace
/// stops when:
///
/// - it reached `dest`, unless `BEAM` or `PASS` is set;
/// - the cell is not `OPEN` (with `THRU`: the cell is `PERMANENT`);
/// - the cell is `OCCUPIED` and `STOP` is set;
/// - the travelled distance reached `range`.
///
/// A cell outside the grid ends the trace without being recorded. With
/// `REVERSE` the line heads away from `dest`. The origin is never part of the
/// returned steps.
pub fn trace_line(
    grid: &FlagGrid,
    origin: Point,
    dest: Point,
    range: u32,
    flags: ProjectFlags,
) -> Vec<Point> {
    let target = if flags.contains(ProjectFlags::REVERSE) {
        origin + origin - dest
    } else {
        dest
    };
    let mut steps = Vec::new();
    if target == origin || range == 0 {
        return steps;
    }
    let range = i32::try_from(range).unwrap_or(i32::MAX);

    let delta = target - origin;
    let sx = if delta.x < 0 { -1 } else { 1 };
    let sy = if delta.y < 0 { -1 } else { 1 };
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    let diagonal = ax == ay;
    // The major axis moves every step; the minor axis moves whenever the
    // accumulated fraction passes half a cell.
    let (major, minor, minor_len) = if ay > ax {
        (Point::new(0, sy), Point::new(sx, 0), ax)
    } else {
        (Point::new(sx, 0), Point::new(0, sy), ay)
    };
    let half = ax * ay;
    let full = half << 1;
    let slope = minor_len * minor_len * 2;

    let mut p = origin + major;
    let mut frac = slope;
    let mut n = 0;
    let mut k = 0;
    if diagonal {
        p = p + minor;
    } else if frac > half {
        p = p + minor;
        frac -= full;
        k += 1;
    }

    loop {
        let travelled = if diagonal { n + (n >> 1) } else { n + (k >> 1) };
        if travelled >= range || !grid.contains(p) {
            break;
        }
        steps.push(p);
        n += 1;
        if stops_at(grid, p, target, flags) {
            break;
        }
        if diagonal {
            p = p + major + minor;
            continue;
        }
        if slope != 0 {
            frac += slope;
            if frac > half {
                p = p + minor;
                frac -= full;
                k += 1;
            }
        }
        p = p + major;
    }
    steps
}

fn stops_at(grid: &FlagGrid, p: Point, target: Point, flags: ProjectFlags) -> bool {
    if p == target && !flags.intersects(ProjectFlags::BEAM | ProjectFlags::PASS) {
        return true;
    }
    let blocked = if flags.contains(ProjectFlags::THRU) {
        grid.has(p, CellFlags::PERMANENT)
    } else {
        !grid.has(p, CellFlags::OPEN)
    };
    blocked || (flags.contains(ProjectFlags::STOP) && grid.has(p, CellFlags::OCCUPIED))
}
