use rlfl_core::{CellFlags, FlagGrid, Point};

use crate::{FovAlgorithm, light};

/// Restrictive precise angle shadowcasting (MRPAS).
///
/// Each quadrant is split into an octant scanned row by row and one scanned
/// column by column. Every cell covers an angular slice of its line; opaque
/// cells record their slice as an obstacle and later cells are hidden when
/// the obstacles of the previous line cover them.
#[derive(Copy, Clone, Debug, Default)]
pub struct Restrictive;

impl FovAlgorithm for Restrictive {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        light(grid, origin);
        for (dx, dy) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
            for axes in [Axes::Rows, Axes::Columns] {
                let mut octant = Octant {
                    grid: &mut *grid,
                    origin,
                    radius,
                    light_walls,
                    axes,
                    along: if axes == Axes::Rows { dx } else { dy },
                    across: if axes == Axes::Rows { dy } else { dx },
                };
                octant.scan();
            }
        }
    }
}

/// Which way the octant's lines run.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Axes {
    /// Lines are rows stepping away vertically; cells advance along x.
    Rows,
    /// Lines are columns stepping away horizontally; cells advance along y.
    Columns,
}

struct Octant<'a> {
    grid: &'a mut FlagGrid,
    origin: Point,
    radius: i32,
    light_walls: bool,
    axes: Axes,
    /// Step between cells of a line.
    along: i32,
    /// Step between lines.
    across: i32,
}

impl Octant<'_> {
    /// Map (cell offset, line offset) to a grid point.
    #[inline]
    fn at(&self, cell: i32, line: i32) -> Point {
        match self.axes {
            Axes::Rows => Point::new(self.origin.x + cell, self.origin.y + line),
            Axes::Columns => Point::new(self.origin.x + line, self.origin.y + cell),
        }
    }

    /// Grid extent along the cells of a line, relative to the origin.
    fn cell_bounds(&self) -> (i32, i32) {
        match self.axes {
            Axes::Rows => (-self.origin.x, self.grid.width() - 1 - self.origin.x),
            Axes::Columns => (-self.origin.y, self.grid.height() - 1 - self.origin.y),
        }
    }

    fn line_in_grid(&self, line: i32) -> bool {
        self.grid.contains(self.at(0, line))
    }

    fn scan(&mut self) {
        let mut starts: Vec<f64> = Vec::new();
        let mut ends: Vec<f64> = Vec::new();
        let mut in_last_line = 0;
        let mut min_angle = 0.0f64;
        let (lo, hi) = self.cell_bounds();
        let r2 = self.radius * self.radius;

        let mut iteration = 1;
        let mut line = self.across;
        let mut done = !self.line_in_grid(line);
        while !done {
            done = true;
            let slopes_per_cell = 1.0 / f64::from(iteration + 1);
            let half_slopes = slopes_per_cell * 0.5;
            let mut processed = (min_angle / slopes_per_cell) as i32;
            let min_cell = lo.max(-iteration);
            let max_cell = hi.min(iteration);
            let mut cell = processed * self.along;
            while cell >= min_cell && cell <= max_cell {
                let p = self.at(cell, line);
                let start_slope = f64::from(processed) * slopes_per_cell;
                let centre_slope = start_slope + half_slopes;
                let end_slope = start_slope + slopes_per_cell;
                let open = self.grid.is_open(p);

                let mut visible = true;
                if in_last_line > 0 && !self.grid.has(p, CellFlags::SEEN) {
                    let covered = (0..in_last_line).any(|i| {
                        if open {
                            centre_slope > starts[i] && centre_slope < ends[i]
                        } else {
                            start_slope >= starts[i] && end_slope <= ends[i]
                        }
                    });
                    let behind = self.at(cell, line - self.across);
                    let behind_diag = self.at(cell - self.along, line - self.across);
                    let corner = !self.grid.has(behind, CellFlags::SEEN | CellFlags::OPEN)
                        && self.grid.contains(behind_diag)
                        && !self.grid.has(behind_diag, CellFlags::SEEN | CellFlags::OPEN);
                    visible = !covered && !corner;
                }

                if visible {
                    done = false;
                    if (open || self.light_walls) && (p - self.origin).length_sq() <= r2 {
                        light(self.grid, p);
                    }
                    if !open {
                        if min_angle >= start_slope {
                            min_angle = end_slope;
                        } else {
                            starts.push(start_slope);
                            ends.push(end_slope);
                        }
                    }
                }
                processed += 1;
                cell += self.along;
            }
            if iteration == self.radius {
                done = true;
            }
            iteration += 1;
            in_last_line = starts.len();
            line += self.across;
            if !self.line_in_grid(line) || min_angle == 1.0 {
                done = true;
            }
        }
    }
}
