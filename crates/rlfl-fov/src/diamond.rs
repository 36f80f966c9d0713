use rlfl_core::{FlagGrid, Point};

use crate::finish::finish;
use crate::{FovAlgorithm, light};

/// Diamond-wall raycasting.
///
/// Rays spread outward from the origin along a growing diamond perimeter.
/// Each ray inherits an obscurity vector from its x and y input rays; a ray
/// whose inputs are all obscured is ignored and stops propagating.
#[derive(Copy, Clone, Debug, Default)]
pub struct Diamond;

#[derive(Copy, Clone, Debug, Default)]
struct Ray {
    loc: Point,
    xob: i32,
    yob: i32,
    xerr: i32,
    yerr: i32,
    xinput: Option<usize>,
    yinput: Option<usize>,
    added: bool,
    ignore: bool,
}

impl Ray {
    fn is_obscure(&self) -> bool {
        (self.xerr > 0 && self.xerr <= self.xob) || (self.yerr > 0 && self.yerr <= self.yob)
    }
}

struct Caster<'a> {
    grid: &'a FlagGrid,
    origin: Point,
    rays: Vec<Ray>,
    perimeter: Vec<usize>,
}

impl Caster<'_> {
    /// Ray slot for offset `loc` from the origin, if it lies in the grid.
    fn ray_at(&mut self, loc: Point) -> Option<usize> {
        let idx = self.grid.index(self.origin + loc)?;
        self.rays[idx].loc = loc;
        Some(idx)
    }

    fn process_ray(&mut self, new: Option<usize>, input: usize) {
        let Some(new) = new else {
            return;
        };
        let input_y = self.rays[input].loc.y;
        let ray = &mut self.rays[new];
        if ray.loc.y == input_y {
            ray.xinput = Some(input);
        } else {
            ray.yinput = Some(input);
        }
        if !ray.added {
            ray.added = true;
            self.perimeter.push(new);
        }
    }

    fn expand_from(&mut self, r: usize) {
        let loc = self.rays[r].loc;
        if loc.x >= 0 {
            let n = self.ray_at(loc.shift(1, 0));
            self.process_ray(n, r);
        }
        if loc.x <= 0 {
            let n = self.ray_at(loc.shift(-1, 0));
            self.process_ray(n, r);
        }
        if loc.y >= 0 {
            let n = self.ray_at(loc.shift(0, 1));
            self.process_ray(n, r);
        }
        if loc.y <= 0 {
            let n = self.ray_at(loc.shift(0, -1));
            self.process_ray(n, r);
        }
    }

    fn merge_input(&mut self, r: usize) {
        let xi = self.rays[r].xinput.map(|i| self.rays[i]);
        let yi = self.rays[r].yinput.map(|i| self.rays[i]);
        let ray = &mut self.rays[r];
        if let Some(xi) = &xi {
            process_x_input(ray, xi);
        }
        if let Some(yi) = &yi {
            process_y_input(ray, yi);
        }
        ray.ignore = match (&xi, &yi) {
            (None, Some(yi)) => yi.is_obscure(),
            (Some(xi), None) => xi.is_obscure(),
            (Some(xi), Some(yi)) => xi.is_obscure() && yi.is_obscure(),
            (None, None) => false,
        };
        if !ray.ignore && !self.grid.is_open(self.origin + ray.loc) {
            ray.xerr = ray.loc.x.abs();
            ray.xob = ray.xerr;
            ray.yerr = ray.loc.y.abs();
            ray.yob = ray.yerr;
        }
    }
}

fn process_x_input(ray: &mut Ray, xinput: &Ray) {
    if xinput.xob == 0 && xinput.yob == 0 {
        return;
    }
    let inherit = (xinput.xerr > 0 && ray.xob == 0)
        || (xinput.yerr <= 0 && xinput.yob > 0 && xinput.xerr > 0);
    if inherit {
        ray.xerr = xinput.xerr - xinput.yob;
        ray.yerr = xinput.yerr + xinput.yob;
        ray.xob = xinput.xob;
        ray.yob = xinput.yob;
    }
}

fn process_y_input(ray: &mut Ray, yinput: &Ray) {
    if yinput.xob == 0 && yinput.yob == 0 {
        return;
    }
    let inherit = (yinput.yerr > 0 && ray.yob == 0)
        || (yinput.xerr <= 0 && yinput.xob > 0 && yinput.yerr > 0);
    if inherit {
        ray.yerr = yinput.yerr - yinput.xob;
        ray.xerr = yinput.xerr + yinput.xob;
        ray.xob = yinput.xob;
        ray.yob = yinput.yob;
    }
}

impl FovAlgorithm for Diamond {
    fn compute(&self, grid: &mut FlagGrid, origin: Point, radius: i32, light_walls: bool) {
        let r2 = radius * radius;
        let visible: Vec<usize> = {
            let mut caster = Caster {
                grid,
                origin,
                rays: vec![Ray::default(); (grid.width() * grid.height()) as usize],
                perimeter: Vec::new(),
            };
            if let Some(start) = caster.ray_at(Point::ZERO) {
                caster.expand_from(start);
            }
            let mut next = 0;
            while next < caster.perimeter.len() {
                let r = caster.perimeter[next];
                next += 1;
                if caster.rays[r].loc.length_sq() <= r2 {
                    caster.merge_input(r);
                    if !caster.rays[r].ignore {
                        caster.expand_from(r);
                    }
                } else {
                    caster.rays[r].ignore = true;
                }
            }
            caster
                .perimeter
                .iter()
                .copied()
                .filter(|&r| !caster.rays[r].ignore && !caster.rays[r].is_obscure())
                .collect()
        };

        for idx in visible {
            if let Some(p) = grid.point(idx) {
                light(grid, p);
            }
        }
        light(grid, origin);
        if light_walls {
            let area = grid.bounds();
            finish(grid, origin, area);
        }
    }
}
