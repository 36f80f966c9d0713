use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rlfl_core::Point;

use crate::traits::WeightedPather;

/// Heap entry ordered so that `BinaryHeap` pops the smallest distance first.
#[derive(Clone, Copy, Debug)]
struct Entry {
    idx: usize,
    dist: f32,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.total_cmp(&self.dist)
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A dense field of tentative distances over a `width × height` grid.
///
/// Cells start unreached. Goals are seeded with [`add_goal`](Self::add_goal),
/// then [`scan`](Self::scan) relaxes the whole field from every reached cell
/// at once.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: i32,
    height: i32,
    dist: Vec<f32>,
}

impl DistanceField {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            dist: vec![f32::INFINITY; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Seed `p` with distance `value`. Points outside the field are ignored.
    pub fn add_goal(&mut self, p: Point, value: f32) {
        if let Some(i) = self.idx(p) {
            self.dist[i] = self.dist[i].min(value);
        }
    }

    /// Number of seeded or reached cells.
    pub fn reached(&self) -> usize {
        self.dist.iter().filter(|d| d.is_finite()).count()
    }

    /// Distance at `p`, `None` when unreached or outside.
    pub fn get(&self, p: Point) -> Option<f32> {
        self.idx(p).map(|i| self.dist[i]).filter(|d| d.is_finite())
    }

    /// Relax every cell from all currently reached cells.
    pub fn scan<P: WeightedPather>(&mut self, pather: &P) {
        let mut open: BinaryHeap<Entry> = self
            .dist
            .iter()
            .enumerate()
            .filter(|(_, d)| d.is_finite())
            .map(|(idx, &dist)| Entry { idx, dist })
            .collect();

        let mut nbuf = Vec::with_capacity(8);
        let mut settled = 0usize;
        while let Some(Entry { idx, dist }) = open.pop() {
            // Stale entry: a shorter distance was found after this push.
            if dist > self.dist[idx] {
                continue;
            }
            settled += 1;
            let cp = self.point(idx);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in &nbuf {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = dist + pather.cost(cp, np);
                if tentative < self.dist[ni] {
                    self.dist[ni] = tentative;
                    open.push(Entry {
                        idx: ni,
                        dist: tentative,
                    });
                }
            }
        }
        log::trace!("distance field scan settled {settled} cells");
    }

    /// Turn a goal-distance field into a flee field.
    ///
    /// Every reached distance `d` becomes `-3.5 * 50 * d / (50 + d)`, so the
    /// farthest cells become the most attractive. Rescanning afterwards lets
    /// cells near the goal find their way out.
    pub fn remap_safety(&mut self) {
        for d in self.dist.iter_mut().filter(|d| d.is_finite()) {
            *d = -3.5 * 50.0 * (*d / (50.0 + *d));
        }
    }

    /// Iterate over every cell with its distance, `None` when unreached.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Option<f32>)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .map(|(i, &d)| (self.point(i), d.is_finite().then_some(d)))
    }
}
