use rlfl_core::{Point, Range};

use crate::traits::AstarPather;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug)]
struct Node {
    cost: f32,
    priority: f32,
    parent: Option<usize>,
    state: State,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: 0.0,
            priority: 0.0,
            parent: None,
            state: State::Unvisited,
        }
    }
}

/// Open set kept sorted by descending priority so the best node pops from
/// the tail. Among equal priorities the most recently pushed pops first.
struct OpenSet {
    items: Vec<usize>,
}

impl OpenSet {
    fn push(&mut self, idx: usize, nodes: &[Node]) {
        let p = nodes[idx].priority;
        let at = self.items.partition_point(|&i| nodes[i].priority >= p);
        self.items.insert(at, idx);
    }

    fn pop(&mut self) -> Option<usize> {
        self.items.pop()
    }

    fn remove(&mut self, idx: usize) {
        if let Some(pos) = self.items.iter().position(|&i| i == idx) {
            self.items.remove(pos);
        }
    }
}

/// Shortest path from `from` to `to` inside `bounds` using A*.
///
/// Returns the full path including both endpoints, or `None` when the goal
/// cannot be reached. The origin itself need not be passable.
pub fn astar_path<P: AstarPather>(
    pather: &P,
    bounds: Range,
    from: Point,
    to: Point,
) -> Option<Vec<Point>> {
    if !bounds.contains(from) || !bounds.contains(to) {
        return None;
    }
    let width = bounds.width();
    let index = |p: Point| ((p.y - bounds.min.y) * width + (p.x - bounds.min.x)) as usize;
    let point = |i: usize| {
        Point::new(
            bounds.min.x + (i as i32) % width,
            bounds.min.y + (i as i32) / width,
        )
    };

    let mut nodes = vec![Node::default(); bounds.len()];
    let mut open = OpenSet { items: Vec::new() };
    let start = index(from);
    let goal = index(to);
    nodes[start] = Node {
        cost: 0.0,
        priority: pather.estimate(from, to) as f32,
        parent: None,
        state: State::Open,
    };
    open.push(start, &nodes);

    let mut nbuf = Vec::with_capacity(8);
    let mut expanded = 0usize;
    let found = loop {
        let Some(ci) = open.pop() else {
            break false;
        };
        if ci == goal {
            break true;
        }
        nodes[ci].state = State::Closed;
        expanded += 1;
        let cp = point(ci);
        let cost = nodes[ci].cost;

        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);
        for &np in &nbuf {
            if !bounds.contains(np) {
                continue;
            }
            let ni = index(np);
            let new_cost = cost + pather.cost(cp, np);
            let node = nodes[ni];
            if node.state != State::Unvisited && new_cost >= node.cost {
                continue;
            }
            if node.state == State::Open {
                open.remove(ni);
            }
            nodes[ni] = Node {
                cost: new_cost,
                priority: new_cost + pather.estimate(np, to) as f32,
                parent: Some(ci),
                state: State::Open,
            };
            open.push(ni, &nodes);
        }
    };
    log::trace!("astar {from} -> {to}: found={found}, expanded {expanded} nodes");

    if !found {
        return None;
    }
    let mut path = Vec::new();
    let mut ci = Some(goal);
    while let Some(i) = ci {
        path.push(point(i));
        ci = nodes[i].parent;
    }
    path.reverse();
    Some(path)
}
