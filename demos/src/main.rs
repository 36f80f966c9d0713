//! ASCII tour of the library: field of view, paths, path maps and
//! projections on a small hand-drawn map.
//!
//! Run: cargo run --bin rlfl-demo [seed]

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rlfl::{CellFlags, FovKind, GridId, PathKind, Point, ProjectFlags, Rlfl};

const MAP: &[&str] = &[
    "##############################",
    "#............#...............#",
    "#............#...............#",
    "#....##......#......####.....#",
    "#....##.............#..#.....#",
    "#...................#..#.....#",
    "#............#......##.#.....#",
    "#............#...............#",
    "#######.######...............#",
    "#............#.......#.......#",
    "#............#...............#",
    "##############################",
];

fn load(rl: &mut Rlfl) -> rlfl::Result<GridId> {
    let height = MAP.len() as i32;
    let width = MAP[0].len() as i32;
    let id = rl.new_grid(width, height)?;
    for (y, row) in MAP.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch != '#' {
                let p = Point::new(x as i32, y as i32);
                rl.set_flag(id, p, CellFlags::OPEN | CellFlags::WALK)?;
            }
        }
    }
    Ok(id)
}

/// Print the map, drawing `mark` where `marked` holds and `@` at `at`.
fn draw(
    rl: &Rlfl,
    id: GridId,
    at: Point,
    mark: char,
    marked: impl Fn(Point, CellFlags) -> bool,
) -> rlfl::Result<()> {
    let grid = rl.grid(id)?;
    for y in 0..grid.height() {
        let row: String = (0..grid.width())
            .map(|x| {
                let p = Point::new(x, y);
                let f = grid.at(p);
                if p == at {
                    '@'
                } else if marked(p, f) {
                    mark
                } else if f.contains(CellFlags::OPEN) {
                    '.'
                } else {
                    '#'
                }
            })
            .collect();
        println!("{row}");
    }
    println!();
    Ok(())
}

fn run(seed: u64) -> rlfl::Result<()> {
    let mut rl = Rlfl::new();
    let id = load(&mut rl)?;
    let player = Point::new(3, 2);

    for kind in FovKind::ALL {
        rl.fov(id, player, 10, kind, true)?;
        println!("{kind:?} field of view, radius 10:");
        draw(&rl, id, player, '*', |_, f| f.contains(CellFlags::SEEN))?;
    }

    let goal = Point::new(25, 9);
    let pid = rl.create_path(id, player, goal, PathKind::AStar, None, ProjectFlags::NONE, 0.5)?;
    println!("A* path to {goal}, {} steps:", rl.path_size(pid)?);
    draw(&rl, id, player, 'o', |_, f| f.contains(CellFlags::PATH))?;
    rl.delete_path(pid)?;

    let monster = Point::new(8, 4);
    let flee = rl.path_fill_safety_map(id, monster, 0.0)?;
    let mut route = rl.path_map(flee)?.walk(player, true, 100);
    route.push(player);
    println!("fleeing from the monster at {monster}:");
    draw(&rl, id, monster, '~', |q, _| route.contains(&q))?;
    rl.path_wipe_map(flee)?;

    let breath = rl.project_cone(id, player, Point::new(12, 7), 4, None, ProjectFlags::NONE)?;
    let cells: Vec<Point> = rl.projection(breath)?.steps().to_vec();
    println!("cone of radius 4, {} rings:", rl.project_rings(breath)?.len());
    draw(&rl, id, player, '%', |q, _| cells.contains(&q))?;
    rl.delete_projection(breath)?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let spot = rl.scatter(id, player, 5, CellFlags::OPEN, true, &mut rng)?;
    println!("random visible spot within 5 of {player}: {spot}");
    Ok(())
}

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    if let Err(e) = run(seed) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
