use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tessera_grid::{Coord, Grid, Terrain};
use tessera_paths::{find_path, find_reachable, is_path_valid};

/// Open map with a lattice of walls, some rough ground and a door in every
/// third wall segment.
fn dungeon(width: i32, height: i32) -> Grid {
    let mut grid = Grid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let c = Coord::new(x, y);
            let terrain = match (x % 8, y % 8) {
                (4, 0..=5) if (x / 8 + y / 8) % 3 == 0 => Terrain::ClosedDoor,
                (4, 0..=5) => Terrain::Wall,
                (1 | 2, 6) => Terrain::Difficult,
                (6, 2) => Terrain::Slippery,
                _ => Terrain::Open,
            };
            grid.set_terrain(c, terrain).expect("in bounds");
        }
    }
    grid
}

fn bench_solvers(c: &mut Criterion) {
    let grid = dungeon(64, 64);
    let start = Coord::new(0, 0);
    let goal = Coord::new(63, 63);

    let mut group = c.benchmark_group("tessera-paths/64x64");

    for budget in [4.0, 12.0, 40.0] {
        group.bench_function(format!("find_reachable_{budget}"), |b| {
            b.iter(|| {
                let r = find_reachable(&grid, black_box(budget), start).expect("query");
                black_box(r.len());
            })
        });
    }

    group.bench_function("find_path", |b| {
        b.iter(|| {
            let route = find_path(&grid, start, black_box(goal), false).expect("query");
            black_box(route.map(|r| r.path.len()));
        })
    });

    group.bench_function("find_path_ignore_doors", |b| {
        b.iter(|| {
            let route = find_path(&grid, start, black_box(goal), true).expect("query");
            black_box(route.map(|r| r.path.len()));
        })
    });

    let route = find_path(&grid, start, goal, false)
        .expect("query")
        .expect("goal reachable");
    group.bench_function("is_path_valid", |b| {
        b.iter(|| black_box(is_path_valid(&grid, 1000.0, black_box(&route.path))))
    });

    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
