use criterion::{criterion_group, criterion_main, Criterion};
use maze_mesh::{
    generators,
    grids::large_grid,
    islands::{self, IslandRule},
    units::{ColumnsCount, RowsCount},
    utils,
};

fn bench_recursive_backtracker_maze_32_u32(c: &mut Criterion) {
    c.bench_function("recursive_backtracker_maze_32_u32", move |b| {
        b.iter(|| {
            let mut g = large_grid(RowsCount(32), ColumnsCount(32)).unwrap();
            generators::recursive_backtracker(&mut g, &mut utils::seeded_rng(1));
            g
        })
    });
}

fn bench_adjust_density_32_u32(c: &mut Criterion) {
    c.bench_function("adjust_density_32_u32", move |b| {
        b.iter(|| {
            let mut g = large_grid(RowsCount(32), ColumnsCount(32)).unwrap();
            let mut rng = utils::seeded_rng(1);
            generators::recursive_backtracker(&mut g, &mut rng);
            generators::adjust_density(&mut g, 200, &mut rng)
        })
    });
}

fn bench_prune_islands_32_u32(c: &mut Criterion) {
    let mut g = large_grid(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = utils::seeded_rng(1);
    generators::recursive_backtracker(&mut g, &mut rng);
    generators::adjust_density(&mut g, 200, &mut rng);

    let components_grid = g.clone();
    c.bench_function("detached_components_32_u32", move |b| {
        b.iter(|| islands::detached_components(&components_grid))
    });

    c.bench_function("prune_islands_32_u32", move |b| {
        b.iter(|| {
            let mut pruned = g.clone();
            islands::prune_islands(&mut pruned, IslandRule::Detached)
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32_u32,
    bench_adjust_density_32_u32,
    bench_prune_islands_32_u32
);
criterion_main!(benches);
