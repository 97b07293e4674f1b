use criterion::{criterion_group, criterion_main, Criterion};
use maze_mesh::{
    generate,
    grids::large_grid,
    mesh::build_mesh,
    units::{CellSize, ColumnsCount, RowsCount, WallHeight},
    GenerationParamsBuilder,
};

fn bench_build_mesh_64_u32(c: &mut Criterion) {
    let g = large_grid(RowsCount(64), ColumnsCount(64)).unwrap();
    c.bench_function("build_mesh_64_u32", move |b| {
        b.iter(|| build_mesh(&g, CellSize(2.0), WallHeight(2.4), true).unwrap())
    });
}

fn bench_generate_64(c: &mut Criterion) {
    let params = GenerationParamsBuilder::new()
        .dimensions(64, 64)
        .seed(7)
        .iterations(100)
        .build();
    c.bench_function("generate_64", move |b| {
        b.iter(|| generate(&params).unwrap())
    });
}

criterion_group!(benches, bench_build_mesh_64_u32, bench_generate_64);
criterion_main!(benches);
