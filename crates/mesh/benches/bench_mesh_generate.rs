use std::hint::black_box;
use std::time::Instant;

use curveworld_mesh::{ground_grid, subdivided_cube};

fn bench_cube(resolution: u32, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(subdivided_cube(black_box(resolution)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cube (res={resolution}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_ground(half_extent: f32, resolution: u32, iterations: usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(ground_grid(black_box(half_extent), black_box(resolution)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  ground (res={resolution}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Mesh Generation Benchmarks ===\n");

    println!("Subdivided cube:");
    bench_cube(1, 10000);
    bench_cube(10, 1000);
    bench_cube(50, 100);

    println!("\nGround grid:");
    bench_ground(20.0, 1, 10000);
    bench_ground(20.0, 100, 100);
    bench_ground(20.0, 500, 10);

    println!("\n=== Done ===");
}
