use life_core::engine::{step, step_parallel};
use life_core::world;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::Instant;

fn main() {
    let rows = 1000;
    let columns = 1000;
    let steps = 10;
    println!("Benchmarking {steps} generations on a {rows}x{columns} world");

    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let start_world = world::random(rows, columns, &mut rng);

    let mut sequential = start_world.clone();
    let start = Instant::now();
    for _ in 0..steps {
        sequential = step(&sequential).world;
    }
    let duration_sequential = start.elapsed();
    println!("Time for {steps} steps (sequential): {duration_sequential:?}");
    println!("Avg time per step (sequential): {:?}", duration_sequential / steps);

    let mut parallel = start_world;
    let start = Instant::now();
    for _ in 0..steps {
        parallel = step_parallel(&parallel).world;
    }
    let duration_parallel = start.elapsed();
    println!("Time for {steps} steps (parallel): {duration_parallel:?}");
    println!("Avg time per step (parallel): {:?}", duration_parallel / steps);

    assert_eq!(sequential, parallel, "sequential and parallel steps diverged");
    println!(
        "Population after {steps} steps: {}",
        world::population(&sequential)
    );
    println!(
        "Speedup: {:.2}x",
        duration_sequential.as_secs_f64() / duration_parallel.as_secs_f64().max(f64::EPSILON)
    );
}
