//! Dispatch tests: engines, multi-pass runs and compute/reduce composition

use parallel_rng_core::dispatch::{ExecutionEngine, RayonEngine, SequentialEngine};
use parallel_rng_core::distributions::uniform_signed;
use parallel_rng_core::rng::{BitSource, MersenneTwister, ParallelGenerator, XorShift};
use parallel_rng_core::seed::SeedVector;
use std::sync::atomic::{AtomicUsize, Ordering};

fn xorshift_seed(lanes: usize) -> SeedVector {
    let words: Vec<u32> = (0..lanes as u32 * 4)
        .map(|w| w.wrapping_mul(0x2545_f491).wrapping_add(0x6c07_8965))
        .collect();
    SeedVector::new(words)
}

/// Count points of `[-1, 1)²` inside the unit circle, per lane
fn hit_counts<E: ExecutionEngine>(
    engine: &E,
    lanes: usize,
    samples: usize,
    passes: usize,
) -> Vec<u64> {
    let mut generator = ParallelGenerator::<XorShift>::new(lanes, xorshift_seed(lanes)).unwrap();
    let mut hits = vec![0u64; lanes];

    generator
        .run_passes(engine, &mut hits, passes, |lane, hits| {
            for _ in 0..samples {
                let x = uniform_signed(lane);
                let y = uniform_signed(lane);
                if x * x + y * y < 1.0 {
                    *hits += 1;
                }
            }
        })
        .unwrap();

    hits
}

#[test]
fn test_compute_then_reduce_estimates_pi() {
    let lanes = 64;
    let samples = 1024;
    let passes = 8;

    // Compute phase across all lanes; dispatch returning is the barrier
    let hits = hit_counts(&RayonEngine::new(), lanes, samples, passes);

    // Reduce phase as a single sequential lane
    let total = std::sync::Mutex::new(0u64);
    SequentialEngine::new().dispatch(vec![&hits], |_, hits| {
        *total.lock().unwrap() = hits.iter().sum();
    });
    let sum = total.into_inner().unwrap();

    let points = (lanes * samples * passes) as f64;
    let pi = 4.0 * sum as f64 / points;
    let error = (pi - std::f64::consts::PI).abs();
    assert!(error < 0.02, "pi estimate {}", pi);
}

#[test]
fn test_hit_counts_independent_of_engine() {
    let sequential = hit_counts(&SequentialEngine::new(), 16, 256, 3);
    let reversed = hit_counts(&SequentialEngine::reversed(), 16, 256, 3);
    let threaded = hit_counts(&RayonEngine::with_threads(3).unwrap(), 16, 256, 3);

    assert_eq!(sequential, reversed);
    assert_eq!(sequential, threaded);
}

#[test]
fn test_passes_equal_one_long_pass() {
    let mut split = ParallelGenerator::<MersenneTwister>::new(4, xorshift_seed(4)).unwrap();
    let mut single = ParallelGenerator::<MersenneTwister>::new(4, xorshift_seed(4)).unwrap();
    let engine = RayonEngine::new();

    let mut split_sums = vec![0u64; 4];
    split
        .run_passes(&engine, &mut split_sums, 5, |lane, sum| {
            for _ in 0..300 {
                *sum = sum.wrapping_add(u64::from(lane.next_u32()));
            }
        })
        .unwrap();

    let mut single_sums = vec![0u64; 4];
    single
        .run_passes(&engine, &mut single_sums, 1, |lane, sum| {
            for _ in 0..1500 {
                *sum = sum.wrapping_add(u64::from(lane.next_u32()));
            }
        })
        .unwrap();

    assert_eq!(split_sums, single_sums);
}

#[test]
fn test_every_lane_body_runs_once_per_dispatch() {
    let calls = AtomicUsize::new(0);
    let mut generator = ParallelGenerator::<XorShift>::new(32, xorshift_seed(32)).unwrap();
    let lanes = generator.lanes();
    let ids: Vec<usize> = lanes.iter().map(|lane| lane.id()).collect();

    RayonEngine::new().dispatch(lanes, |id, lane| {
        assert_eq!(id, lane.id());
        calls.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(calls.load(Ordering::SeqCst), 32);
    assert_eq!(ids, (0..32).collect::<Vec<_>>());
}
