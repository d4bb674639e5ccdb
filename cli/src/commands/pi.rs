//! `prng pi` command - compute/reduce Monte Carlo estimate of π.

use parallel_rng_core::{
    uniform_signed, LaneRange, OsSeedSource, ParallelGenerator, RayonEngine, XorShift,
};

use crate::error::{CliError, CliResult};

/// Execute the `pi` command.
pub fn execute(lanes: usize, samples: usize, passes: usize) -> CliResult<()> {
    if samples == 0 {
        let reason = "samples must be positive".to_string();
        return Err(CliError::InvalidArgument(reason));
    }

    let range = LaneRange::flat(lanes);
    let mut generator = ParallelGenerator::<XorShift>::from_range(&range, None, &mut OsSeedSource)?;
    let engine = RayonEngine::new();

    // Compute: every lane counts its own hits inside the unit circle
    let started = std::time::Instant::now();
    let mut hits = vec![0u64; lanes];
    generator.run_passes(&engine, &mut hits, passes, |lane, hits| {
        for _ in 0..samples {
            let x = uniform_signed(&mut *lane);
            let y = uniform_signed(&mut *lane);
            if x * x + y * y < 1.0 {
                *hits += 1;
            }
        }
    })?;

    // Reduce: single sequential sum once every lane finished
    let total: u64 = hits.iter().sum();
    let estimate = estimate_pi(total, lanes, samples, passes);

    log::info!(
        "{} lanes x {} samples x {} passes on {} threads in {} ms",
        lanes,
        samples,
        passes,
        engine.current_num_threads(),
        started.elapsed().as_millis()
    );
    let error = (estimate - std::f64::consts::PI).abs();
    println!("pi ~= {:.6} (error {:.2e})", estimate, error);

    Ok(())
}

/// Four times the hit fraction; the point count is formed in `f64`
fn estimate_pi(hits: u64, lanes: usize, samples: usize, passes: usize) -> f64 {
    let points = lanes as f64 * samples as f64 * passes as f64;
    4.0 * hits as f64 / points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_pi() {
        assert_eq!(estimate_pi(3, 1, 2, 2), 3.0);
        assert_eq!(estimate_pi(0, 8, 8, 8), 0.0);
    }

    #[test]
    fn test_estimate_pi_point_count_beyond_usize() {
        // lanes × samples × passes = 2^96 points
        let estimate = estimate_pi(1 << 62, 1 << 32, 1 << 32, 1 << 32);
        assert_eq!(estimate, 4.0 * 2f64.powi(62) / 2f64.powi(96));
        assert!(estimate > 0.0);
    }
}
