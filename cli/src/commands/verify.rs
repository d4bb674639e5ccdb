//! `prng verify` command - run the equivalence protocol.

use std::fs;

use parallel_rng_core::{check_equivalence, EquivalenceConfig, OsSeedSource, RayonEngine};

use crate::error::{CliError, CliResult};

/// Execute the `verify` command.
pub fn execute(
    kind: Option<&str>,
    lanes: Option<usize>,
    samples: Option<usize>,
    threads: Option<usize>,
    config_path: Option<&str>,
    json: bool,
) -> CliResult<()> {
    let mut config = match config_path {
        Some(path) => EquivalenceConfig::from_json(&fs::read_to_string(path)?)?,
        None => EquivalenceConfig::default(),
    };

    if let Some(kind) = kind {
        config.kind = kind.parse()?;
    }
    if let Some(lanes) = lanes {
        config.lane_count = lanes;
    }
    if let Some(samples) = samples {
        config.samples_per_lane = samples;
    }
    if threads.is_some() {
        config.threads = threads;
    }

    log::info!(
        "{} test for {} samples in lane {} of {}",
        config.kind,
        config.samples_per_lane,
        config.lane_count.saturating_sub(1),
        config.lane_count
    );

    let engine = RayonEngine::from_threads(config.threads)?;
    let started = std::time::Instant::now();
    let report = check_equivalence(&config, &engine, &mut OsSeedSource)?;
    log::info!(
        "{} threads, time = {} ms",
        engine.current_num_threads(),
        started.elapsed().as_millis()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    if report.is_match() {
        Ok(())
    } else {
        Err(CliError::Mismatch(report.outcome.to_string()))
    }
}
