//! `prng sample` command - print per-lane streams.

use parallel_rng_core::{
    gaussian_polar, uniform01, uniform_signed, Algorithm, BitSource, GeneratorKind, Lane,
    LaneRange, MersenneTwister, OsSeedSource, ParallelGenerator, SeedVector, SequentialEngine,
    XorShift,
};

use super::parse_seed_words;
use crate::error::CliResult;
use crate::Distribution;

/// Execute the `sample` command.
pub fn execute(
    kind: &str,
    lanes: usize,
    count: usize,
    seed: Option<&str>,
    dist: Distribution,
) -> CliResult<()> {
    let kind: GeneratorKind = kind.parse()?;
    let seed = seed.map(parse_seed_words).transpose()?;
    let seed = seed.map(SeedVector::new);

    let rows = match kind {
        GeneratorKind::MersenneTwister => draw::<MersenneTwister>(lanes, count, seed, dist)?,
        GeneratorKind::XorShift => draw::<XorShift>(lanes, count, seed, dist)?,
    };

    for (lane, row) in rows.iter().enumerate() {
        println!("lane {:>4}: {}", lane, row.join(" "));
    }

    Ok(())
}

fn draw<A: Algorithm>(
    lanes: usize,
    count: usize,
    seed: Option<SeedVector>,
    dist: Distribution,
) -> CliResult<Vec<Vec<String>>> {
    let range = LaneRange::flat(lanes);
    let mut generator = ParallelGenerator::<A>::from_range(&range, seed, &mut OsSeedSource)?;
    log::debug!("seed fingerprint {}", generator.seed().fingerprint());

    let engine = SequentialEngine::new();
    let values = generator.fill_with(&engine, count, |lane| format_sample(lane, dist));

    Ok(values
        .chunks(count.max(1))
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect())
}

/// One output cell
#[derive(Clone, Copy, Default)]
enum Sample {
    #[default]
    Empty,
    Bits(i32),
    Real(f64),
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sample::Empty => Ok(()),
            Sample::Bits(v) => write!(f, "{}", v),
            Sample::Real(v) => write!(f, "{:.8}", v),
        }
    }
}

fn format_sample<A: Algorithm>(lane: &mut Lane<'_, A>, dist: Distribution) -> Sample {
    match dist {
        Distribution::Bits => Sample::Bits(lane.next_i32()),
        Distribution::Uniform01 => Sample::Real(uniform01(lane)),
        Distribution::Signed => Sample::Real(uniform_signed(lane)),
        Distribution::Gaussian => Sample::Real(gaussian_polar(lane)),
    }
}
