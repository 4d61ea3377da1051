//! One-shot processing with the size and timing figures a host displays.

use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use crate::algorithm::Algorithm;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Compress,
    Decompress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub algorithm: Algorithm,
    pub mode: Mode,
    pub input_size: usize,
    pub output_size: usize,
    /// Uncompressed size over compressed size, to two decimals.
    pub compression_ratio: f64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub output: Vec<u8>,
    pub stats: Stats,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let exact = numerator as f64 / denominator as f64;
    (exact * 100.0).round() / 100.0
}

/// Runs `algorithm` over `input` in the given direction and measures it.
///
/// # Errors
///
/// Propagates the codec's error; no stats are produced for a failed run.
pub fn process(algorithm: Algorithm, mode: Mode, input: &[u8]) -> Result<Processed> {
    let started = Instant::now();
    let output = match mode {
        Mode::Compress => algorithm.compress(input)?,
        Mode::Decompress => algorithm.decompress(input)?,
    };
    let elapsed = started.elapsed();

    let compression_ratio = match mode {
        Mode::Compress => ratio(input.len(), output.len()),
        Mode::Decompress => ratio(output.len(), input.len()),
    };
    let stats = Stats {
        algorithm,
        mode,
        input_size: input.len(),
        output_size: output.len(),
        compression_ratio,
        elapsed,
    };

    info!(
        "{algorithm} {mode:?}: {} -> {} bytes (ratio {compression_ratio}) in {elapsed:?}",
        stats.input_size, stats.output_size
    );
    Ok(Processed { output, stats })
}

/// Whether `decompress(compress(input)) == input` for `algorithm`.
///
/// # Errors
///
/// Propagates a codec error from either direction.
pub fn verify_round_trip(algorithm: Algorithm, input: &[u8]) -> Result<bool> {
    let compressed = algorithm.compress(input)?;
    Ok(algorithm.decompress(&compressed)? == input)
}
