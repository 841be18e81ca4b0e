use crate::error::VerificationError;
use crate::solution::Solution;
use std::collections::HashMap;

/// Score of the machine the reference time limit applies to
pub const REFERENCE_SCORE: f64 = 2000.;

/// Time limit in seconds on a machine with the reference score
pub const REFERENCE_TIME_LIMIT: f64 = 1800.;

/// Single-threaded benchmark score of a processor, if known
pub trait BenchmarkLookup {
    fn score(&self, processor: &str) -> Option<f64>;
}

impl BenchmarkLookup for HashMap<String, f64> {
    fn score(&self, processor: &str) -> Option<f64> {
        self.get(processor).copied()
    }
}

/// Time limit in seconds for a processor with the given benchmark score
pub fn time_limit(score: f64) -> f64 {
    let scaling_factor = REFERENCE_SCORE / score;
    scaling_factor * REFERENCE_TIME_LIMIT
}

/// Checks the reported solution time against the limit normalized for the reported processor
pub fn check(
    solution: &Solution,
    benchmarks: &dyn BenchmarkLookup,
) -> Result<f64, VerificationError> {
    let score = benchmarks
        .score(&solution.processor)
        .ok_or_else(|| VerificationError::UnknownProcessor {
            processor: solution.processor.clone(),
        })?;

    let limit = time_limit(score);
    if solution.time > limit {
        return Err(VerificationError::TimeLimitExceeded {
            time: solution.time,
            limit,
        });
    }
    Ok(limit)
}
