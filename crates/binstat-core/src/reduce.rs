//! Weighted reduction over (midpoint, frequency) pairs.
//!
//! Grouped-data statistics: the mean and population standard deviation are
//! computed from class midpoints weighted by class frequencies rather than
//! from raw observations. Both reductions are sums, so they split into
//! per-chunk partials combined after the parallel region. Integer frequency
//! totals are exact for any worker count; float sums can differ between
//! sequential and parallel runs by reassociation error only (callers should
//! compare with a small relative tolerance, not bit equality).

use serde::Serialize;

use crate::classes::ClassTable;
use crate::exec::{self, ExecPolicy};

/// Undefined statistical result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    /// All class frequencies are zero; mean and standard deviation are
    /// undefined rather than a silent divide-by-zero.
    ZeroTotalFrequency,
    /// Mean is zero; the coefficient of variation is undefined.
    ZeroMean,
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::ZeroTotalFrequency => {
                write!(f, "total class frequency is zero, statistics are undefined")
            }
            StatsError::ZeroMean => {
                write!(f, "mean is zero, coefficient of variation is undefined")
            }
        }
    }
}

impl std::error::Error for StatsError {}

/// Descriptive statistics for one sample, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Weighted mean of class midpoints.
    pub mean: f64,
    /// Weighted population standard deviation.
    pub std_dev: f64,
    /// Coefficient of variation, in percent.
    pub cv: f64,
}

/// Weighted mean: Σ(midpoint·frequency) / Σ(frequency).
pub fn weighted_mean(
    midpoints: &[f64],
    frequencies: &[u64],
    policy: &ExecPolicy,
) -> Result<f64, StatsError> {
    debug_assert_eq!(midpoints.len(), frequencies.len());

    let partials = exec::fold_chunks(midpoints.len(), policy, |range| {
        let mut sum = 0.0;
        let mut total = 0u64;
        for i in range {
            sum += midpoints[i] * frequencies[i] as f64;
            total += frequencies[i];
        }
        (sum, total)
    });

    let (sum, total) = partials
        .into_iter()
        .fold((0.0, 0u64), |(s, t), (ps, pt)| (s + ps, t + pt));
    if total == 0 {
        return Err(StatsError::ZeroTotalFrequency);
    }
    Ok(sum / total as f64)
}

/// Weighted population standard deviation:
/// sqrt(Σ(frequency·(midpoint − mean)²) / Σ(frequency)).
pub fn weighted_std_dev(
    midpoints: &[f64],
    frequencies: &[u64],
    mean: f64,
    policy: &ExecPolicy,
) -> Result<f64, StatsError> {
    debug_assert_eq!(midpoints.len(), frequencies.len());

    let partials = exec::fold_chunks(midpoints.len(), policy, |range| {
        let mut sum = 0.0;
        let mut total = 0u64;
        for i in range {
            let dev = midpoints[i] - mean;
            sum += frequencies[i] as f64 * dev * dev;
            total += frequencies[i];
        }
        (sum, total)
    });

    let (sum, total) = partials
        .into_iter()
        .fold((0.0, 0u64), |(s, t), (ps, pt)| (s + ps, t + pt));
    if total == 0 {
        return Err(StatsError::ZeroTotalFrequency);
    }
    Ok((sum / total as f64).sqrt())
}

/// Coefficient of variation in percent: std_dev / mean × 100.
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> Result<f64, StatsError> {
    if mean == 0.0 {
        return Err(StatsError::ZeroMean);
    }
    Ok(std_dev / mean * 100.0)
}

/// Run the full reduction over a class table.
pub fn summarize(table: &ClassTable, policy: &ExecPolicy) -> Result<SampleSummary, StatsError> {
    let mean = weighted_mean(&table.midpoints, &table.frequencies, policy)?;
    let std_dev = weighted_std_dev(&table.midpoints, &table.frequencies, mean, policy)?;
    let cv = coefficient_of_variation(std_dev, mean)?;
    Ok(SampleSummary { mean, std_dev, cv })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{IntervalSpec, OutOfRangePolicy, build_class_table};

    const SEQ: ExecPolicy = ExecPolicy::Sequential;

    #[test]
    fn worked_example_mean() {
        // Sample [150, 151, 155, 160] at width 4 groups to midpoints
        // [152, 156, 160] with frequencies [2, 1, 1].
        let midpoints = [152.0, 156.0, 160.0];
        let frequencies = [2, 1, 1];
        let mean = weighted_mean(&midpoints, &frequencies, &SEQ).unwrap();
        assert_eq!(mean, 155.0);

        let std_dev = weighted_std_dev(&midpoints, &frequencies, mean, &SEQ).unwrap();
        assert!((std_dev - 11.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_class_has_zero_spread() {
        let mean = weighted_mean(&[7.0], &[10], &SEQ).unwrap();
        assert_eq!(mean, 7.0);
        let std_dev = weighted_std_dev(&[7.0], &[10], mean, &SEQ).unwrap();
        assert_eq!(std_dev, 0.0);
    }

    #[test]
    fn zero_total_frequency_is_an_explicit_error() {
        assert_eq!(
            weighted_mean(&[1.0, 2.0], &[0, 0], &SEQ),
            Err(StatsError::ZeroTotalFrequency)
        );
        assert_eq!(
            weighted_std_dev(&[1.0, 2.0], &[0, 0], 1.5, &SEQ),
            Err(StatsError::ZeroTotalFrequency)
        );
        assert_eq!(
            weighted_mean(&[], &[], &SEQ),
            Err(StatsError::ZeroTotalFrequency)
        );
    }

    #[test]
    fn zero_mean_fails_cv() {
        assert_eq!(
            coefficient_of_variation(1.0, 0.0),
            Err(StatsError::ZeroMean)
        );
        assert_eq!(coefficient_of_variation(5.0, 50.0), Ok(10.0));
    }

    #[test]
    fn empty_sample_surfaces_no_result_not_nan() {
        let table = build_class_table(
            &[],
            &IntervalSpec::FixedWidth(4.0),
            OutOfRangePolicy::Drop,
            &SEQ,
        )
        .unwrap();
        assert_eq!(summarize(&table, &SEQ), Err(StatsError::ZeroTotalFrequency));
    }

    #[test]
    fn parallel_matches_sequential_within_tolerance() {
        let midpoints: Vec<f64> = (0..1000).map(|i| 100.0 + i as f64 * 0.37).collect();
        let frequencies: Vec<u64> = (0..1000u64).map(|i| (i % 17) + 1).collect();

        let seq_mean = weighted_mean(&midpoints, &frequencies, &SEQ).unwrap();
        let seq_sd = weighted_std_dev(&midpoints, &frequencies, seq_mean, &SEQ).unwrap();

        for workers in [2, 3, 7] {
            let policy = ExecPolicy::Parallel { workers };
            let mean = weighted_mean(&midpoints, &frequencies, &policy).unwrap();
            let sd = weighted_std_dev(&midpoints, &frequencies, mean, &policy).unwrap();
            assert!((mean - seq_mean).abs() / seq_mean.abs() < 1e-9, "workers={workers}");
            assert!((sd - seq_sd).abs() / seq_sd.abs() < 1e-9, "workers={workers}");
        }
    }

    #[test]
    fn summarize_runs_the_full_reduction() {
        let table = build_class_table(
            &[150.0, 151.0, 155.0, 160.0],
            &IntervalSpec::FixedWidth(4.0),
            OutOfRangePolicy::Drop,
            &SEQ,
        )
        .unwrap();
        let summary = summarize(&table, &SEQ).unwrap();
        assert_eq!(summary.mean, 155.0);
        assert!((summary.cv - summary.std_dev / summary.mean * 100.0).abs() < 1e-12);
    }
}
