//! Sequential vs parallel comparison harness.
//!
//! Runs the full pipeline (class table → mean → standard deviation → CV)
//! for the two measured samples under a sequential policy and again under a
//! parallel policy, over identical inputs, and reports wall-clock time for
//! each along with the derived speedup. Under the parallel policy the two
//! per-sample pipelines themselves run as concurrent scoped tasks joined
//! before any result is read.

use std::thread;
use std::time::Instant;

use serde::Serialize;

use crate::classes::{BinError, ClassTable, IntervalSpec, OutOfRangePolicy, build_class_table};
use crate::exec::ExecPolicy;
use crate::reduce::{SampleSummary, StatsError, summarize};

/// Failure anywhere in the class-table → reduction pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Bin(BinError),
    Stats(StatsError),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Bin(e) => write!(f, "binning failed: {e}"),
            PipelineError::Stats(e) => write!(f, "reduction failed: {e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<BinError> for PipelineError {
    fn from(e: BinError) -> Self {
        PipelineError::Bin(e)
    }
}

impl From<StatsError> for PipelineError {
    fn from(e: StatsError) -> Self {
        PipelineError::Stats(e)
    }
}

/// One sample's binned table plus its reduced statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleResult {
    pub table: ClassTable,
    pub summary: SampleSummary,
}

/// Results of one timed run over both samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub heights: SampleResult,
    pub weights: SampleResult,
    /// Wall-clock time for the whole run, in seconds.
    pub elapsed_secs: f64,
}

/// Full comparison: the same inputs run sequentially and in parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub sequential: RunResult,
    pub parallel: RunResult,
    /// `sequential / parallel` elapsed time, or `None` when the parallel
    /// time is too small to measure.
    pub speedup: Option<f64>,
    /// Worker count used by the parallel run.
    pub workers: usize,
}

/// Inputs shared by both runs of a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonInput<'a> {
    pub heights: &'a [f64],
    pub weights: &'a [f64],
    pub height_spec: IntervalSpec,
    pub weight_spec: IntervalSpec,
    pub out_of_range: OutOfRangePolicy,
}

/// Bin one sample and reduce it under the given policy.
pub fn run_pipeline(
    sample: &[f64],
    spec: &IntervalSpec,
    out_of_range: OutOfRangePolicy,
    policy: &ExecPolicy,
) -> Result<SampleResult, PipelineError> {
    let table = build_class_table(sample, spec, out_of_range, policy)?;
    let summary = summarize(&table, policy)?;
    Ok(SampleResult { table, summary })
}

/// Run both sample pipelines under `policy`, timed.
///
/// Sequentially the two pipelines run back to back on the caller thread;
/// under a parallel policy they run as two scoped tasks, mirroring the
/// inner data-parallel fan-out with an outer task-level one.
pub fn timed_run(input: &ComparisonInput<'_>, policy: &ExecPolicy) -> Result<RunResult, PipelineError> {
    let start = Instant::now();

    let (heights, weights) = match policy {
        ExecPolicy::Sequential => (
            run_pipeline(input.heights, &input.height_spec, input.out_of_range, policy)?,
            run_pipeline(input.weights, &input.weight_spec, input.out_of_range, policy)?,
        ),
        ExecPolicy::Parallel { .. } => {
            let (h, w) = thread::scope(|s| {
                let h = s.spawn(|| {
                    run_pipeline(input.heights, &input.height_spec, input.out_of_range, policy)
                });
                let w = s.spawn(|| {
                    run_pipeline(input.weights, &input.weight_spec, input.out_of_range, policy)
                });
                (
                    h.join().expect("height pipeline panicked"),
                    w.join().expect("weight pipeline panicked"),
                )
            });
            (h?, w?)
        }
    };

    let elapsed_secs = start.elapsed().as_secs_f64();
    log::debug!(
        "{:?} run over {}+{} observations took {elapsed_secs:.6}s",
        policy,
        input.heights.len(),
        input.weights.len()
    );

    Ok(RunResult {
        heights,
        weights,
        elapsed_secs,
    })
}

/// Run the comparison: one sequential pass, one parallel pass with
/// `workers` threads, identical inputs for both.
pub fn compare(input: &ComparisonInput<'_>, workers: usize) -> Result<ComparisonReport, PipelineError> {
    let sequential = timed_run(input, &ExecPolicy::Sequential)?;
    let parallel_policy = ExecPolicy::Parallel { workers };
    let parallel = timed_run(input, &parallel_policy)?;

    let speedup = speedup(sequential.elapsed_secs, parallel.elapsed_secs);

    Ok(ComparisonReport {
        sequential,
        parallel,
        speedup,
        workers: parallel_policy.workers(),
    })
}

/// Speedup ratio, undefined when the parallel time is zero or unmeasured.
fn speedup(sequential_secs: f64, parallel_secs: f64) -> Option<f64> {
    if parallel_secs > 0.0 {
        Some(sequential_secs / parallel_secs)
    } else {
        None
    }
}
