//! # binstat-core
//!
//! Grouped descriptive statistics over binned samples.
//!
//! `binstat-core` bins raw numeric observations into half-open frequency
//! classes (explicit boundaries or a fixed width derived from the sample
//! range), reduces the (midpoint, frequency) pairs into weighted mean,
//! population standard deviation, and coefficient of variation, and can
//! compare the wall-clock cost of sequential vs data-parallel execution
//! over the same inputs.
//!
//! ## Quick Start
//!
//! ```
//! use binstat_core::{ExecPolicy, IntervalSpec, OutOfRangePolicy};
//!
//! let sample = [150.0, 151.0, 155.0, 160.0];
//! let table = binstat_core::build_class_table(
//!     &sample,
//!     &IntervalSpec::FixedWidth(4.0),
//!     OutOfRangePolicy::Drop,
//!     &ExecPolicy::Sequential,
//! )
//! .unwrap();
//! assert_eq!(table.frequencies, vec![2, 1, 1]);
//!
//! let summary = binstat_core::summarize(&table, &ExecPolicy::Sequential).unwrap();
//! assert_eq!(summary.mean, 155.0);
//! ```
//!
//! ## Architecture
//!
//! Sample → class table (binning) → weighted reduction → summary
//!
//! Every parallel region is a fork-join over an index range with private
//! per-worker partials merged after the join (`exec::fold_chunks`), so
//! frequency tables are exactly worker-count independent and float
//! reductions agree with sequential results up to reassociation error.

pub mod classes;
pub mod exec;
pub mod harness;
pub mod reduce;

pub use classes::{
    BinError, ClassBounds, ClassTable, IntervalSpec, OutOfRangePolicy, build_class_table,
};
pub use exec::ExecPolicy;
pub use harness::{
    ComparisonInput, ComparisonReport, PipelineError, RunResult, SampleResult, compare,
    run_pipeline, timed_run,
};
pub use reduce::{
    SampleSummary, StatsError, coefficient_of_variation, summarize, weighted_mean,
    weighted_std_dev,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
