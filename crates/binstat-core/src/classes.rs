//! Class generation: binning raw observations into frequency classes.
//!
//! A class is a half-open numeric sub-range `[low, high)` with a
//! representative midpoint and an observation count. Classes come from one
//! of two interval specifications:
//! - **fixed classes**: explicit ordered boundary pairs supplied by the
//!   caller; observations matching no pair follow an [`OutOfRangePolicy`];
//! - **fixed width**: a single positive width, boundaries derived from the
//!   sample's observed min/max; every observation is assigned.
//!
//! Counting fans out over worker chunks, each accumulating a private
//! frequency vector merged element-wise after the join, so the resulting
//! table is identical for any worker count.

use serde::Serialize;

use crate::exec::{self, ExecPolicy};

/// One half-open class boundary pair `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassBounds {
    pub low: f64,
    pub high: f64,
}

impl ClassBounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Representative value for the class: the average of its boundaries.
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Half-open containment check. A value equal to `high` is not in this
    /// class; in a contiguous table it belongs to the next one.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value < self.high
    }
}

/// Which binning mode drives class construction. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalSpec {
    /// Explicit ordered, non-overlapping, ascending boundary pairs.
    FixedClasses(Vec<ClassBounds>),
    /// Positive class width; boundaries derived from the sample range.
    FixedWidth(f64),
}

/// What to do with an observation that matches no fixed class.
///
/// The original grouped-statistics formulation silently dropped such
/// observations; that stays the default, but callers can opt into clamping
/// instead so that total frequency always equals the sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRangePolicy {
    /// Count the observation in [`ClassTable::dropped`] only.
    #[default]
    Drop,
    /// Assign the observation to the nearest class by boundary distance.
    Clamp,
}

/// Output of class generation: parallel midpoint/frequency vectors in
/// ascending boundary order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassTable {
    pub bounds: Vec<ClassBounds>,
    pub midpoints: Vec<f64>,
    pub frequencies: Vec<u64>,
    /// Observations that matched no class (fixed-classes mode under
    /// [`OutOfRangePolicy::Drop`]). Always zero in fixed-width mode.
    pub dropped: u64,
}

impl ClassTable {
    fn from_bounds(bounds: Vec<ClassBounds>) -> Self {
        let midpoints = bounds.iter().map(ClassBounds::midpoint).collect();
        let frequencies = vec![0; bounds.len()];
        Self {
            bounds,
            midpoints,
            frequencies,
            dropped: 0,
        }
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Sum of all class frequencies. Equals the sample size except in
    /// fixed-classes mode with dropped observations, where the shortfall is
    /// exactly [`ClassTable::dropped`].
    pub fn total_frequency(&self) -> u64 {
        self.frequencies.iter().sum()
    }
}

/// Invalid interval specification.
#[derive(Debug, Clone, PartialEq)]
pub enum BinError {
    /// Fixed-width mode with a width that is zero, negative, or non-finite.
    NonPositiveWidth(f64),
    /// Fixed-classes bound pair at `index` is inverted or overlaps its
    /// predecessor.
    UnorderedBounds { index: usize },
}

impl std::fmt::Display for BinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinError::NonPositiveWidth(w) => {
                write!(f, "class width must be positive, got {w}")
            }
            BinError::UnorderedBounds { index } => {
                write!(f, "class bounds at index {index} are inverted or overlap the previous class")
            }
        }
    }
}

impl std::error::Error for BinError {}

/// Bin a sample into a [`ClassTable`] according to `spec`.
///
/// Fixed-classes mode accepts an empty sample and yields all-zero
/// frequencies. Fixed-width mode over an empty sample yields an empty table
/// (no classes), since there is no observed range to derive boundaries
/// from; callers should check emptiness before reducing.
pub fn build_class_table(
    sample: &[f64],
    spec: &IntervalSpec,
    out_of_range: OutOfRangePolicy,
    policy: &ExecPolicy,
) -> Result<ClassTable, BinError> {
    let table = match spec {
        IntervalSpec::FixedClasses(bounds) => {
            validate_bounds(bounds)?;
            count_fixed_classes(sample, bounds, out_of_range, policy)
        }
        IntervalSpec::FixedWidth(width) => {
            if !width.is_finite() || *width <= 0.0 {
                return Err(BinError::NonPositiveWidth(*width));
            }
            count_fixed_width(sample, *width, policy)
        }
    };

    log::debug!(
        "binned {} observations into {} classes ({} dropped)",
        sample.len(),
        table.len(),
        table.dropped
    );
    Ok(table)
}

fn validate_bounds(bounds: &[ClassBounds]) -> Result<(), BinError> {
    for (i, b) in bounds.iter().enumerate() {
        if !b.low.is_finite() || !b.high.is_finite() || b.low >= b.high {
            return Err(BinError::UnorderedBounds { index: i });
        }
        if i > 0 && b.low < bounds[i - 1].high {
            return Err(BinError::UnorderedBounds { index: i });
        }
    }
    Ok(())
}

fn count_fixed_classes(
    sample: &[f64],
    bounds: &[ClassBounds],
    out_of_range: OutOfRangePolicy,
    policy: &ExecPolicy,
) -> ClassTable {
    let mut table = ClassTable::from_bounds(bounds.to_vec());
    if table.is_empty() {
        table.dropped = sample.len() as u64;
        return table;
    }

    let partials = exec::fold_chunks(sample.len(), policy, |range| {
        let mut freq = vec![0u64; bounds.len()];
        let mut dropped = 0u64;
        for &value in &sample[range] {
            // First class in ascending order whose [low, high) contains the
            // value; a value at a shared edge lands in the upper class.
            match bounds.iter().position(|b| b.contains(value)) {
                Some(i) => freq[i] += 1,
                None => match out_of_range {
                    OutOfRangePolicy::Drop => dropped += 1,
                    OutOfRangePolicy::Clamp => {
                        freq[nearest_class(bounds, value)] += 1;
                    }
                },
            }
        }
        (freq, dropped)
    });

    for (freq, dropped) in partials {
        for (total, part) in table.frequencies.iter_mut().zip(freq) {
            *total += part;
        }
        table.dropped += dropped;
    }
    table
}

/// Index of the class whose boundary interval is closest to `value`.
/// Only called for values contained in no class, so distance is measured to
/// the nearer of the two edges.
fn nearest_class(bounds: &[ClassBounds], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, b) in bounds.iter().enumerate() {
        let dist = if value < b.low {
            b.low - value
        } else {
            value - b.high
        };
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn count_fixed_width(sample: &[f64], width: f64, policy: &ExecPolicy) -> ClassTable {
    if sample.is_empty() {
        return ClassTable::from_bounds(Vec::new());
    }

    let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // A single-value sample still gets one class.
    let num_classes = (((max - min) / width).ceil() as usize).max(1);

    let bounds: Vec<ClassBounds> = (0..num_classes)
        .map(|i| ClassBounds::new(min + i as f64 * width, min + (i + 1) as f64 * width))
        .collect();
    let mut table = ClassTable::from_bounds(bounds);

    let partials = exec::fold_chunks(sample.len(), policy, |range| {
        let mut freq = vec![0u64; num_classes];
        for &value in &sample[range] {
            // The clamp keeps the sample maximum in the last class instead
            // of indexing one past it.
            let i = (((value - min) / width).floor() as usize).min(num_classes - 1);
            freq[i] += 1;
        }
        freq
    });

    for freq in partials {
        for (total, part) in table.frequencies.iter_mut().zip(freq) {
            *total += part;
        }
    }
    table
}
