pub mod compare;
pub mod generate;
pub mod report;

use std::path::Path;

use binstat_core::{ClassBounds, IntervalSpec, OutOfRangePolicy};

use crate::dataset::{self, Dataset};

/// Height classes from the original survey: 150–162 cm in 4 cm steps.
pub const DEFAULT_HEIGHT_CLASSES: &[(f64, f64)] =
    &[(150.0, 154.0), (154.0, 158.0), (158.0, 162.0)];

/// Weight classes from the original survey: 45–101 kg in 4 kg steps.
/// Boundaries are anchored at 45 regardless of the data, so weights outside
/// [45, 101) follow the out-of-range policy instead of stretching the table.
pub const DEFAULT_WEIGHT_CLASSES: &[(f64, f64)] = &[
    (45.0, 49.0),
    (49.0, 53.0),
    (53.0, 57.0),
    (57.0, 61.0),
    (61.0, 65.0),
    (65.0, 69.0),
    (69.0, 73.0),
    (73.0, 77.0),
    (77.0, 81.0),
    (81.0, 85.0),
    (85.0, 89.0),
    (89.0, 93.0),
    (93.0, 97.0),
    (97.0, 101.0),
];

/// Load a dataset or exit with a readable error.
pub fn load_dataset(path: &str) -> Dataset {
    match dataset::load(Path::new(path)) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Interval spec for heights: fixed width when requested, otherwise the
/// default fixed class table.
pub fn height_spec(width: Option<f64>) -> IntervalSpec {
    spec_for(width, DEFAULT_HEIGHT_CLASSES)
}

/// Interval spec for weights: fixed width when requested, otherwise the
/// default fixed class table.
pub fn weight_spec(width: Option<f64>) -> IntervalSpec {
    spec_for(width, DEFAULT_WEIGHT_CLASSES)
}

fn spec_for(width: Option<f64>, default_classes: &[(f64, f64)]) -> IntervalSpec {
    match width {
        Some(w) => IntervalSpec::FixedWidth(w),
        None => IntervalSpec::FixedClasses(
            default_classes
                .iter()
                .map(|&(low, high)| ClassBounds::new(low, high))
                .collect(),
        ),
    }
}

pub fn out_of_range_policy(clamp: bool) -> OutOfRangePolicy {
    if clamp {
        OutOfRangePolicy::Clamp
    } else {
        OutOfRangePolicy::Drop
    }
}

/// Write a JSON document, reporting failure without aborting the report
/// already printed to the console.
pub fn write_json(path: &str, value: &serde_json::Value) {
    match std::fs::write(path, serde_json::to_string_pretty(value).unwrap()) {
        Ok(_) => println!("\nReport written to {path}"),
        Err(e) => eprintln!("\nFailed to write {path}: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binstat_core::{ExecPolicy, build_class_table};

    #[test]
    fn default_weight_spec_is_the_fixed_survey_table() {
        let spec = weight_spec(None);
        match &spec {
            IntervalSpec::FixedClasses(bounds) => {
                assert_eq!(bounds.len(), 14);
                assert_eq!(bounds[0], ClassBounds::new(45.0, 49.0));
                assert_eq!(bounds[13], ClassBounds::new(97.0, 101.0));
            }
            other => panic!("expected fixed classes, got {other:?}"),
        }

        // Boundaries stay anchored at 45 regardless of the data, and a
        // weight at or beyond 101 is dropped rather than stretching the
        // table or shifting the class statistics.
        let sample = [44.0, 46.0, 99.0, 103.0];
        let table = build_class_table(
            &sample,
            &spec,
            OutOfRangePolicy::Drop,
            &ExecPolicy::Sequential,
        )
        .unwrap();
        assert_eq!(table.bounds[0].low, 45.0);
        assert_eq!(table.frequencies[0], 1);
        assert_eq!(table.frequencies[13], 1);
        assert_eq!(table.dropped, 2);
    }

    #[test]
    fn weight_width_opts_into_fixed_width_mode() {
        assert_eq!(weight_spec(Some(2.5)), IntervalSpec::FixedWidth(2.5));
        assert_eq!(height_spec(Some(3.0)), IntervalSpec::FixedWidth(3.0));
    }
}
