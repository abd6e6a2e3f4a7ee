use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Height class proportions per 1000 rows, from the original survey table.
const HEIGHT_SHARES: &[(f64, f64, usize)] = &[
    (150.0, 154.0, 200),
    (154.0, 158.0, 267),
    (158.0, 162.0, 533),
];

const WEIGHT_RANGE: (f64, f64) = (45.0, 100.0);

pub fn run(count: usize, output: &str, seed: Option<u64>) {
    if count == 0 {
        eprintln!("Row count must be at least 1.");
        std::process::exit(1);
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let mut lines = Vec::with_capacity(count);
    let mut emitted = 0;
    for (i, &(low, high, share)) in HEIGHT_SHARES.iter().enumerate() {
        // Last class absorbs the rounding remainder so totals always match.
        let n = if i == HEIGHT_SHARES.len() - 1 {
            count - emitted
        } else {
            count * share / 1000
        };
        for _ in 0..n {
            let height = rng.random_range(low..high);
            let weight = rng.random_range(WEIGHT_RANGE.0..WEIGHT_RANGE.1);
            lines.push(format!("{height:.1} {weight:.1}"));
        }
        emitted += n;
    }

    lines.shuffle(&mut rng);

    let mut contents = lines.join("\n");
    contents.push('\n');
    if let Err(e) = std::fs::write(output, contents) {
        eprintln!("Failed to write {output}: {e}");
        std::process::exit(1);
    }

    println!("Wrote {count} subjects to {output}");
}
