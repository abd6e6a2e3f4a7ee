use binstat_core::{ExecPolicy, SampleResult, run_pipeline};

pub struct ReportConfig<'a> {
    pub file: &'a str,
    pub height_width: Option<f64>,
    pub weight_width: Option<f64>,
    pub clamp: bool,
    pub output: Option<&'a str>,
}

pub fn run(cfg: ReportConfig<'_>) {
    let dataset = super::load_dataset(cfg.file);
    let height_spec = super::height_spec(cfg.height_width);
    let weight_spec = super::weight_spec(cfg.weight_width);
    let out_of_range = super::out_of_range_policy(cfg.clamp);
    let policy = ExecPolicy::Sequential;

    let heights = dataset.heights();
    let weights = dataset.weights();

    let height_result = match run_pipeline(&heights, &height_spec, out_of_range, &policy) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Height sample: {e}");
            std::process::exit(1);
        }
    };
    let weight_result = match run_pipeline(&weights, &weight_spec, out_of_range, &policy) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Weight sample: {e}");
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(52));
    println!("GROUPED STATISTICS");
    println!("{}", "=".repeat(52));
    println!("Subjects: {}", dataset.len());

    print_sample(
        &format!("HEIGHT ({})", mode_label(cfg.height_width, "cm")),
        "cm",
        &height_result,
    );
    print_sample(
        &format!("WEIGHT ({})", mode_label(cfg.weight_width, "kg")),
        "kg",
        &weight_result,
    );
    println!("{}", "=".repeat(52));

    if let Some(path) = cfg.output {
        let json = serde_json::json!({
            "subjects": dataset.len(),
            "height": height_result,
            "weight": weight_result,
        });
        super::write_json(path, &json);
    }
}

fn mode_label(width: Option<f64>, unit: &str) -> String {
    match width {
        Some(w) => format!("fixed width {w} {unit}"),
        None => "fixed classes".to_string(),
    }
}

fn print_sample(label: &str, unit: &str, result: &SampleResult) {
    println!("{}", "-".repeat(52));
    println!("{label}");
    println!("  {:<22} {:>10} {:>10}", "Class", "Midpoint", "Freq");
    for i in 0..result.table.len() {
        let b = result.table.bounds[i];
        println!(
            "  [{:>7.2}, {:>7.2})     {:>10.2} {:>10}",
            b.low, b.high, result.table.midpoints[i], result.table.frequencies[i]
        );
    }
    if result.table.dropped > 0 {
        println!("  (out of range, dropped: {})", result.table.dropped);
    }
    println!("  Mean:    {:>8.2} {unit}", result.summary.mean);
    println!("  Std dev: {:>8.2} {unit}", result.summary.std_dev);
    println!("  CV:      {:>8.2} %", result.summary.cv);
}
