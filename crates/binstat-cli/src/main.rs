//! CLI for binstat — grouped descriptive statistics over binned samples.

mod commands;
mod dataset;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "binstat")]
#[command(about = "Grouped descriptive statistics with a sequential vs parallel comparison")]
#[command(version = binstat_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bin a dataset and report mean, std dev, and CV per sample
    Report {
        /// Dataset path: one "height weight" pair per line
        file: String,

        /// Bin heights at this fixed width (cm) instead of the default class table
        #[arg(long)]
        height_width: Option<f64>,

        /// Bin weights at this fixed width (kg) instead of the default class table
        #[arg(long)]
        weight_width: Option<f64>,

        /// Assign out-of-range observations to the nearest class instead of dropping them
        #[arg(long)]
        clamp: bool,

        /// Write the full report as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Time the pipeline sequentially and in parallel over the same dataset
    Compare {
        /// Dataset path: one "height weight" pair per line
        file: String,

        /// Bin heights at this fixed width (cm) instead of the default class table
        #[arg(long)]
        height_width: Option<f64>,

        /// Bin weights at this fixed width (kg) instead of the default class table
        #[arg(long)]
        weight_width: Option<f64>,

        /// Assign out-of-range observations to the nearest class instead of dropping them
        #[arg(long)]
        clamp: bool,

        /// Worker threads for the parallel run (default: available parallelism)
        #[arg(long)]
        workers: Option<usize>,

        /// Repeat the comparison this many times and keep the fastest
        #[arg(long, default_value_t = 1)]
        runs: usize,

        /// Write the comparison report as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Generate a synthetic dataset with the original survey's height mix
    Generate {
        /// Number of rows to generate
        #[arg(long, default_value_t = 1000)]
        count: usize,

        /// Output path
        #[arg(long, default_value = "data.txt")]
        output: String,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            file,
            height_width,
            weight_width,
            clamp,
            output,
        } => commands::report::run(commands::report::ReportConfig {
            file: &file,
            height_width,
            weight_width,
            clamp,
            output: output.as_deref(),
        }),
        Commands::Compare {
            file,
            height_width,
            weight_width,
            clamp,
            workers,
            runs,
            output,
        } => commands::compare::run(commands::compare::CompareConfig {
            file: &file,
            height_width,
            weight_width,
            clamp,
            workers,
            runs,
            output: output.as_deref(),
        }),
        Commands::Generate {
            count,
            output,
            seed,
        } => commands::generate::run(count, &output, seed),
    }
}
