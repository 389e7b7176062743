//! CLI for the experiment decision engine.
//!
//! ```bash
//! # Generate a synthetic cohort
//! uplift simulate --users 10000 --lift 0.05 --output experiment_data.csv
//!
//! # Analyze it
//! uplift analyze --input experiment_data.csv
//!
//! # Machine-readable output
//! uplift analyze --input experiment_data.csv --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use uplift::data::{load_records, write_records};
use uplift::output::{format_report, to_json};
use uplift::{analyze_experiment, generate_cohort, Config, SimulationConfig};

/// Onboarding experiment decision engine
#[derive(Parser, Debug)]
#[command(name = "uplift")]
#[command(about = "Estimate whether a treatment beats its baseline and recommend ship/wait/reject")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate per-user experiment data
    Simulate {
        /// Number of users to simulate
        #[arg(long, default_value_t = 1_000)]
        users: usize,

        /// Control group conversion rate
        #[arg(long, default_value_t = 0.20)]
        control_rate: f64,

        /// Relative conversion lift of the treatment group
        #[arg(long, default_value_t = 0.05)]
        lift: f64,

        /// Base day-7 retention rate
        #[arg(long, default_value_t = 0.40)]
        retention: f64,

        /// Generator seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file for the generated cohort
        #[arg(short, long, default_value = "experiment_data.csv")]
        output: PathBuf,
    },

    /// Analyze experiment results from a data file
    Analyze {
        /// Input data file
        #[arg(short, long, default_value = "experiment_data.csv")]
        input: PathBuf,

        /// Frequentist significance level
        #[arg(long, default_value_t = 0.05)]
        alpha: f64,

        /// Minimum P(treatment better) required to ship
        #[arg(long, default_value_t = 0.95)]
        ship_threshold: f64,

        /// Maximum acceptable expected loss from shipping
        #[arg(long, default_value_t = 0.01)]
        max_loss: f64,

        /// Monte Carlo draws for the Bayesian analyzer
        #[arg(long, default_value_t = 100_000)]
        samples: usize,

        /// Sampler seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Emit the report as JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Simulate {
            users,
            control_rate,
            lift,
            retention,
            seed,
            output,
        } => {
            if !(0.0..=1.0).contains(&control_rate) {
                return Err("control-rate must be in [0, 1]".into());
            }
            if !(0.0..=1.0).contains(&retention) {
                return Err("retention must be in [0, 1]".into());
            }
            let config = SimulationConfig {
                n_users: users,
                control_conversion_rate: control_rate,
                treatment_lift: lift,
                retention_rate: retention,
                seed,
                ..Default::default()
            };
            let records = generate_cohort(&config);
            write_records(&output, &records)?;
            println!("Wrote {} users to {}", records.len(), output.display());
            Ok(())
        }
        Command::Analyze {
            input,
            alpha,
            ship_threshold,
            max_loss,
            samples,
            seed,
            json,
        } => {
            let config = Config {
                alpha,
                prob_ship_threshold: ship_threshold,
                max_acceptable_loss: max_loss,
                sample_size: samples,
                seed,
                ..Default::default()
            };
            config.validate().map_err(|m| format!("invalid configuration: {}", m))?;

            let records = load_records(&input)?;
            let report = analyze_experiment(&records, &config)?;

            if json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{}", format_report(&report));
            }
            Ok(())
        }
    }
}
