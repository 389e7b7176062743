//! # uplift
//!
//! Decide whether a product change outperforms its baseline.
//!
//! This crate takes per-user outcome records from a two-arm experiment
//! and issues a Ship/Wait/Reject recommendation by reconciling two
//! independent statistical methodologies:
//!
//! - a frequentist hypothesis test (two-proportion z-test, or Welch's
//!   t-test for the continuous engagement metric), and
//! - a Bayesian Beta-Binomial analysis (probability of superiority and
//!   expected loss via seeded posterior sampling).
//!
//! Ship requires both methodologies to agree; any disagreement falls
//! back to Wait.
//!
//! ## Quick Start
//!
//! ```
//! use uplift::{analyze_experiment, generate_cohort, Config, SimulationConfig};
//!
//! let records = generate_cohort(&SimulationConfig::default());
//! let report = analyze_experiment(&records, &Config::quick()).unwrap();
//!
//! println!("{} ({} reasons)", report.decision.recommendation, report.decision.reasons.len());
//! ```
//!
//! ## Pipeline
//!
//! Data flows one way: raw records are reduced to per-arm summary
//! counts ([`aggregate`]), both analyzers run independently over the
//! same summaries ([`analyze_frequentist`], [`analyze_bayesian`]), and
//! the decision engine applies configurable thresholds to both outputs
//! ([`decide`]). Every step is a pure function over in-memory data.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod decision;
mod error;
mod math;
mod metrics;
mod report;
mod types;

// Functional modules
pub mod analysis;
pub mod data;
pub mod output;
pub mod simulation;

// Re-exports for the public API
pub use analysis::{analyze_bayesian, analyze_frequentist, BayesianResult, BetaPrior, FrequentistResult};
pub use config::Config;
pub use decision::{decide, Decision, Recommendation, Thresholds};
pub use error::AnalysisError;
pub use metrics::{aggregate, ArmSummaries, ArmSummary};
pub use report::{analyze_experiment, ExperimentReport, MetricAnalysis};
pub use simulation::{generate_cohort, SimulationConfig};
pub use types::{Arm, Metric, MetricKind, RawRecord};
