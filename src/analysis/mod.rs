//! The two statistical methodologies.
//!
//! Both analyzers consume the same [`crate::metrics::ArmSummary`]
//! pair, run independently (pure functions, no shared state), and feed
//! the decision engine.

mod bayes;
mod frequentist;

pub use bayes::{analyze_bayesian, BayesianResult, BetaPrior};
pub use frequentist::{analyze_frequentist, FrequentistResult};
