//! Configuration for an analysis run.

use serde::{Deserialize, Serialize};

use crate::analysis::BetaPrior;
use crate::decision::Thresholds;

/// Configuration options for the decision engine and both analyzers.
///
/// Collaborators (CLI, dashboard) supply metric selection, thresholds,
/// and the random seed explicitly; the core never reads ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // =========================================================================
    // Decision thresholds
    // =========================================================================
    /// Frequentist significance level. Default: 0.05.
    pub alpha: f64,

    /// Minimum P(treatment better) required to ship. Default: 0.95.
    pub prob_ship_threshold: f64,

    /// Maximum acceptable expected loss from shipping, as an absolute
    /// probability-loss value. Default: 0.01.
    pub max_acceptable_loss: f64,

    // =========================================================================
    // Bayesian inference configuration
    // =========================================================================
    /// Prior for both arms' rates. Default: uniform Beta(1, 1).
    pub prior: BetaPrior,

    /// Monte Carlo draws per analysis. Default: 100,000.
    pub sample_size: usize,

    /// Seed for the posterior sampler. Identical inputs and seed give
    /// bit-identical results. Default: 42.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            prob_ship_threshold: 0.95,
            max_acceptable_loss: 0.01,
            prior: BetaPrior::uniform(),
            sample_size: 100_000,
            seed: 42,
        }
    }
}

impl Config {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quick configuration for development and tests.
    ///
    /// Uses 10,000 Monte Carlo draws for rapid iteration.
    pub fn quick() -> Self {
        Self {
            sample_size: 10_000,
            ..Default::default()
        }
    }

    /// Thorough configuration for final sign-off.
    ///
    /// Uses 1,000,000 Monte Carlo draws for tight estimates.
    pub fn thorough() -> Self {
        Self {
            sample_size: 1_000_000,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");
        self.alpha = alpha;
        self
    }

    /// Set the ship threshold on P(treatment better).
    pub fn prob_ship_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold > 0.5 && threshold < 1.0,
            "prob_ship_threshold must be in (0.5, 1)"
        );
        self.prob_ship_threshold = threshold;
        self
    }

    /// Set the maximum acceptable expected loss.
    pub fn max_acceptable_loss(mut self, loss: f64) -> Self {
        assert!(loss >= 0.0, "max_acceptable_loss must be non-negative");
        self.max_acceptable_loss = loss;
        self
    }

    /// Set the Beta prior.
    pub fn prior(mut self, prior: BetaPrior) -> Self {
        self.prior = prior;
        self
    }

    /// Set the Monte Carlo sample size.
    pub fn sample_size(mut self, size: usize) -> Self {
        assert!(size > 0, "sample_size must be positive");
        self.sample_size = size;
        self
    }

    /// Set the sampler seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The decision-engine view of this configuration.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            alpha: self.alpha,
            prob_ship_threshold: self.prob_ship_threshold,
            max_acceptable_loss: self.max_acceptable_loss,
        }
    }

    /// Check that the configuration is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err("alpha must be in (0, 1)".to_string());
        }
        if self.prob_ship_threshold <= 0.5 || self.prob_ship_threshold >= 1.0 {
            return Err("prob_ship_threshold must be in (0.5, 1)".to_string());
        }
        if self.max_acceptable_loss < 0.0 {
            return Err("max_acceptable_loss must be non-negative".to_string());
        }
        if self.prior.alpha <= 0.0 || self.prior.beta <= 0.0 {
            return Err("prior shape parameters must be positive".to_string());
        }
        if self.sample_size == 0 {
            return Err("sample_size must be positive".to_string());
        }
        Ok(())
    }
}
