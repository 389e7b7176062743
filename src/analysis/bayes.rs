//! Bayesian inference over aggregated arm summaries.
//!
//! ## Model
//!
//! Proportion metrics use the Beta-Binomial conjugate pair: each arm's
//! true rate θ gets the posterior
//!
//! θ | data ~ Beta(α₀ + successes, β₀ + trials − successes)
//!
//! The continuous metric approximates each arm's posterior mean with a
//! Normal-Normal conjugate update, μ | data ~ N(sample mean, se²).
//! This is a documented approximation: it is not exact for
//! non-Gaussian engagement distributions, but is accurate for the
//! large cohorts this engine targets.
//!
//! ## Estimates
//!
//! Paired draws from both posteriors yield, from the same samples:
//! - P(θ_treatment > θ_control)
//! - expected losses E[max(0, θ_other − θ_chosen)] for either choice
//! - the (2.5th, 97.5th) percentile credible interval of the lift
//!
//! The RNG is seeded explicitly; identical inputs and seed give
//! bit-identical results.

use rand::SeedableRng;
use rand_distr::{Beta, Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::metrics::ArmSummary;
use crate::types::{Arm, Metric, MetricKind};

/// Beta prior shared by both arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPrior {
    /// Prior alpha (pseudo-successes).
    pub alpha: f64,
    /// Prior beta (pseudo-failures).
    pub beta: f64,
}

impl BetaPrior {
    /// Uniform Beta(1, 1) prior.
    pub fn uniform() -> Self {
        Self { alpha: 1.0, beta: 1.0 }
    }

    /// Create a prior with the given shape parameters.
    ///
    /// # Panics
    ///
    /// Panics unless both parameters are positive and finite.
    pub fn new(alpha: f64, beta: f64) -> Self {
        assert!(alpha > 0.0 && alpha.is_finite(), "prior alpha must be positive");
        assert!(beta > 0.0 && beta.is_finite(), "prior beta must be positive");
        Self { alpha, beta }
    }
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Result of Bayesian posterior analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayesianResult {
    /// Metric under analysis.
    pub metric: Metric,
    /// P(θ_treatment > θ_control), in [0, 1].
    pub prob_treatment_better: f64,
    /// Risk of keeping Control when Treatment was actually better.
    pub expected_loss_control: f64,
    /// Risk of shipping Treatment when Control was actually better.
    pub expected_loss_treatment: f64,
    /// 95% credible interval on the lift θ_treatment − θ_control.
    pub credible_interval_lift: (f64, f64),
    /// Posterior mean of the control arm's rate (or mean).
    pub posterior_mean_control: f64,
    /// Posterior mean of the treatment arm's rate (or mean).
    pub posterior_mean_treatment: f64,
}

/// Fit per-arm posteriors and estimate superiority and risk by
/// paired Monte Carlo sampling.
///
/// `seed` is threaded explicitly through the sampler — there is no
/// ambient random state, so results are reproducible for identical
/// inputs.
///
/// # Errors
///
/// - [`AnalysisError::DegenerateSample`] if a continuous-metric arm has
///   fewer than 2 observations.
/// - [`AnalysisError::NumericalInstability`] if posterior parameters
///   are invalid or a non-finite draw appears; sampling fails fast,
///   with no retries.
///
/// # Panics
///
/// Panics if the summaries disagree on metric or are not a
/// (control, treatment) pair, or if `sample_size` is zero.
pub fn analyze_bayesian(
    control: &ArmSummary,
    treatment: &ArmSummary,
    prior: BetaPrior,
    seed: u64,
    sample_size: usize,
) -> Result<BayesianResult, AnalysisError> {
    assert_eq!(control.metric, treatment.metric, "summaries must share a metric");
    assert_eq!(control.arm, Arm::Control, "first summary must be the control arm");
    assert_eq!(treatment.arm, Arm::Treatment, "second summary must be the treatment arm");
    assert!(sample_size > 0, "sample_size must be positive");

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    match control.metric.kind() {
        MetricKind::Proportion => {
            let post_c = beta_posterior(control, prior)?;
            let post_t = beta_posterior(treatment, prior)?;
            summarize_draws(control.metric, sample_size, &mut rng, post_c, post_t)
        }
        MetricKind::Continuous => {
            let post_c = normal_posterior(control)?;
            let post_t = normal_posterior(treatment)?;
            summarize_draws(control.metric, sample_size, &mut rng, post_c, post_t)
        }
    }
}

/// Beta posterior for a proportion-metric arm.
fn beta_posterior(summary: &ArmSummary, prior: BetaPrior) -> Result<Beta<f64>, AnalysisError> {
    let alpha = prior.alpha + summary.successes as f64;
    let beta = prior.beta + (summary.trials - summary.successes) as f64;
    Beta::new(alpha, beta).map_err(|_| AnalysisError::NumericalInstability {
        context: format!("Beta({}, {}) posterior for {} arm", alpha, beta, summary.arm),
    })
}

/// Normal posterior of the mean for a continuous-metric arm.
fn normal_posterior(summary: &ArmSummary) -> Result<Normal<f64>, AnalysisError> {
    if summary.trials < 2 {
        return Err(AnalysisError::DegenerateSample {
            arm: summary.arm,
            trials: summary.trials,
        });
    }
    let n = summary.trials as f64;
    let se = (summary.sample_variance() / n).sqrt();
    Normal::new(summary.mean(), se).map_err(|_| AnalysisError::NumericalInstability {
        context: format!("Normal posterior for {} arm", summary.arm),
    })
}

/// Draw paired samples and reduce them to the reported estimates.
fn summarize_draws<D: Distribution<f64>>(
    metric: Metric,
    sample_size: usize,
    rng: &mut Xoshiro256PlusPlus,
    posterior_control: D,
    posterior_treatment: D,
) -> Result<BayesianResult, AnalysisError> {
    let n = sample_size as f64;
    let mut diffs = Vec::with_capacity(sample_size);
    let mut better_count = 0usize;
    let mut loss_control = 0.0;
    let mut loss_treatment = 0.0;
    let mut sum_control = 0.0;
    let mut sum_treatment = 0.0;

    for _ in 0..sample_size {
        let theta_c = posterior_control.sample(rng);
        let theta_t = posterior_treatment.sample(rng);
        if !theta_c.is_finite() || !theta_t.is_finite() {
            return Err(AnalysisError::NumericalInstability {
                context: format!("posterior sampling for {}", metric),
            });
        }

        if theta_t > theta_c {
            better_count += 1;
        }
        loss_treatment += (theta_c - theta_t).max(0.0);
        loss_control += (theta_t - theta_c).max(0.0);
        sum_control += theta_c;
        sum_treatment += theta_t;
        diffs.push(theta_t - theta_c);
    }

    diffs.sort_by(|a, b| a.total_cmp(b));
    let credible_interval_lift = (percentile(&diffs, 0.025), percentile(&diffs, 0.975));

    Ok(BayesianResult {
        metric,
        prob_treatment_better: better_count as f64 / n,
        expected_loss_control: loss_control / n,
        expected_loss_treatment: loss_treatment / n,
        credible_interval_lift,
        posterior_mean_control: sum_control / n,
        posterior_mean_treatment: sum_treatment / n,
    })
}

/// Percentile of an already-sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() as f64) * q).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
