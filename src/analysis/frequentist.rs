//! Frequentist hypothesis testing over aggregated arm summaries.
//!
//! Proportion metrics use a two-proportion z-test: pooled variance
//! under the null for the test statistic, unpooled variance for the
//! confidence interval. The continuous metric uses Welch's t-test with
//! Welch–Satterthwaite degrees of freedom.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::math;
use crate::metrics::ArmSummary;
use crate::types::{Arm, Metric, MetricKind};

/// Result of a frequentist significance test.
///
/// Computed fresh per analysis call; no persisted identity. For the
/// continuous metric, `control_rate` and `treatment_rate` hold the
/// sample means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentistResult {
    /// Metric under test.
    pub metric: Metric,
    /// Observed control rate (or mean).
    pub control_rate: f64,
    /// Observed treatment rate (or mean).
    pub treatment_rate: f64,
    /// treatment - control.
    pub absolute_lift: f64,
    /// (treatment - control) / control, or 0 when control is 0.
    pub relative_lift: f64,
    /// z statistic (proportions) or t statistic (continuous).
    ///
    /// In the zero-variance edge case with unequal rates the statistic
    /// is ±infinity, carrying the lift's sign, consistent with the
    /// defined `p_value` of 0.
    pub statistic: f64,
    /// Two-tailed p-value in [0, 1].
    pub p_value: f64,
    /// Two-sided (1 - alpha) interval on the absolute lift.
    pub confidence_interval: (f64, f64),
    /// Whether `p_value < alpha`.
    pub significant: bool,
    /// Significance level the test was run at.
    pub alpha: f64,
}

/// Run the significance test appropriate for the summaries' metric.
///
/// # Errors
///
/// - [`AnalysisError::DegenerateSample`] if a continuous-metric arm has
///   fewer than 2 observations (variance undefined).
/// - [`AnalysisError::NumericalInstability`] if a non-finite value
///   appears in an intermediate computation.
///
/// # Panics
///
/// Panics if the summaries disagree on metric or are not a
/// (control, treatment) pair, or if `alpha` is outside (0, 1).
pub fn analyze_frequentist(
    control: &ArmSummary,
    treatment: &ArmSummary,
    alpha: f64,
) -> Result<FrequentistResult, AnalysisError> {
    assert_eq!(control.metric, treatment.metric, "summaries must share a metric");
    assert_eq!(control.arm, Arm::Control, "first summary must be the control arm");
    assert_eq!(treatment.arm, Arm::Treatment, "second summary must be the treatment arm");
    assert!(alpha > 0.0 && alpha < 1.0, "alpha must be in (0, 1)");

    match control.metric.kind() {
        MetricKind::Proportion => two_proportion_z_test(control, treatment, alpha),
        MetricKind::Continuous => welch_t_test(control, treatment, alpha),
    }
}

/// Two-proportion z-test with pooled null variance.
fn two_proportion_z_test(
    control: &ArmSummary,
    treatment: &ArmSummary,
    alpha: f64,
) -> Result<FrequentistResult, AnalysisError> {
    let n_c = control.trials as f64;
    let n_t = treatment.trials as f64;
    let rate_c = control.rate();
    let rate_t = treatment.rate();
    let lift = rate_t - rate_c;

    let pooled = (control.successes + treatment.successes) as f64 / (n_c + n_t);
    let se_null = (pooled * (1.0 - pooled) * (1.0 / n_c + 1.0 / n_t)).sqrt();

    // Zero variance in both arms (pooled rate 0 or 1): the p-value is
    // defined directly so no division is attempted.
    let (statistic, p_value) = if se_null == 0.0 {
        if lift == 0.0 {
            (0.0, 1.0)
        } else {
            (f64::INFINITY.copysign(lift), 0.0)
        }
    } else {
        let z = lift / se_null;
        (z, 2.0 * (1.0 - math::normal_cdf(z.abs())))
    };

    // Unpooled standard error for the interval.
    let se_ci = (rate_c * (1.0 - rate_c) / n_c + rate_t * (1.0 - rate_t) / n_t).sqrt();
    let z_crit = math::normal_quantile(1.0 - alpha / 2.0);
    let confidence_interval = (lift - z_crit * se_ci, lift + z_crit * se_ci);

    finish(
        control.metric,
        rate_c,
        rate_t,
        statistic,
        p_value,
        confidence_interval,
        alpha,
    )
}

/// Welch's unequal-variance t-test on the continuous metric.
fn welch_t_test(
    control: &ArmSummary,
    treatment: &ArmSummary,
    alpha: f64,
) -> Result<FrequentistResult, AnalysisError> {
    for summary in [control, treatment] {
        if summary.trials < 2 {
            return Err(AnalysisError::DegenerateSample {
                arm: summary.arm,
                trials: summary.trials,
            });
        }
    }

    let n_c = control.trials as f64;
    let n_t = treatment.trials as f64;
    let mean_c = control.mean();
    let mean_t = treatment.mean();
    let var_c = control.sample_variance();
    let var_t = treatment.sample_variance();
    let lift = mean_t - mean_c;

    let se_sq = var_c / n_c + var_t / n_t;
    let se = se_sq.sqrt();

    let (statistic, p_value, confidence_interval) = if se == 0.0 {
        // Both arms constant: same defined edge case as the z-test.
        if lift == 0.0 {
            (0.0, 1.0, (lift, lift))
        } else {
            (f64::INFINITY.copysign(lift), 0.0, (lift, lift))
        }
    } else {
        // Welch–Satterthwaite degrees of freedom.
        let df = se_sq * se_sq
            / ((var_c / n_c).powi(2) / (n_c - 1.0) + (var_t / n_t).powi(2) / (n_t - 1.0));
        let t = lift / se;
        let p = 2.0 * (1.0 - math::student_t_cdf(t.abs(), df));
        let t_crit = math::student_t_quantile(1.0 - alpha / 2.0, df);
        (t, p, (lift - t_crit * se, lift + t_crit * se))
    };

    finish(
        control.metric,
        mean_c,
        mean_t,
        statistic,
        p_value,
        confidence_interval,
        alpha,
    )
}

fn finish(
    metric: Metric,
    control_rate: f64,
    treatment_rate: f64,
    statistic: f64,
    p_value: f64,
    confidence_interval: (f64, f64),
    alpha: f64,
) -> Result<FrequentistResult, AnalysisError> {
    let absolute_lift = treatment_rate - control_rate;
    let relative_lift = if control_rate > 0.0 {
        absolute_lift / control_rate
    } else {
        0.0
    };

    // The statistic is deliberately ±infinity in the zero-variance edge
    // case, so only NaN is ruled out for it.
    if !p_value.is_finite()
        || statistic.is_nan()
        || !confidence_interval.0.is_finite()
        || !confidence_interval.1.is_finite()
    {
        return Err(AnalysisError::NumericalInstability {
            context: format!("frequentist test for {}", metric),
        });
    }
    // Clamp floating-point spill only; the value is already in range
    // mathematically.
    let p_value = p_value.clamp(0.0, 1.0);

    Ok(FrequentistResult {
        metric,
        control_rate,
        treatment_rate,
        absolute_lift,
        relative_lift,
        statistic,
        p_value,
        confidence_interval,
        significant: p_value < alpha,
        alpha,
    })
}
