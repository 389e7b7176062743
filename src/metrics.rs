//! Metrics Aggregator: reduces per-user records to per-arm summaries.
//!
//! A single linear pass over the records holding only counters, so an
//! unbounded stream could be folded in without redesign.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::{Arm, Metric, MetricKind, RawRecord};

/// Per-arm summary counts for one metric.
///
/// Invariants: `successes <= trials`; counts never negative. Immutable
/// once produced by [`aggregate`]; consumed by both analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmSummary {
    /// Which arm these counts belong to.
    pub arm: Arm,
    /// Which metric was aggregated.
    pub metric: Metric,
    /// Number of records in the arm.
    pub trials: u64,
    /// Successes for proportion metrics; 0 for continuous metrics.
    pub successes: u64,
    /// Accumulated value for the continuous metric; 0 for proportions.
    pub continuous_sum: f64,
    /// Accumulated squared value for the continuous metric.
    pub continuous_sq_sum: f64,
}

impl ArmSummary {
    /// Build a proportion-metric summary directly from counts.
    ///
    /// # Panics
    ///
    /// Panics if `metric` is not a proportion metric or if
    /// `successes > trials`.
    pub fn proportion(arm: Arm, metric: Metric, trials: u64, successes: u64) -> Self {
        assert_eq!(
            metric.kind(),
            MetricKind::Proportion,
            "metric must be a proportion metric"
        );
        assert!(successes <= trials, "successes must not exceed trials");
        Self {
            arm,
            metric,
            trials,
            successes,
            continuous_sum: 0.0,
            continuous_sq_sum: 0.0,
        }
    }

    /// Build a continuous-metric summary directly from accumulated sums.
    pub fn continuous(arm: Arm, trials: u64, sum: f64, sq_sum: f64) -> Self {
        Self {
            arm,
            metric: Metric::Engagement,
            trials,
            successes: 0,
            continuous_sum: sum,
            continuous_sq_sum: sq_sum,
        }
    }

    /// Success rate for proportion metrics.
    pub fn rate(&self) -> f64 {
        self.successes as f64 / self.trials as f64
    }

    /// Sample mean for the continuous metric.
    pub fn mean(&self) -> f64 {
        self.continuous_sum / self.trials as f64
    }

    /// Unbiased sample variance for the continuous metric.
    ///
    /// Uses the sum/sum-of-squares identity; tiny negative values from
    /// floating-point cancellation are floored at zero.
    pub fn sample_variance(&self) -> f64 {
        let n = self.trials as f64;
        let mean = self.mean();
        ((self.continuous_sq_sum - n * mean * mean) / (n - 1.0)).max(0.0)
    }
}

/// Summaries for both arms of the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmSummaries {
    /// Control arm counts.
    pub control: ArmSummary,
    /// Treatment arm counts.
    pub treatment: ArmSummary,
}

/// Partition records by arm and reduce them to one [`ArmSummary`] per arm.
///
/// For proportion metrics, `successes` counts records where the
/// corresponding boolean is true. For the continuous engagement metric,
/// the value and its square are accumulated for later mean/variance
/// computation.
///
/// # Errors
///
/// [`AnalysisError::InsufficientData`] if either arm has zero trials —
/// downstream division by zero must never occur silently.
pub fn aggregate(records: &[RawRecord], metric: Metric) -> Result<ArmSummaries, AnalysisError> {
    let mut control = empty_summary(Arm::Control, metric);
    let mut treatment = empty_summary(Arm::Treatment, metric);

    for record in records {
        let summary = match record.arm {
            Arm::Control => &mut control,
            Arm::Treatment => &mut treatment,
        };
        summary.trials += 1;
        match metric.kind() {
            MetricKind::Proportion => {
                let success = match metric {
                    Metric::Conversion => record.converted,
                    Metric::Retention => record.retained_day7,
                    Metric::Engagement => unreachable!("engagement is continuous"),
                };
                if success {
                    summary.successes += 1;
                }
            }
            MetricKind::Continuous => {
                let value = record.engagement_score;
                summary.continuous_sum += value;
                summary.continuous_sq_sum += value * value;
            }
        }
    }

    for summary in [&control, &treatment] {
        if summary.trials == 0 {
            return Err(AnalysisError::InsufficientData { arm: summary.arm });
        }
    }

    Ok(ArmSummaries { control, treatment })
}

fn empty_summary(arm: Arm, metric: Metric) -> ArmSummary {
    ArmSummary {
        arm,
        metric,
        trials: 0,
        successes: 0,
        continuous_sum: 0.0,
        continuous_sq_sum: 0.0,
    }
}
