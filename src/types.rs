//! Core types shared across the aggregation and analysis pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Experiment arm identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// Baseline variant.
    Control,
    /// Candidate variant under evaluation.
    Treatment,
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Control => write!(f, "control"),
            Arm::Treatment => write!(f, "treatment"),
        }
    }
}

/// Numeric treatment of a metric.
///
/// Exactly two computation paths exist: success counts over trials
/// (proportion) and accumulated real values (continuous). This is a
/// closed set; the analyzers branch on it rather than dispatching
/// dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// Boolean per-user outcome summarized as successes / trials.
    Proportion,
    /// Real-valued per-user outcome summarized by sum and squared sum.
    Continuous,
}

/// Funnel metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Onboarding completion (proportion).
    Conversion,
    /// Day-7 retention (proportion).
    Retention,
    /// Engagement score (continuous).
    Engagement,
}

impl Metric {
    /// All metrics analyzed in a full experiment report, in report order.
    pub const ALL: [Metric; 3] = [Metric::Conversion, Metric::Retention, Metric::Engagement];

    /// The numeric treatment this metric receives.
    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Conversion | Metric::Retention => MetricKind::Proportion,
            Metric::Engagement => MetricKind::Continuous,
        }
    }

    /// Stable lowercase name used in reports and serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Conversion => "conversion",
            Metric::Retention => "retention_day7",
            Metric::Engagement => "engagement",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One observed (or simulated) user.
///
/// Owned by the caller; the core only ever reads these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Arm the user was assigned to.
    pub arm: Arm,
    /// Whether the user completed onboarding.
    pub converted: bool,
    /// Whether the user was still active seven days later.
    pub retained_day7: bool,
    /// Non-negative engagement score.
    pub engagement_score: f64,
}
