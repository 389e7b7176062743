//! Whole-experiment orchestration.
//!
//! Runs aggregation and both analyzers for every funnel metric, then
//! derives the overall recommendation from the primary conversion
//! metric.

use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_bayesian, analyze_frequentist, BayesianResult, FrequentistResult};
use crate::config::Config;
use crate::decision::{decide, Decision};
use crate::error::AnalysisError;
use crate::metrics::aggregate;
use crate::types::{Arm, Metric, RawRecord};

/// Both methodologies' results for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAnalysis {
    /// The metric analyzed.
    pub metric: Metric,
    /// Frequentist test result.
    pub frequentist: FrequentistResult,
    /// Bayesian posterior result.
    pub bayesian: BayesianResult,
}

/// Full analysis of an experiment across all funnel metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Users observed in the control arm.
    pub control_users: u64,
    /// Users observed in the treatment arm.
    pub treatment_users: u64,
    /// Per-metric results, in [`Metric::ALL`] order.
    pub metrics: Vec<MetricAnalysis>,
    /// Overall recommendation, derived from the conversion metric.
    pub decision: Decision,
}

impl ExperimentReport {
    /// Look up the analysis for one metric.
    pub fn metric(&self, metric: Metric) -> Option<&MetricAnalysis> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// Analyze every funnel metric and decide on the primary one.
///
/// Each metric gets its own sampler stream (seed offset by the metric
/// index) so adding a metric never perturbs the others' draws.
///
/// # Errors
///
/// Propagates any [`AnalysisError`] from aggregation or the analyzers;
/// no partial report is produced.
pub fn analyze_experiment(
    records: &[RawRecord],
    config: &Config,
) -> Result<ExperimentReport, AnalysisError> {
    let mut metrics = Vec::with_capacity(Metric::ALL.len());

    for (index, metric) in Metric::ALL.iter().enumerate() {
        let summaries = aggregate(records, *metric)?;
        let frequentist =
            analyze_frequentist(&summaries.control, &summaries.treatment, config.alpha)?;
        let bayesian = analyze_bayesian(
            &summaries.control,
            &summaries.treatment,
            config.prior,
            config.seed.wrapping_add(index as u64),
            config.sample_size,
        )?;
        metrics.push(MetricAnalysis {
            metric: *metric,
            frequentist,
            bayesian,
        });
    }

    // Primary metric drives the recommendation, as in the onboarding
    // funnel this engine was built for.
    let primary = &metrics[0];
    let decision = decide(&primary.frequentist, &primary.bayesian, &config.thresholds());

    let control_users = records.iter().filter(|r| r.arm == Arm::Control).count() as u64;
    let treatment_users = records.len() as u64 - control_users;

    Ok(ExperimentReport {
        control_users,
        treatment_users,
        metrics,
        decision,
    })
}
