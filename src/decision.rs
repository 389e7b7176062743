//! Decision Engine: reconciles the two methodologies into one
//! recommendation.
//!
//! Each threshold check is recorded in `reasons` in evaluation order,
//! so a recommendation can always be audited after the fact. Wait is
//! the fallback whenever the methodologies disagree; there is no
//! aggressive tie-break.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::{BayesianResult, FrequentistResult};

/// Final recommendation for the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Ship the treatment.
    Ship,
    /// Keep collecting data.
    Wait,
    /// Keep the control.
    Reject,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Ship => write!(f, "SHIP"),
            Recommendation::Wait => write!(f, "WAIT"),
            Recommendation::Reject => write!(f, "REJECT"),
        }
    }
}

/// Decision thresholds applied to both analyzers' outputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Frequentist significance level.
    pub alpha: f64,
    /// Minimum P(treatment better) required to ship. Default 0.95.
    pub prob_ship_threshold: f64,
    /// Maximum acceptable expected loss from shipping, as an absolute
    /// probability-loss value. Default 0.01.
    pub max_acceptable_loss: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            prob_ship_threshold: 0.95,
            max_acceptable_loss: 0.01,
        }
    }
}

/// The final artifact of an analysis run.
///
/// Derived purely from the two result objects plus thresholds; never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Ship, Wait, or Reject.
    pub recommendation: Recommendation,
    /// Whether both methodologies agree on direction and both cross
    /// their thresholds in that direction.
    pub consensus: bool,
    /// Each threshold check, in evaluation order, with its outcome.
    pub reasons: Vec<String>,
}

/// Apply thresholds to both analyzers' outputs.
///
/// - **Ship**: frequentist significant with positive lift, Bayesian
///   superiority at or above the ship threshold, and treatment
///   expected loss within the acceptable bound.
/// - **Reject**: frequentist significant with negative lift, or
///   Bayesian superiority at or below the complement of the ship
///   threshold together with negative lift.
/// - **Wait**: everything else, including any disagreement between
///   the methodologies.
pub fn decide(
    freq: &FrequentistResult,
    bayes: &BayesianResult,
    thresholds: &Thresholds,
) -> Decision {
    let mut reasons = Vec::with_capacity(7);

    let significant = freq.significant;
    reasons.push(format!(
        "frequentist significance: p_value={:.4} vs alpha={} -> {}",
        freq.p_value,
        thresholds.alpha,
        pass_fail(significant)
    ));

    let lift_positive = freq.absolute_lift > 0.0;
    reasons.push(format!(
        "lift direction: absolute_lift={:+.4} -> {}",
        freq.absolute_lift,
        pass_fail(lift_positive)
    ));

    let prob_clears_ship = bayes.prob_treatment_better >= thresholds.prob_ship_threshold;
    reasons.push(format!(
        "bayesian superiority: prob_treatment_better={:.4} vs threshold {} -> {}",
        bayes.prob_treatment_better,
        thresholds.prob_ship_threshold,
        pass_fail(prob_clears_ship)
    ));

    let loss_acceptable = bayes.expected_loss_treatment <= thresholds.max_acceptable_loss;
    reasons.push(format!(
        "bayesian risk: expected_loss_treatment={:.6} vs max {} -> {}",
        bayes.expected_loss_treatment,
        thresholds.max_acceptable_loss,
        pass_fail(loss_acceptable)
    ));

    let lift_negative = freq.absolute_lift < 0.0;
    reasons.push(format!(
        "reject direction: absolute_lift={:+.4} negative -> {}",
        freq.absolute_lift,
        pass_fail(lift_negative)
    ));

    let prob_clears_reject = bayes.prob_treatment_better <= 1.0 - thresholds.prob_ship_threshold;
    reasons.push(format!(
        "bayesian inferiority: prob_treatment_better={:.4} vs threshold {:.4} -> {}",
        bayes.prob_treatment_better,
        1.0 - thresholds.prob_ship_threshold,
        pass_fail(prob_clears_reject)
    ));

    let positive_consensus = significant && lift_positive && prob_clears_ship;
    let negative_consensus = significant && lift_negative && prob_clears_reject;
    let consensus = positive_consensus || negative_consensus;
    reasons.push(format!(
        "consensus: methodologies {} on direction and confidence",
        if consensus { "agree" } else { "disagree" }
    ));

    let recommendation = if significant && lift_positive && prob_clears_ship && loss_acceptable {
        Recommendation::Ship
    } else if (significant && lift_negative) || (prob_clears_reject && lift_negative) {
        Recommendation::Reject
    } else {
        Recommendation::Wait
    };

    Decision {
        recommendation,
        consensus,
        reasons,
    }
}

fn pass_fail(passed: bool) -> &'static str {
    if passed {
        "pass"
    } else {
        "fail"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metric;

    fn freq(p_value: f64, lift: f64, alpha: f64) -> FrequentistResult {
        FrequentistResult {
            metric: Metric::Conversion,
            control_rate: 0.15,
            treatment_rate: 0.15 + lift,
            absolute_lift: lift,
            relative_lift: lift / 0.15,
            statistic: 0.0,
            p_value,
            confidence_interval: (lift - 0.01, lift + 0.01),
            significant: p_value < alpha,
            alpha,
        }
    }

    fn bayes(prob: f64, loss_treatment: f64) -> BayesianResult {
        BayesianResult {
            metric: Metric::Conversion,
            prob_treatment_better: prob,
            expected_loss_control: 0.01,
            expected_loss_treatment: loss_treatment,
            credible_interval_lift: (0.0, 0.05),
            posterior_mean_control: 0.15,
            posterior_mean_treatment: 0.16,
        }
    }

    #[test]
    fn ships_when_all_checks_pass() {
        let decision = decide(
            &freq(0.0001, 0.06, 0.05),
            &bayes(0.999, 0.0001),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Ship);
        assert!(decision.consensus);
    }

    #[test]
    fn waits_when_nothing_is_significant() {
        let decision = decide(
            &freq(0.24, 0.015, 0.05),
            &bayes(0.85, 0.002),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Wait);
        assert!(!decision.consensus);
    }

    #[test]
    fn waits_on_disagreement_even_with_bayesian_confidence() {
        // Bayesian clears its threshold; frequentist does not.
        let decision = decide(
            &freq(0.08, 0.02, 0.05),
            &bayes(0.97, 0.001),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Wait);
        assert!(!decision.consensus);
    }

    #[test]
    fn waits_when_loss_is_too_high_despite_consensus() {
        let decision = decide(
            &freq(0.01, 0.03, 0.05),
            &bayes(0.96, 0.05),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Wait);
        // Direction and confidence agree even though the risk check fails.
        assert!(decision.consensus);
    }

    #[test]
    fn rejects_significant_negative_lift() {
        let decision = decide(
            &freq(0.001, -0.04, 0.05),
            &bayes(0.02, 0.05),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Reject);
        assert!(decision.consensus);
    }

    #[test]
    fn rejects_on_bayesian_evidence_with_negative_lift() {
        // Not significant, but the Bayesian layer is confident the
        // treatment is worse and the observed lift is negative.
        let decision = decide(
            &freq(0.07, -0.02, 0.05),
            &bayes(0.03, 0.05),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Reject);
        assert!(!decision.consensus);
    }

    #[test]
    fn reasons_follow_evaluation_order() {
        let decision = decide(
            &freq(0.24, 0.015, 0.05),
            &bayes(0.85, 0.002),
            &Thresholds::default(),
        );
        assert_eq!(decision.reasons.len(), 7);
        assert!(decision.reasons[0].starts_with("frequentist significance"));
        assert!(decision.reasons[1].starts_with("lift direction"));
        assert!(decision.reasons[2].starts_with("bayesian superiority"));
        assert!(decision.reasons[3].starts_with("bayesian risk"));
        assert!(decision.reasons[4].starts_with("reject direction"));
        assert!(decision.reasons[5].starts_with("bayesian inferiority"));
        assert!(decision.reasons[6].starts_with("consensus"));
    }

    #[test]
    fn reject_decisions_are_auditable_from_reasons() {
        // A Reject driven purely by Bayesian evidence (frequentist not
        // significant) must still show the checks that produced it.
        let decision = decide(
            &freq(0.07, -0.02, 0.05),
            &bayes(0.03, 0.05),
            &Thresholds::default(),
        );
        assert_eq!(decision.recommendation, Recommendation::Reject);
        assert_eq!(decision.reasons.len(), 7);

        let reject_direction = &decision.reasons[4];
        assert!(reject_direction.contains("-0.0200"));
        assert!(reject_direction.ends_with("pass"));

        let inferiority = &decision.reasons[5];
        assert!(inferiority.contains("0.0300"));
        assert!(inferiority.ends_with("pass"));
    }
}
