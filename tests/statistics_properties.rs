//! Distributional laws the analyzers must satisfy.

use uplift::{analyze_bayesian, analyze_frequentist, Arm, ArmSummary, BetaPrior, Metric};

const SAMPLES: usize = 100_000;

fn summaries(control: (u64, u64), treatment: (u64, u64)) -> (ArmSummary, ArmSummary) {
    (
        ArmSummary::proportion(Arm::Control, Metric::Conversion, control.0, control.1),
        ArmSummary::proportion(Arm::Treatment, Metric::Conversion, treatment.0, treatment.1),
    )
}

// ============================================================================
// Range invariants
// ============================================================================

#[test]
fn p_value_and_probability_stay_in_range() {
    let cases = [
        ((10, 0), (10, 10)),
        ((10, 10), (10, 0)),
        ((2, 1), (2, 1)),
        ((1000, 1), (1000, 999)),
        ((5, 5), (5, 5)),
    ];
    for &(c, t) in &cases {
        let (control, treatment) = summaries(c, t);
        let freq = analyze_frequentist(&control, &treatment, 0.05).unwrap();
        assert!(
            (0.0..=1.0).contains(&freq.p_value),
            "p out of range for {:?} vs {:?}",
            c,
            t
        );

        let bayes = analyze_bayesian(&control, &treatment, BetaPrior::uniform(), 42, 10_000).unwrap();
        assert!((0.0..=1.0).contains(&bayes.prob_treatment_better));
        assert!(bayes.expected_loss_control >= 0.0);
        assert!(bayes.expected_loss_treatment >= 0.0);
    }
}

#[test]
fn identical_arms_give_unit_p_value_and_zero_lift() {
    for &counts in &[(100, 10), (1000, 150), (10, 10), (50, 0)] {
        let (control, treatment) = summaries(counts, counts);
        let freq = analyze_frequentist(&control, &treatment, 0.05).unwrap();
        assert_eq!(freq.p_value, 1.0, "counts {:?}", counts);
        assert_eq!(freq.absolute_lift, 0.0);
    }
}

// ============================================================================
// Reproducibility
// ============================================================================

#[test]
fn bayesian_analysis_is_bit_identical_under_a_fixed_seed() {
    let (control, treatment) = summaries((1000, 150), (1000, 165));
    for seed in [0, 1, 42, u64::MAX] {
        let a = analyze_bayesian(&control, &treatment, BetaPrior::uniform(), seed, SAMPLES).unwrap();
        let b = analyze_bayesian(&control, &treatment, BetaPrior::uniform(), seed, SAMPLES).unwrap();
        assert_eq!(a, b, "seed {}", seed);
    }
}

// ============================================================================
// Monotonicity
// ============================================================================

#[test]
fn more_treatment_successes_increase_superiority_and_decrease_p() {
    let control = ArmSummary::proportion(Arm::Control, Metric::Conversion, 1000, 150);

    let mut last_prob = 0.0;
    let mut last_p = f64::INFINITY;
    // Treatment already at or above control throughout.
    for successes in [150, 175, 200, 250] {
        let treatment =
            ArmSummary::proportion(Arm::Treatment, Metric::Conversion, 1000, successes);
        let freq = analyze_frequentist(&control, &treatment, 0.05).unwrap();
        let bayes =
            analyze_bayesian(&control, &treatment, BetaPrior::uniform(), 42, SAMPLES).unwrap();

        assert!(
            bayes.prob_treatment_better > last_prob,
            "probability not increasing at {} successes",
            successes
        );
        assert!(
            freq.p_value < last_p,
            "p-value not decreasing at {} successes",
            successes
        );
        last_prob = bayes.prob_treatment_better;
        last_p = freq.p_value;
    }
}

// ============================================================================
// Symmetry
// ============================================================================

#[test]
fn label_swap_negates_lift_and_complements_probability() {
    let (control, treatment) = summaries((1000, 120), (1000, 170));
    let forward_freq = analyze_frequentist(&control, &treatment, 0.05).unwrap();
    let forward_bayes =
        analyze_bayesian(&control, &treatment, BetaPrior::uniform(), 42, SAMPLES).unwrap();

    let (control_swapped, treatment_swapped) = summaries((1000, 170), (1000, 120));
    let backward_freq = analyze_frequentist(&control_swapped, &treatment_swapped, 0.05).unwrap();
    let backward_bayes =
        analyze_bayesian(&control_swapped, &treatment_swapped, BetaPrior::uniform(), 42, SAMPLES)
            .unwrap();

    assert!((forward_freq.absolute_lift + backward_freq.absolute_lift).abs() < 1e-12);
    assert!((forward_freq.p_value - backward_freq.p_value).abs() < 1e-12);

    // Within sampling tolerance.
    let complement = 1.0 - forward_bayes.prob_treatment_better;
    assert!((backward_bayes.prob_treatment_better - complement).abs() < 0.01);
}

// ============================================================================
// Credible interval sanity
// ============================================================================

#[test]
fn credible_interval_brackets_the_observed_lift() {
    let (control, treatment) = summaries((1000, 150), (1000, 165));
    let bayes = analyze_bayesian(&control, &treatment, BetaPrior::uniform(), 42, SAMPLES).unwrap();
    let (lo, hi) = bayes.credible_interval_lift;
    assert!(lo < hi);
    assert!(lo < 0.015 && 0.015 < hi);
}

#[test]
fn informative_prior_shrinks_the_estimate() {
    // A strong prior centered at the control rate pulls a small-sample
    // treatment advantage back toward 0.5 superiority.
    let (control, treatment) = summaries((20, 3), (20, 6));
    let flat = analyze_bayesian(&control, &treatment, BetaPrior::uniform(), 42, SAMPLES).unwrap();
    let skeptical =
        analyze_bayesian(&control, &treatment, BetaPrior::new(15.0, 85.0), 42, SAMPLES).unwrap();
    assert!(
        (skeptical.prob_treatment_better - 0.5).abs() < (flat.prob_treatment_better - 0.5).abs()
    );
}
