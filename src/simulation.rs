//! Synthetic cohort generator.
//!
//! Collaborator of the core: produces `RawRecord` sequences with the
//! control/treatment split and the treatment lift applied at
//! generation time. The core never learns how the lift was injected.

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::types::{Arm, RawRecord};

/// Retention boost applied to users who completed onboarding.
const COMPLETER_RETENTION_BOOST: f64 = 0.10;

/// Engagement multiplier for the treatment arm (the new flow is a bit
/// faster to get through, so scores concentrate slightly lower).
const TREATMENT_ENGAGEMENT_SCALE: f64 = 0.9;

/// Parameters for the simulated onboarding cohort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Number of users to generate.
    pub n_users: usize,
    /// Probability a user lands in the treatment arm.
    pub split_ratio: f64,
    /// Conversion rate of the control arm.
    pub control_conversion_rate: f64,
    /// Relative conversion lift of the treatment arm (e.g. 0.05 for
    /// +5%); the resulting rate is clamped to [0, 1].
    pub treatment_lift: f64,
    /// Base day-7 retention rate for both arms.
    pub retention_rate: f64,
    /// Mean engagement score.
    pub engagement_mean: f64,
    /// Engagement score standard deviation.
    pub engagement_std: f64,
    /// Generator seed; every run with the same config is identical.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_users: 1_000,
            split_ratio: 0.5,
            control_conversion_rate: 0.20,
            treatment_lift: 0.05,
            retention_rate: 0.40,
            engagement_mean: 300.0,
            engagement_std: 60.0,
            seed: 42,
        }
    }
}

/// Generate a synthetic cohort of per-user records.
///
/// Conversion is Bernoulli per arm; retention is the base rate plus a
/// boost for users who converted; engagement is Normal, scaled down
/// for the treatment arm and clamped at zero.
///
/// # Panics
///
/// Panics if any probability parameter is outside [0, 1] or the
/// engagement standard deviation is negative or non-finite.
pub fn generate_cohort(config: &SimulationConfig) -> Vec<RawRecord> {
    assert!(
        (0.0..=1.0).contains(&config.split_ratio),
        "split_ratio must be in [0, 1]"
    );
    assert!(
        (0.0..=1.0).contains(&config.control_conversion_rate),
        "control_conversion_rate must be in [0, 1]"
    );
    assert!(
        (0.0..=1.0).contains(&config.retention_rate),
        "retention_rate must be in [0, 1]"
    );
    assert!(
        config.engagement_std >= 0.0 && config.engagement_std.is_finite(),
        "engagement_std must be non-negative and finite"
    );

    let treatment_rate =
        (config.control_conversion_rate * (1.0 + config.treatment_lift)).clamp(0.0, 1.0);
    let engagement = Normal::new(config.engagement_mean, config.engagement_std)
        .expect("validated standard deviation");

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.seed);
    let mut records = Vec::with_capacity(config.n_users);

    for _ in 0..config.n_users {
        let arm = if rng.random_bool(config.split_ratio) {
            Arm::Treatment
        } else {
            Arm::Control
        };

        let conversion_rate = match arm {
            Arm::Control => config.control_conversion_rate,
            Arm::Treatment => treatment_rate,
        };
        let converted = rng.random_bool(conversion_rate);

        let retained_day7 = rng.random_bool(config.retention_rate)
            || (converted && rng.random_bool(COMPLETER_RETENTION_BOOST));

        let mut engagement_score = engagement.sample(&mut rng);
        if arm == Arm::Treatment {
            engagement_score *= TREATMENT_ENGAGEMENT_SCALE;
        }

        records.push(RawRecord {
            arm,
            converted,
            retained_day7,
            engagement_score: engagement_score.max(0.0),
        });
    }

    records
}
