//! Errors raised by the statistical core.
//!
//! All variants are raised immediately at the point of detection. The
//! aggregator and the two analyzers never catch each other's errors;
//! the calling collaborator (CLI, dashboard) presents the message and
//! aborts the analysis run.

use std::fmt;

use crate::types::Arm;

/// Errors from aggregation and analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// An arm contributed zero trials; every downstream rate would
    /// divide by zero.
    InsufficientData {
        /// The empty arm.
        arm: Arm,
    },

    /// Sample variance is undefined for a continuous metric (fewer
    /// than 2 observations in an arm).
    DegenerateSample {
        /// The undersized arm.
        arm: Arm,
        /// Number of observations found.
        trials: u64,
    },

    /// A non-finite value appeared during sampling or division.
    NumericalInstability {
        /// Where the non-finite value was detected.
        context: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InsufficientData { arm } => {
                write!(f, "{} arm has zero trials; nothing to analyze", arm)
            }
            AnalysisError::DegenerateSample { arm, trials } => {
                write!(
                    f,
                    "{} arm has {} observation(s); at least 2 are required for a variance estimate",
                    arm, trials
                )
            }
            AnalysisError::NumericalInstability { context } => {
                write!(f, "non-finite value encountered during {}", context)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}
