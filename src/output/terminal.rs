//! Terminal output formatting with colors.

use colored::Colorize;

use crate::decision::Recommendation;
use crate::report::{ExperimentReport, MetricAnalysis};

/// Format an experiment report for human-readable terminal output.
///
/// One table row per metric with both methodologies side by side,
/// followed by the decision block with its audit trail.
pub fn format_report(report: &ExperimentReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n",
        "Experiment Results: Methodology Comparison".bold()
    ));
    output.push_str(&format!(
        "{} control users, {} treatment users\n\n",
        report.control_users, report.treatment_users
    ));

    output.push_str(&format!(
        "{:<16} | {:>10} {:>8} | {:>9} {:>11} | {:>10}\n",
        "Metric", "p-value", "signif", "P(T>C)", "exp. loss", "lift"
    ));
    output.push_str(&format!("{}\n", "-".repeat(78)));

    for analysis in &report.metrics {
        output.push_str(&format_metric_row(analysis));
    }

    output.push('\n');
    output.push_str(&format_decision(report));
    output
}

fn format_metric_row(analysis: &MetricAnalysis) -> String {
    let freq = &analysis.frequentist;
    let bayes = &analysis.bayesian;

    let signif = if freq.significant {
        "yes".green().to_string()
    } else {
        "no".yellow().to_string()
    };
    let lift = format!("{:+.4}", freq.absolute_lift);
    let lift = if freq.absolute_lift >= 0.0 {
        lift.green()
    } else {
        lift.red()
    };

    format!(
        "{:<16} | {:>10.4} {:>8} | {:>8.2}% {:>11.6} | {:>10}\n",
        analysis.metric.name(),
        freq.p_value,
        signif,
        bayes.prob_treatment_better * 100.0,
        bayes.expected_loss_treatment,
        lift
    )
}

fn format_decision(report: &ExperimentReport) -> String {
    let mut output = String::new();

    let banner = match report.decision.recommendation {
        Recommendation::Ship => "SHIP".green().bold(),
        Recommendation::Wait => "WAIT".yellow().bold(),
        Recommendation::Reject => "REJECT".red().bold(),
    };
    let consensus = if report.decision.consensus {
        "consensus".green()
    } else {
        "no consensus".yellow()
    };
    output.push_str(&format!("Recommendation: {} ({})\n", banner, consensus));

    for reason in &report.decision.reasons {
        output.push_str(&format!("  - {}\n", reason));
    }
    output
}
