//! JSON serialization of experiment reports.

use crate::report::ExperimentReport;

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &ExperimentReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
