//! Rendering of experiment reports.
//!
//! The renderers print result fields verbatim; nothing statistical is
//! recomputed outside the core.

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::format_report;
