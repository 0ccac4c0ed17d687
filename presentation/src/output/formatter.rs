//! Output formatter trait

use newsquiz_application::RunReport;

/// Trait for formatting run reports
pub trait OutputFormatter {
    /// Human-readable summary
    fn format(&self, report: &RunReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &RunReport) -> String;
}
