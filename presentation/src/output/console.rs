//! Console output formatter for run reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use newsquiz_application::RunReport;

/// Formats run reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run report
    pub fn format(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("newsquiz run {}", report.date)));
        output.push('\n');

        if report.skipped {
            output.push_str(&format!(
                "\n{}\n",
                "No news was generated; the run was skipped.".yellow().bold()
            ));
            output.push_str(&Self::footer());
            return output;
        }

        output.push_str(&format!(
            "{} {}\n",
            "News stories:".cyan().bold(),
            report.news_count
        ));

        output.push_str(&Self::section_header("Verification"));
        for language in report.outcome.languages() {
            let good = report.outcome.good_for(language).len();
            let bad = report.outcome.bad_for(language);
            let image = if report.image_languages.contains(language) {
                "image".green()
            } else {
                "no image".dimmed()
            };
            output.push_str(&format!(
                "\n{} {} good, {} bad, {}\n",
                format!("── {} ──", language.display_name()).yellow().bold(),
                good.to_string().green(),
                if bad.is_empty() {
                    "0".normal()
                } else {
                    bad.len().to_string().red()
                },
                image
            ));
            for question in bad {
                output.push_str(&format!(
                    "  {} #{} {}\n",
                    "x".red(),
                    question.question_id,
                    question.verification_error.as_deref().unwrap_or("unknown")
                ));
            }
        }

        output.push_str(&Self::section_header("Delivery"));
        output.push_str(&format!(
            "\n{} sent, {} failed\n",
            report.delivery.sent.to_string().green(),
            if report.delivery.failed == 0 {
                "0".normal()
            } else {
                report.delivery.failed.to_string().red()
            }
        ));
        if !report.delivery.skipped_languages.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "No channel for:".yellow(),
                report
                    .delivery
                    .skipped_languages
                    .iter()
                    .map(|l| l.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        if !report.timings.is_empty() {
            output.push_str(&format!("\n{}\n", "Timings:".dimmed()));
            for timing in &report.timings {
                output.push_str(&format!(
                    "  {:<14} {:>8} ms\n",
                    timing.stage.as_str(),
                    timing.elapsed_ms
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &RunReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &RunReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &RunReport) -> String {
        Self::format_json(report)
    }
}
