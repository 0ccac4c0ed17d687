//! Structured configuration issues.
//!
//! Configuration loaders report everything they find wrong as a list of
//! [`ConfigIssue`]s instead of failing on the first problem, so the CLI can
//! print warnings and only abort on [`Severity::Error`].

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No language configured for the run.
    NoLanguages,
    /// A required string field is empty.
    EmptyValue { field: String },
    /// A value is outside its accepted range.
    OutOfRange { field: String },
    /// A string field that should be one of a set of values.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A model slot references a provider that is not configured.
    UnknownProvider { slot: String, provider: String },
    /// A language has no destination channel; its good quizzes are not published.
    MissingDestination { language: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Check whether any issues are errors (i.e. fatal).
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_not_fatal() {
        let issues = vec![ConfigIssue::warning(
            ConfigIssueCode::MissingDestination {
                language: "spanish".to_string(),
            },
            "no channel",
        )];
        assert!(!ConfigIssue::has_errors(&issues));
    }

    #[test]
    fn errors_are_fatal() {
        let issues = vec![
            ConfigIssue::warning(ConfigIssueCode::NoLanguages, "w"),
            ConfigIssue::error(ConfigIssueCode::NoLanguages, "e"),
        ];
        assert!(ConfigIssue::has_errors(&issues));
    }
}
