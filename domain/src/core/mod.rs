//! Core domain concepts shared across all subdomains.
//!
//! - [`language::Language`]: a quiz language ("english", "spanish", ...)
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: UTF-8 safe truncation used for diagnostics and polls

pub mod error;
pub mod language;
pub mod string;
