//! Configuration-level domain types.

pub mod validation;
