//! Application-level configuration.
//!
//! - [`PipelineParams`]: run-wide parameters (languages, K, timeouts, verifier policy)
//! - [`Destinations`] and [`PacingPolicy`]: where and how fast content is delivered

pub mod delivery;
pub mod pipeline_params;

pub use delivery::{Destinations, PacingPolicy};
pub use pipeline_params::PipelineParams;
