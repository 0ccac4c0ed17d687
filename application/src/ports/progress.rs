//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use serde::Serialize;
use std::fmt;

/// A stage of the daily run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    News,
    Quizzes,
    Verification,
    Images,
    Delivery,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::News => "news",
            PipelineStage::Quizzes => "quizzes",
            PipelineStage::Verification => "verification",
            PipelineStage::Images => "images",
            PipelineStage::Delivery => "delivery",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates during a run
///
/// Implementations live in the presentation layer.
pub trait PipelineProgress: Send + Sync {
    /// Called when a stage starts with the number of tasks it will run
    fn on_stage_start(&self, stage: PipelineStage, total_tasks: usize);

    /// Called when one task of a stage (usually a language) completes
    fn on_task_complete(&self, stage: PipelineStage, label: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: PipelineStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: PipelineStage, _label: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: PipelineStage) {}
}
