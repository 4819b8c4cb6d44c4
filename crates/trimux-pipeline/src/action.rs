//! The [`Action`] trait defines a single pipeline stage.
//!
//! Each stage validates its preconditions, then executes against the
//! pipeline's current file. Expected non-fatal results (nothing to remove,
//! file not applicable) are explicit [`ActionOutcome`] variants rather than
//! errors.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::context::ActionContext;

/// Outcome of a successfully executed stage.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// A new container was written to the given path; it becomes the
    /// pipeline's current file.
    Remuxed(PathBuf),
    /// The stage had nothing to change; the current file stands as-is.
    Unchanged,
    /// The file cannot proceed through this pipeline at all (expected,
    /// non-fatal). Carries the human-readable reason.
    Skipped(String),
}

/// A single stage in a per-file processing pipeline.
///
/// Implementors provide the logic for one container transformation.
#[async_trait]
pub trait Action: Send + Sync {
    /// A short, human-readable name for this stage (e.g. "Strip Audio").
    fn name(&self) -> &'static str;

    /// Validate that all preconditions are met before execution.
    ///
    /// This is called once for every stage, before the executor begins
    /// running the pipeline. Implementations should check for required
    /// tools.
    async fn validate(&self, ctx: &ActionContext) -> trimux_core::Result<()>;

    /// Perform the stage against `input`, the pipeline's current file (the
    /// original input for the first stage, a staged intermediate after
    /// that).
    async fn execute(
        &self,
        ctx: &ActionContext,
        input: &Path,
    ) -> trimux_core::Result<ActionOutcome>;
}
