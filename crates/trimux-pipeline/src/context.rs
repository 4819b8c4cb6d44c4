//! Execution context shared by all stages in a pipeline run.

use std::sync::Arc;

/// Sender for reporting progress from within the executor.
///
/// Wraps a callback that receives a progress percentage (0.0 -- 100.0) and a
/// human-readable stage description.
pub struct ProgressSender {
    callback: Box<dyn Fn(f32, &str) + Send + Sync>,
}

impl ProgressSender {
    /// Create a new sender from the given callback.
    pub fn new(callback: impl Fn(f32, &str) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Create a no-op sender that discards all progress reports.
    pub fn noop() -> Self {
        Self {
            callback: Box::new(|_, _| {}),
        }
    }

    /// Report progress.
    pub fn send(&self, progress: f32, step: &str) {
        (self.callback)(progress, step);
    }
}

impl std::fmt::Debug for ProgressSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSender").finish_non_exhaustive()
    }
}

/// Context passed to every stage during validation and execution.
pub struct ActionContext {
    /// Workspace managing this file's temporary paths.
    pub workspace: Arc<trimux_av::Workspace>,
    /// Probed stream inventory of the workspace input.
    pub report: Arc<trimux_probe::ProbeReport>,
    /// Tool registry for looking up external tool paths.
    pub tools: Arc<trimux_av::ToolRegistry>,
    /// Prober used to re-inspect intermediates between stages.
    pub prober: Arc<dyn trimux_probe::Prober>,
    /// When `true`, stages log what they would do but skip actual work.
    pub dry_run: bool,
    /// Channel for reporting progress to the caller.
    pub progress: Arc<ProgressSender>,
}

impl ActionContext {
    /// Create a new context with the minimum required fields.
    pub fn new(
        workspace: Arc<trimux_av::Workspace>,
        report: Arc<trimux_probe::ProbeReport>,
        tools: Arc<trimux_av::ToolRegistry>,
        prober: Arc<dyn trimux_probe::Prober>,
    ) -> Self {
        Self {
            workspace,
            report,
            tools,
            prober,
            dry_run: false,
            progress: Arc::new(ProgressSender::noop()),
        }
    }

    /// Builder: set dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builder: attach a progress sender.
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Arc::new(progress);
        self
    }
}
