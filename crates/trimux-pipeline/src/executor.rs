//! Pipeline executor: runs the stages for one file strictly sequentially,
//! threading the current file path through them.

use std::path::PathBuf;

use crate::action::{Action, ActionOutcome};
use crate::context::ActionContext;

/// Result of running a whole pipeline for one file.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// All stages ran; `output` is the final staged file, ready for
    /// promotion into the output tree. In dry-run mode this is the original
    /// input.
    Completed {
        /// Path of the pipeline's final file.
        output: PathBuf,
    },
    /// A stage determined the file cannot be processed (expected,
    /// non-fatal); no output exists for it.
    Skipped {
        /// Name of the stage that skipped the file.
        step: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Runs a fixed sequence of [`Action`]s against one file.
///
/// Execution is strictly sequential: each stage blocks until its external
/// invocation finishes before the next begins. The executor is stateless
/// across files and may be reused for every file of a batch.
pub struct PipelineExecutor {
    actions: Vec<Box<dyn Action>>,
}

impl PipelineExecutor {
    /// Create a new executor from a list of stages.
    pub fn new(actions: Vec<Box<dyn Action>>) -> Self {
        Self { actions }
    }

    /// Execute the pipeline.
    ///
    /// All stages are validated up front so missing tools are reported
    /// before any work begins.
    ///
    /// # Errors
    ///
    /// Returns the first stage error encountered, wrapped as
    /// [`trimux_core::Error::Pipeline`]. Intermediates are cleaned up by the
    /// workspace when it drops; there is no rollback of a partially written
    /// stage output.
    pub async fn execute(&self, ctx: &ActionContext) -> trimux_core::Result<PipelineOutcome> {
        if self.actions.is_empty() {
            return Err(trimux_core::Error::Pipeline {
                step: "executor".into(),
                message: "no stages to execute".into(),
            });
        }

        for action in &self.actions {
            action.validate(ctx).await.map_err(|e| {
                trimux_core::Error::Pipeline {
                    step: action.name().into(),
                    message: format!("validation failed: {e}"),
                }
            })?;
        }

        let mut current = ctx.workspace.input().to_path_buf();
        let total = self.actions.len() as f32;

        for (i, action) in self.actions.iter().enumerate() {
            tracing::info!("Starting: {}", action.name());

            let outcome = action.execute(ctx, &current).await.map_err(|e| {
                trimux_core::Error::Pipeline {
                    step: action.name().into(),
                    message: e.to_string(),
                }
            })?;

            match outcome {
                ActionOutcome::Remuxed(path) => {
                    current = path;
                }
                ActionOutcome::Unchanged => {}
                ActionOutcome::Skipped(reason) => {
                    tracing::info!("{}: {reason}", action.name());
                    return Ok(PipelineOutcome::Skipped {
                        step: action.name(),
                        reason,
                    });
                }
            }

            let pct = ((i + 1) as f32 / total) * 100.0;
            ctx.progress.send(pct, action.name());
            tracing::info!("[{pct:.0}%] Completed: {}", action.name());
        }

        Ok(PipelineOutcome::Completed { output: current })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ActionContext, ProgressSender};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    // -- Helpers --------------------------------------------------------------

    struct FakeProber;

    impl trimux_probe::Prober for FakeProber {
        fn name(&self) -> &'static str {
            "fake"
        }
        fn probe(&self, path: &Path) -> trimux_core::Result<trimux_probe::ProbeReport> {
            Ok(trimux_probe::ProbeReport {
                file_path: path.to_path_buf(),
                file_size: 0,
                format_name: None,
                duration: None,
                streams: vec![],
            })
        }
        fn supports(&self, _path: &Path) -> bool {
            true
        }
    }

    fn make_ctx(workspace: Arc<trimux_av::Workspace>) -> ActionContext {
        let tools_cfg = trimux_core::config::ToolsConfig::default();
        let tools = Arc::new(trimux_av::ToolRegistry::discover(&tools_cfg));
        let report = Arc::new(trimux_probe::ProbeReport {
            file_path: workspace.input().to_path_buf(),
            file_size: 0,
            format_name: None,
            duration: None,
            streams: vec![],
        });
        ActionContext::new(workspace, report, tools, Arc::new(FakeProber))
    }

    // -- Fake stages ----------------------------------------------------------

    struct FakeRemux {
        name: &'static str,
        executed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Action for FakeRemux {
        fn name(&self) -> &'static str {
            self.name
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Ok(())
        }
        async fn execute(
            &self,
            ctx: &ActionContext,
            _input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            self.executed.fetch_add(1, Ordering::SeqCst);
            let staged = ctx.workspace.stage_output(self.name);
            std::fs::write(&staged, self.name)?;
            Ok(ActionOutcome::Remuxed(staged))
        }
    }

    struct FakePassThrough;

    #[async_trait]
    impl Action for FakePassThrough {
        fn name(&self) -> &'static str {
            "pass-through"
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Ok(())
        }
        async fn execute(
            &self,
            _ctx: &ActionContext,
            _input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            Ok(ActionOutcome::Unchanged)
        }
    }

    struct FakeSkip;

    #[async_trait]
    impl Action for FakeSkip {
        fn name(&self) -> &'static str {
            "skipper"
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Ok(())
        }
        async fn execute(
            &self,
            _ctx: &ActionContext,
            _input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            Ok(ActionOutcome::Skipped("nothing matches".into()))
        }
    }

    struct FakeFail;

    #[async_trait]
    impl Action for FakeFail {
        fn name(&self) -> &'static str {
            "boom"
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Ok(())
        }
        async fn execute(
            &self,
            _ctx: &ActionContext,
            _input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            Err(trimux_core::Error::tool("ffmpeg", "intentional failure"))
        }
    }

    struct FakeValidateFail;

    #[async_trait]
    impl Action for FakeValidateFail {
        fn name(&self) -> &'static str {
            "validate-fail"
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Err(trimux_core::Error::Validation("missing tool".into()))
        }
        async fn execute(
            &self,
            _ctx: &ActionContext,
            _input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            unreachable!()
        }
    }

    /// Records the path each invocation received.
    struct FakeRecordInput {
        seen: Arc<std::sync::Mutex<Vec<PathBuf>>>,
        produce: Option<&'static str>,
    }

    #[async_trait]
    impl Action for FakeRecordInput {
        fn name(&self) -> &'static str {
            "recorder"
        }
        async fn validate(&self, _ctx: &ActionContext) -> trimux_core::Result<()> {
            Ok(())
        }
        async fn execute(
            &self,
            ctx: &ActionContext,
            input: &Path,
        ) -> trimux_core::Result<ActionOutcome> {
            self.seen.lock().unwrap().push(input.to_path_buf());
            match self.produce {
                Some(stage) => {
                    let staged = ctx.workspace.stage_output(stage);
                    std::fs::write(&staged, stage)?;
                    Ok(ActionOutcome::Remuxed(staged))
                }
                None => Ok(ActionOutcome::Unchanged),
            }
        }
    }

    // -- Tests ----------------------------------------------------------------

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_pipeline_errors() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws);

        let executor = PipelineExecutor::new(vec![]);
        let result = executor.execute(&ctx).await;
        assert!(result.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn single_stage_completes_with_staged_output() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws.clone());

        let counter = Arc::new(AtomicUsize::new(0));
        let executor = PipelineExecutor::new(vec![Box::new(FakeRemux {
            name: "stage-a",
            executed: counter.clone(),
        })]);

        let outcome = executor.execute(&ctx).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        match outcome {
            PipelineOutcome::Completed { output } => {
                assert!(output.starts_with(ws.temp_dir()));
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stages_chain_their_outputs() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws.clone());

        let first_seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let second_seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let executor = PipelineExecutor::new(vec![
            Box::new(FakeRecordInput {
                seen: first_seen.clone(),
                produce: Some("first"),
            }),
            Box::new(FakeRecordInput {
                seen: second_seen.clone(),
                produce: Some("second"),
            }),
        ]);

        let outcome = executor.execute(&ctx).await.unwrap();

        // Stage one saw the original input; stage two saw stage one's output.
        assert_eq!(first_seen.lock().unwrap()[0], ws.input());
        assert_eq!(second_seen.lock().unwrap()[0], ws.stage_output("first"));
        match outcome {
            PipelineOutcome::Completed { output } => {
                assert_eq!(output, ws.stage_output("second"));
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unchanged_stage_keeps_current_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws.clone());

        let counter = Arc::new(AtomicUsize::new(0));
        let executor = PipelineExecutor::new(vec![
            Box::new(FakeRemux {
                name: "stage-a",
                executed: counter,
            }),
            Box::new(FakePassThrough),
        ]);

        let outcome = executor.execute(&ctx).await.unwrap();
        match outcome {
            PipelineOutcome::Completed { output } => {
                // The pass-through stage leaves stage-a's output standing.
                assert_eq!(output, ws.stage_output("stage-a"));
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn skip_short_circuits_remaining_stages() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws);

        let counter = Arc::new(AtomicUsize::new(0));
        let executor = PipelineExecutor::new(vec![
            Box::new(FakeSkip),
            Box::new(FakeRemux {
                name: "never",
                executed: counter.clone(),
            }),
        ]);

        let outcome = executor.execute(&ctx).await.unwrap();
        match outcome {
            PipelineOutcome::Skipped { step, reason } => {
                assert_eq!(step, "skipper");
                assert_eq!(reason, "nothing matches");
            }
            other => panic!("expected skip, got {other:?}"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn validation_failure_prevents_execution() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws);

        let executor = PipelineExecutor::new(vec![Box::new(FakeValidateFail)]);
        let result = executor.execute(&ctx).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("validation failed"), "got: {err}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn stage_failure_is_wrapped_with_stage_name() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());
        let ctx = make_ctx(ws);

        let executor = PipelineExecutor::new(vec![Box::new(FakeFail)]);
        let result = executor.execute(&ctx).await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("boom"), "got: {err}");
        assert!(err.contains("intentional failure"), "got: {err}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn progress_reporting() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let ws = Arc::new(trimux_av::Workspace::new(tmp.path()).unwrap());

        let reports = Arc::new(std::sync::Mutex::new(Vec::new()));
        let reports_clone = reports.clone();
        let progress = ProgressSender::new(move |pct, step| {
            reports_clone.lock().unwrap().push((pct, step.to_string()));
        });

        let ctx = make_ctx(ws).with_progress(progress);

        let counter = Arc::new(AtomicUsize::new(0));
        let executor = PipelineExecutor::new(vec![
            Box::new(FakeRemux {
                name: "a",
                executed: counter.clone(),
            }),
            Box::new(FakeRemux {
                name: "b",
                executed: counter,
            }),
        ]);

        executor.execute(&ctx).await.unwrap();

        let rpts = reports.lock().unwrap();
        assert_eq!(rpts.len(), 2);
        assert!((rpts[0].0 - 50.0).abs() < 0.01);
        assert!((rpts[1].0 - 100.0).abs() < 0.01);
        assert_eq!(rpts[1].1, "b");
    }
}
