//! Strip one audio language stage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::action::{Action, ActionOutcome};
use crate::context::ActionContext;
use crate::plan::plan_audio_removal;

/// Remove the first audio stream tagged with the configured language.
///
/// When no audio stream carries the tag, the whole file is skipped: it is
/// left unprocessed and no output is produced for it.
#[derive(Debug)]
pub struct StripAudioAction {
    language: String,
}

impl StripAudioAction {
    /// Create the stage for the given language code (e.g. "eng").
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

#[async_trait]
impl Action for StripAudioAction {
    fn name(&self) -> &'static str {
        "Strip Audio"
    }

    async fn validate(&self, ctx: &ActionContext) -> trimux_core::Result<()> {
        ctx.tools.require("ffmpeg")?;
        Ok(())
    }

    async fn execute(
        &self,
        ctx: &ActionContext,
        input: &Path,
    ) -> trimux_core::Result<ActionOutcome> {
        // This stage runs first, so the up-front probe of the workspace
        // input normally applies; re-probe only if handed another path.
        let report = if input == ctx.workspace.input() {
            Arc::clone(&ctx.report)
        } else {
            Arc::new(ctx.prober.probe(input)?)
        };

        let plan = match plan_audio_removal(&report.streams, &self.language) {
            Ok(plan) => plan,
            Err(rejection) => return Ok(ActionOutcome::Skipped(rejection.to_string())),
        };

        if ctx.dry_run {
            tracing::info!(
                "[DRY RUN] Would remux {} dropping stream {:?}, keeping {:?}",
                input.display(),
                plan.removed(),
                plan.retained()
            );
            return Ok(ActionOutcome::Unchanged);
        }

        let staged = ctx.workspace.stage_output("strip-audio");
        trimux_av::remux_streams(&ctx.tools, input, &staged, plan.retained()).await?;

        Ok(ActionOutcome::Remuxed(staged))
    }
}
