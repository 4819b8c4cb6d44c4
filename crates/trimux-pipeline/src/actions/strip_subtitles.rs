//! Strip all subtitles stage.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::action::{Action, ActionOutcome};
use crate::context::ActionContext;
use crate::plan::plan_subtitle_removal;

/// Remove every subtitle stream from the current file.
///
/// Runs after the audio stage, so its input is usually a staged
/// intermediate whose stream indices have shifted; the file is re-probed
/// before planning. A container without subtitles passes through untouched
/// and is promoted to the final output as-is.
#[derive(Debug)]
pub struct StripSubtitlesAction;

#[async_trait]
impl Action for StripSubtitlesAction {
    fn name(&self) -> &'static str {
        "Strip Subtitles"
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
        let report = if input == ctx.workspace.input() {
            Arc::clone(&ctx.report)
        } else {
            Arc::new(ctx.prober.probe(input)?)
        };

        let plan = match plan_subtitle_removal(&report.streams) {
            Ok(plan) => plan,
            Err(rejection) => {
                tracing::info!("{}: {rejection}; passing through", input.display());
                return Ok(ActionOutcome::Unchanged);
            }
        };

        if ctx.dry_run {
            tracing::info!(
                "[DRY RUN] Would remux {} dropping streams {:?}, keeping {:?}",
                input.display(),
                plan.removed(),
                plan.retained()
            );
            return Ok(ActionOutcome::Unchanged);
        }

        let staged = ctx.workspace.stage_output("strip-subtitles");
        trimux_av::remux_streams(&ctx.tools, input, &staged, plan.retained()).await?;

        Ok(ActionOutcome::Remuxed(staged))
    }
}
