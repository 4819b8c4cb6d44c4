//! Stage factory: build the fixed per-file pipeline from a removal request.

use crate::action::Action;
use crate::actions::{StripAudioAction, StripSubtitlesAction};

/// The removal settings of one batch run.
#[derive(Debug, Clone)]
pub struct RemovalRequest {
    /// Language tag of the audio stream to drop (e.g. "eng").
    pub language: String,
    /// Whether to also drop every subtitle stream.
    pub strip_subtitles: bool,
}

/// Create the stage list for a removal request.
///
/// The pipeline is fixed: the audio stage always runs, the subtitle stage
/// only when requested. Tool availability is validated eagerly so missing
/// tools are reported before any file is touched.
///
/// # Errors
///
/// Returns [`trimux_core::Error::Validation`] for an empty language code and
/// [`trimux_core::Error::Tool`] if ffmpeg or ffprobe is missing.
pub fn create_actions(
    request: &RemovalRequest,
    tools: &trimux_av::ToolRegistry,
) -> trimux_core::Result<Vec<Box<dyn Action>>> {
    if request.language.trim().is_empty() {
        return Err(trimux_core::Error::Validation(
            "language code is empty".into(),
        ));
    }

    tools.require("ffmpeg")?;
    tools.require("ffprobe")?;

    let mut actions: Vec<Box<dyn Action>> = Vec::with_capacity(2);
    actions.push(Box::new(StripAudioAction::new(request.language.clone())));
    if request.strip_subtitles {
        actions.push(Box::new(StripSubtitlesAction));
    }

    Ok(actions)
}
