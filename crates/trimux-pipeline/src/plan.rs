//! Stream selection and remux planning.
//!
//! Pure functions from a probed stream inventory and a removal criterion to
//! the ordered list of stream indices the remux keeps. No side effects; a
//! plan is recomputed per file and discarded after the remux runs.

use trimux_core::StreamKind;
use trimux_probe::StreamDescriptor;

/// What a remux run should remove from a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalCriterion {
    /// Remove the first audio stream whose language tag equals the code.
    AudioLanguage(String),
    /// Remove every subtitle stream.
    AllSubtitles,
}

impl RemovalCriterion {
    /// Produce the remux plan for this criterion against an inventory.
    pub fn plan(&self, streams: &[StreamDescriptor]) -> Result<RemuxPlan, PlanRejection> {
        match self {
            Self::AudioLanguage(code) => plan_audio_removal(streams, code),
            Self::AllSubtitles => plan_subtitle_removal(streams),
        }
    }
}

/// An ordered selection of stream indices to carry into the output
/// container.
///
/// The retained sequence is exactly the complement of the removed set,
/// preserving the container's original stream order. Execution always runs
/// in stream-copy mode, so a plan never carries encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemuxPlan {
    retained: Vec<usize>,
    removed: Vec<usize>,
}

impl RemuxPlan {
    /// Retained stream indices, in original container order.
    pub fn retained(&self) -> &[usize] {
        &self.retained
    }

    /// The indices this plan removes.
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }
}

/// Expected, non-fatal reasons a plan cannot be produced.
///
/// These are ordinary outcomes on the normal control path, not hard errors:
/// the caller reacts by skipping the file or promoting it unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanRejection {
    /// No audio stream carries the requested language tag.
    #[error("no audio stream tagged '{language}'")]
    NoMatchingAudio {
        /// The language code that was looked for.
        language: String,
    },

    /// The container has no subtitle streams to remove.
    #[error("no subtitle streams present")]
    NoSubtitles,
}

/// Plan the removal of the first audio stream tagged with `language`.
///
/// Streams are scanned in container order; the language comparison is exact
/// and case-sensitive. When several audio streams carry the tag, only the
/// lowest-indexed one is removed and the duplicates stay. When none does,
/// the plan is rejected with [`PlanRejection::NoMatchingAudio`] and the
/// caller must leave the input unmodified.
pub fn plan_audio_removal(
    streams: &[StreamDescriptor],
    language: &str,
) -> Result<RemuxPlan, PlanRejection> {
    let removed = streams
        .iter()
        .find(|s| s.kind == StreamKind::Audio && s.language.as_deref() == Some(language))
        .map(|s| s.index)
        .ok_or_else(|| PlanRejection::NoMatchingAudio {
            language: language.to_string(),
        })?;

    Ok(complement(streams, &[removed]))
}

/// Plan the removal of every subtitle stream.
///
/// Subtitle removal is all-or-nothing: the plan drops every subtitle index,
/// or is rejected with [`PlanRejection::NoSubtitles`] when there are none
/// (a no-op signal, not a failure).
pub fn plan_subtitle_removal(streams: &[StreamDescriptor]) -> Result<RemuxPlan, PlanRejection> {
    let removed: Vec<usize> = streams
        .iter()
        .filter(|s| s.kind == StreamKind::Subtitle)
        .map(|s| s.index)
        .collect();

    if removed.is_empty() {
        return Err(PlanRejection::NoSubtitles);
    }

    Ok(complement(streams, &removed))
}

/// Retain everything except `removed`, preserving container order.
fn complement(streams: &[StreamDescriptor], removed: &[usize]) -> RemuxPlan {
    let retained = streams
        .iter()
        .map(|s| s.index)
        .filter(|i| !removed.contains(i))
        .collect();

    RemuxPlan {
        retained,
        removed: removed.to_vec(),
    }
}
