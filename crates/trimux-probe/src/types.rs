//! Core types for probe results.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trimux_core::StreamKind;

/// Complete stream inventory of one container, extracted by probing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// Path to the probed file.
    pub file_path: PathBuf,
    /// File size in bytes.
    pub file_size: u64,
    /// Container format name as reported by the prober.
    pub format_name: Option<String>,
    /// Total duration (if determinable).
    pub duration: Option<Duration>,
    /// Every stream in the container, in container order.
    pub streams: Vec<StreamDescriptor>,
}

impl ProbeReport {
    /// All audio streams, in ascending index order.
    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams
            .iter()
            .filter(|s| s.kind == StreamKind::Audio)
    }

    /// All subtitle streams, in ascending index order.
    pub fn subtitle_streams(&self) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams
            .iter()
            .filter(|s| s.kind == StreamKind::Subtitle)
    }

    /// Whether the container carries any subtitle stream.
    pub fn has_subtitles(&self) -> bool {
        self.subtitle_streams().next().is_some()
    }
}

/// A single stream within a container.
///
/// Immutable once read; the `index` is the container-global stream index
/// the external muxer addresses streams by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Container-global stream index.
    pub index: usize,
    /// Stream classification.
    pub kind: StreamKind,
    /// Codec name as reported by the prober (e.g. "aac", "hevc").
    pub codec: Option<String>,
    /// Language tag (ISO 639-2 or IETF), if the stream carries one.
    pub language: Option<String>,
    /// Whether this is the default stream of its kind.
    pub default: bool,
}
