//! FFprobe-based [`trimux_probe::Prober`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`trimux_probe::ProbeReport`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use trimux_core::StreamKind;
use trimux_probe::types::{ProbeReport, StreamDescriptor};
use trimux_probe::Prober;

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
    /// Maximum time one probe may run.
    timeout: Duration,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self {
            ffprobe_path,
            timeout: Duration::from_secs(60),
        }
    }

    /// Create a prober from a discovered tool registry, carrying the
    /// registry's probe timeout.
    pub fn from_registry(tools: &ToolRegistry) -> trimux_core::Result<Self> {
        let cfg = tools.require("ffprobe")?;
        Ok(Self {
            ffprobe_path: cfg.path.clone(),
            timeout: cfg.timeout,
        })
    }

    /// Create a prober that finds ffprobe on `PATH`.
    pub fn from_path() -> Option<Self> {
        which::which("ffprobe").ok().map(Self::new)
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn probe(&self, path: &Path) -> trimux_core::Result<ProbeReport> {
        // The Prober trait is sync, but ToolCommand is async; run the probe
        // on whatever runtime is available.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                // We are inside a tokio runtime already; use block_in_place.
                tokio::task::block_in_place(|| handle.block_on(self.probe_async(path)))
            }
            Err(_) => {
                // No runtime active; create a temporary one.
                let rt = tokio::runtime::Runtime::new().map_err(|e| {
                    trimux_core::Error::Probe(format!("failed to create tokio runtime: {e}"))
                })?;
                rt.block_on(self.probe_async(path))
            }
        }
    }

    fn supports(&self, path: &Path) -> bool {
        // ffprobe supports basically all media formats.
        path.extension().is_some()
    }
}

impl FfprobeProber {
    async fn probe_async(&self, path: &Path) -> trimux_core::Result<ProbeReport> {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.timeout(self.timeout);
        cmd.args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path.to_string_lossy().as_ref());

        // Any execution failure means the tool could not read the file's
        // metadata; surface it as a probe failure.
        let output = cmd
            .execute()
            .await
            .map_err(|e| trimux_core::Error::Probe(e.to_string()))?;

        let ff: FfprobeOutput = serde_json::from_str(&output.stdout)
            .map_err(|e| trimux_core::Error::Probe(format!("ffprobe JSON parse error: {e}")))?;

        parse_ffprobe_output(path, ff)
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: Option<usize>,
    codec_type: Option<String>,
    codec_name: Option<String>,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(default)]
    default: u8,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_ffprobe_output(path: &Path, output: FfprobeOutput) -> trimux_core::Result<ProbeReport> {
    let duration = output
        .format
        .duration
        .and_then(|s| s.parse::<f64>().ok())
        .map(Duration::from_secs_f64);

    let file_size = output
        .format
        .size
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let streams = output
        .streams
        .into_iter()
        .enumerate()
        .map(|(position, stream)| StreamDescriptor {
            // ffprobe reports the container-global index; fall back to the
            // list position, which coincides with it.
            index: stream.index.unwrap_or(position),
            kind: StreamKind::from_codec_type(stream.codec_type.as_deref().unwrap_or("")),
            codec: stream.codec_name,
            language: stream.tags.language,
            default: stream.disposition.default == 1,
        })
        .collect();

    Ok(ProbeReport {
        file_path: path.to_path_buf(),
        file_size,
        format_name: output.format.format_name,
        duration,
        streams,
    })
}
